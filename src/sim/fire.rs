//! Player fire command

use glam::Vec2;

use super::geometry::{angle_to, unit_from_angle, velocity_from_angle};
use super::state::{GameEvent, Projectile, SimulationState};

/// Fire a shot from the player toward `aim`
///
/// The shot starts on the avatar's edge rather than its center. Returns the new
/// projectile's id, or `None` if the run is over or the aim point isn't finite.
pub fn fire(state: &mut SimulationState, aim: Vec2) -> Option<u32> {
    if state.is_over() {
        log::debug!("Fire ignored: run is over");
        return None;
    }
    if !aim.is_finite() {
        log::warn!("Fire ignored: non-finite aim point {:?}", aim);
        return None;
    }

    let origin = state.player.pos;
    let angle = angle_to(origin, aim);
    let pos = origin + unit_from_angle(angle) * state.player.radius;
    let vel = velocity_from_angle(angle, state.tuning.bullet_speed);

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos,
        vel,
        radius: state.tuning.bullet_radius,
    });
    state.push_event(GameEvent::ProjectileFired { id });

    log::debug!("Projectile {} fired at angle {:.3}", id, angle);
    Some(id)
}
