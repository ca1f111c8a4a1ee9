//! Enemy spawning
//!
//! Enemies appear on a ring around the player that lies entirely outside the
//! visible arena, then drift in a straight line toward where the player was
//! when they spawned.

use std::f32::consts::TAU;

use rand::Rng;

use super::geometry::{angle_to, unit_from_angle, velocity_from_angle};
use super::state::{Enemy, GameEvent, SimulationState};

/// Spawn one enemy at a random angle. No-op once the run is over.
pub fn spawn_enemy(state: &mut SimulationState) -> Option<u32> {
    if state.is_over() {
        log::debug!("Spawn ignored: run is over");
        return None;
    }
    let theta = state.rng_mut().random_range(0.0..TAU);
    spawn_enemy_at_angle(state, theta)
}

/// Spawn one enemy on the spawn ring at angle `theta`
///
/// `None` once the run is over or if `theta` isn't finite.
pub fn spawn_enemy_at_angle(state: &mut SimulationState, theta: f32) -> Option<u32> {
    if state.is_over() {
        return None;
    }
    if !theta.is_finite() {
        log::warn!("Spawn ignored: non-finite angle {}", theta);
        return None;
    }

    let target = state.player.pos;
    let pos = target + unit_from_angle(theta) * state.arena.spawn_distance();
    let vel = velocity_from_angle(angle_to(pos, target), state.tuning.enemy_speed);

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        vel,
        radius: state.tuning.enemy_radius,
    });
    state.push_event(GameEvent::EnemySpawned { id });

    log::debug!("Enemy {} spawned at ({:.1}, {:.1})", id, pos.x, pos.y);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, GamePhase, Tuning};
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> SimulationState {
        let arena = Arena::new(800.0, 600.0).unwrap();
        SimulationState::new(arena, Tuning::default(), seed).unwrap()
    }

    fn assert_offscreen_and_inbound(state: &SimulationState, id: u32) {
        let enemy = state.enemy(id).unwrap();
        let player = state.player.pos;
        let dist = enemy.pos.distance(player);
        assert!(dist + 1e-2 >= state.arena.spawn_distance(), "dist {dist}");
        assert!(enemy.vel.dot(player - enemy.pos) > 0.0);
        assert!((enemy.vel.length() - state.tuning.enemy_speed).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_produces_one_enemy() {
        let mut state = new_state(7);
        let id = spawn_enemy(&mut state).unwrap();
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.events(), &[GameEvent::EnemySpawned { id }]);
        assert_offscreen_and_inbound(&state, id);
    }

    #[test]
    fn test_spawn_at_right_of_player() {
        let mut state = new_state(7);
        let id = spawn_enemy_at_angle(&mut state, 0.0).unwrap();
        let enemy = state.enemy(id).unwrap();
        // 400 + (400 + 300)
        assert!((enemy.pos - Vec2::new(1100.0, 300.0)).length() < 1e-3);
        assert!((enemy.vel - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let mut a = new_state(42);
        let mut b = new_state(42);
        for _ in 0..5 {
            spawn_enemy(&mut a);
            spawn_enemy(&mut b);
        }
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.vel, eb.vel);
        }
    }

    #[test]
    fn test_spawn_ignored_when_over() {
        let mut state = new_state(7);
        state.phase = GamePhase::Over;
        assert!(spawn_enemy(&mut state).is_none());
        assert!(state.enemies.is_empty());
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_non_finite_angle_is_noop() {
        let mut state = new_state(7);
        assert!(spawn_enemy_at_angle(&mut state, f32::NAN).is_none());
        assert!(spawn_enemy_at_angle(&mut state, f32::INFINITY).is_none());
        assert!(state.enemies.is_empty());
        assert!(state.events().is_empty());
    }

    proptest! {
        #[test]
        fn spawned_enemies_start_offscreen_and_head_inward(theta in 0.0f32..TAU) {
            let mut state = new_state(1);
            let id = spawn_enemy_at_angle(&mut state, theta).unwrap();
            assert_offscreen_and_inbound(&state, id);
        }

        #[test]
        fn random_spawns_start_offscreen(seed in any::<u64>()) {
            let mut state = new_state(seed);
            let id = spawn_enemy(&mut state).unwrap();
            assert_offscreen_and_inbound(&state, id);
        }
    }
}
