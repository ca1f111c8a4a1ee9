//! Fixed-rate simulation tick
//!
//! Velocities are per tick, so there is no dt: the clock is expected to call
//! [`tick`] at a steady rate.

use super::collision::{resolve_enemy_player, resolve_projectile_enemy};
use super::geometry::advance;
use super::state::SimulationState;

/// Advance the game state by one tick
///
/// Moves every projectile, then every enemy, then resolves collisions. Returns
/// `false` without touching anything once the run is over.
pub fn tick(state: &mut SimulationState) -> bool {
    if state.is_over() {
        return false;
    }

    state.time_ticks += 1;

    for shot in &mut state.projectiles {
        advance(&mut shot.pos, shot.vel);
    }
    for enemy in &mut state.enemies {
        advance(&mut enemy.pos, enemy.vel);
    }

    resolve_projectile_enemy(state);
    resolve_enemy_player(state);

    true
}
