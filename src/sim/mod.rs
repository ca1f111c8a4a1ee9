//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-rate ticks only (velocities are per tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fire;
pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{ProjectileHit, resolve_enemy_player, resolve_projectile_enemy};
pub use fire::fire;
pub use geometry::{advance, angle_to, circles_overlap, unit_from_angle, velocity_from_angle};
pub use spawner::{spawn_enemy, spawn_enemy_at_angle};
pub use state::{
    Arena, Enemy, GameEvent, GamePhase, Player, Projectile, SimulationState, Tuning,
};
pub use tick::tick;
