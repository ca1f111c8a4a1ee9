//! Orbit Shooter - a minimal arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `render`: Render sink seam the simulation pushes positions into
//! - `clock`: Fixed-cadence scheduling of ticks and spawns
//! - `session`: Owns the simulation and its visuals for one run
//! - `platform`: Browser canvas backend
//! - `settings`: Data-driven gameplay constants

pub mod clock;
pub mod error;
pub mod platform;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use clock::{ClockSteps, FixedClock};
pub use error::SetupError;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const FRAME_RATE: u32 = 60;
    /// Wall-clock period between enemy spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Longest frame the clock will account for (ms), so a stalled tab doesn't flood the sim
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Highest accepted tick rate
    pub const MAX_FRAME_RATE: u32 = 1000;
    /// Longest gap the spawner catches up on (ms), e.g. after a backgrounded tab
    pub const MAX_SPAWN_CATCHUP_MS: f64 = 10_000.0;
    /// Spawn cap for a single clock advance
    pub const MAX_SPAWNS_PER_ADVANCE: u32 = 4;
    /// Undrained session events kept for presentation layers
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Player avatar radius
    pub const PLAYER_RADIUS: f32 = 30.0;

    /// Projectile defaults (pixels per tick)
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_RADIUS: f32 = 5.0;

    /// Enemy defaults (pixels per tick)
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const ENEMY_RADIUS: f32 = 15.0;

    /// Arena used when no canvas is available (headless runs)
    pub const HEADLESS_ARENA_WIDTH: f32 = 800.0;
    pub const HEADLESS_ARENA_HEIGHT: f32 = 600.0;
}
