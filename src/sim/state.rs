//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`SimulationState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Enemies moving, shots flying
    Running,
    /// An enemy reached the player. Terminal.
    Over,
}

/// Visible play area, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self, SetupError> {
        let arena = Self { width, height };
        arena.validate()?;
        Ok(arena)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(SetupError::InvalidArena {
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Spawn ring radius: half width + half height is always past the
    /// visible corner (the half-diagonal), whatever the angle.
    #[inline]
    pub fn spawn_distance(&self) -> f32 {
        self.width / 2.0 + self.height / 2.0
    }
}

/// Per-entity speeds and sizes. Speeds are in pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub player_radius: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub enemy_speed: f32,
    pub enemy_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            enemy_speed: ENEMY_SPEED,
            enemy_radius: ENEMY_RADIUS,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), SetupError> {
        let fields = [
            ("player_radius", self.player_radius),
            ("bullet_speed", self.bullet_speed),
            ("bullet_radius", self.bullet_radius),
            ("enemy_speed", self.enemy_speed),
            ("enemy_radius", self.enemy_radius),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(SetupError::setting(
                    name,
                    format!("must be finite and positive, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// The player avatar. Placed once at the arena center and never moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

/// A player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at creation
    pub vel: Vec2,
    pub radius: f32,
}

/// An incoming enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Aimed at the player once, at spawn. Enemies don't home.
    pub vel: Vec2,
    pub radius: f32,
}

/// Things that happened in the simulation, for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    ProjectileFired { id: u32 },
    /// A projectile and an enemy destroyed each other
    EnemyDestroyed { enemy_id: u32, projectile_id: u32 },
    /// Emitted exactly once per run
    GameOver { enemy_id: u32, tick: u64 },
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Live shots, in firing order
    pub projectiles: Vec<Projectile>,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// Create a fresh run with the player at the arena center
    pub fn new(arena: Arena, tuning: Tuning, seed: u64) -> Result<Self, SetupError> {
        arena.validate()?;
        tuning.validate()?;

        Ok(Self {
            seed,
            arena,
            tuning,
            time_ticks: 0,
            phase: GamePhase::Running,
            player: Player {
                pos: arena.center(),
                radius: tuning.player_radius,
            },
            projectiles: Vec::new(),
            enemies: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        })
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events not yet consumed, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn projectile(&self, id: u32) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_at_center() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let state = SimulationState::new(arena, Tuning::default(), 1).unwrap();
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.radius, PLAYER_RADIUS);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_invalid_arena_rejected() {
        assert!(matches!(
            Arena::new(0.0, 600.0),
            Err(SetupError::InvalidArena { .. })
        ));
        assert!(Arena::new(f32::NAN, 600.0).is_err());
        assert!(Arena::new(800.0, f32::INFINITY).is_err());

        // Fields are public, so the state re-checks them
        let arena = Arena {
            width: -1.0,
            height: 10.0,
        };
        assert!(SimulationState::new(arena, Tuning::default(), 1).is_err());
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let tuning = Tuning {
            enemy_speed: 0.0,
            ..Default::default()
        };
        let err = SimulationState::new(arena, tuning, 1).unwrap_err();
        assert!(matches!(
            err,
            SetupError::InvalidSettings {
                name: "enemy_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let mut state = SimulationState::new(arena, Tuning::default(), 1).unwrap();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_id_wraps_instead_of_overflowing() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let mut state = SimulationState::new(arena, Tuning::default(), 1).unwrap();
        state.next_id = u32::MAX;
        assert_eq!(state.next_entity_id(), u32::MAX);
        assert_eq!(state.next_entity_id(), 0);
    }

    #[test]
    fn test_spawn_distance_clears_visible_corner() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let half_diagonal = arena.center().length();
        assert!(arena.spawn_distance() >= half_diagonal);
    }
}
