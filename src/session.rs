//! One run of the game
//!
//! A [`Session`] owns the simulation state, the fixed clock and the render
//! sink, and keeps a visual for every live entity in step with the
//! simulation. Tick, spawn and fire all take `&mut self`, so they can never
//! interleave.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;

use crate::clock::FixedClock;
use crate::consts::MAX_PENDING_EVENTS;
use crate::error::SetupError;
use crate::render::{EntityKind, RenderSink, VisualHandle};
use crate::settings::Settings;
use crate::sim::{self, Arena, Enemy, GameEvent, GamePhase, Player, Projectile, SimulationState};

type GameOverCallback = Box<dyn FnMut(&GameOver)>;

/// Details passed to the game-over callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub enemy_id: u32,
    /// Ticks survived
    pub tick: u64,
}

pub struct Session<R: RenderSink> {
    state: SimulationState,
    clock: FixedClock,
    sink: R,
    player_visual: VisualHandle,
    /// Entity id -> visual
    visuals: BTreeMap<u32, VisualHandle>,
    /// Events already applied to the sink, waiting for the presentation layer.
    /// Holds the newest `MAX_PENDING_EVENTS`; older ones are dropped.
    events: VecDeque<GameEvent>,
    on_game_over: Option<GameOverCallback>,
}

impl<R: RenderSink> Session<R> {
    /// Start a run in an arena of `width` x `height`
    ///
    /// Fails if the arena or settings are unusable; a session that exists can
    /// always spawn.
    pub fn new(
        settings: &Settings,
        width: f32,
        height: f32,
        seed: u64,
        mut sink: R,
    ) -> Result<Self, SetupError> {
        settings.validate()?;
        let arena = Arena::new(width, height)?;
        let state = SimulationState::new(arena, settings.tuning(), seed)?;

        let player_visual =
            sink.create_visual(EntityKind::Player, state.player.radius, EntityKind::Player.color());
        sink.set_position(player_visual, state.player.pos);

        log::info!(
            "Session started: arena {}x{}, seed {}",
            width,
            height,
            seed
        );

        Ok(Self {
            state,
            clock: settings.clock(),
            sink,
            player_visual,
            visuals: BTreeMap::new(),
            events: VecDeque::new(),
            on_game_over: None,
        })
    }

    /// Register the game-over notification. Called at most once per run.
    pub fn on_game_over(&mut self, callback: impl FnMut(&GameOver) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    /// Run one simulation step and present a frame
    pub fn tick(&mut self) {
        sim::tick(&mut self.state);
        self.sync();
        self.sink.present_frame();
    }

    /// Spawn one enemy now
    pub fn spawn_enemy(&mut self) -> Option<u32> {
        let id = sim::spawn_enemy(&mut self.state);
        self.sync();
        id
    }

    /// Fire toward a canvas point
    pub fn fire_at(&mut self, x: f32, y: f32) -> Option<u32> {
        let id = sim::fire(&mut self.state, Vec2::new(x, y));
        self.sync();
        id
    }

    /// Feed wall-clock time, running whatever spawns and ticks are due
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let steps = self.clock.advance(elapsed_ms);
        for _ in 0..steps.spawns {
            self.spawn_enemy();
        }
        for _ in 0..steps.ticks {
            self.tick();
        }
        steps.ticks
    }

    /// Take the events produced since the last call
    ///
    /// Only the newest `MAX_PENDING_EVENTS` are kept between calls.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// End the run: remove every visual and hand the sink back
    pub fn shutdown(mut self) -> R {
        for (_, handle) in std::mem::take(&mut self.visuals) {
            self.sink.remove_visual(handle);
        }
        self.sink.remove_visual(self.player_visual);
        self.sink.present_frame();
        log::info!(
            "Session ended after {} ticks ({:?})",
            self.state.time_ticks,
            self.state.phase
        );
        self.sink
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.state.projectiles
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Apply pending simulation events to the sink, then push positions
    fn sync(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::EnemySpawned { id } => {
                    if let Some(enemy) = self.state.enemy(id) {
                        let handle = self.sink.create_visual(
                            EntityKind::Enemy,
                            enemy.radius,
                            EntityKind::Enemy.color(),
                        );
                        self.visuals.insert(id, handle);
                    }
                }
                GameEvent::ProjectileFired { id } => {
                    if let Some(shot) = self.state.projectile(id) {
                        let handle = self.sink.create_visual(
                            EntityKind::Projectile,
                            shot.radius,
                            EntityKind::Projectile.color(),
                        );
                        self.visuals.insert(id, handle);
                    }
                }
                GameEvent::EnemyDestroyed {
                    enemy_id,
                    projectile_id,
                } => {
                    for id in [enemy_id, projectile_id] {
                        if let Some(handle) = self.visuals.remove(&id) {
                            self.sink.remove_visual(handle);
                        }
                    }
                }
                GameEvent::GameOver { enemy_id, tick } => {
                    if let Some(callback) = self.on_game_over.as_mut() {
                        callback(&GameOver { enemy_id, tick });
                    }
                }
            }
            if self.events.len() == MAX_PENDING_EVENTS {
                self.events.pop_front();
            }
            self.events.push_back(event);
        }

        let positions = self
            .state
            .projectiles
            .iter()
            .map(|p| (p.id, p.pos))
            .chain(self.state.enemies.iter().map(|e| (e.id, e.pos)));
        for (id, pos) in positions {
            if let Some(&handle) = self.visuals.get(&id) {
                self.sink.set_position(handle, pos);
            }
        }
    }
}
