//! Fixed-cadence scheduler
//!
//! Turns variable frame times into a whole number of simulation ticks and
//! enemy spawns. Ticks run at the frame rate; spawns run on their own
//! wall-clock period, independent of how many ticks happened.

use crate::consts::{MAX_FRAME_MS, MAX_SPAWNS_PER_ADVANCE, MAX_SPAWN_CATCHUP_MS, MAX_SUBSTEPS};

/// Work due after advancing the clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockSteps {
    pub ticks: u32,
    pub spawns: u32,
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    tick_interval_ms: f64,
    spawn_interval_ms: f64,
    max_substeps: u32,
    tick_accumulator: f64,
    spawn_accumulator: f64,
}

impl FixedClock {
    pub fn new(frame_rate: u32, spawn_interval_ms: f64, max_substeps: u32) -> Self {
        let tick_interval_ms = 1000.0 / frame_rate.max(1) as f64;
        Self {
            tick_interval_ms,
            // Never spawn more often than we tick
            spawn_interval_ms: if spawn_interval_ms.is_finite() {
                spawn_interval_ms.max(tick_interval_ms)
            } else {
                tick_interval_ms
            },
            max_substeps: max_substeps.max(1),
            tick_accumulator: 0.0,
            spawn_accumulator: 0.0,
        }
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.tick_interval_ms
    }

    /// Account for `elapsed_ms` of wall time
    ///
    /// Negative or non-finite input counts as zero. Ticks see at most
    /// `MAX_FRAME_MS` per call and never exceed the substep cap. Spawns follow
    /// real wall time, up to `MAX_SPAWN_CATCHUP_MS` and `MAX_SPAWNS_PER_ADVANCE`
    /// per call, so only a stalled tab loses spawns.
    pub fn advance(&mut self, elapsed_ms: f64) -> ClockSteps {
        let elapsed = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };

        let mut steps = ClockSteps::default();

        self.spawn_accumulator += elapsed.min(MAX_SPAWN_CATCHUP_MS);
        while self.spawn_accumulator >= self.spawn_interval_ms
            && steps.spawns < MAX_SPAWNS_PER_ADVANCE
        {
            self.spawn_accumulator -= self.spawn_interval_ms;
            steps.spawns += 1;
        }
        if steps.spawns == MAX_SPAWNS_PER_ADVANCE {
            self.spawn_accumulator = self.spawn_accumulator.min(self.spawn_interval_ms);
        }

        self.tick_accumulator += elapsed.min(MAX_FRAME_MS);
        while self.tick_accumulator >= self.tick_interval_ms && steps.ticks < self.max_substeps {
            self.tick_accumulator -= self.tick_interval_ms;
            steps.ticks += 1;
        }
        // Drop backlog the substep cap couldn't cover
        if steps.ticks == self.max_substeps {
            self.tick_accumulator = self.tick_accumulator.min(self.tick_interval_ms);
        }

        steps
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        use crate::consts::{FRAME_RATE, SPAWN_INTERVAL_MS};
        Self::new(FRAME_RATE, SPAWN_INTERVAL_MS, MAX_SUBSTEPS)
    }
}
