//! Headless playback driver
//!
//! Drives a [`SharedSimulator`] from a fixed 1 ms tick the way an interactive
//! front end would: trajectories and velocities are sampled at their own
//! cadences and the simulator steps at the configured frame rate, scaled by a
//! user-adjustable speed-up. Rendering and charting stay with the caller, who
//! reads the shared simulator between ticks.

use crate::error::Result;
use crate::simulator::{SharedSimulator, StepSummary};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ticks in one driver cycle; one tick is one millisecond of real time
pub const TICKS_PER_CYCLE: u32 = 1000;

/// Playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Simulation steps per real second
    pub frames_per_second: u32,
    /// Initial factor applied to elapsed real time
    pub speed_up: f64,
    /// Velocity samples recorded per real second
    pub velocity_samples_per_second: u32,
    /// Real seconds of velocity history kept per body
    pub velocity_window_seconds: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            speed_up: 1.0,
            velocity_samples_per_second: 5,
            velocity_window_seconds: 30,
        }
    }
}

impl PlaybackConfig {
    /// Velocities kept per body: the whole window plus the current one
    pub fn velocity_history_limit(&self) -> usize {
        (self.velocity_window_seconds as usize)
            .saturating_mul(self.velocity_samples_per_second as usize)
            .saturating_add(1)
    }
}

/// Number of ticks between two events happening `per_cycle` times a cycle
fn period(per_cycle: usize) -> u32 {
    (TICKS_PER_CYCLE / per_cycle.clamp(1, TICKS_PER_CYCLE as usize) as u32).max(1)
}

enum Tick {
    Paused,
    Sampled,
    Stepped(StepSummary),
}

/// Periodic update loop around a shared simulator
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use galaxy::body::Body;
/// use galaxy::driver::{Driver, PlaybackConfig};
/// use galaxy::simulator::{SharedSimulator, Simulator};
/// use galaxy::vector::Vector2D;
/// use galaxy::world::World;
///
/// let world = World::with_bodies(
///     1.0,
///     [Body::planet("lonely", Vector2D::zeros(), Vector2D::new(1.0, 0.0), 1.0).unwrap()],
/// )
/// .unwrap();
/// let shared = SharedSimulator::new(Simulator::new(world, 1.0).unwrap());
///
/// let mut driver = Driver::new(shared.clone(), PlaybackConfig::default());
/// driver.launch(Duration::ZERO).unwrap();
///
/// for ms in 1..=1000 {
///     driver.tick(Duration::from_millis(ms)).unwrap();
/// }
///
/// assert!(shared.time() > 0.9);
/// ```
#[derive(Debug)]
pub struct Driver {
    simulator: SharedSimulator,
    config: PlaybackConfig,
    speed_up: f64,
    counter: u32,
    last_update: Duration,
}

impl Driver {
    pub fn new(simulator: SharedSimulator, config: PlaybackConfig) -> Self {
        Self {
            simulator,
            speed_up: config.speed_up,
            config,
            counter: 0,
            last_update: Duration::ZERO,
        }
    }

    pub fn simulator(&self) -> &SharedSimulator {
        &self.simulator
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Sizes every velocity history and launches the simulation at `now`
    pub fn launch(&mut self, now: Duration) -> Result<()> {
        let limit = self.config.velocity_history_limit();
        self.simulator.write(|sim| {
            for body in sim.world().bodies() {
                body.velocity_history().set_limit(limit);
            }
            sim.launch()
        })?;
        self.last_update = now;
        Ok(())
    }

    /// Advances the driver by one tick happening at real time `now`
    ///
    /// Returns the step summary when this tick stepped the simulation. While
    /// the simulation is paused a tick only moves the last update to `now`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidElapsed`](crate::SimulationError::InvalidElapsed)
    /// when the speed-up has grown so large that the step overflows.
    pub fn tick(&mut self, now: Duration) -> Result<Option<StepSummary>> {
        let counter = self.counter;
        let velocity_period = period(self.config.velocity_samples_per_second as usize);
        let frame_period = period(self.config.frames_per_second as usize);
        let velocity_limit = self.config.velocity_history_limit();
        let elapsed = now.saturating_sub(self.last_update).as_secs_f64();
        let speed_up = self.speed_up;

        let outcome = self.simulator.write(|sim| -> Result<Tick> {
            if !sim.is_running() {
                return Ok(Tick::Paused);
            }

            for body in sim.world().bodies() {
                if counter % period(body.trajectory().limit()) == 0 {
                    body.record_trajectory();
                }
            }

            if counter % velocity_period == 0 {
                sim.world().bodies().for_each(|body| body.record_velocity());
            }

            if counter % frame_period != 0 {
                return Ok(Tick::Sampled);
            }

            let summary = sim.step(speed_up * elapsed)?;
            for merged in summary.resolved_collisions().values() {
                if let Some(body) = sim.world().body(&merged.name) {
                    body.velocity_history().set_limit(velocity_limit);
                }
            }
            Ok(Tick::Stepped(summary))
        })?;

        Ok(match outcome {
            Tick::Paused => {
                self.last_update = now;
                None
            }
            Tick::Sampled => {
                self.counter = (counter + 1) % TICKS_PER_CYCLE;
                None
            }
            Tick::Stepped(summary) => {
                self.last_update = now;
                self.counter = (counter + 1) % TICKS_PER_CYCLE;
                Some(summary)
            }
        })
    }

    pub fn speed_up(&self) -> f64 {
        self.speed_up
    }

    /// Doubles the speed-up
    pub fn faster(&mut self) {
        self.speed_up *= 2.0;
    }

    /// Halves the speed-up
    pub fn slower(&mut self) {
        self.speed_up *= 0.5;
    }

    pub fn reset_speed_up(&mut self) {
        self.speed_up = 1.0;
    }
}
