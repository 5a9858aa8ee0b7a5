//! Simulation clock and step orchestration
//!
//! A [`Simulator`] owns a [`World`] together with the simulated time and the
//! speed at which simulated time passes relative to real time. Each call to
//! [`Simulator::step`]:
//! 1. Sizes the sub-steps and trajectory limits from the live population
//! 2. Integrates all bodies with the leapfrog integrator
//! 3. Detects and resolves collisions on the integrated state
//!
//! and reports which bodies replaced which.

use crate::body::BodySnapshot;
use crate::collisions::{Cluster, Resolutions};
use crate::error::{Result, SimulationError};
use crate::integrator::{Integrator, Leapfrog, SubstepSchedule};
use crate::world::{World, WorldSnapshot};
use parking_lot::RwLock;
use std::sync::Arc;

/// Whether simulated time is meant to advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Paused,
    Running,
}

/// Summary of one simulation step
#[derive(Debug, Clone, Default)]
pub struct StepSummary {
    resolved: Resolutions,
    substeps: usize,
}

impl StepSummary {
    /// Clusters resolved during the step, each with the body replacing it
    pub fn resolved_collisions(&self) -> &Resolutions {
        &self.resolved
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cluster, &BodySnapshot)> {
        self.resolved.iter()
    }

    /// Body that absorbed the body called `name`, if it collided this step
    pub fn replacement_for(&self, name: &str) -> Option<&BodySnapshot> {
        self.resolved
            .iter()
            .find(|(cluster, _)| cluster.contains(name))
            .map(|(_, merged)| merged)
    }

    /// Names of every body that took part in a collision
    pub fn absorbed_names(&self) -> impl Iterator<Item = &str> {
        self.resolved.keys().flat_map(Cluster::names)
    }

    pub fn substeps(&self) -> usize {
        self.substeps
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Advances a world through simulated time
///
/// # Examples
///
/// ```
/// use galaxy::body::Body;
/// use galaxy::simulator::Simulator;
/// use galaxy::vector::Vector2D;
/// use galaxy::world::World;
///
/// let world = World::with_bodies(
///     6.674e-11,
///     [Body::planet("Earth", Vector2D::zeros(), Vector2D::new(0.0, 1.0), 5.972e24).unwrap()],
/// )
/// .unwrap();
///
/// let mut simulator = Simulator::new(world, 3600.0).unwrap();
/// simulator.launch().unwrap();
///
/// let summary = simulator.step(0.5).unwrap();
/// assert!(summary.is_empty());
/// assert_eq!(simulator.time(), 1800.0);
/// ```
#[derive(Debug)]
pub struct Simulator {
    world: World,
    time: f64,
    speed: f64,
    status: Status,
    integrator: Leapfrog,
}

impl Simulator {
    /// Creates a paused simulation at time zero
    ///
    /// `speed` is the number of simulated seconds per real second.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidSpeed`] unless `speed` is positive and finite.
    pub fn new(world: World, speed: f64) -> Result<Self> {
        validate_speed(speed)?;
        Ok(Self {
            world,
            time: 0.0,
            speed,
            status: Status::Paused,
            integrator: Leapfrog,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Simulated seconds elapsed since launch
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        validate_speed(speed)?;
        self.speed = speed;
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Starts a pristine simulation
    ///
    /// # Errors
    ///
    /// [`SimulationError::AlreadyLaunched`] once simulated time has advanced.
    pub fn launch(&mut self) -> Result<()> {
        if self.time != 0.0 {
            return Err(SimulationError::AlreadyLaunched);
        }
        log::info!("launching simulation of {} bodies", self.world.body_count());
        self.status = Status::Running;
        Ok(())
    }

    pub fn resume(&mut self) {
        log::info!("resuming at t = {:.3e}", self.time);
        self.status = Status::Running;
    }

    pub fn pause(&mut self) {
        log::info!("pausing at t = {:.3e}", self.time);
        self.status = Status::Paused;
    }

    /// Advances the simulation by `elapsed_real_seconds · speed` simulated seconds
    ///
    /// Always advances, whatever the status; callers stop calling it while
    /// paused.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidElapsed`] unless `elapsed_real_seconds` is
    /// finite and not negative, or when scaling it by the speed overflows.
    /// The world is left untouched.
    pub fn step(&mut self, elapsed_real_seconds: f64) -> Result<StepSummary> {
        let elapsed = self.speed * elapsed_real_seconds;
        if !(elapsed.is_finite() && elapsed >= 0.0) {
            return Err(SimulationError::InvalidElapsed(elapsed_real_seconds));
        }
        self.time += elapsed;

        let schedule = SubstepSchedule::for_population(self.world.body_count(), self.speed);
        for body in self.world.bodies() {
            body.trajectory().set_limit(schedule.trajectory_limit);
        }

        let substeps = self.integrator.advance(&mut self.world, elapsed, schedule.dt_min);

        let clusters = self.world.detect_collisions();
        let resolved = self.world.resolve_collisions(clusters);

        log::trace!(
            "t = {:.3e}: {} sub-steps of at most {:.3e}, {} collisions resolved",
            self.time,
            substeps,
            schedule.dt_min,
            resolved.len()
        );

        Ok(StepSummary { resolved, substeps })
    }
}

fn validate_speed(speed: f64) -> Result<()> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidSpeed(speed))
    }
}

/// A simulator shared between a stepping source and concurrent readers
///
/// A step holds the write lock from start to finish, so readers always see
/// the state either before or after a whole step.
///
/// # Examples
///
/// ```
/// use galaxy::simulator::{SharedSimulator, Simulator};
/// use galaxy::world::World;
///
/// let shared = SharedSimulator::new(Simulator::new(World::new(1.0), 1.0).unwrap());
/// let reader = shared.clone();
///
/// shared.launch().unwrap();
/// shared.step(0.25).unwrap();
///
/// assert_eq!(reader.read(|sim| sim.time()), 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct SharedSimulator {
    inner: Arc<RwLock<Simulator>>,
}

impl SharedSimulator {
    pub fn new(simulator: Simulator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(simulator)),
        }
    }

    pub fn step(&self, elapsed_real_seconds: f64) -> Result<StepSummary> {
        self.inner.write().step(elapsed_real_seconds)
    }

    pub fn launch(&self) -> Result<()> {
        self.inner.write().launch()
    }

    pub fn pause(&self) {
        self.inner.write().pause();
    }

    pub fn resume(&self) {
        self.inner.write().resume();
    }

    pub fn is_running(&self) -> bool {
        self.inner.read().is_running()
    }

    pub fn time(&self) -> f64 {
        self.inner.read().time()
    }

    /// Runs `f` against a consistent view of the simulator
    pub fn read<R>(&self, f: impl FnOnce(&Simulator) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Runs `f` with exclusive access to the simulator
    pub fn write<R>(&self, f: impl FnOnce(&mut Simulator) -> R) -> R {
        f(&mut *self.inner.write())
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.inner.read().world().snapshot()
    }
}
