//! Time integration for the bodies of a world
//!
//! The integrator is a kick-drift-kick leapfrog. Simulated time is covered by
//! a series of sub-steps whose size depends on how many bodies are alive, see
//! [`SubstepSchedule`]. The energy error grows with the sub-step size, so the
//! schedule keeps sub-steps short for small populations.

use crate::vector::Vector2D;
use crate::world::World;

/// Sub-step size and trajectory resolution for a population size
///
/// Small systems get fine sub-steps and long trajectories, large ones trade
/// fidelity for speed.
///
/// | live bodies | base sub-step | trajectory limit |
/// |-------------|---------------|------------------|
/// | ≤ 10        | speed / 1000  | 100              |
/// | ≤ 100       | speed / 100   | 10               |
/// | more        | speed / 10    | 5                |
///
/// # Examples
///
/// ```
/// use galaxy::integrator::SubstepSchedule;
///
/// let schedule = SubstepSchedule::for_population(2, 86_400.0);
/// assert_eq!(schedule.dt_min, 86.4);
/// assert_eq!(schedule.trajectory_limit, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstepSchedule {
    /// Longest allowed sub-step in simulated seconds
    pub dt_min: f64,
    /// Number of positions every trajectory keeps
    pub trajectory_limit: usize,
}

impl SubstepSchedule {
    pub fn for_population(body_count: usize, speed: f64) -> Self {
        let (divisor, trajectory_limit) = match body_count {
            0..=10 => (1000.0, 100),
            11..=100 => (100.0, 10),
            _ => (10.0, 5),
        };

        Self {
            dt_min: speed / divisor,
            trajectory_limit,
        }
    }
}

/// A time integrator advancing every body of a world together
pub trait Integrator: Send + Sync {
    /// Advance the world by one sub-step of `dt` simulated seconds
    fn step(&self, world: &mut World, dt: f64);

    /// Advance the world by `t` simulated seconds in sub-steps no longer than `dt_min`
    ///
    /// Returns the number of sub-steps taken.
    fn advance(&self, world: &mut World, t: f64, dt_min: f64) -> usize {
        if dt_min <= 0.0 || !t.is_finite() {
            return 0;
        }

        let mut remaining = t;
        let mut substeps = 0;
        while remaining > 0.0 {
            let dt = remaining.min(dt_min);
            self.step(world, dt);
            remaining -= dt;
            substeps += 1;
        }
        substeps
    }
}

/// Kick-drift-kick leapfrog integrator
///
/// Every sub-step evaluates the accelerations of all bodies once, before any
/// of them moves, and applies them on both sides of the drift:
///
/// 1. Kick: v += a · dt/2
/// 2. Drift: x += v · dt
/// 3. Kick: v += a · dt/2
///
/// # Examples
///
/// ```
/// use galaxy::body::Body;
/// use galaxy::integrator::{Integrator, Leapfrog};
/// use galaxy::vector::Vector2D;
/// use galaxy::world::World;
///
/// let mut world = World::with_bodies(
///     1.0,
///     [
///         Body::planet("a", Vector2D::new(-10.0, 0.0), Vector2D::zeros(), 1.0).unwrap(),
///         Body::planet("b", Vector2D::new(10.0, 0.0), Vector2D::zeros(), 1.0).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// Leapfrog.step(&mut world, 0.1);
///
/// // The bodies start falling towards each other
/// assert!(world.body("a").unwrap().velocity().x() > 0.0);
/// assert!(world.body("b").unwrap().velocity().x() < 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Leapfrog;

impl Leapfrog {
    /// Perform a kick: update velocities by `a · dt_half`
    fn kick(world: &mut World, accelerations: &[Vector2D], dt_half: f64) {
        world
            .bodies_mut()
            .zip(accelerations)
            .for_each(|(body, acceleration)| body.change_velocity_by(&(acceleration * dt_half)));
    }

    /// Perform a drift: update positions by `v · dt`
    fn drift(world: &mut World, dt: f64) {
        world.bodies_mut().for_each(|body| {
            let displacement = body.velocity() * dt;
            body.change_position_by(&displacement);
        });
    }
}

impl Integrator for Leapfrog {
    fn step(&self, world: &mut World, dt: f64) {
        let accelerations = world.accelerations();
        Self::kick(world, &accelerations, 0.5 * dt);
        Self::drift(world, dt);
        Self::kick(world, &accelerations, 0.5 * dt);
    }
}
