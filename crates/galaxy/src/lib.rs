//! Gravitational simulation of planets and comets
//!
//! Bodies live in a [`world::World`] and attract each other with unsoftened
//! Newtonian gravity. A [`simulator::Simulator`] advances the world with a
//! leapfrog integrator, merges colliding bodies and reports the mergers so
//! front ends can follow bodies that disappeared. Every body keeps bounded
//! histories of its positions and velocities.

pub mod body;
pub mod collisions;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod gravity;
pub mod history;
pub mod integrator;
pub mod scenario;
pub mod simulator;
pub mod vector;
pub mod world;

pub use error::{Result, ScenarioError, SimulationError};

#[cfg(test)]
mod gravity_test;
#[cfg(test)]
mod history_test;
#[cfg(test)]
mod integrator_test;
#[cfg(test)]
mod world_test;
