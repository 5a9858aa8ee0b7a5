//! Error types for the simulation core and scenario ingestion.

use thiserror::Error;

/// Violated preconditions of the simulation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("body `{name}` is already attached to a world")]
    AlreadyAttached { name: String },

    #[error("body `{name}` is not attached to this world")]
    NotAttached { name: String },

    #[error("a body named `{0}` already lives in this world")]
    DuplicateName(String),

    #[error("simulation has already been launched")]
    AlreadyLaunched,

    #[error("simulation speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("elapsed real time must be finite and not negative, got {0}")]
    InvalidElapsed(f64),

    #[error("mass of body `{name}` must be positive and finite, got {mass}")]
    InvalidMass { name: String, mass: f64 },
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Failures while reading a scenario description
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario is missing its `gravitational_constant,speed` header")]
    MissingHeader,

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid number in field `{field}`: {source}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
