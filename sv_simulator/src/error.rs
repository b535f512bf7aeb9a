//! Error types of the simulator.
use definitions::MutationType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    UnsupportedMutationType(#[from] definitions::UnsupportedMutationType),
    /// No chromosome (or pair of chromosomes) admits the mutation within the retry budget.
    #[error("no feasible {mutation_type} found after {attempts} attempts")]
    Feasibility {
        mutation_type: MutationType,
        attempts: usize,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The mutation does not fit the genome it is applied to.
    #[error("invalid mutation: {0}")]
    InvalidMutation(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

impl SimulationError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
    pub fn invalid_mutation(message: impl Into<String>) -> Self {
        Self::InvalidMutation(message.into())
    }
}
