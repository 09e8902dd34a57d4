use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("Invalid multiplier: must be >= 1, got {multiplier}")]
    InvalidMultiplier { multiplier: i64 },
}

pub type Result<T> = std::result::Result<T, SolverError>;
