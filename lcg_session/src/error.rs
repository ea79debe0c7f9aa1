use thiserror::Error;

/// Inputs rejected before any generator or session state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidParameter {
    #[error("modulus must be positive, got {0}")]
    NonPositiveModulus(i64),

    #[error("sequence length must be at least 1")]
    EmptySequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] InvalidParameter),
}

pub type Result<T> = std::result::Result<T, Error>;
