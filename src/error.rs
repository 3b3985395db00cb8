use std::collections::TryReserveError;

/// Errors returned by training, inference and the linear-algebra primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Scratch allocation failed or its size overflowed.
    #[error("system error: {0}")]
    System(String),

    /// The regularized normal matrix is not positive definite.
    #[error("arithmetic error: matrix is not positive definite (pivot {pivot} at index {index})")]
    Arithmetic { index: usize, pivot: f64 },

    /// Operand shapes do not conform.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// A hyperparameter or input value is outside its domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("model not fitted, call fit() first")]
    NotFitted,
}

impl Error {
    pub(crate) fn dimension(context: &'static str, expected: usize, got: usize) -> Self {
        Error::DimensionMismatch {
            context,
            expected,
            got,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Error::System(_) => Status::SystemError,
            Error::Arithmetic { .. } => Status::ArithmeticError,
            Error::DimensionMismatch { .. } => Status::DimensionMismatch,
            Error::InvalidParameter { .. } => Status::InvalidParameter,
            Error::NotFitted => Status::NotFitted,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::System(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Integer status codes for callers that need a flat numeric outcome.
///
/// `0`, `1` and `2` keep their conventional meaning (success, allocation
/// failure, decomposition failure); the remaining codes cover the checks this
/// crate adds on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Status {
    Success = 0,
    SystemError = 1,
    ArithmeticError = 2,
    DimensionMismatch = 3,
    InvalidParameter = 4,
    NotFitted = 5,
}

impl Status {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl<T> From<&Result<T>> for Status {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(err) => err.status(),
        }
    }
}

impl From<Status> for u32 {
    fn from(status: Status) -> Self {
        status.code()
    }
}
