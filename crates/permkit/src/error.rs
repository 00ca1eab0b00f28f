//! Error types for permkit operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("units must be hours, days, months, years (got '{0}')")]
    InvalidUnit(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid permission: {0}")]
    InvalidPermission(String),
}

pub type Result<T> = std::result::Result<T, PermError>;
