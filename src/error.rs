//! Error types for the Verlet Sandbox.
//!
//! Physics operations are total; only building a world from user-supplied
//! configuration can fail. This module provides [`SimError`] and a [`Result`] alias.

use std::fmt;

/// Errors raised while validating configuration or constructing a world.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A configuration field holds a value the simulation cannot run with.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// The viewport is negative or non-finite.
    InvalidViewport { width: f64, height: f64 },
}

impl SimError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidConfig { field, reason } => {
                write!(f, "Invalid config field `{field}`: {reason}")
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport {width}x{height}")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenient Result type alias for fallible sandbox operations.
pub type Result<T> = std::result::Result<T, SimError>;
