//! # DLT Math
//!
//! Numeric helpers shared by the damped local trend forecast engine.
//! This crate provides the reversible transforms applied around a forecast
//! (log/exp and fitted min-max scaling) and summaries of posterior draws
//! along the draw axis.

use thiserror::Error;

pub mod scaling;
pub mod summary;

pub use crate::scaling::{exp_transform, log_transform, MinMaxScaler};
pub use crate::summary::{mean_over_draws, median_over_draws, DrawSummary};

/// Errors that can occur in transform and summary calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric helper operations
pub type Result<T> = std::result::Result<T, MathError>;
