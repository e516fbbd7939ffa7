//! Error types for the dlt_forecast crate

use dlt_math::MathError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the dlt_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Caller input breaks the prediction contract (e.g. unordered dates)
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// The requested prediction window cannot be served
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// The fitted model metadata is unusable
    #[error("Model error: {0}")]
    Model(String),

    /// Error from invalid configuration parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A posterior parameter required by the configuration is absent
    #[error("Missing posterior parameter: {0}")]
    MissingParameter(String),

    /// Posterior arrays disagree with each other or with the expected layout
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A configured regressor column is absent from the prediction frame
    #[error("Missing regressor column: {0}")]
    MissingRegressor(String),

    /// The residual noise distribution could not be built
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// Error from numeric helpers
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from JSON serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::Polars(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ForecastError {
    fn from(err: ndarray::ShapeError) -> Self {
        ForecastError::ShapeMismatch(err.to_string())
    }
}
