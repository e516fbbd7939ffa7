//! Reversible transforms applied around a forecast.
//!
//! Contains:
//! - Log / exp transforms for multiplicative models
//! - Min-max scaling with parameters fitted elsewhere

use crate::{MathError, Result};
use ndarray::{Array, Dimension};
use serde::{Deserialize, Serialize};

/// Natural log of every element, rejecting non-positive values.
pub fn log_transform<D: Dimension>(values: &Array<f64, D>) -> Result<Array<f64, D>> {
    if let Some(bad) = values.iter().find(|v| !(**v > 0.0)) {
        return Err(MathError::InvalidInput(format!(
            "log transform requires strictly positive values, found {}",
            bad
        )));
    }

    Ok(values.mapv(f64::ln))
}

/// Exponential of every element.
pub fn exp_transform<D: Dimension>(values: &Array<f64, D>) -> Array<f64, D> {
    values.mapv(f64::exp)
}

/// Min-max scaler for a single feature.
///
/// Maps `[data_min, data_max]` linearly onto `feature_range`. The fitted
/// bounds come from the training step; only the forward and inverse
/// application live here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    data_min: f64,
    data_max: f64,
    feature_range: (f64, f64),
}

impl MinMaxScaler {
    /// Create a scaler from fitted bounds and a target range
    pub fn new(data_min: f64, data_max: f64, feature_range: (f64, f64)) -> Result<Self> {
        if !data_min.is_finite() || !data_max.is_finite() {
            return Err(MathError::InvalidInput(
                "Fitted data bounds must be finite".to_string(),
            ));
        }

        if data_min > data_max {
            return Err(MathError::InvalidInput(format!(
                "Fitted minimum ({}) exceeds fitted maximum ({})",
                data_min, data_max
            )));
        }

        let (low, high) = feature_range;
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(MathError::InvalidInput(format!(
                "Feature range ({}, {}) must be finite and increasing",
                low, high
            )));
        }

        Ok(Self {
            data_min,
            data_max,
            feature_range,
        })
    }

    /// Fitted minimum of the original data
    pub fn data_min(&self) -> f64 {
        self.data_min
    }

    /// Fitted maximum of the original data
    pub fn data_max(&self) -> f64 {
        self.data_max
    }

    /// Target range of the scaled data
    pub fn feature_range(&self) -> (f64, f64) {
        self.feature_range
    }

    // A constant feature keeps a unit data range so the transform stays finite.
    fn scale(&self) -> f64 {
        let data_range = self.data_max - self.data_min;
        let data_range = if data_range == 0.0 { 1.0 } else { data_range };
        (self.feature_range.1 - self.feature_range.0) / data_range
    }

    /// Map a value from data units into the feature range
    pub fn transform_value(&self, value: f64) -> f64 {
        (value - self.data_min) * self.scale() + self.feature_range.0
    }

    /// Map a value from the feature range back into data units
    pub fn inverse_transform_value(&self, value: f64) -> f64 {
        (value - self.feature_range.0) / self.scale() + self.data_min
    }

    /// Apply the forward transform to every element
    pub fn transform<D: Dimension>(&self, values: &Array<f64, D>) -> Array<f64, D> {
        values.mapv(|v| self.transform_value(v))
    }

    /// Apply the inverse transform to every element
    pub fn inverse_transform<D: Dimension>(&self, values: &Array<f64, D>) -> Array<f64, D> {
        values.mapv(|v| self.inverse_transform_value(v))
    }
}
