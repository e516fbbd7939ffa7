//! Forecast configuration read from a fitted damped local trend model.

use crate::error::{ForecastError, Result};
use crate::posterior::param;
use serde::{Deserialize, Serialize};

/// How the damped factor of the local slope is obtained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DampedFactor {
    /// A single value shared by every draw
    Fixed(f64),
    /// One value per draw, read from the `damped_factor` posterior
    Sampled,
}

impl Default for DampedFactor {
    fn default() -> Self {
        DampedFactor::Fixed(0.8)
    }
}

/// Sign restriction placed on a regressor's coefficient at fit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegressorSign {
    /// Coefficient restricted to positive values (`+`)
    #[serde(rename = "+")]
    Positive,
    /// Unrestricted coefficient (`=`)
    #[serde(rename = "=")]
    Regular,
}

/// Scalar knobs of a fitted damped local trend model
///
/// # Example
///
/// ```
/// use dlt_forecast::config::{DampedFactor, DltConfig, RegressorSign};
///
/// let config = DltConfig::new()
///     .with_seasonality(7)
///     .with_multiplicative(false)
///     .with_damped_factor(DampedFactor::Fixed(0.9))
///     .with_regressors(&["promo", "price"], &[RegressorSign::Positive, RegressorSign::Regular])
///     .unwrap();
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.regressor_columns(), vec!["promo".to_string(), "price".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DltConfig {
    /// Seasonality period; 0 or 1 disables seasonality
    pub seasonality: usize,
    /// Model fitted on log-transformed data
    pub is_multiplicative: bool,
    /// Response and regressors were min-max scaled at fit time
    pub auto_scale: bool,
    /// Damped factor mode
    pub damped_factor: DampedFactor,
    /// Global trend is logarithmic rather than linear in time
    pub use_log_global_trend: bool,
    /// Regressor columns with positive-constrained coefficients
    pub positive_regressor_col: Vec<String>,
    /// Regressor columns with unconstrained coefficients
    pub regular_regressor_col: Vec<String>,
}

impl Default for DltConfig {
    fn default() -> Self {
        Self {
            seasonality: 0,
            is_multiplicative: true,
            auto_scale: false,
            damped_factor: DampedFactor::default(),
            use_log_global_trend: true,
            positive_regressor_col: Vec::new(),
            regular_regressor_col: Vec::new(),
        }
    }
}

impl DltConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seasonality period
    pub fn with_seasonality(mut self, seasonality: usize) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// Set whether the model is multiplicative
    pub fn with_multiplicative(mut self, is_multiplicative: bool) -> Self {
        self.is_multiplicative = is_multiplicative;
        self
    }

    /// Set whether min-max scaling was applied at fit time
    pub fn with_auto_scale(mut self, auto_scale: bool) -> Self {
        self.auto_scale = auto_scale;
        self
    }

    /// Set the damped factor mode
    pub fn with_damped_factor(mut self, damped_factor: DampedFactor) -> Self {
        self.damped_factor = damped_factor;
        self
    }

    /// Set whether the global trend is logarithmic
    pub fn with_log_global_trend(mut self, use_log_global_trend: bool) -> Self {
        self.use_log_global_trend = use_log_global_trend;
        self
    }

    /// Partition regressor columns by their coefficient sign
    pub fn with_regressors<S: AsRef<str>>(
        mut self,
        columns: &[S],
        signs: &[RegressorSign],
    ) -> Result<Self> {
        if columns.len() != signs.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Regressor columns ({}) and signs ({}) must have the same length",
                columns.len(),
                signs.len()
            )));
        }

        self.positive_regressor_col.clear();
        self.regular_regressor_col.clear();
        for (column, sign) in columns.iter().zip(signs) {
            let column = column.as_ref().to_string();
            match sign {
                RegressorSign::Positive => self.positive_regressor_col.push(column),
                RegressorSign::Regular => self.regular_regressor_col.push(column),
            }
        }

        Ok(self)
    }

    /// Whether the seasonal state is part of the model
    pub fn has_seasonality(&self) -> bool {
        self.seasonality > 1
    }

    /// Total number of regressors
    pub fn num_regressors(&self) -> usize {
        self.positive_regressor_col.len() + self.regular_regressor_col.len()
    }

    /// Regressor columns in coefficient order: positive first, then regular
    pub fn regressor_columns(&self) -> Vec<String> {
        self.positive_regressor_col
            .iter()
            .chain(self.regular_regressor_col.iter())
            .cloned()
            .collect()
    }

    /// Posterior parameters a model with this configuration carries
    pub fn model_param_names(&self) -> Vec<&'static str> {
        let mut names = param::BASE.to_vec();

        if self.has_seasonality() {
            names.extend_from_slice(param::SEASONALITY);
        }
        if self.damped_factor == DampedFactor::Sampled {
            names.push(param::DAMPED_FACTOR);
        }
        if !self.positive_regressor_col.is_empty() {
            names.push(param::POSITIVE_REGRESSOR_BETA);
        }
        if !self.regular_regressor_col.is_empty() {
            names.push(param::REGULAR_REGRESSOR_BETA);
        }

        names
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let DampedFactor::Fixed(value) = self.damped_factor {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ForecastError::InvalidParameter(format!(
                    "Fixed damped factor must be in (0, 1], got {}",
                    value
                )));
            }
        }

        let columns = self.regressor_columns();
        for (i, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(ForecastError::InvalidParameter(
                    "Regressor column names must not be empty".to_string(),
                ));
            }
            if columns[..i].contains(column) {
                return Err(ForecastError::InvalidParameter(format!(
                    "Regressor column '{}' is listed more than once",
                    column
                )));
            }
        }

        Ok(())
    }
}
