//! Typed view over the posterior draws of a fitted model.
//!
//! Every array is indexed by draw along axis 0. The store never hands out
//! mutable access, so a prediction call can only read it.

use crate::config::DltConfig;
use crate::error::{ForecastError, Result};
use dlt_math::{mean_over_draws, median_over_draws};
use ndarray::{Array, Array1, ArrayD, ArrayView2, ArrayViewD, Axis, Dimension, Ix2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Posterior parameter names produced by the sampler
pub mod param {
    /// Local trend levels, `(draws, time)`
    pub const LOCAL_TREND_LEVELS: &str = "l";
    /// Local trend slopes, `(draws, time)`
    pub const LOCAL_TREND_SLOPES: &str = "b";
    /// Local trend component, `(draws, time)`
    pub const LOCAL_TREND: &str = "lt_sum";
    /// Global trend component, `(draws, time)`
    pub const GLOBAL_TREND: &str = "gt_sum";
    /// Global trend level, one per draw
    pub const GLOBAL_TREND_LEVEL: &str = "gl";
    /// Global trend slope, one per draw
    pub const GLOBAL_TREND_SLOPE: &str = "gb";
    /// Level smoothing factor, one per draw
    pub const LEVEL_SMOOTHING_FACTOR: &str = "lev_sm";
    /// Slope smoothing factor, one per draw
    pub const SLOPE_SMOOTHING_FACTOR: &str = "slp_sm";
    /// Residual scale, one per draw
    pub const RESIDUAL_SIGMA: &str = "obs_sigma";
    /// Residual degrees of freedom, one per draw
    pub const RESIDUAL_DEGREE_OF_FREEDOM: &str = "nu";
    /// Seasonality levels, `(draws, time)`
    pub const SEASONALITY_LEVELS: &str = "s";
    /// Seasonality smoothing factor, one per draw
    pub const SEASONALITY_SMOOTHING_FACTOR: &str = "sea_sm";
    /// Damped factor, one per draw
    pub const DAMPED_FACTOR: &str = "damped_factor";
    /// Positive regressor coefficients, `(draws, regressors)`
    pub const POSITIVE_REGRESSOR_BETA: &str = "pr_beta";
    /// Regular regressor coefficients, `(draws, regressors)`
    pub const REGULAR_REGRESSOR_BETA: &str = "rr_beta";

    /// Parameters every model carries
    pub const BASE: &[&str] = &[
        LOCAL_TREND_LEVELS,
        LOCAL_TREND_SLOPES,
        LOCAL_TREND,
        GLOBAL_TREND,
        GLOBAL_TREND_LEVEL,
        GLOBAL_TREND_SLOPE,
        LEVEL_SMOOTHING_FACTOR,
        SLOPE_SMOOTHING_FACTOR,
        RESIDUAL_SIGMA,
        RESIDUAL_DEGREE_OF_FREEDOM,
    ];

    /// Parameters carried when seasonality is enabled
    pub const SEASONALITY: &[&str] = &[SEASONALITY_LEVELS, SEASONALITY_SMOOTHING_FACTOR];
}

/// Which posterior draws a prediction runs on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictMethod {
    /// Every draw
    #[default]
    Full,
    /// A single draw holding the mean of each parameter
    Mean,
    /// A single draw holding the median of each parameter
    Median,
}

/// Posterior draws keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, ArrayD<f64>>",
    into = "BTreeMap<String, ArrayD<f64>>"
)]
pub struct PosteriorDraws {
    num_samples: usize,
    params: BTreeMap<String, ArrayD<f64>>,
}

impl PosteriorDraws {
    /// Build the store from a parameter map
    pub fn new(params: BTreeMap<String, ArrayD<f64>>) -> Result<Self> {
        let mut draws = Self::default();
        for (name, values) in params {
            draws.insert(name, values)?;
        }
        Ok(draws)
    }

    /// Add one parameter, checking its draw count against the others
    pub fn insert<D: Dimension>(
        &mut self,
        name: impl Into<String>,
        values: Array<f64, D>,
    ) -> Result<()> {
        let name = name.into();
        let values = values.into_dyn();

        if values.ndim() == 0 {
            return Err(ForecastError::ShapeMismatch(format!(
                "Parameter '{}' has no draw axis",
                name
            )));
        }

        let draws = values.len_of(Axis(0));
        if draws == 0 {
            return Err(ForecastError::ShapeMismatch(format!(
                "Parameter '{}' has zero draws",
                name
            )));
        }

        let replaces_only_param = self.params.len() == 1 && self.params.contains_key(&name);
        if !self.params.is_empty() && !replaces_only_param && draws != self.num_samples {
            return Err(ForecastError::ShapeMismatch(format!(
                "Parameter '{}' has {} draws, expected {}",
                name, draws, self.num_samples
            )));
        }

        self.num_samples = draws;
        self.params.insert(name, values);
        Ok(())
    }

    /// Builder form of [`PosteriorDraws::insert`]
    pub fn with_param<D: Dimension>(
        mut self,
        name: impl Into<String>,
        values: Array<f64, D>,
    ) -> Result<Self> {
        self.insert(name, values)?;
        Ok(self)
    }

    /// Number of draws shared by every parameter
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Whether the store holds no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Names of the stored parameters
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Whether a parameter is present
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Read-only view of a parameter
    pub fn get(&self, name: &str) -> Option<ArrayViewD<'_, f64>> {
        self.params.get(name).map(|values| values.view())
    }

    fn require(&self, name: &str) -> Result<ArrayViewD<'_, f64>> {
        self.get(name)
            .ok_or_else(|| ForecastError::MissingParameter(name.to_string()))
    }

    /// Check that every parameter the configuration needs is present
    pub fn check_for(&self, config: &DltConfig) -> Result<()> {
        if self.is_empty() {
            return Err(ForecastError::ShapeMismatch(
                "Posterior holds no draws".to_string(),
            ));
        }

        let missing: Vec<&str> = config
            .model_param_names()
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect();

        if !missing.is_empty() {
            return Err(ForecastError::MissingParameter(missing.join(", ")));
        }

        Ok(())
    }

    /// A per-draw scalar, stored as `(draws)` or `(draws, 1)`
    pub fn per_draw(&self, name: &str) -> Result<Array1<f64>> {
        let values = self.require(name)?;
        match values.shape() {
            [_] => Ok(values.iter().copied().collect()),
            [_, 1] => Ok(values.iter().copied().collect()),
            shape => Err(ForecastError::ShapeMismatch(format!(
                "Parameter '{}' should hold one value per draw, found shape {:?}",
                name, shape
            ))),
        }
    }

    /// A `(draws, k)` matrix; a one-dimensional parameter is read as `(draws, 1)`
    pub fn matrix(&self, name: &str) -> Result<ArrayView2<'_, f64>> {
        let values = self.require(name)?;
        match values.ndim() {
            1 => {
                let draws = values.len();
                Ok(values.into_shape((draws, 1))?)
            }
            2 => Ok(values.into_dimensionality::<Ix2>()?),
            _ => Err(ForecastError::ShapeMismatch(format!(
                "Parameter '{}' should be a matrix, found shape {:?}",
                name,
                values.shape()
            ))),
        }
    }

    /// Collapse every parameter to a single draw
    pub fn aggregate(&self, method: PredictMethod) -> Result<PosteriorDraws> {
        let reduce: fn(ArrayViewD<f64>) -> dlt_math::Result<ArrayD<f64>> = match method {
            PredictMethod::Full => return Ok(self.clone()),
            PredictMethod::Mean => mean_over_draws,
            PredictMethod::Median => median_over_draws,
        };

        let mut aggregated = PosteriorDraws::default();
        for (name, values) in &self.params {
            aggregated.insert(name.clone(), reduce(values.view())?)?;
        }

        Ok(aggregated)
    }
}

impl TryFrom<BTreeMap<String, ArrayD<f64>>> for PosteriorDraws {
    type Error = ForecastError;

    fn try_from(params: BTreeMap<String, ArrayD<f64>>) -> Result<Self> {
        Self::new(params)
    }
}

impl From<PosteriorDraws> for BTreeMap<String, ArrayD<f64>> {
    fn from(draws: PosteriorDraws) -> Self {
        draws.params
    }
}
