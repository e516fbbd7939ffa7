//! Final assembly of a forecast from the extrapolated state buffers.

use crate::components::StateTensors;
use crate::config::DltConfig;
use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use chrono::{DateTime, Utc};
use dlt_math::{exp_transform, DrawSummary, MinMaxScaler};
use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};

/// Trend, seasonality and regression contributions of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Global plus local trend, in response units when auto-scaled
    pub trend: Array2<f64>,
    /// Seasonality, in model units
    pub seasonality: Array2<f64>,
    /// Regression, in model units
    pub regression: Array2<f64>,
}

/// Forecast for the requested dates, one row per posterior draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Requested dates
    pub dates: Vec<DateTime<Utc>>,
    /// Predicted values, `(draws, dates)`
    pub prediction: Array2<f64>,
    /// Component breakdown, when requested
    pub decomposition: Option<Decomposition>,
}

impl Forecast {
    /// Number of posterior draws
    pub fn num_samples(&self) -> usize {
        self.prediction.nrows()
    }

    /// Number of predicted dates
    pub fn len(&self) -> usize {
        self.prediction.ncols()
    }

    /// Whether no dates were predicted
    pub fn is_empty(&self) -> bool {
        self.prediction.ncols() == 0
    }

    /// Mean, median and percentiles of the prediction across draws
    pub fn summarize(&self, percentiles: &[f64]) -> Result<DrawSummary> {
        Ok(DrawSummary::from_draws(self.prediction.view(), percentiles)?)
    }

    /// Serialize the forecast to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Slice the output window and undo the model transforms
///
/// In multiplicative mode each component is exponentiated on its own, so
/// the exponentiated components multiply to the prediction. The min-max
/// inverse applies to the prediction and the trend only; seasonality and
/// regression stay multipliers of the trend.
pub fn assemble(
    state: StateTensors,
    horizon: &Horizon,
    config: &DltConfig,
    response_scaler: Option<&MinMaxScaler>,
    dates: Vec<DateTime<Utc>>,
    decompose: bool,
) -> Result<Forecast> {
    let (start, end) = (horizon.start, horizon.end());

    let mut trend =
        &state.global_trend.slice(s![.., start..end]) + &state.local_trend.slice(s![.., start..end]);
    let mut seasonality = state.seasonality.slice(s![.., start..end]).to_owned();
    let mut regression = state.regression;

    if regression.dim() != trend.dim() {
        return Err(ForecastError::ShapeMismatch(format!(
            "Regression component {:?} does not match the output window {:?}",
            regression.dim(),
            trend.dim()
        )));
    }

    let mut prediction = &trend + &seasonality + &regression;

    if config.is_multiplicative {
        prediction = exp_transform(&prediction);
        trend = exp_transform(&trend);
        seasonality = exp_transform(&seasonality);
        regression = exp_transform(&regression);
    }

    if config.auto_scale {
        let scaler = response_scaler.ok_or_else(|| {
            ForecastError::InvalidParameter(
                "auto_scale is set but no fitted response scaler was supplied".to_string(),
            )
        })?;
        prediction = scaler.inverse_transform(&prediction);
        trend = scaler.inverse_transform(&trend);
    }

    let decomposition = decompose.then(|| Decomposition {
        trend,
        seasonality,
        regression,
    });

    Ok(Forecast {
        dates,
        prediction,
        decomposition,
    })
}
