//! Recursive out-of-sample extrapolation of the damped local trend.
//!
//! The loop is sequential in time and runs over every draw at each step:
//!
//! ```text
//! local[t]    = l[t-1] + phi * b[t-1]              (+ residual)
//! global[t]   = gl + ln(1 + gb * t)  |  gl + gb * (t - 1)
//! l[t]        = a_lev * local[t] + (1 - a_lev) * (l[t-1] + phi * b[t-1])
//! b[t]        = a_slp * (l[t] - l[t-1]) + (1 - a_slp) * phi * b[t-1]
//! s[t+m]      = a_sea * (local[t] + s[t] - l[t]) + (1 - a_sea) * s[t]
//! ```
//!
//! The level update smooths the realized (noise-inclusive) value toward the
//! pre-noise damped value, not toward the previous level.

use crate::components::StateTensors;
use crate::config::{DampedFactor, DltConfig};
use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use crate::noise::NoiseSampler;
use crate::posterior::{param, PosteriorDraws};
use ndarray::Array1;
use tracing::trace;

/// Functional form of the global trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalTrendForm {
    /// `gl + gb * (t - 1)`
    Linear,
    /// `gl + ln(1 + gb * t)`
    Log,
}

/// Seasonal smoothing, present only for models with a period above one
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalSmoothing {
    /// Seasonality period
    pub period: usize,
    /// Seasonality smoothing factor per draw
    pub smoothing: Array1<f64>,
}

/// Per-draw constants of the recursion
#[derive(Debug, Clone, PartialEq)]
pub struct RecursionParams {
    /// Damped factor per draw
    pub damped_factor: Array1<f64>,
    /// Level smoothing factor per draw
    pub level_smoothing: Array1<f64>,
    /// Slope smoothing factor per draw
    pub slope_smoothing: Array1<f64>,
    /// Global trend level per draw
    pub global_trend_level: Array1<f64>,
    /// Global trend slope per draw
    pub global_trend_slope: Array1<f64>,
    /// Residual degrees of freedom per draw
    pub residual_df: Array1<f64>,
    /// Residual scale per draw
    pub residual_sigma: Array1<f64>,
    /// Global trend form
    pub global_trend_form: GlobalTrendForm,
    /// Seasonal smoothing, if seasonality is enabled
    pub seasonality: Option<SeasonalSmoothing>,
}

impl RecursionParams {
    /// Read the recursion constants a configuration needs
    pub fn from_posterior(posterior: &PosteriorDraws, config: &DltConfig) -> Result<Self> {
        let damped_factor = match config.damped_factor {
            DampedFactor::Fixed(value) => Array1::from_elem(posterior.num_samples(), value),
            DampedFactor::Sampled => posterior.per_draw(param::DAMPED_FACTOR)?,
        };

        let seasonality = if config.has_seasonality() {
            Some(SeasonalSmoothing {
                period: config.seasonality,
                smoothing: posterior.per_draw(param::SEASONALITY_SMOOTHING_FACTOR)?,
            })
        } else {
            None
        };

        let global_trend_form = if config.use_log_global_trend {
            GlobalTrendForm::Log
        } else {
            GlobalTrendForm::Linear
        };

        Ok(Self {
            damped_factor,
            level_smoothing: posterior.per_draw(param::LEVEL_SMOOTHING_FACTOR)?,
            slope_smoothing: posterior.per_draw(param::SLOPE_SMOOTHING_FACTOR)?,
            global_trend_level: posterior.per_draw(param::GLOBAL_TREND_LEVEL)?,
            global_trend_slope: posterior.per_draw(param::GLOBAL_TREND_SLOPE)?,
            residual_df: posterior.per_draw(param::RESIDUAL_DEGREE_OF_FREEDOM)?,
            residual_sigma: posterior.per_draw(param::RESIDUAL_SIGMA)?,
            global_trend_form,
            seasonality,
        })
    }

    /// Global trend of one draw at time index `t`
    pub fn global_trend(&self, draw: usize, t: usize) -> f64 {
        let level = self.global_trend_level[draw];
        let slope = self.global_trend_slope[draw];
        match self.global_trend_form {
            GlobalTrendForm::Log => level + (1.0 + slope * t as f64).ln(),
            GlobalTrendForm::Linear => level + slope * (t as f64 - 1.0),
        }
    }
}

/// Fill `[training_length, combined_length)` of the state buffers
///
/// With a sampler, one residual per draw is added to the local trend at
/// every step. Without one the result is the expected path.
pub fn extrapolate(
    state: &mut StateTensors,
    params: &RecursionParams,
    horizon: &Horizon,
    mut noise: Option<&mut dyn NoiseSampler>,
) -> Result<()> {
    if !horizon.needs_extrapolation() {
        return Ok(());
    }

    let seed = state.seed.as_ref().ok_or_else(|| {
        ForecastError::ShapeMismatch("Recursion seeds are missing for a forecast horizon".to_string())
    })?;
    let mut last_level = seed.level.clone();
    let mut last_slope = seed.slope.clone();
    let num_samples = last_level.len();

    for t in horizon.training_length..horizon.combined_length {
        let residuals = match noise.as_mut() {
            Some(sampler) => {
                let residuals =
                    sampler.sample(params.residual_df.view(), params.residual_sigma.view())?;
                if residuals.len() != num_samples {
                    return Err(ForecastError::ShapeMismatch(format!(
                        "Noise sampler returned {} residuals for {} draws",
                        residuals.len(),
                        num_samples
                    )));
                }
                Some(residuals)
            }
            None => None,
        };

        for i in 0..num_samples {
            let damped = params.damped_factor[i];
            let local = last_level[i] + damped * last_slope[i];

            state.local_trend[[i, t]] = local;
            state.global_trend[[i, t]] = params.global_trend(i, t);
            if let Some(residuals) = &residuals {
                state.local_trend[[i, t]] += residuals[i];
            }
            let realized = state.local_trend[[i, t]];

            let level_sm = params.level_smoothing[i];
            let new_level = level_sm * realized + (1.0 - level_sm) * local;

            let slope_sm = params.slope_smoothing[i];
            let new_slope = slope_sm * (new_level - last_level[i])
                + (1.0 - slope_sm) * damped * last_slope[i];

            if let Some(seasonal) = &params.seasonality {
                let ahead = t + seasonal.period;
                if ahead < horizon.combined_length {
                    let sea_sm = seasonal.smoothing[i];
                    let current = state.seasonality[[i, t]];
                    state.seasonality[[i, ahead]] =
                        sea_sm * (realized + current - new_level) + (1.0 - sea_sm) * current;
                }
            }

            last_level[i] = new_level;
            last_slope[i] = new_slope;
        }

        trace!(step = t, with_residual = residuals.is_some(), "extrapolated local trend");
    }

    Ok(())
}
