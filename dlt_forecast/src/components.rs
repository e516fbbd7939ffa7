//! Assembly of the regression, seasonality and trend buffers.
//!
//! Every buffer is a fresh `(draws, time)` allocation sized for the whole
//! call; the posterior itself is only read.

use crate::config::DltConfig;
use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use crate::posterior::{param, PosteriorDraws};
use ndarray::{concatenate, s, Array1, Array2, ArrayView2, Axis};

/// Last historical level and slope, the starting state of the recursion
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeed {
    /// Last local trend level per draw
    pub level: Array1<f64>,
    /// Last local trend slope per draw
    pub slope: Array1<f64>,
}

/// Working buffers of one prediction call
#[derive(Debug, Clone, PartialEq)]
pub struct StateTensors {
    /// Local trend, `(draws, combined_length)`
    pub local_trend: Array2<f64>,
    /// Global trend, `(draws, combined_length)`
    pub global_trend: Array2<f64>,
    /// Seasonality, `(draws, combined_length)`
    pub seasonality: Array2<f64>,
    /// Regression, `(draws, output_length)`
    pub regression: Array2<f64>,
    /// Recursion seeds; present only when the horizon extends past training
    pub seed: Option<TrendSeed>,
}

impl StateTensors {
    /// Build every buffer for a resolved horizon
    ///
    /// `regressors` is the `(output_length, regressors)` design matrix of
    /// the requested rows, already in model units.
    pub fn assemble(
        posterior: &PosteriorDraws,
        config: &DltConfig,
        horizon: &Horizon,
        regressors: &Array2<f64>,
    ) -> Result<Self> {
        let regression = regression_component(posterior, config, regressors)?;
        let seasonality = seasonality_component(posterior, config, horizon)?;
        let (local_trend, global_trend, seed) = trend_components(posterior, horizon)?;

        Ok(Self {
            local_trend,
            global_trend,
            seasonality,
            regression,
            seed,
        })
    }
}

/// Draw-wise linear combination of coefficients and regressor rows
pub fn regression_component(
    posterior: &PosteriorDraws,
    config: &DltConfig,
    regressors: &Array2<f64>,
) -> Result<Array2<f64>> {
    let num_samples = posterior.num_samples();
    let output_length = regressors.nrows();

    if config.num_regressors() == 0 {
        return Ok(Array2::zeros((num_samples, output_length)));
    }

    // coefficient order matches the column order: positive first, then regular
    let mut blocks: Vec<ArrayView2<f64>> = Vec::with_capacity(2);
    if !config.positive_regressor_col.is_empty() {
        blocks.push(posterior.matrix(param::POSITIVE_REGRESSOR_BETA)?);
    }
    if !config.regular_regressor_col.is_empty() {
        blocks.push(posterior.matrix(param::REGULAR_REGRESSOR_BETA)?);
    }
    let beta = concatenate(Axis(1), &blocks)?;

    if beta.ncols() != regressors.ncols() {
        return Err(ForecastError::ShapeMismatch(format!(
            "Posterior holds {} regressor coefficients but {} regressor columns were supplied",
            beta.ncols(),
            regressors.ncols()
        )));
    }

    Ok(beta.dot(&regressors.t()))
}

/// Stored seasonality sliced or zero-padded to the combined length
pub fn seasonality_component(
    posterior: &PosteriorDraws,
    config: &DltConfig,
    horizon: &Horizon,
) -> Result<Array2<f64>> {
    let mut seasonality = Array2::zeros((posterior.num_samples(), horizon.combined_length));

    if config.has_seasonality() {
        let levels = posterior.matrix(param::SEASONALITY_LEVELS)?;
        let stored = levels.ncols().min(horizon.combined_length);
        seasonality
            .slice_mut(s![.., ..stored])
            .assign(&levels.slice(s![.., ..stored]));
    }

    Ok(seasonality)
}

/// Historical local and global trend padded for the forecast region
pub fn trend_components(
    posterior: &PosteriorDraws,
    horizon: &Horizon,
) -> Result<(Array2<f64>, Array2<f64>, Option<TrendSeed>)> {
    let shape = (posterior.num_samples(), horizon.combined_length);
    let history = horizon.combined_length.min(horizon.training_length);

    let mut local_trend = Array2::zeros(shape);
    let mut global_trend = Array2::zeros(shape);

    let stored_local = historical(posterior, param::LOCAL_TREND, history)?;
    let stored_global = historical(posterior, param::GLOBAL_TREND, history)?;
    local_trend
        .slice_mut(s![.., ..history])
        .assign(&stored_local.slice(s![.., ..history]));
    global_trend
        .slice_mut(s![.., ..history])
        .assign(&stored_global.slice(s![.., ..history]));

    let seed = if horizon.needs_extrapolation() {
        Some(TrendSeed {
            level: last_column(posterior, param::LOCAL_TREND_LEVELS)?,
            slope: last_column(posterior, param::LOCAL_TREND_SLOPES)?,
        })
    } else {
        None
    };

    Ok((local_trend, global_trend, seed))
}

fn historical<'a>(
    posterior: &'a PosteriorDraws,
    name: &str,
    history: usize,
) -> Result<ArrayView2<'a, f64>> {
    let stored = posterior.matrix(name)?;
    if stored.ncols() < history {
        return Err(ForecastError::ShapeMismatch(format!(
            "Parameter '{}' covers {} time steps, {} required",
            name,
            stored.ncols(),
            history
        )));
    }
    Ok(stored)
}

fn last_column(posterior: &PosteriorDraws, name: &str) -> Result<Array1<f64>> {
    let stored = posterior.matrix(name)?;
    match stored.ncols() {
        0 => Err(ForecastError::ShapeMismatch(format!(
            "Parameter '{}' has no time steps",
            name
        ))),
        n => Ok(stored.column(n - 1).to_owned()),
    }
}
