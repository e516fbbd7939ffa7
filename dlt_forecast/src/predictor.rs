//! Prediction from posterior draws of a fitted damped local trend model.

use crate::components::StateTensors;
use crate::config::DltConfig;
use crate::engine::{extrapolate, RecursionParams};
use crate::error::{ForecastError, Result};
use crate::frame::PredictionFrame;
use crate::horizon::Horizon;
use crate::meta::{PredictionMeta, TrainingMeta};
use crate::noise::NoiseSampler;
use crate::output::{self, Forecast};
use crate::posterior::{PosteriorDraws, PredictMethod};
use dlt_math::{log_transform, MathError, MinMaxScaler};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Min-max scalers fitted on the training data of an auto-scaled model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedScaling {
    /// Scaler of the response column
    pub response: MinMaxScaler,
    /// Scaler of each regressor column
    pub regressors: BTreeMap<String, MinMaxScaler>,
}

impl FittedScaling {
    /// Create scaling with a response scaler and no regressor scalers
    pub fn new(response: MinMaxScaler) -> Self {
        Self {
            response,
            regressors: BTreeMap::new(),
        }
    }

    /// Add the scaler of a regressor column
    pub fn with_regressor(mut self, name: impl Into<String>, scaler: MinMaxScaler) -> Self {
        self.regressors.insert(name.into(), scaler);
        self
    }
}

/// Options of one prediction call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictOptions {
    /// Inject one simulated residual per draw at every forecast step
    pub include_error: bool,
    /// Return trend, seasonality and regression next to the prediction
    pub decompose: bool,
    /// Which posterior draws to predict with
    pub method: PredictMethod,
}

impl PredictOptions {
    /// Expected-value prediction over every draw
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether residual noise is injected
    pub fn with_error(mut self, include_error: bool) -> Self {
        self.include_error = include_error;
        self
    }

    /// Set whether components are returned
    pub fn with_decompose(mut self, decompose: bool) -> Self {
        self.decompose = decompose;
        self
    }

    /// Set the posterior aggregation method
    pub fn with_method(mut self, method: PredictMethod) -> Self {
        self.method = method;
        self
    }
}

/// Fitted model settings needed to turn posterior draws into forecasts
///
/// The predictor holds no posterior state; draws are passed to every call
/// and only read, so one predictor can serve many posteriors and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct DltPredictor {
    config: DltConfig,
    training: TrainingMeta,
    scaling: Option<FittedScaling>,
}

impl DltPredictor {
    /// Create a predictor from a configuration and the training date index
    pub fn new(config: DltConfig, training: TrainingMeta) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            training,
            scaling: None,
        })
    }

    /// Attach the scalers fitted for an auto-scaled model
    pub fn with_scaling(mut self, scaling: FittedScaling) -> Self {
        self.scaling = Some(scaling);
        self
    }

    /// Model configuration
    pub fn config(&self) -> &DltConfig {
        &self.config
    }

    /// Training date index
    pub fn training(&self) -> &TrainingMeta {
        &self.training
    }

    /// Predict the frame's dates, drawing residuals from `noise` when
    /// `options.include_error` is set
    pub fn predict(
        &self,
        posterior: &PosteriorDraws,
        frame: &PredictionFrame,
        options: &PredictOptions,
        noise: &mut dyn NoiseSampler,
    ) -> Result<Forecast> {
        let noise = if options.include_error { Some(noise) } else { None };
        self.run(posterior, frame, options, noise)
    }

    /// Predict the frame's dates without residual noise
    pub fn predict_expected(
        &self,
        posterior: &PosteriorDraws,
        frame: &PredictionFrame,
        decompose: bool,
    ) -> Result<Forecast> {
        let options = PredictOptions::new().with_decompose(decompose);
        self.run(posterior, frame, &options, None)
    }

    #[instrument(
        skip_all,
        fields(
            rows = frame.len(),
            draws = posterior.num_samples(),
            include_error = noise.is_some(),
            method = ?options.method
        )
    )]
    fn run(
        &self,
        posterior: &PosteriorDraws,
        frame: &PredictionFrame,
        options: &PredictOptions,
        noise: Option<&mut dyn NoiseSampler>,
    ) -> Result<Forecast> {
        let prediction_meta = PredictionMeta::new(frame.dates().to_vec())?;
        posterior.check_for(&self.config)?;

        let aggregated;
        let posterior = match options.method {
            PredictMethod::Full => posterior,
            method => {
                aggregated = posterior.aggregate(method)?;
                debug!(?method, "aggregated posterior to a single draw");
                &aggregated
            }
        };

        let horizon = Horizon::resolve(&self.training, &prediction_meta)?;
        debug!(
            prediction_start = %prediction_meta.prediction_start(),
            prediction_end = %prediction_meta.prediction_end(),
            forecast_steps = horizon.forecast_steps,
            start = horizon.start,
            combined_length = horizon.combined_length,
            "resolved prediction horizon"
        );

        let regressors = self.regressor_matrix(frame)?;
        let mut state = StateTensors::assemble(posterior, &self.config, &horizon, &regressors)?;

        if horizon.needs_extrapolation() {
            let params = RecursionParams::from_posterior(posterior, &self.config)?;
            extrapolate(&mut state, &params, &horizon, noise)?;
        }

        output::assemble(
            state,
            &horizon,
            &self.config,
            self.scaling.as_ref().map(|scaling| &scaling.response),
            prediction_meta.date_array().to_vec(),
            options.decompose,
        )
    }

    /// Regressor columns of the frame in model units
    fn regressor_matrix(&self, frame: &PredictionFrame) -> Result<Array2<f64>> {
        let columns = self.config.regressor_columns();
        let mut matrix = frame.regressor_matrix(&columns)?;

        if columns.is_empty() {
            return Ok(matrix);
        }

        if self.config.auto_scale {
            let scaling = self.scaling.as_ref().ok_or_else(|| {
                ForecastError::InvalidParameter(
                    "auto_scale is set but no fitted scalers were supplied".to_string(),
                )
            })?;
            for (name, mut column) in columns.iter().zip(matrix.axis_iter_mut(Axis(1))) {
                let scaler = scaling.regressors.get(name).ok_or_else(|| {
                    ForecastError::InvalidParameter(format!(
                        "No fitted scaler for regressor column '{}'",
                        name
                    ))
                })?;
                column.mapv_inplace(|v| scaler.transform_value(v));
            }
        }

        if self.config.is_multiplicative {
            matrix = log_transform(&matrix).map_err(|err| match err {
                MathError::InvalidInput(msg) => ForecastError::IllegalArgument(format!(
                    "Regressors of a multiplicative model must be positive: {}",
                    msg
                )),
                other => ForecastError::Math(other),
            })?;
        }

        Ok(matrix)
    }
}
