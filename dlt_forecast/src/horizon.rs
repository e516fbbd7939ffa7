//! Alignment of a prediction window against the training index.

use crate::error::{ForecastError, Result};
use crate::meta::{PredictionMeta, TrainingMeta};
use std::collections::HashSet;

/// Sizing of one prediction call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    /// Steps beyond the training index; negative when the window is a
    /// strict subset of the training index (sizing only, never a loop bound)
    pub forecast_steps: i64,
    /// Training index position of the first requested date
    pub start: usize,
    /// Number of training rows
    pub training_length: usize,
    /// Training rows plus the non-negative forecast steps
    pub combined_length: usize,
    /// Number of requested rows
    pub output_length: usize,
}

impl Horizon {
    /// Resolve the prediction window against the training index
    pub fn resolve(training: &TrainingMeta, prediction: &PredictionMeta) -> Result<Self> {
        let prediction_start = prediction.prediction_start();
        if prediction_start < training.training_start() {
            return Err(ForecastError::Prediction(
                "Prediction start must be after training start.".to_string(),
            ));
        }

        let training_length = training.df_length();

        let (forecast_steps, start) = if prediction_start > training.training_end() {
            // entirely in the future: forecasts begin right after training
            let forecast_dates: HashSet<_> = prediction.date_array().iter().collect();
            (forecast_dates.len() as i64, training_length)
        } else {
            let training_dates: HashSet<_> = training.date_array().iter().collect();
            let prediction_dates: HashSet<_> = prediction.date_array().iter().collect();

            let new_dates = prediction_dates.difference(&training_dates).count();
            let forecast_steps = if new_dates > 0 {
                new_dates as i64
            } else {
                -(training_dates.difference(&prediction_dates).count() as i64)
            };

            let start = training.position(&prediction_start).ok_or_else(|| {
                ForecastError::Prediction(format!(
                    "Prediction start {} is not in the training date index",
                    prediction_start
                ))
            })?;

            (forecast_steps, start)
        };

        Ok(Self {
            forecast_steps,
            start,
            training_length,
            combined_length: training_length + forecast_steps.max(0) as usize,
            output_length: prediction.df_length(),
        })
    }

    /// Exclusive end of the output window in combined-index coordinates
    pub fn end(&self) -> usize {
        self.start + self.output_length
    }

    /// Whether the recursive extrapolation has any step to run
    pub fn needs_extrapolation(&self) -> bool {
        self.combined_length > self.training_length
    }
}
