//! Date metadata of the training and prediction windows.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether dates are strictly increasing (ordered, no repeats)
pub fn is_ordered_datetime(dates: &[DateTime<Utc>]) -> bool {
    dates.windows(2).all(|pair| pair[0] < pair[1])
}

/// Date index the model was fitted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DateTime<Utc>>", into = "Vec<DateTime<Utc>>")]
pub struct TrainingMeta {
    date_array: Vec<DateTime<Utc>>,
}

impl TrainingMeta {
    /// Create training metadata from the fitted date index
    pub fn new(date_array: Vec<DateTime<Utc>>) -> Result<Self> {
        if date_array.is_empty() {
            return Err(ForecastError::Model(
                "Training date index is empty".to_string(),
            ));
        }
        if !is_ordered_datetime(&date_array) {
            return Err(ForecastError::Model(
                "Datetime index must be ordered and not repeat".to_string(),
            ));
        }

        Ok(Self { date_array })
    }

    /// First training date
    pub fn training_start(&self) -> DateTime<Utc> {
        self.date_array[0]
    }

    /// Last training date
    pub fn training_end(&self) -> DateTime<Utc> {
        self.date_array[self.date_array.len() - 1]
    }

    /// Number of training rows
    pub fn df_length(&self) -> usize {
        self.date_array.len()
    }

    /// Training dates in order
    pub fn date_array(&self) -> &[DateTime<Utc>] {
        &self.date_array
    }

    /// Position of a date in the training index
    pub fn position(&self, date: &DateTime<Utc>) -> Option<usize> {
        self.date_array.binary_search(date).ok()
    }
}

impl TryFrom<Vec<DateTime<Utc>>> for TrainingMeta {
    type Error = ForecastError;

    fn try_from(date_array: Vec<DateTime<Utc>>) -> Result<Self> {
        Self::new(date_array)
    }
}

impl From<TrainingMeta> for Vec<DateTime<Utc>> {
    fn from(meta: TrainingMeta) -> Self {
        meta.date_array
    }
}

/// Date index of one prediction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionMeta {
    date_array: Vec<DateTime<Utc>>,
}

impl PredictionMeta {
    /// Create prediction metadata from the caller's dates
    pub fn new(date_array: Vec<DateTime<Utc>>) -> Result<Self> {
        if date_array.is_empty() {
            return Err(ForecastError::IllegalArgument(
                "Prediction date index is empty".to_string(),
            ));
        }
        if !is_ordered_datetime(&date_array) {
            return Err(ForecastError::IllegalArgument(
                "Datetime index must be ordered and not repeat".to_string(),
            ));
        }

        Ok(Self { date_array })
    }

    /// First requested date
    pub fn prediction_start(&self) -> DateTime<Utc> {
        self.date_array[0]
    }

    /// Last requested date
    pub fn prediction_end(&self) -> DateTime<Utc> {
        self.date_array[self.date_array.len() - 1]
    }

    /// Number of requested rows
    pub fn df_length(&self) -> usize {
        self.date_array.len()
    }

    /// Requested dates in order
    pub fn date_array(&self) -> &[DateTime<Utc>] {
        &self.date_array
    }
}
