//! Caller-supplied prediction frame: a date column plus regressor columns.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, TimeZone, Utc};
use ndarray::Array2;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Dates to predict and the regressor values observed on them
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionFrame {
    /// Requested dates
    dates: Vec<DateTime<Utc>>,
    /// Regressor columns by name, one value per date
    columns: BTreeMap<String, Vec<f64>>,
}

impl PredictionFrame {
    /// Create a frame holding only dates
    pub fn new(dates: Vec<DateTime<Utc>>) -> Self {
        Self {
            dates,
            columns: BTreeMap::new(),
        }
    }

    /// Add a regressor column
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(ForecastError::IllegalArgument(format!(
                "Column '{}' has {} rows but the frame has {} dates",
                name,
                values.len(),
                self.dates.len()
            )));
        }

        self.columns.insert(name, values);
        Ok(self)
    }

    /// Read the date column and the named regressor columns of a DataFrame
    ///
    /// The date column may be `Int64` epoch milliseconds or any temporal type.
    /// Regressor columns are cast to `Float64`; nulls are rejected.
    pub fn from_dataframe<S: AsRef<str>>(
        df: &DataFrame,
        date_col: &str,
        regressor_cols: &[S],
    ) -> Result<Self> {
        let column_names = df.get_column_names();
        if !column_names.contains(&date_col) {
            return Err(ForecastError::IllegalArgument(format!(
                "DataFrame does not contain date column '{}'",
                date_col
            )));
        }

        let dates = series_to_dates(df.column(date_col)?)?;
        let mut frame = Self::new(dates);

        for name in regressor_cols {
            let name = name.as_ref();
            if !column_names.contains(&name) {
                return Err(ForecastError::MissingRegressor(name.to_string()));
            }
            let values = series_to_values(df.column(name)?)?;
            frame = frame.with_column(name, values)?;
        }

        Ok(frame)
    }

    /// Requested dates
    pub fn dates(&self) -> &[DateTime<Utc>] {
        &self.dates
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Values of a regressor column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// `(rows, regressors)` design matrix with columns in the given order
    pub fn regressor_matrix(&self, names: &[String]) -> Result<Array2<f64>> {
        let mut matrix = Array2::zeros((self.len(), names.len()));
        for (j, name) in names.iter().enumerate() {
            let values = self
                .column(name)
                .ok_or_else(|| ForecastError::MissingRegressor(name.clone()))?;
            for (i, value) in values.iter().enumerate() {
                matrix[[i, j]] = *value;
            }
        }

        Ok(matrix)
    }
}

fn series_to_dates(series: &Series) -> Result<Vec<DateTime<Utc>>> {
    let millis = match series.dtype() {
        DataType::Int64 => series.clone(),
        dtype if dtype.is_temporal() => series
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .cast(&DataType::Int64)?,
        dtype => {
            return Err(ForecastError::IllegalArgument(format!(
                "Date column '{}' has unsupported type {}",
                series.name(),
                dtype
            )))
        }
    };

    millis
        .i64()?
        .into_iter()
        .map(|value| {
            let ms = value.ok_or_else(|| {
                ForecastError::IllegalArgument(format!(
                    "Date column '{}' contains nulls",
                    series.name()
                ))
            })?;
            Utc.timestamp_millis_opt(ms).single().ok_or_else(|| {
                ForecastError::IllegalArgument(format!("Timestamp {} is out of range", ms))
            })
        })
        .collect()
}

fn series_to_values(series: &Series) -> Result<Vec<f64>> {
    let values = series.cast(&DataType::Float64)?;

    values
        .f64()?
        .into_iter()
        .map(|value| {
            value.ok_or_else(|| {
                ForecastError::IllegalArgument(format!(
                    "Regressor column '{}' contains nulls",
                    series.name()
                ))
            })
        })
        .collect()
}
