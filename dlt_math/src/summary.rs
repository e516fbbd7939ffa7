//! Summaries of posterior draws along the draw axis (axis 0).

use crate::{MathError, Result};
use ndarray::{Array1, ArrayD, ArrayView1, ArrayView2, ArrayViewD, Axis};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};

/// Quantile of a single lane of draws
///
/// `tau` is a probability in `[0, 1]`.
pub fn quantile(lane: ArrayView1<f64>, tau: f64) -> Result<f64> {
    if lane.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take a quantile of zero draws".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&tau) {
        return Err(MathError::InvalidInput(format!(
            "Quantile probability {} is outside [0, 1]",
            tau
        )));
    }
    if lane.iter().any(|v| v.is_nan()) {
        return Err(MathError::CalculationError(
            "Draws contain NaN values".to_string(),
        ));
    }

    let mut data = Data::new(lane.to_vec());
    Ok(data.quantile(tau))
}

/// Mean over the draw axis, keeping it as a length-one axis
pub fn mean_over_draws(values: ArrayViewD<f64>) -> Result<ArrayD<f64>> {
    values
        .mean_axis(Axis(0))
        .map(|mean| mean.insert_axis(Axis(0)))
        .ok_or_else(|| {
            MathError::InsufficientData("Cannot average an empty draw axis".to_string())
        })
}

/// Median over the draw axis, keeping it as a length-one axis
pub fn median_over_draws(values: ArrayViewD<f64>) -> Result<ArrayD<f64>> {
    if values.ndim() == 0 || values.len_of(Axis(0)) == 0 {
        return Err(MathError::InsufficientData(
            "Cannot take the median of an empty draw axis".to_string(),
        ));
    }

    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::CalculationError(
            "Draws contain NaN values".to_string(),
        ));
    }

    let medians = values.map_axis(Axis(0), |lane| {
        let mut data = Data::new(lane.to_vec());
        data.quantile(0.5)
    });

    Ok(medians.insert_axis(Axis(0)))
}

/// Per time step summary of a `(draws, time)` matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSummary {
    /// Mean across draws
    pub mean: Array1<f64>,
    /// Median across draws
    pub median: Array1<f64>,
    /// Requested percentiles (0-100) with their per-step values
    pub percentiles: Vec<(f64, Array1<f64>)>,
}

impl DrawSummary {
    /// Summarize a `(draws, time)` matrix
    pub fn from_draws(draws: ArrayView2<f64>, percentiles: &[f64]) -> Result<Self> {
        if draws.nrows() == 0 {
            return Err(MathError::InsufficientData(
                "Cannot summarize zero draws".to_string(),
            ));
        }
        if let Some(p) = percentiles.iter().find(|p| !(0.0..=100.0).contains(*p)) {
            return Err(MathError::InvalidInput(format!(
                "Percentile {} is outside [0, 100]",
                p
            )));
        }

        let mean = draws
            .mean_axis(Axis(0))
            .ok_or_else(|| MathError::InsufficientData("Empty draw axis".to_string()))?;
        let median = column_quantiles(draws, 0.5)?;

        let mut bands = Vec::with_capacity(percentiles.len());
        for &p in percentiles {
            bands.push((p, column_quantiles(draws, p / 100.0)?));
        }

        Ok(Self {
            mean,
            median,
            percentiles: bands,
        })
    }

    /// Values for a requested percentile, if it was computed
    pub fn percentile(&self, p: f64) -> Option<&Array1<f64>> {
        self.percentiles
            .iter()
            .find(|(requested, _)| (*requested - p).abs() < f64::EPSILON)
            .map(|(_, values)| values)
    }
}

fn column_quantiles(draws: ArrayView2<f64>, tau: f64) -> Result<Array1<f64>> {
    draws
        .axis_iter(Axis(1))
        .map(|column| quantile(column, tau))
        .collect::<Result<Vec<f64>>>()
        .map(Array1::from)
}
