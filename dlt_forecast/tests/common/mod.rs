#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use dlt_forecast::posterior::param;
use dlt_forecast::{ForecastError, NoiseSampler, PosteriorDraws};
use ndarray::{Array1, Array2, ArrayView1};

/// Consecutive daily dates starting `offset` days after 2023-01-01
pub fn daily(offset: i64, count: usize) -> Vec<DateTime<Utc>> {
    let origin = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    (0..count as i64)
        .map(|i| origin + Duration::days(offset + i))
        .collect()
}

pub fn level(draw: usize, t: usize) -> f64 {
    10.0 + 0.1 * t as f64 + draw as f64
}

pub fn slope(draw: usize) -> f64 {
    0.2 + 0.05 * draw as f64
}

pub fn seasonal(t: usize, period: usize) -> f64 {
    0.5 * (2.0 * std::f64::consts::PI * (t % period) as f64 / period as f64).sin()
}

/// Deterministic posterior with `draws` draws over `training` steps
///
/// When `period` is set the seasonality levels span `training + period`
/// steps, as the sampler stores them.
pub fn posterior(draws: usize, training: usize, period: Option<usize>) -> PosteriorDraws {
    let levels = Array2::from_shape_fn((draws, training), |(i, t)| level(i, t));
    let slopes = Array2::from_shape_fn((draws, training), |(i, _)| slope(i));
    let local_trend = Array2::from_shape_fn((draws, training), |(i, t)| level(i, t) - 0.05);
    let global_trend = Array2::from_shape_fn((draws, training), |(_, t)| 0.01 * t as f64);

    let mut posterior = PosteriorDraws::default()
        .with_param(param::LOCAL_TREND_LEVELS, levels)
        .and_then(|p| p.with_param(param::LOCAL_TREND_SLOPES, slopes))
        .and_then(|p| p.with_param(param::LOCAL_TREND, local_trend))
        .and_then(|p| p.with_param(param::GLOBAL_TREND, global_trend))
        .and_then(|p| {
            p.with_param(
                param::GLOBAL_TREND_LEVEL,
                Array1::from_shape_fn(draws, |i| 0.5 + 0.1 * i as f64),
            )
        })
        .and_then(|p| p.with_param(param::GLOBAL_TREND_SLOPE, Array1::from_elem(draws, 0.02)))
        .and_then(|p| {
            p.with_param(
                param::LEVEL_SMOOTHING_FACTOR,
                Array1::from_shape_fn(draws, |i| 0.3 + 0.1 * i as f64),
            )
        })
        .and_then(|p| p.with_param(param::SLOPE_SMOOTHING_FACTOR, Array1::from_elem(draws, 0.2)))
        .and_then(|p| p.with_param(param::RESIDUAL_SIGMA, Array1::from_elem(draws, 0.5)))
        .and_then(|p| {
            p.with_param(param::RESIDUAL_DEGREE_OF_FREEDOM, Array1::from_elem(draws, 6.0))
        })
        .unwrap();

    if let Some(period) = period {
        let stored = training + period;
        posterior
            .insert(
                param::SEASONALITY_LEVELS,
                Array2::from_shape_fn((draws, stored), |(_, t)| seasonal(t, period)),
            )
            .unwrap();
        posterior
            .insert(
                param::SEASONALITY_SMOOTHING_FACTOR,
                Array1::from_elem(draws, 0.4),
            )
            .unwrap();
    }

    posterior
}

/// Returns the same residual for every draw and counts its calls
pub struct ConstantNoise {
    pub value: f64,
    pub calls: usize,
}

impl ConstantNoise {
    pub fn new(value: f64) -> Self {
        Self { value, calls: 0 }
    }
}

impl NoiseSampler for ConstantNoise {
    fn sample(
        &mut self,
        df: ArrayView1<f64>,
        _scale: ArrayView1<f64>,
    ) -> Result<Array1<f64>, ForecastError> {
        self.calls += 1;
        Ok(Array1::from_elem(df.len(), self.value))
    }
}
