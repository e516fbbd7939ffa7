//! Residual noise injected into out-of-sample local trend values.

use crate::error::{ForecastError, Result};
use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StudentT};

/// Source of one residual per posterior draw
///
/// Implementations draw from a Student-t with noncentrality 0 and location
/// 0, parameterized per draw by degrees of freedom `df` and `scale`.
pub trait NoiseSampler {
    /// One residual per draw; `df` and `scale` have the same length
    fn sample(&mut self, df: ArrayView1<f64>, scale: ArrayView1<f64>) -> Result<Array1<f64>>;
}

/// Student-t residuals drawn from a random number generator
#[derive(Debug, Clone)]
pub struct StudentTNoise<R: Rng> {
    rng: R,
}

impl<R: Rng> StudentTNoise<R> {
    /// Wrap a random number generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl StudentTNoise<StdRng> {
    /// Reproducible sampler from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoiseSampler for StudentTNoise<R> {
    fn sample(&mut self, df: ArrayView1<f64>, scale: ArrayView1<f64>) -> Result<Array1<f64>> {
        if df.len() != scale.len() {
            return Err(ForecastError::ShapeMismatch(format!(
                "Residual degrees of freedom ({}) and scale ({}) differ in length",
                df.len(),
                scale.len()
            )));
        }

        let mut draws = Array1::zeros(df.len());
        for ((draw, &nu), &sigma) in draws.iter_mut().zip(df.iter()).zip(scale.iter()) {
            let distribution = StudentT::new(nu).map_err(|err| {
                ForecastError::Sampling(format!(
                    "Invalid residual degrees of freedom {}: {}",
                    nu, err
                ))
            })?;
            *draw = sigma * distribution.sample(&mut self.rng);
        }

        Ok(draws)
    }
}

impl<N: NoiseSampler + ?Sized> NoiseSampler for &mut N {
    fn sample(&mut self, df: ArrayView1<f64>, scale: ArrayView1<f64>) -> Result<Array1<f64>> {
        (**self).sample(df, scale)
    }
}
