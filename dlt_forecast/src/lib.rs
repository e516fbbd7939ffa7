//! # DLT Forecast
//!
//! Probabilistic forecasts from the posterior draws of a fitted damped local
//! trend (DLT) model with optional seasonality and regressors.
//!
//! ## Features
//!
//! - Alignment of any prediction window against the training date index,
//!   including windows inside the training range
//! - In-sample reconstruction from the stored historical states
//! - Out-of-sample extrapolation through the damped trend recursion, one
//!   path per posterior draw
//! - Optional Student-t residual noise per draw and step
//! - Additive and multiplicative models, optional min-max rescaling
//! - Point or decomposed (trend / seasonality / regression) output
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use dlt_forecast::posterior::param;
//! use dlt_forecast::{
//!     DltConfig, DltPredictor, PosteriorDraws, PredictionFrame, TrainingMeta,
//! };
//! use ndarray::{Array1, Array2};
//!
//! # fn main() -> Result<(), dlt_forecast::ForecastError> {
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let training_dates: Vec<_> = (0..10).map(|i| start + Duration::days(i)).collect();
//! let training = TrainingMeta::new(training_dates)?;
//!
//! // two posterior draws, ten training steps
//! let posterior = PosteriorDraws::default()
//!     .with_param(param::LOCAL_TREND_LEVELS, Array2::from_elem((2, 10), 1.0))?
//!     .with_param(param::LOCAL_TREND_SLOPES, Array2::from_elem((2, 10), 0.1))?
//!     .with_param(param::LOCAL_TREND, Array2::from_elem((2, 10), 1.0))?
//!     .with_param(param::GLOBAL_TREND, Array2::zeros((2, 10)))?
//!     .with_param(param::GLOBAL_TREND_LEVEL, Array1::zeros(2))?
//!     .with_param(param::GLOBAL_TREND_SLOPE, Array1::zeros(2))?
//!     .with_param(param::LEVEL_SMOOTHING_FACTOR, Array1::from_elem(2, 0.5))?
//!     .with_param(param::SLOPE_SMOOTHING_FACTOR, Array1::from_elem(2, 0.5))?
//!     .with_param(param::RESIDUAL_SIGMA, Array1::from_elem(2, 0.1))?
//!     .with_param(param::RESIDUAL_DEGREE_OF_FREEDOM, Array1::from_elem(2, 5.0))?;
//!
//! let config = DltConfig::new().with_multiplicative(false);
//! let predictor = DltPredictor::new(config, training)?;
//!
//! // three days after the end of training
//! let future: Vec<_> = (10..13).map(|i| start + Duration::days(i)).collect();
//! let forecast = predictor.predict_expected(&posterior, &PredictionFrame::new(future), false)?;
//!
//! assert_eq!(forecast.prediction.dim(), (2, 3));
//! # Ok(())
//! # }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod horizon;
pub mod meta;
pub mod noise;
pub mod output;
pub mod posterior;
pub mod predictor;

// Re-export commonly used types
pub use crate::config::{DampedFactor, DltConfig, RegressorSign};
pub use crate::error::{ForecastError, Result};
pub use crate::frame::PredictionFrame;
pub use crate::horizon::Horizon;
pub use crate::meta::{PredictionMeta, TrainingMeta};
pub use crate::noise::{NoiseSampler, StudentTNoise};
pub use crate::output::{Decomposition, Forecast};
pub use crate::posterior::{PosteriorDraws, PredictMethod};
pub use crate::predictor::{DltPredictor, FittedScaling, PredictOptions};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
