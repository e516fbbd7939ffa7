//! # DLT Workspace
//!
//! Umbrella crate over the damped local trend forecasting workspace.
//!
//! - [`dlt_forecast`]: posterior-draw prediction for fitted DLT models
//! - [`dlt_math`]: transforms, scaling and draw summaries
//! - [`logging`]: tracing setup for binaries and demos
//!
//! ## Example
//!
//! ```
//! use dlt_workspace::forecast::{DampedFactor, DltConfig};
//!
//! let config = DltConfig::new()
//!     .with_seasonality(7)
//!     .with_damped_factor(DampedFactor::Fixed(0.9));
//! assert!(config.validate().is_ok());
//! assert_eq!(dlt_workspace::version(), env!("CARGO_PKG_VERSION"));
//! ```

pub mod logging;

pub use dlt_forecast as forecast;
pub use dlt_math as math;

/// Version of the workspace crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_reexports() {
        let config = forecast::DltConfig::default();
        assert!(config.is_multiplicative);

        let scaler = math::MinMaxScaler::new(0.0, 10.0, (0.0, 1.0)).unwrap();
        assert_eq!(scaler.transform_value(5.0), 0.5);
    }
}
