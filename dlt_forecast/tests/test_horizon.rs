mod common;

use common::daily;
use dlt_forecast::{ForecastError, Horizon, PredictionMeta, TrainingMeta};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn training() -> TrainingMeta {
    TrainingMeta::new(daily(0, 100)).unwrap()
}

fn resolve(offset: i64, count: usize) -> Result<Horizon, ForecastError> {
    let prediction = PredictionMeta::new(daily(offset, count)).unwrap();
    Horizon::resolve(&training(), &prediction)
}

#[test]
fn test_window_entirely_in_future() {
    let horizon = resolve(100, 14).unwrap();

    assert_eq!(
        horizon,
        Horizon {
            forecast_steps: 14,
            start: 100,
            training_length: 100,
            combined_length: 114,
            output_length: 14,
        }
    );
    assert!(horizon.needs_extrapolation());
}

#[test]
fn test_window_with_gap_after_training_starts_right_after_training() {
    // the first requested date is a week past the training end
    let horizon = resolve(107, 5).unwrap();

    assert_eq!(horizon.forecast_steps, 5);
    assert_eq!(horizon.start, 100);
    assert_eq!(horizon.end(), 105);
}

#[test]
fn test_partial_overlap() {
    let horizon = resolve(90, 20).unwrap();

    assert_eq!(horizon.forecast_steps, 10);
    assert_eq!(horizon.start, 90);
    assert_eq!(horizon.combined_length, 110);
    assert_eq!(horizon.end(), 110);
}

#[test]
fn test_window_inside_training_is_negative() {
    let horizon = resolve(10, 20).unwrap();

    assert_eq!(horizon.forecast_steps, -80);
    assert_eq!(horizon.start, 10);
    assert_eq!(horizon.combined_length, 100);
    assert_eq!(horizon.output_length, 20);
    assert!(!horizon.needs_extrapolation());
}

#[test]
fn test_full_training_window_has_zero_steps() {
    let horizon = resolve(0, 100).unwrap();

    assert_eq!(horizon.forecast_steps, 0);
    assert_eq!(horizon.start, 0);
    assert_eq!(horizon.combined_length, 100);
}

#[rstest]
#[case(100, 1)]
#[case(100, 30)]
#[case(95, 10)]
#[case(0, 120)]
#[case(40, 10)]
#[case(99, 1)]
fn test_combined_length_adds_non_negative_steps(#[case] offset: i64, #[case] count: usize) {
    let horizon = resolve(offset, count).unwrap();

    assert_eq!(
        horizon.combined_length,
        horizon.training_length + horizon.forecast_steps.max(0) as usize
    );
    assert_eq!(horizon.output_length, count);
    assert!(horizon.end() <= horizon.combined_length);
}

#[test]
fn test_start_before_training_is_rejected() {
    let result = resolve(-3, 10);
    assert!(matches!(result, Err(ForecastError::Prediction(_))));
}

#[test]
fn test_unordered_prediction_dates_are_rejected() {
    let mut dates = daily(100, 5);
    dates.swap(1, 3);
    let result = PredictionMeta::new(dates);
    assert!(matches!(result, Err(ForecastError::IllegalArgument(_))));

    let mut repeated = daily(100, 3);
    repeated.push(repeated[2]);
    let result = PredictionMeta::new(repeated);
    assert!(matches!(result, Err(ForecastError::IllegalArgument(_))));
}

#[test]
fn test_start_missing_from_training_index() {
    let mut training_dates = daily(0, 10);
    training_dates.remove(4);
    let training = TrainingMeta::new(training_dates).unwrap();

    let prediction = PredictionMeta::new(daily(4, 10)).unwrap();
    let result = Horizon::resolve(&training, &prediction);
    assert!(matches!(result, Err(ForecastError::Prediction(_))));
}

#[test]
fn test_window_skipping_training_dates_still_fits() {
    // every other date from index 90, running past the training end
    let dates: Vec<_> = daily(90, 30).into_iter().step_by(2).collect();
    let prediction = PredictionMeta::new(dates).unwrap();

    let horizon = Horizon::resolve(&training(), &prediction).unwrap();
    assert_eq!(horizon.forecast_steps, 10);
    assert_eq!(horizon.start, 90);
    assert_eq!(horizon.output_length, 15);
    assert!(horizon.end() <= horizon.combined_length);
}

#[test]
fn test_training_meta_rejects_unordered_dates() {
    let mut dates = daily(0, 4);
    dates.reverse();
    assert!(matches!(
        TrainingMeta::new(dates),
        Err(ForecastError::Model(_))
    ));
    assert!(matches!(
        TrainingMeta::new(Vec::new()),
        Err(ForecastError::Model(_))
    ));
}

#[test]
fn test_prediction_meta_bounds() {
    let prediction = PredictionMeta::new(daily(100, 14)).unwrap();

    assert_eq!(prediction.prediction_start(), daily(100, 1)[0]);
    assert_eq!(prediction.prediction_end(), daily(113, 1)[0]);
    assert_eq!(prediction.df_length(), 14);
}
