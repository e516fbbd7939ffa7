mod common;

use common::daily;
use dlt_forecast::{ForecastError, PredictionFrame};
use ndarray::array;
use polars::prelude::*;
use pretty_assertions::assert_eq;

fn millis(offset: i64, count: usize) -> Vec<i64> {
    daily(offset, count)
        .iter()
        .map(|date| date.timestamp_millis())
        .collect()
}

#[test]
fn test_from_dataframe_with_epoch_millis() {
    let df = DataFrame::new(vec![
        Series::new("date", millis(100, 3)),
        Series::new("promo", &[1.0, 0.0, 1.0]),
        Series::new("price", &[3i64, 4, 5]),
    ])
    .unwrap();

    let frame = PredictionFrame::from_dataframe(&df, "date", &["promo", "price"]).unwrap();

    assert_eq!(frame.len(), 3);
    assert_eq!(frame.dates(), daily(100, 3).as_slice());
    assert_eq!(frame.column("promo"), Some(&[1.0, 0.0, 1.0][..]));
    // integer regressors are read as floats
    assert_eq!(frame.column("price"), Some(&[3.0, 4.0, 5.0][..]));
}

#[test]
fn test_from_dataframe_with_datetime_column() {
    let dates = Series::new("ds", millis(5, 4))
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    let df = DataFrame::new(vec![dates]).unwrap();

    let frame = PredictionFrame::from_dataframe::<&str>(&df, "ds", &[]).unwrap();

    assert_eq!(frame.dates(), daily(5, 4).as_slice());
    assert_eq!(frame.column("ds"), None);
}

#[test]
fn test_from_dataframe_missing_columns() {
    let df = DataFrame::new(vec![Series::new("date", millis(0, 2))]).unwrap();

    assert!(matches!(
        PredictionFrame::from_dataframe::<&str>(&df, "ds", &[]),
        Err(ForecastError::IllegalArgument(_))
    ));
    assert!(matches!(
        PredictionFrame::from_dataframe(&df, "date", &["promo"]),
        Err(ForecastError::MissingRegressor(name)) if name == "promo"
    ));
}

#[test]
fn test_from_dataframe_rejects_nulls_and_text_dates() {
    let df = DataFrame::new(vec![
        Series::new("date", millis(0, 2)),
        Series::new("promo", &[Some(1.0), None]),
    ])
    .unwrap();
    assert!(matches!(
        PredictionFrame::from_dataframe(&df, "date", &["promo"]),
        Err(ForecastError::IllegalArgument(_))
    ));

    let df = DataFrame::new(vec![Series::new("date", &["2023-01-01", "2023-01-02"])]).unwrap();
    assert!(matches!(
        PredictionFrame::from_dataframe::<&str>(&df, "date", &[]),
        Err(ForecastError::IllegalArgument(_))
    ));
}

#[test]
fn test_with_column_checks_length() {
    let result = PredictionFrame::new(daily(0, 3)).with_column("promo", vec![1.0, 2.0]);
    assert!(matches!(result, Err(ForecastError::IllegalArgument(_))));
}

#[test]
fn test_regressor_matrix_follows_requested_order() {
    let frame = PredictionFrame::new(daily(0, 2))
        .with_column("a", vec![1.0, 2.0])
        .unwrap()
        .with_column("b", vec![3.0, 4.0])
        .unwrap();

    let matrix = frame
        .regressor_matrix(&["b".to_string(), "a".to_string()])
        .unwrap();
    assert_eq!(matrix, array![[3.0, 1.0], [4.0, 2.0]]);

    let empty = frame.regressor_matrix(&[]).unwrap();
    assert_eq!(empty.dim(), (2, 0));

    assert!(matches!(
        frame.regressor_matrix(&["c".to_string()]),
        Err(ForecastError::MissingRegressor(_))
    ));
}
