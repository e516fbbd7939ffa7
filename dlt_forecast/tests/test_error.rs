use dlt_forecast::error::ForecastError;
use dlt_math::MathError;

#[test]
fn test_error_conversion() {
    // Math errors keep their variant
    let math_error = MathError::InvalidInput("negative value".to_string());
    let forecast_error = ForecastError::from(math_error.clone());

    match forecast_error {
        ForecastError::Math(inner) => assert_eq!(inner, math_error),
        other => panic!("Expected Math variant, got {:?}", other),
    }

    // JSON errors
    let json_error = serde_json::from_str::<f64>("not a number").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::Json(_)));

    // Shape errors become shape mismatches
    let shape_error = ndarray::Array1::<f64>::zeros(6)
        .into_shape((4, 2))
        .unwrap_err();
    let forecast_error = ForecastError::from(shape_error);
    assert!(matches!(forecast_error, ForecastError::ShapeMismatch(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("damped factor must be in (0, 1]".to_string());
    let error_string = format!("{}", error);
    assert!(error_string.contains("Invalid parameter"));
    assert!(error_string.contains("damped factor must be in (0, 1]"));

    let error = ForecastError::from(MathError::CalculationError("overflow".to_string()));
    let error_string = format!("{}", error);
    assert!(error_string.contains("Math error"));
    assert!(error_string.contains("overflow"));

    let error = ForecastError::MissingParameter("sea_sm".to_string());
    assert_eq!(error.to_string(), "Missing posterior parameter: sea_sm");

    let error = ForecastError::MissingRegressor("promo".to_string());
    assert_eq!(error.to_string(), "Missing regressor column: promo");
}

#[test]
fn test_error_creation() {
    let illegal = ForecastError::IllegalArgument("dates out of order".to_string());
    let prediction = ForecastError::Prediction("start before training".to_string());
    let model = ForecastError::Model("empty training index".to_string());

    assert!(matches!(illegal, ForecastError::IllegalArgument(_)));
    assert!(matches!(prediction, ForecastError::Prediction(_)));
    assert!(matches!(model, ForecastError::Model(_)));

    if let ForecastError::Prediction(msg) = prediction {
        assert_eq!(msg, "start before training");
    }
}
