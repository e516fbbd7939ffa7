use chrono::{Duration, TimeZone, Utc};
use dlt_workspace::forecast::posterior::param;
use dlt_workspace::forecast::{
    DltConfig, DltPredictor, PosteriorDraws, PredictOptions, PredictionFrame, StudentTNoise,
    TrainingMeta,
};
use dlt_workspace::logging;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

const DRAWS: usize = 200;
const TRAINING: usize = 60;
const PERIOD: usize = 7;
const HORIZON: i64 = 14;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(1);

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let training_dates: Vec<_> = (0..TRAINING as i64)
        .map(|i| start + Duration::days(i))
        .collect();
    let training = TrainingMeta::new(training_dates)?;

    // Synthetic posterior: a weekly pattern on a slowly rising level
    let mut rng = StdRng::seed_from_u64(2024);
    let offsets: Vec<f64> = (0..DRAWS).map(|_| rng.gen_range(-0.5..0.5)).collect();
    let slopes: Vec<f64> = (0..DRAWS).map(|_| rng.gen_range(0.05..0.15)).collect();
    let weekly = |t: usize| (2.0 * std::f64::consts::PI * (t % PERIOD) as f64 / PERIOD as f64).sin();

    let level = Array2::from_shape_fn((DRAWS, TRAINING), |(i, t)| {
        20.0 + offsets[i] + slopes[i] * t as f64
    });
    let posterior = PosteriorDraws::default()
        .with_param(param::LOCAL_TREND_LEVELS, level.clone())?
        .with_param(
            param::LOCAL_TREND_SLOPES,
            Array2::from_shape_fn((DRAWS, TRAINING), |(i, _)| slopes[i]),
        )?
        .with_param(param::LOCAL_TREND, level)?
        .with_param(param::GLOBAL_TREND, Array2::zeros((DRAWS, TRAINING)))?
        .with_param(param::GLOBAL_TREND_LEVEL, Array1::zeros(DRAWS))?
        .with_param(param::GLOBAL_TREND_SLOPE, Array1::zeros(DRAWS))?
        .with_param(param::LEVEL_SMOOTHING_FACTOR, Array1::from_elem(DRAWS, 0.4))?
        .with_param(param::SLOPE_SMOOTHING_FACTOR, Array1::from_elem(DRAWS, 0.1))?
        .with_param(param::RESIDUAL_SIGMA, Array1::from_elem(DRAWS, 0.8))?
        .with_param(param::RESIDUAL_DEGREE_OF_FREEDOM, Array1::from_elem(DRAWS, 5.0))?
        .with_param(
            param::SEASONALITY_LEVELS,
            Array2::from_shape_fn((DRAWS, TRAINING + PERIOD), |(_, t)| weekly(t)),
        )?
        .with_param(param::SEASONALITY_SMOOTHING_FACTOR, Array1::from_elem(DRAWS, 0.2))?;

    info!(draws = DRAWS, training = TRAINING, "built synthetic posterior");

    let config = DltConfig::new()
        .with_multiplicative(false)
        .with_log_global_trend(false)
        .with_seasonality(PERIOD);
    let predictor = DltPredictor::new(config, training)?;

    // The last week of training plus two weeks ahead
    let dates: Vec<_> = (TRAINING as i64 - 7..TRAINING as i64 + HORIZON)
        .map(|i| start + Duration::days(i))
        .collect();
    let frame = PredictionFrame::new(dates);

    let options = PredictOptions::new().with_error(true).with_decompose(true);
    let mut noise = StudentTNoise::seeded(7);
    let forecast = predictor.predict(&posterior, &frame, &options, &mut noise)?;

    let summary = forecast.summarize(&[5.0, 95.0])?;
    let (low, high) = match (summary.percentile(5.0), summary.percentile(95.0)) {
        (Some(low), Some(high)) => (low, high),
        _ => return Err("missing percentile".into()),
    };

    println!(
        "Forecast from {} draws over {} dates:",
        forecast.num_samples(),
        forecast.len()
    );
    println!("{:<12} {:>8} {:>8} {:>8}", "date", "p5", "median", "p95");
    for (k, date) in forecast.dates.iter().enumerate() {
        println!(
            "{:<12} {:>8.2} {:>8.2} {:>8.2}",
            date.format("%Y-%m-%d"),
            low[k],
            summary.median[k],
            high[k]
        );
    }

    Ok(())
}
