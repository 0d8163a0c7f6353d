//! Trend predictor — ordinary-least-squares projection of daily event
//! counts over a fixed forward horizon.
//!
//! The regression runs over ordinal position (x_i = i, 1-indexed), not
//! calendar dates: gaps in the date axis are invisible to the model.
//!
//! RULE: fewer than two observed days degrades to a flat line — the
//! naive closed-form denominator is zero there and must never be
//! evaluated.

use crate::aggregator::DailyTrend;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const PREDICTION_HORIZON_DAYS: usize = 7;

const CONFIDENCE_START: i64 = 95;
const CONFIDENCE_DECAY_PER_DAY: i64 = 5;
const CONFIDENCE_FLOOR: i64 = 60;

/// Reference model accuracy, percent. Published by the detection
/// providers, not derived from residuals.
const MODEL_ACCURACY_PCT: f64 = 87.3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

/// One projected day in the forecast horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted: u64,
    /// Percent; strictly decreasing by 5 per day, floored at 60.
    pub confidence: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendForecast {
    pub trend: TrendDirection,
    pub slope: f64,
    pub intercept: f64,
    pub points: Vec<PredictionPoint>,
    pub model_accuracy_pct: f64,
}

/// Fit the daily counts and project PREDICTION_HORIZON_DAYS forward,
/// dating the horizon from `today`.
pub fn predict_trend(daily_trends: &[DailyTrend], today: NaiveDate) -> TrendForecast {
    let counts: Vec<f64> = daily_trends.iter().map(|d| d.count as f64).collect();
    let (slope, intercept) = fit_line(&counts);

    let n = counts.len() as f64;
    let points = (1..=PREDICTION_HORIZON_DAYS as i64)
        .map(|i| {
            let raw = slope * (n + i as f64) + intercept;
            PredictionPoint {
                date: today + Duration::days(i),
                predicted: raw.round().max(0.0) as u64,
                confidence: (CONFIDENCE_START - i * CONFIDENCE_DECAY_PER_DAY)
                    .max(CONFIDENCE_FLOOR) as u8,
            }
        })
        .collect();

    let trend = if slope > 0.0 {
        TrendDirection::Increasing
    } else if slope < 0.0 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    log::debug!(
        "predictor: n={} slope={slope:.4} intercept={intercept:.4} trend={}",
        counts.len(),
        trend.as_str()
    );

    TrendForecast {
        trend,
        slope,
        intercept,
        points,
        model_accuracy_pct: MODEL_ACCURACY_PCT,
    }
}

/// Closed-form OLS over y_1..y_n with x_i = i. Returns (slope, intercept).
/// n < 2 yields the flat line through the single observation (or zero).
fn fit_line(counts: &[f64]) -> (f64, f64) {
    let n = counts.len();
    if n < 2 {
        return (0.0, counts.first().copied().unwrap_or(0.0));
    }

    let n_f = n as f64;
    let sum_x = n_f * (n_f + 1.0) / 2.0;
    let sum_x2 = n_f * (n_f + 1.0) * (2.0 * n_f + 1.0) / 6.0;
    let sum_y: f64 = counts.iter().sum();
    let sum_xy: f64 = counts
        .iter()
        .enumerate()
        .map(|(index, y)| y * (index as f64 + 1.0))
        .sum();

    let slope = (n_f * sum_xy - sum_x * sum_y) / (n_f * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n_f;
    (slope, intercept)
}
