//! The analytics service — one shared facade over the
//! generate → aggregate → predict pipeline.
//!
//! STAGE ORDER (fixed):
//!   1. Event generator  (filtered, most recent first)
//!   2. Aggregator       (statistics object)
//!   3. Trend predictor  (7-day projection off the daily trend)
//!
//! RULES:
//!   - All randomness flows through the RngBank; same seed, same
//!     inputs and same `now` produce an identical report.
//!   - Stages communicate only through their value outputs; no stage
//!     reads another stage's internals.

use crate::{
    aggregator::{DailyTrend, FraudStats},
    config::AnalyticsConfig,
    directory::StoreRecord,
    error::{AnalyticsError, AnalyticsResult},
    event::FraudEvent,
    generator::{self, EventFilters},
    predictor::{self, TrendForecast},
    rng::{RngBank, StreamSlot},
    types::EntityId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-facing query surface, mirroring the dashboard filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryParams {
    /// Window length in days; 7, 30 and 90 in observed dashboard usage,
    /// any positive value is valid.
    pub days: u32,
    #[serde(flatten)]
    pub filters: EventFilters,
}

impl QueryParams {
    pub fn last_days(days: u32) -> Self {
        Self {
            days,
            filters: EventFilters::default(),
        }
    }
}

/// Everything one session's dashboards and exports need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub report_id: EntityId,
    pub generated_at: DateTime<Utc>,
    pub params: QueryParams,
    pub stats: FraudStats,
    pub forecast: TrendForecast,
    pub events: Vec<FraudEvent>,
}

pub struct FraudAnalyticsService {
    config: AnalyticsConfig,
    rng_bank: RngBank,
}

impl FraudAnalyticsService {
    pub fn new(config: AnalyticsConfig, seed: u64) -> Self {
        Self {
            config,
            rng_bank: RngBank::new(seed),
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Stage 1: synthesize and filter the window's events.
    /// Each call draws a fresh stream from the bank, so repeated calls
    /// with equal inputs return equal event sets.
    pub fn generate_events(
        &self,
        stores: &[StoreRecord],
        params: &QueryParams,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<FraudEvent>> {
        if params.days == 0 {
            return Err(AnalyticsError::InvalidDayWindow { days: params.days });
        }
        let mut rng = self.rng_bank.for_stream(StreamSlot::FraudEvents);
        Ok(generator::generate_events(
            stores,
            params.days,
            &params.filters,
            &self.config,
            &mut rng,
            now,
        ))
    }

    /// Stage 2: reduce an event set — generated or supplied by the
    /// caller — into the statistics object.
    pub fn compute_stats(&self, events: &[FraudEvent], days: u32) -> AnalyticsResult<FraudStats> {
        FraudStats::from_events(events, days, &self.config)
    }

    /// Stage 3: project the daily trend forward.
    pub fn predict_trend(&self, daily_trends: &[DailyTrend], today: NaiveDate) -> TrendForecast {
        predictor::predict_trend(daily_trends, today)
    }

    /// Run the full pipeline with a fresh report id.
    pub fn report(
        &self,
        stores: &[StoreRecord],
        params: &QueryParams,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<AnalyticsReport> {
        self.report_with_id(Uuid::new_v4().to_string(), stores, params, now)
    }

    /// Run the full pipeline under a caller-chosen report id. Replay
    /// tooling and tests use this so whole reports compare byte-equal.
    pub fn report_with_id(
        &self,
        report_id: EntityId,
        stores: &[StoreRecord],
        params: &QueryParams,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<AnalyticsReport> {
        let events = self.generate_events(stores, params, now)?;
        let stats = self.compute_stats(&events, params.days)?;
        let forecast = self.predict_trend(&stats.daily_trends, now.date_naive());

        log::info!(
            "report {report_id}: {} events, {}% prevented, trend={}",
            stats.total_events,
            stats.prevention_rate,
            forecast.trend.as_str()
        );

        Ok(AnalyticsReport {
            report_id,
            generated_at: now,
            params: params.clone(),
            stats,
            forecast,
            events,
        })
    }
}
