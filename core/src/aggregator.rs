//! Event aggregation — reduces a filtered event set into the statistics
//! object the dashboards and exports consume.
//!
//! RULES:
//!   - Empty input degrades to zeros and empty collections; no division
//!     ever reaches a zero denominator.
//!   - Monetary aggregates are integer CLP; percentages keep one decimal.
//!   - Grouping keys iterate in sorted order so equal inputs always
//!     produce byte-identical output.

use crate::{
    config::AnalyticsConfig,
    error::{AnalyticsError, AnalyticsResult},
    event::{DeviceKind, FraudEvent},
    types::Clp,
};
use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-calendar-day rollup. Only days with at least one event appear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub count: u64,
    pub value: Clp,
}

/// Per-hour-of-day rollup. Only hours with at least one event appear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyTrend {
    pub hour: u32,
    pub count: u64,
}

/// Group-count rollup over one dimension (product, store, comuna).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionRollup {
    pub name: String,
    pub count: u64,
    pub total_value: Clp,
    /// round(total_value / count), integer CLP.
    pub avg_value: Clp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSlice {
    pub device_kind: DeviceKind,
    pub count: u64,
}

/// The full statistics object for one analytics session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FraudStats {
    pub total_events: u64,
    pub prevented_events: u64,
    /// Percent, one decimal. 0.0 when there are no events.
    pub prevention_rate: f64,
    /// Sum of estimated value over prevented events, CLP.
    pub total_savings: Clp,
    /// Linear 30/days scale-up of total_savings.
    pub monthly_savings: f64,
    /// round(total_savings / total_events), CLP. 0 when empty.
    pub avg_fraud_value: Clp,
    /// Chronologically sorted; the trend predictor's direct input.
    pub daily_trends: Vec<DailyTrend>,
    pub hourly_trends: Vec<HourlyTrend>,
    pub top_products: Vec<DimensionRollup>,
    pub top_stores: Vec<DimensionRollup>,
    pub top_comunas: Vec<DimensionRollup>,
    pub device_distribution: Vec<DeviceSlice>,
    /// Percent, one decimal. Defined (−100.0) with zero savings.
    pub roi_pct: f64,
}

impl FraudStats {
    /// Reduce a filtered event set over a `days`-day window.
    pub fn from_events(
        events: &[FraudEvent],
        days: u32,
        config: &AnalyticsConfig,
    ) -> AnalyticsResult<Self> {
        if days == 0 {
            return Err(AnalyticsError::InvalidDayWindow { days });
        }

        let total_events = events.len() as u64;
        let prevented: Vec<&FraudEvent> = events.iter().filter(|e| e.prevented).collect();
        let prevented_events = prevented.len() as u64;
        let total_savings: Clp = prevented.iter().map(|e| e.estimated_value).sum();

        let prevention_rate = if total_events > 0 {
            round_one_decimal(prevented_events as f64 / total_events as f64 * 100.0)
        } else {
            0.0
        };

        let avg_fraud_value = if total_events > 0 {
            (total_savings as f64 / total_events as f64).round() as Clp
        } else {
            0
        };

        let mut by_day: BTreeMap<NaiveDate, (u64, Clp)> = BTreeMap::new();
        let mut by_hour: BTreeMap<u32, u64> = BTreeMap::new();
        let mut by_product: BTreeMap<String, (u64, Clp)> = BTreeMap::new();
        let mut by_store: BTreeMap<String, (u64, Clp)> = BTreeMap::new();
        let mut by_comuna: BTreeMap<String, (u64, Clp)> = BTreeMap::new();
        let mut by_device: BTreeMap<&'static str, (DeviceKind, u64)> = BTreeMap::new();

        for event in events {
            let day = by_day.entry(event.timestamp.date_naive()).or_default();
            day.0 += 1;
            day.1 += event.estimated_value;

            *by_hour.entry(event.timestamp.hour()).or_default() += 1;

            bump(&mut by_product, event.product_name.clone(), event.estimated_value);
            bump(
                &mut by_store,
                format!("{} - {}", event.store_name, event.comuna),
                event.estimated_value,
            );
            bump(&mut by_comuna, event.comuna.clone(), event.estimated_value);

            let device = by_device
                .entry(event.device_kind.as_str())
                .or_insert((event.device_kind, 0));
            device.1 += 1;
        }

        let monthly_savings = total_savings as f64 * (30.0 / days as f64);
        let subscription = config.monthly_subscription_cost as f64;
        let roi_pct = round_one_decimal((monthly_savings - subscription) / subscription * 100.0);

        Ok(Self {
            total_events,
            prevented_events,
            prevention_rate,
            total_savings,
            monthly_savings,
            avg_fraud_value,
            daily_trends: by_day
                .into_iter()
                .map(|(date, (count, value))| DailyTrend { date, count, value })
                .collect(),
            hourly_trends: by_hour
                .into_iter()
                .map(|(hour, count)| HourlyTrend { hour, count })
                .collect(),
            top_products: top_n(by_product, config.top_n),
            top_stores: top_n(by_store, config.top_n),
            top_comunas: top_n(by_comuna, config.top_n),
            device_distribution: by_device
                .into_values()
                .map(|(device_kind, count)| DeviceSlice { device_kind, count })
                .collect(),
            roi_pct,
        })
    }
}

fn bump(map: &mut BTreeMap<String, (u64, Clp)>, key: String, value: Clp) {
    let entry = map.entry(key).or_default();
    entry.0 += 1;
    entry.1 += value;
}

/// Sort descending by count (name ascending on ties, so output is
/// stable) and truncate to `n`.
fn top_n(map: BTreeMap<String, (u64, Clp)>, n: usize) -> Vec<DimensionRollup> {
    let mut rollups: Vec<DimensionRollup> = map
        .into_iter()
        .map(|(name, (count, total_value))| DimensionRollup {
            name,
            count,
            total_value,
            avg_value: (total_value as f64 / count as f64).round() as Clp,
        })
        .collect();
    rollups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    rollups.truncate(n);
    rollups
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
