use bmmanager_core::{
    config::AnalyticsConfig,
    directory::{demo_directory, StoreRecord},
    event::{DeviceKind, FraudKind},
    generator::{self, EventFilters, EVENTS_PER_DAY_MAX, EVENTS_PER_DAY_MIN},
    rng::{RngBank, StreamSlot},
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
}

fn generate(seed: u64, days: u32, filters: &EventFilters) -> Vec<bmmanager_core::event::FraudEvent> {
    let mut rng = RngBank::new(seed).for_stream(StreamSlot::FraudEvents);
    generator::generate_events(
        &demo_directory(),
        days,
        filters,
        &AnalyticsConfig::default_chile(),
        &mut rng,
        fixed_now(),
    )
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Unfiltered generation puts every day's count inside [8, 23) and
/// covers exactly the requested window.
#[test]
fn per_day_density_within_band() {
    let events = generate(42, 5, &EventFilters::default());

    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for event in &events {
        *per_day.entry(event.timestamp.date_naive()).or_default() += 1;
    }

    assert_eq!(per_day.len(), 5, "expected one entry per generated day");
    for (day, count) in per_day {
        assert!(
            (EVENTS_PER_DAY_MIN..EVENTS_PER_DAY_MAX).contains(&count),
            "day {day} count {count} outside [{EVENTS_PER_DAY_MIN}, {EVENTS_PER_DAY_MAX})"
        );
    }
}

/// Every event's timestamp falls on a calendar day inside the window.
#[test]
fn timestamps_stay_inside_window() {
    let days = 7;
    let events = generate(7, days, &EventFilters::default());
    let today = fixed_now().date_naive();
    let oldest = today - chrono::Duration::days(days as i64 - 1);

    for event in &events {
        let day = event.timestamp.date_naive();
        assert!(
            day >= oldest && day <= today,
            "event {} on {day} outside [{oldest}, {today}]",
            event.id
        );
    }
}

/// Applied filters hold for every event in the output (exact-match
/// conjunction; each dimension independently disableable).
#[test]
fn filters_are_exact_conjunction() {
    let filters = EventFilters {
        store_id: Some("store-003".into()),
        device_kind: Some(DeviceKind::Balance),
        fraud_kind: Some(FraudKind::NoScan),
    };
    let events = generate(99, 90, &filters);

    for event in &events {
        assert_eq!(event.store_id, "store-003");
        assert_eq!(event.device_kind, DeviceKind::Balance);
        assert_eq!(event.fraud_kind, FraudKind::NoScan);
    }
}

/// Output ordering is most recent first.
#[test]
fn output_sorted_descending_by_timestamp() {
    let events = generate(123, 14, &EventFilters::default());

    for pair in events.windows(2) {
        assert!(
            pair[0].timestamp >= pair[1].timestamp,
            "events out of order: {} before {}",
            pair[0].timestamp,
            pair[1].timestamp
        );
    }
}

/// An empty store directory degrades to an empty event set — no panic,
/// no error.
#[test]
fn empty_directory_yields_empty_set() {
    let mut rng = RngBank::new(5).for_stream(StreamSlot::FraudEvents);
    let events = generator::generate_events(
        &[],
        30,
        &EventFilters::default(),
        &AnalyticsConfig::default_chile(),
        &mut rng,
        fixed_now(),
    );
    assert!(events.is_empty(), "expected no events without stores");
}

/// Detection confidence is drawn in [80, 100); quantities in 1..=5.
#[test]
fn event_fields_within_documented_bands() {
    let events = generate(1337, 30, &EventFilters::default());
    assert!(!events.is_empty());

    for event in &events {
        assert!(
            (80..100).contains(&event.confidence),
            "confidence {} outside [80, 100)",
            event.confidence
        );
        assert!(
            (1..=5).contains(&event.quantity),
            "quantity {} outside 1..=5",
            event.quantity
        );
    }
}

/// Catalog products carry their catalog price.
#[test]
fn catalog_products_use_catalog_prices() {
    let config = AnalyticsConfig::default_chile();
    let events = generate(2024, 30, &EventFilters::default());

    for event in &events {
        let expected = config
            .price_of(&event.product_name)
            .expect("generated product should be in the default catalog");
        assert_eq!(
            event.estimated_value, expected,
            "product {} priced off-catalog",
            event.product_name
        );
    }
}

/// A product missing from the price table falls back to a bounded
/// random value instead of failing generation.
#[test]
fn missing_price_falls_back_to_bounded_random() {
    let mut config = AnalyticsConfig::default_chile();
    config.product_prices.clear();

    let stores = vec![StoreRecord::new("s1", "Local 1", "Las Condes")];
    let mut rng = RngBank::new(77).for_stream(StreamSlot::FraudEvents);
    let events =
        generator::generate_events(&stores, 30, &EventFilters::default(), &config, &mut rng, fixed_now());

    assert!(!events.is_empty());
    for event in &events {
        assert!(
            (1_000..16_000).contains(&event.estimated_value),
            "fallback value {} outside [1000, 16000)",
            event.estimated_value
        );
    }
}
