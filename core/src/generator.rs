//! Fraud event generator — synthesizes one session's event set.
//!
//! RULE: Generation never fails. An empty store directory yields an
//! empty (or near-empty) event set; a product without a catalog price
//! takes a bounded random value instead of erroring.
//!
//! Density: each calendar day, counting backward from `now`, draws a
//! per-day event count in [EVENTS_PER_DAY_MIN, EVENTS_PER_DAY_MAX).

use crate::{
    config::AnalyticsConfig,
    directory::StoreRecord,
    event::{DetectionSource, DeviceKind, FraudEvent, FraudKind},
    rng::StreamRng,
    types::{Clp, StoreId},
};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub const EVENTS_PER_DAY_MIN: u64 = 8;
pub const EVENTS_PER_DAY_MAX: u64 = 23; // exclusive

const FALLBACK_PRICE_MIN: Clp = 1_000;
const FALLBACK_PRICE_MAX: Clp = 16_000; // exclusive
const CONFIDENCE_MIN: i64 = 80;
const CONFIDENCE_MAX: i64 = 100; // exclusive
const MAX_QUANTITY: u64 = 5;
const OPERATOR_POOL: u64 = 20;
const PREVENTION_PROBABILITY: f64 = 0.8;
const GRAVIT_SHARE: f64 = 0.5;

const DEVICE_TAG_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Exact-match filter conjunction. `None` disables a dimension
/// (the REST surface spells that as `"all"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventFilters {
    pub store_id: Option<StoreId>,
    pub device_kind: Option<DeviceKind>,
    pub fraud_kind: Option<FraudKind>,
}

impl EventFilters {
    pub fn matches(&self, event: &FraudEvent) -> bool {
        self.store_id
            .as_ref()
            .is_none_or(|id| *id == event.store_id)
            && self.device_kind.is_none_or(|kind| kind == event.device_kind)
            && self.fraud_kind.is_none_or(|kind| kind == event.fraud_kind)
    }
}

/// Generate, filter and order the event set for a `days`-day window
/// ending at `now`. Output is sorted most recent first.
pub fn generate_events(
    stores: &[StoreRecord],
    days: u32,
    filters: &EventFilters,
    config: &AnalyticsConfig,
    rng: &mut StreamRng,
    now: DateTime<Utc>,
) -> Vec<FraudEvent> {
    let today = now.date_naive();
    let mut events = Vec::new();

    for day_offset in 0..days {
        let day = today - Duration::days(day_offset as i64);
        let per_day =
            EVENTS_PER_DAY_MIN + rng.next_u64_below(EVENTS_PER_DAY_MAX - EVENTS_PER_DAY_MIN);

        for slot in 0..per_day {
            // No directory entry to draw — skip this draw, keep going.
            if stores.is_empty() {
                continue;
            }
            let store = rng.pick(stores);
            let fraud_kind = *rng.pick(&FraudKind::ALL);
            let device_kind = *rng.pick(&DeviceKind::ALL);
            let product_name = rng.pick(&config.product_names).clone();

            let estimated_value = match config.price_of(&product_name) {
                Some(price) => price,
                // Product missing from the price table: bounded random.
                None => rng.next_i64_in(FALLBACK_PRICE_MIN, FALLBACK_PRICE_MAX),
            };

            // Events land at a random time on their calendar day, so the
            // whole set stays inside the requested window.
            let time = NaiveTime::from_hms_opt(
                rng.next_u64_below(24) as u32,
                rng.next_u64_below(60) as u32,
                0,
            )
            .unwrap_or_default();

            events.push(FraudEvent {
                id: format!("fraud-{day}-{slot:02}"),
                timestamp: day.and_time(time).and_utc(),
                fraud_kind,
                device_kind,
                device_id: device_tag(device_kind, rng),
                store_id: store.id.clone(),
                store_name: store.name.clone(),
                comuna: store.comuna.clone(),
                product_name,
                product_code: format!("SKU{:06}", rng.next_u64_below(1_000_000)),
                quantity: (1 + rng.next_u64_below(MAX_QUANTITY)) as u32,
                estimated_value,
                operator: format!("Operador {}", 1 + rng.next_u64_below(OPERATOR_POOL)),
                confidence: rng.next_i64_in(CONFIDENCE_MIN, CONFIDENCE_MAX) as u8,
                source: if rng.chance(GRAVIT_SHARE) {
                    DetectionSource::Gravit
                } else {
                    DetectionSource::Edgify
                },
                prevented: rng.chance(PREVENTION_PROBABILITY),
            });
        }
    }

    let generated = events.len();
    events.retain(|event| filters.matches(event));
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    log::debug!(
        "generator: {generated} events over {days} days, {} after filters",
        events.len()
    );

    events
}

fn device_tag(kind: DeviceKind, rng: &mut StreamRng) -> String {
    let mut tag = String::with_capacity(DEVICE_TAG_LEN + 4);
    tag.push_str(kind.id_prefix());
    tag.push('-');
    for _ in 0..DEVICE_TAG_LEN {
        let index = rng.next_u64_below(BASE36.len() as u64) as usize;
        tag.push(BASE36[index] as char);
    }
    tag
}
