//! Sustainability scoring — per-store carbon footprint and fleet rollup.
//!
//! Footprint: energy and thermal-paper consumption times the configured
//! emission factors. Score: 100 minus a scaled per-device footprint,
//! floored at zero. A store with no devices scores from a zero
//! per-device footprint rather than dividing by zero.

use crate::{
    config::SustainabilityConfig,
    directory::StoreRecord,
    rng::StreamRng,
    types::StoreId,
};
use serde::{Deserialize, Serialize};

/// Monthly consumption figures for one store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConsumption {
    pub store_id: StoreId,
    pub energy_kwh_month: f64,
    pub paper_meters_month: f64,
    pub device_count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SustainabilityBand {
    Green,
    Orange,
    Red,
}

impl SustainabilityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SustainabilityScore {
    pub store_id: StoreId,
    pub energy_kwh_month: f64,
    pub paper_meters_month: f64,
    pub energy_co2_kg: f64,
    pub paper_co2_kg: f64,
    pub carbon_footprint_kg: f64,
    pub co2_per_device_kg: f64,
    /// 0–100, higher is better.
    pub score: f64,
    pub band: SustainabilityBand,
}

/// Score one store's monthly consumption.
pub fn score_store(
    consumption: &StoreConsumption,
    config: &SustainabilityConfig,
) -> SustainabilityScore {
    let energy_co2_kg = consumption.energy_kwh_month * config.co2_per_kwh;
    let paper_co2_kg = consumption.paper_meters_month * config.co2_per_paper_meter;
    let carbon_footprint_kg = energy_co2_kg + paper_co2_kg;

    let co2_per_device_kg = if consumption.device_count > 0 {
        carbon_footprint_kg / consumption.device_count as f64
    } else {
        0.0
    };

    let score = (100.0 - co2_per_device_kg * config.score_scale).max(0.0);
    let band = if score >= config.green_threshold {
        SustainabilityBand::Green
    } else if score >= config.orange_threshold {
        SustainabilityBand::Orange
    } else {
        SustainabilityBand::Red
    };

    SustainabilityScore {
        store_id: consumption.store_id.clone(),
        energy_kwh_month: consumption.energy_kwh_month,
        paper_meters_month: consumption.paper_meters_month,
        energy_co2_kg,
        paper_co2_kg,
        carbon_footprint_kg,
        co2_per_device_kg,
        score,
        band,
    }
}

/// Fleet-wide sustainability summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetSustainability {
    pub total_energy_kwh: f64,
    pub total_paper_meters: f64,
    pub total_co2_kg: f64,
    /// Mean store score; 0.0 for an empty fleet.
    pub avg_score: f64,
    pub green_stores: u32,
    pub orange_stores: u32,
    pub red_stores: u32,
}

pub fn fleet_rollup(scores: &[SustainabilityScore]) -> FleetSustainability {
    let mut rollup = FleetSustainability {
        total_energy_kwh: 0.0,
        total_paper_meters: 0.0,
        total_co2_kg: 0.0,
        avg_score: 0.0,
        green_stores: 0,
        orange_stores: 0,
        red_stores: 0,
    };

    for store_score in scores {
        rollup.total_energy_kwh += store_score.energy_kwh_month;
        rollup.total_paper_meters += store_score.paper_meters_month;
        rollup.total_co2_kg += store_score.carbon_footprint_kg;
        match store_score.band {
            SustainabilityBand::Green => rollup.green_stores += 1,
            SustainabilityBand::Orange => rollup.orange_stores += 1,
            SustainabilityBand::Red => rollup.red_stores += 1,
        }
    }

    if !scores.is_empty() {
        rollup.avg_score =
            scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64;
    }

    rollup
}

/// Synthesize monthly consumption for every store in the directory.
pub fn synth_consumption(stores: &[StoreRecord], rng: &mut StreamRng) -> Vec<StoreConsumption> {
    stores
        .iter()
        .map(|store| StoreConsumption {
            store_id: store.id.clone(),
            energy_kwh_month: 300.0 + rng.next_f64() * 900.0,
            paper_meters_month: 500.0 + rng.next_f64() * 2_500.0,
            device_count: rng.next_i64_in(3, 16) as u32,
        })
        .collect()
}
