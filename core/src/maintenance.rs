//! Predictive maintenance scoring for the scale fleet.
//!
//! Four usage signals combine into one 0–100 risk figure through the
//! configured weights. These are tuned heuristics — no fitted model
//! stands behind them, and deployments adjust the weights freely.

use crate::{
    config::MaintenanceConfig,
    directory::StoreRecord,
    event::DeviceKind,
    rng::StreamRng,
    types::{EntityId, StoreId},
};
use serde::{Deserialize, Serialize};

const SERIAL_LEN: usize = 8;
const SERIAL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Usage profile of one installed device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceProfile {
    pub device_id: EntityId,
    pub store_id: StoreId,
    pub device_kind: DeviceKind,
    pub serial_number: String,
    pub daily_usage_hours: f64,
    pub age_months: f64,
    pub days_since_calibration: f64,
    pub monthly_transactions: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Critical,
    Elevated,
    Routine,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Elevated => "elevated",
            Self::Routine => "routine",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceAssessment {
    pub device_id: EntityId,
    pub store_id: StoreId,
    /// Weighted combination of the four sub-scores, 0–100.
    pub risk_score: f64,
    pub usage_score: f64,
    pub age_score: f64,
    pub calibration_score: f64,
    pub transaction_score: f64,
    pub band: RiskBand,
    pub recommendation: String,
}

/// Score one device against the configured heuristic.
pub fn assess(profile: &DeviceProfile, config: &MaintenanceConfig) -> MaintenanceAssessment {
    let usage_score = sub_score(profile.daily_usage_hours, config.full_usage_hours);
    let age_score = sub_score(profile.age_months, config.max_age_months);
    let calibration_score = sub_score(profile.days_since_calibration, config.calibration_due_days);
    let transaction_score = sub_score(
        profile.monthly_transactions as f64,
        config.peak_monthly_transactions,
    );

    let weight_sum = config.usage_weight
        + config.age_weight
        + config.calibration_weight
        + config.transaction_weight;
    let risk_score = if weight_sum > 0.0 {
        (usage_score * config.usage_weight
            + age_score * config.age_weight
            + calibration_score * config.calibration_weight
            + transaction_score * config.transaction_weight)
            / weight_sum
    } else {
        0.0
    };

    let band = if risk_score >= config.critical_threshold {
        RiskBand::Critical
    } else if risk_score >= config.elevated_threshold {
        RiskBand::Elevated
    } else {
        RiskBand::Routine
    };

    if band == RiskBand::Critical {
        log::warn!(
            "maintenance: device {} risk {:.1} — {}",
            profile.device_id,
            risk_score,
            band.as_str()
        );
    }

    MaintenanceAssessment {
        device_id: profile.device_id.clone(),
        store_id: profile.store_id.clone(),
        risk_score,
        usage_score,
        age_score,
        calibration_score,
        transaction_score,
        band,
        recommendation: recommendation_for(band).into(),
    }
}

/// Assess a whole fleet, worst risk first.
pub fn assess_fleet(
    profiles: &[DeviceProfile],
    config: &MaintenanceConfig,
) -> Vec<MaintenanceAssessment> {
    let mut assessments: Vec<MaintenanceAssessment> =
        profiles.iter().map(|p| assess(p, config)).collect();
    assessments.sort_by(|a, b| {
        b.risk_score
            .total_cmp(&a.risk_score)
            .then_with(|| a.device_id.cmp(&b.device_id))
    });
    assessments
}

/// Synthesize usage profiles for every store, `per_store` devices each.
/// Ranges mirror the observed fleet: long-lived, heavily used devices
/// with calibration due inside a 90-day cycle.
pub fn synth_fleet(
    stores: &[StoreRecord],
    per_store: usize,
    rng: &mut StreamRng,
) -> Vec<DeviceProfile> {
    let mut profiles = Vec::with_capacity(stores.len() * per_store);
    for store in stores {
        for unit in 0..per_store {
            let device_kind = *rng.pick(&DeviceKind::ALL);
            profiles.push(DeviceProfile {
                device_id: format!("{}-{}-{unit:02}", device_kind.id_prefix(), store.id),
                store_id: store.id.clone(),
                device_kind,
                serial_number: serial_number(rng),
                daily_usage_hours: 8.0 + rng.next_f64() * 12.0,
                age_months: 1.0 + rng.next_f64() * 71.0,
                days_since_calibration: rng.next_f64() * 90.0,
                monthly_transactions: rng.next_i64_in(1_000, 4_000) as u32,
            });
        }
    }
    profiles
}

fn sub_score(value: f64, full_scale: f64) -> f64 {
    if full_scale <= 0.0 {
        return 0.0;
    }
    (value / full_scale * 100.0).clamp(0.0, 100.0)
}

fn recommendation_for(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Critical => "Programar mantención inmediata y recalibración",
        RiskBand::Elevated => "Agendar mantención preventiva este mes",
        RiskBand::Routine => "Operación normal, próxima revisión de rutina",
    }
}

fn serial_number(rng: &mut StreamRng) -> String {
    let mut serial = String::with_capacity(SERIAL_LEN + 5);
    serial.push_str("BMCL-");
    for _ in 0..SERIAL_LEN {
        let index = rng.next_u64_below(SERIAL_ALPHABET.len() as u64) as usize;
        serial.push(SERIAL_ALPHABET[index] as char);
    }
    serial
}
