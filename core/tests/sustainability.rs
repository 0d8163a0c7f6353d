use bmmanager_core::{
    config::AnalyticsConfig,
    directory::demo_directory,
    rng::{RngBank, StreamSlot},
    sustainability::{
        fleet_rollup, score_store, synth_consumption, StoreConsumption, SustainabilityBand,
    },
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn consumption(energy: f64, paper: f64, devices: u32) -> StoreConsumption {
    StoreConsumption {
        store_id: "s1".into(),
        energy_kwh_month: energy,
        paper_meters_month: paper,
        device_count: devices,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The footprint follows the configured factors exactly:
/// 0.5 kg/kWh and 0.006 kg/m of thermal paper.
#[test]
fn footprint_follows_emission_factors() {
    let config = AnalyticsConfig::default_chile().sustainability;
    let score = score_store(&consumption(1_000.0, 1_000.0, 10), &config);

    assert!((score.energy_co2_kg - 500.0).abs() < 1e-9);
    assert!((score.paper_co2_kg - 6.0).abs() < 1e-9);
    assert!((score.carbon_footprint_kg - 506.0).abs() < 1e-9);
    assert!((score.co2_per_device_kg - 50.6).abs() < 1e-9);
}

/// Low per-device footprint lands green, heavy footprint floors the
/// score at zero and lands red.
#[test]
fn bands_follow_score() {
    let config = AnalyticsConfig::default_chile().sustainability;

    let light = score_store(&consumption(100.0, 100.0, 10), &config);
    assert!((light.score - 84.82).abs() < 1e-9, "score {}", light.score);
    assert_eq!(light.band, SustainabilityBand::Green);

    let heavy = score_store(&consumption(1_000.0, 1_000.0, 10), &config);
    assert_eq!(heavy.score, 0.0, "score must floor at zero");
    assert_eq!(heavy.band, SustainabilityBand::Red);
}

/// A store with no devices takes a zero per-device footprint — no
/// division by zero, full score.
#[test]
fn zero_devices_guarded() {
    let config = AnalyticsConfig::default_chile().sustainability;
    let score = score_store(&consumption(800.0, 2_000.0, 0), &config);

    assert_eq!(score.co2_per_device_kg, 0.0);
    assert_eq!(score.score, 100.0);
    assert_eq!(score.band, SustainabilityBand::Green);
}

/// Fleet rollup conserves totals and band counts.
#[test]
fn fleet_rollup_conserves() {
    let config = AnalyticsConfig::default_chile();
    let mut rng = RngBank::new(42).for_stream(StreamSlot::Sustainability);
    let consumptions = synth_consumption(&demo_directory(), &mut rng);
    let scores: Vec<_> = consumptions
        .iter()
        .map(|c| score_store(c, &config.sustainability))
        .collect();

    let rollup = fleet_rollup(&scores);

    let expected_energy: f64 = consumptions.iter().map(|c| c.energy_kwh_month).sum();
    assert!((rollup.total_energy_kwh - expected_energy).abs() < 1e-6);

    let banded = rollup.green_stores + rollup.orange_stores + rollup.red_stores;
    assert_eq!(banded as usize, scores.len(), "every store must land in one band");

    assert!(
        (0.0..=100.0).contains(&rollup.avg_score),
        "avg score {} out of bounds",
        rollup.avg_score
    );
}

/// An empty fleet rolls up to zeros without dividing by zero.
#[test]
fn empty_fleet_rollup_is_zero() {
    let rollup = fleet_rollup(&[]);
    assert_eq!(rollup.avg_score, 0.0);
    assert_eq!(rollup.total_co2_kg, 0.0);
    assert_eq!(rollup.green_stores + rollup.orange_stores + rollup.red_stores, 0);
}
