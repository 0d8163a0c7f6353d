//! analytics-runner: headless pipeline runner for BM Manager.
//!
//! Usage:
//!   analytics-runner --seed 12345 --days 30
//!   analytics-runner --seed 12345 --days 7 --device balance --json

use anyhow::{bail, Result};
use bmmanager_core::{
    config::AnalyticsConfig,
    directory,
    event::{DeviceKind, FraudKind},
    generator::EventFilters,
    maintenance,
    rng::{RngBank, StreamSlot},
    service::{AnalyticsReport, FraudAnalyticsService, QueryParams},
    sustainability,
};
use chrono::Utc;
use std::env;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 30u32);
    let json_mode = args.iter().any(|a| a == "--json");

    if days == 0 {
        bail!("--days must be positive");
    }

    let mut filters = EventFilters::default();
    if let Some(store) = string_arg(&args, "--store") {
        if store != "all" {
            filters.store_id = Some(store);
        }
    }
    if let Some(device) = string_arg(&args, "--device") {
        if device != "all" {
            filters.device_kind = Some(DeviceKind::from_str(&device).map_err(anyhow::Error::msg)?);
        }
    }
    if let Some(fraud) = string_arg(&args, "--fraud-type") {
        if fraud != "all" {
            filters.fraud_kind = Some(FraudKind::from_str(&fraud).map_err(anyhow::Error::msg)?);
        }
    }

    if !json_mode {
        println!("BM Manager — analytics-runner");
        println!("  seed:  {seed}");
        println!("  days:  {days}");
        println!();
    }

    let stores = directory::demo_directory();
    let service = FraudAnalyticsService::new(AnalyticsConfig::default_chile(), seed);
    let params = QueryParams { days, filters };

    let report = service.report(&stores, &params, Utc::now())?;
    log::debug!("report {} ready", report.report_id);

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&service, &report, seed);
    Ok(())
}

fn print_summary(service: &FraudAnalyticsService, report: &AnalyticsReport, seed: u64) {
    let stats = &report.stats;
    let forecast = &report.forecast;

    println!("=== FRAUD SUMMARY ===");
    println!("  report_id:    {}", report.report_id);
    println!("  events:       {}", stats.total_events);
    println!("  prevented:    {}", stats.prevented_events);
    println!("  prevention:   {:.1}%", stats.prevention_rate);
    println!("  savings:      ${} CLP", stats.total_savings);
    println!("  monthly est:  ${:.0} CLP", stats.monthly_savings);
    println!("  roi:          {:.1}%", stats.roi_pct);

    println!();
    println!("=== TOP STORES ===");
    if stats.top_stores.is_empty() {
        println!("  (no events in window)");
    } else {
        for rollup in &stats.top_stores {
            println!(
                "  {} | {} events | avg ${} CLP",
                rollup.name, rollup.count, rollup.avg_value
            );
        }
    }

    println!();
    println!("=== 7-DAY FORECAST ({}) ===", forecast.trend.as_str());
    for point in &forecast.points {
        println!(
            "  {} | predicted {:>3} | confidence {}%",
            point.date, point.predicted, point.confidence
        );
    }

    // Side scorers run off their own streams from the same master seed.
    let bank = RngBank::new(seed);
    let stores = directory::demo_directory();

    let mut maintenance_rng = bank.for_stream(StreamSlot::Maintenance);
    let fleet = maintenance::synth_fleet(&stores, 4, &mut maintenance_rng);
    let assessments = maintenance::assess_fleet(&fleet, &service.config().maintenance);
    let critical = assessments
        .iter()
        .filter(|a| a.band == maintenance::RiskBand::Critical)
        .count();

    let mut sustainability_rng = bank.for_stream(StreamSlot::Sustainability);
    let consumption = sustainability::synth_consumption(&stores, &mut sustainability_rng);
    let scores: Vec<_> = consumption
        .iter()
        .map(|c| sustainability::score_store(c, &service.config().sustainability))
        .collect();
    let rollup = sustainability::fleet_rollup(&scores);

    println!();
    println!("=== FLEET HEALTH ===");
    println!("  devices:        {}", assessments.len());
    println!("  critical risk:  {critical}");
    println!(
        "  sustainability: avg {:.1} ({} green / {} orange / {} red)",
        rollup.avg_score, rollup.green_stores, rollup.orange_stores, rollup.red_stores
    );
}

fn parse_arg<T: FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}
