//! Analytics configuration — every tunable the pipeline reads.
//!
//! RULE: No module hard-codes a business constant that a deployment
//! would want to tune. Subscription cost, the product price table, the
//! heuristic weights and the CO2 factors all live here, so the whole
//! pipeline is parameterizable without editing source.

use crate::types::Clp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Products the generator draws from, in stable draw order.
    pub product_names: Vec<String>,
    /// Catalog price per product, integer CLP. A product present in
    /// `product_names` but absent here takes the generator's bounded
    /// random fallback instead of failing.
    pub product_prices: BTreeMap<String, Clp>,
    /// Monthly cost of the detection-provider subscription, CLP.
    pub monthly_subscription_cost: Clp,
    /// Maximum length of the top-products/stores/comunas rollups.
    pub top_n: usize,
    pub maintenance: MaintenanceConfig,
    pub sustainability: SustainabilityConfig,
}

/// Weights and scales for the maintenance risk heuristic.
/// These are tuned numbers, not a fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    pub usage_weight: f64,
    pub age_weight: f64,
    pub calibration_weight: f64,
    pub transaction_weight: f64,
    /// Daily usage (hours) that maps to a 100 usage sub-score.
    pub full_usage_hours: f64,
    /// Device age (months) that maps to a 100 age sub-score.
    pub max_age_months: f64,
    /// Days since calibration that map to a 100 calibration sub-score.
    pub calibration_due_days: f64,
    /// Monthly transaction volume that maps to a 100 volume sub-score.
    pub peak_monthly_transactions: f64,
    /// Risk at or above this is critical.
    pub critical_threshold: f64,
    /// Risk at or above this (below critical) is elevated.
    pub elevated_threshold: f64,
}

/// Emission factors and scoring scale for the sustainability report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainabilityConfig {
    /// kg CO2e per kWh of energy consumed.
    pub co2_per_kwh: f64,
    /// kg CO2e per meter of thermal paper.
    pub co2_per_paper_meter: f64,
    /// Score penalty per kg CO2e per device.
    pub score_scale: f64,
    /// Score at or above this is green.
    pub green_threshold: f64,
    /// Score at or above this (below green) is orange.
    pub orange_threshold: f64,
}

impl AnalyticsConfig {
    /// Reference configuration for the Chilean supermarket fleet.
    pub fn default_chile() -> Self {
        let products: [(&str, Clp); 12] = [
            ("Palta Hass Premium", 5_990),
            ("Manzanas Gala", 2_490),
            ("Plátanos Orgánicos", 1_890),
            ("Tomates Cherry", 2_990),
            ("Queso Gouda", 7_490),
            ("Salmón Fresco", 12_990),
            ("Pan Integral", 2_190),
            ("Yogurt Griego", 1_490),
            ("Aceite de Oliva", 8_990),
            ("Vino Tinto Reserva", 9_990),
            ("Chocolate Premium", 4_990),
            ("Café Gourmet", 11_990),
        ];

        Self {
            product_names: products.iter().map(|(name, _)| (*name).into()).collect(),
            product_prices: products
                .iter()
                .map(|(name, price)| ((*name).into(), *price))
                .collect(),
            monthly_subscription_cost: 45_000_000,
            top_n: 10,
            maintenance: MaintenanceConfig {
                usage_weight: 1.0,
                age_weight: 1.0,
                calibration_weight: 1.0,
                transaction_weight: 1.0,
                full_usage_hours: 20.0,
                max_age_months: 60.0,
                calibration_due_days: 90.0,
                peak_monthly_transactions: 4_000.0,
                critical_threshold: 70.0,
                elevated_threshold: 40.0,
            },
            sustainability: SustainabilityConfig {
                co2_per_kwh: 0.5,
                co2_per_paper_meter: 0.006,
                score_scale: 3.0,
                green_threshold: 70.0,
                orange_threshold: 40.0,
            },
        }
    }

    /// Catalog price for a product, if it has one.
    pub fn price_of(&self, product_name: &str) -> Option<Clp> {
        self.product_prices.get(product_name).copied()
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self::default_chile()
    }
}
