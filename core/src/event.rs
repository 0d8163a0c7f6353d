//! Fraud event model — the single record type the whole pipeline consumes.
//!
//! Events are synthesized in one pass, held in memory for the session
//! that requested them, and never persisted. Wire names match the
//! detection providers' REST payloads.

use crate::types::{Clp, EntityId, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical fraud tags, as flagged at the scale or checkout.
/// Variants are added per provider release — never removed or reordered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FraudKind {
    NoScan,
    MisScan,
    WeightManipulation,
    BarcodeSwap,
    PartialScan,
    ItemSubstitution,
    BulkFraud,
}

impl FraudKind {
    pub const ALL: [FraudKind; 7] = [
        Self::NoScan,
        Self::MisScan,
        Self::WeightManipulation,
        Self::BarcodeSwap,
        Self::PartialScan,
        Self::ItemSubstitution,
        Self::BulkFraud,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoScan => "no-scan",
            Self::MisScan => "mis-scan",
            Self::WeightManipulation => "weight-manipulation",
            Self::BarcodeSwap => "barcode-swap",
            Self::PartialScan => "partial-scan",
            Self::ItemSubstitution => "item-substitution",
            Self::BulkFraud => "bulk-fraud",
        }
    }
}

impl std::str::FromStr for FraudKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown fraud type: {s}"))
    }
}

/// The device class an event was flagged on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    Balance,
    SelfCheckout,
    Pos,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 3] = [Self::Balance, Self::SelfCheckout, Self::Pos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::SelfCheckout => "self-checkout",
            Self::Pos => "pos",
        }
    }

    /// Tag prefix used in synthesized device ids, e.g. "BAL-x7k2mq".
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Balance => "BAL",
            Self::SelfCheckout => "SCO",
            Self::Pos => "POS",
        }
    }
}

impl std::str::FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown device type: {s}"))
    }
}

/// Which detection provider flagged the event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Gravit,
    Edgify,
}

impl DetectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gravit => "gravit",
            Self::Edgify => "edgify",
        }
    }
}

/// One suspected loss-prevention incident at a scale or checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FraudEvent {
    pub id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub fraud_kind: FraudKind,
    pub device_kind: DeviceKind,
    pub device_id: String,
    pub store_id: StoreId,
    pub store_name: String,
    pub comuna: String,
    pub product_name: String,
    pub product_code: String,
    pub quantity: u32,
    pub estimated_value: Clp,
    pub operator: String,
    /// Detection confidence percent, drawn in [80, 100).
    pub confidence: u8,
    pub source: DetectionSource,
    pub prevented: bool,
}
