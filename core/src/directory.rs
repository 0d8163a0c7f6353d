//! Store directory — the pipeline's one external collaborator input.
//!
//! Records normally arrive from the store-directory REST service; the
//! pipeline reads only id, name and comuna from each. A curated demo
//! directory covering the Santiago fleet is provided for the headless
//! runner and for tests.

use crate::types::StoreId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    pub comuna: String,
}

impl StoreRecord {
    pub fn new(id: impl Into<StoreId>, name: impl Into<String>, comuna: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            comuna: comuna.into(),
        }
    }
}

/// Comunas the fleet operates in, in directory order.
const DEMO_COMUNAS: [&str; 12] = [
    "Las Condes",
    "Providencia",
    "Vitacura",
    "Santiago Centro",
    "Ñuñoa",
    "La Reina",
    "Maipú",
    "La Florida",
    "Puente Alto",
    "San Miguel",
    "Recoleta",
    "Huechuraba",
];

/// Build the demo Santiago directory: one "Local N" per comuna.
pub fn demo_directory() -> Vec<StoreRecord> {
    DEMO_COMUNAS
        .iter()
        .enumerate()
        .map(|(i, comuna)| {
            StoreRecord::new(
                format!("store-{:03}", i + 1),
                format!("Local {}", i + 1),
                *comuna,
            )
        })
        .collect()
}
