//! Shared primitive types used across the analytics core.

/// Monetary amount in Chilean pesos. All monetary aggregates are
/// integer CLP; fractional pesos never appear on the wire.
pub type Clp = i64;

/// A stable store identifier, as issued by the store directory service.
pub type StoreId = String;

/// A unique identifier for a generated entity (event, device, report).
pub type EntityId = String;
