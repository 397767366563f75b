//! Shared primitive types used across the entire pipeline.

/// A card number — the stable identifier grouping transactions
/// made with the same payment instrument/customer.
pub type CardId = u64;

/// Hour of day, 0–23, derived from the transaction timestamp.
pub type HourOfDay = u32;
