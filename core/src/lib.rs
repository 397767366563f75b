//! cardwatch-core: batch scoring and flagging of card transactions.
//!
//! The pipeline builds per-customer behavioral profiles from a static
//! transaction batch, scores every customer with a fixed-weight rule
//! set, bands the totals into ordinal risk levels, flags individual
//! suspicious transactions, and measures detection performance against
//! ground-truth fraud labels.

pub mod config;
pub mod error;
pub mod export;
pub mod flagging;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod transaction;
pub mod types;
