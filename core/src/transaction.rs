//! The transaction record — one row per purchase event.
//!
//! RULE: Transactions are immutable once ingested. Every later stage
//! reads them and produces new tables; nothing edits a transaction
//! in place.

use crate::types::{CardId, HourOfDay};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the transaction dataset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single card purchase event.
///
/// `trans_hour` is derived from the timestamp at load time so the
/// flagging and profiling rules never re-parse the datetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub cc_num: CardId,
    #[serde(with = "timestamp_format")]
    pub trans_date_trans_time: NaiveDateTime,
    pub amt: f64,
    pub category: String,
    pub trans_hour: HourOfDay,
    pub is_fraud: bool,
}

impl Transaction {
    pub fn new(
        cc_num: CardId,
        trans_date_trans_time: NaiveDateTime,
        amt: f64,
        category: String,
        is_fraud: bool,
    ) -> Self {
        Self {
            cc_num,
            trans_hour: trans_date_trans_time.hour(),
            trans_date_trans_time,
            amt,
            category,
            is_fraud,
        }
    }

    /// Calendar date of the transaction (used for days-active counting).
    pub fn date(&self) -> NaiveDate {
        self.trans_date_trans_time.date()
    }
}

/// Serde adapter keeping the dataset's timestamp format in CSV artifacts.
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
