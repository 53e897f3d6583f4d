use crate::domain::{RawTable, SourceRole};
use crate::time::TimeFallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calling suffix followed by called suffix, with no separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn new(subscriber_a: &str, subscriber_b: &str) -> Self {
        let mut key = String::with_capacity(subscriber_a.len() + subscriber_b.len());
        key.push_str(subscriber_a);
        key.push_str(subscriber_b);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// Position of the originating row in the deduplicated raw table.
    pub row: usize,
    pub subscriber_a: Option<String>,
    pub subscriber_b: Option<String>,
    pub lookup_key: Option<LookupKey>,
    pub duration_seconds: Option<f64>,
    pub time_of_day_seconds: Option<i64>,
}

/// One operator's records after normalization, alongside the deduplicated
/// raw rows they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub role: SourceRole,
    pub raw: RawTable,
    pub records: Vec<NormalizedRecord>,
    pub time_fallback: Option<TimeFallback>,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn raw_row(&self, record: &NormalizedRecord) -> Option<&[String]> {
        self.raw.row(record.row)
    }
}
