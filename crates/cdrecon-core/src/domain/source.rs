use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names one operator uses for the fields a reconciliation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSchema {
    pub calling_number: &'static str,
    pub called_number: &'static str,
    pub time_of_day: &'static str,
    pub duration: &'static str,
}

impl SourceSchema {
    pub const fn columns(&self) -> [&'static str; 4] {
        [
            self.calling_number,
            self.called_number,
            self.time_of_day,
            self.duration,
        ]
    }
}

const SOURCE_A_SCHEMA: SourceSchema = SourceSchema {
    calling_number: "a_number",
    called_number: "b_number",
    time_of_day: "call_time",
    duration: "duration",
};

const SOURCE_B_SCHEMA: SourceSchema = SourceSchema {
    calling_number: "originating_number",
    called_number: "terminating_number",
    time_of_day: "time_field",
    duration: "duration",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRole {
    A,
    B,
}

impl SourceRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            SourceRole::A => "a",
            SourceRole::B => "b",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" => Some(SourceRole::A),
            "b" => Some(SourceRole::B),
            _ => None,
        }
    }

    pub const fn schema(self) -> SourceSchema {
        match self {
            SourceRole::A => SOURCE_A_SCHEMA,
            SourceRole::B => SOURCE_B_SCHEMA,
        }
    }

    pub const fn all() -> &'static [SourceRole] {
        &[SourceRole::A, SourceRole::B]
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRole::A => f.write_str("source A"),
            SourceRole::B => f.write_str("source B"),
        }
    }
}
