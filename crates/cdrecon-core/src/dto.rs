use crate::domain::SourceRole;
use crate::rules::{ReconSummary, Tolerances};
use crate::time::TimeFallback;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFallbackDto {
    pub source: SourceRole,
    pub row: usize,
    pub message: String,
}

impl TimeFallbackDto {
    pub fn new(source: SourceRole, fallback: &TimeFallback) -> Self {
        Self {
            source,
            row: fallback.row + 1,
            message: fallback.error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileReportDto {
    pub tolerances: Tolerances,
    pub summary: ReconSummary,
    pub time_fallbacks: Vec<TimeFallbackDto>,
}
