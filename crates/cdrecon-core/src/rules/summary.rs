use crate::domain::NormalizedRecord;
use crate::rules::matcher::MatchResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSummary {
    pub records: usize,
    pub matched_records: usize,
    pub exclusive_records: usize,
    pub total_duration_seconds: f64,
}

impl SideSummary {
    fn new(records: &[NormalizedRecord], exclusive: &[NormalizedRecord]) -> Self {
        Self {
            records: records.len(),
            matched_records: records.len() - exclusive.len(),
            exclusive_records: exclusive.len(),
            total_duration_seconds: records.iter().filter_map(|r| r.duration_seconds).sum(),
        }
    }

    pub fn total_duration_minutes(&self) -> f64 {
        self.total_duration_seconds / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconSummary {
    pub source_a: SideSummary,
    pub source_b: SideSummary,
    pub matched: usize,
    pub match_rate_percent: Option<f64>,
}

pub fn summarize(
    a: &[NormalizedRecord],
    b: &[NormalizedRecord],
    result: &MatchResult,
) -> ReconSummary {
    ReconSummary {
        source_a: SideSummary::new(a, &result.source_a_only),
        source_b: SideSummary::new(b, &result.source_b_only),
        matched: result.matched.len(),
        match_rate_percent: match_rate_percent(result.matched.len(), a.len(), b.len()),
    }
}

/// Matched candidates over the smaller side. Repeated keys can push this
/// above 100. Undefined when either side is empty.
pub fn match_rate_percent(matched: usize, a_len: usize, b_len: usize) -> Option<f64> {
    let smaller = a_len.min(b_len);
    if smaller == 0 {
        return None;
    }
    Some(matched as f64 / smaller as f64 * 100.0)
}
