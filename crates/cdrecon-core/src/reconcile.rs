use crate::domain::{NormalizedTable, RawTable, SourceRole};
use crate::dto::{ReconcileReportDto, TimeFallbackDto};
use crate::error::CoreError;
use crate::rules::{match_records, normalize, summarize, MatchResult, ReconSummary, Tolerances};
use crate::time::TimeFallback;

/// Everything one run produced. Built only when every step succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub tolerances: Tolerances,
    pub source_a: NormalizedTable,
    pub source_b: NormalizedTable,
    pub result: MatchResult,
}

impl Reconciliation {
    pub fn summary(&self) -> ReconSummary {
        summarize(
            &self.source_a.records,
            &self.source_b.records,
            &self.result,
        )
    }

    pub fn time_fallbacks(&self) -> Vec<(SourceRole, &TimeFallback)> {
        [&self.source_a, &self.source_b]
            .into_iter()
            .filter_map(|table| table.time_fallback.as_ref().map(|f| (table.role, f)))
            .collect()
    }

    pub fn report(&self) -> ReconcileReportDto {
        ReconcileReportDto {
            tolerances: self.tolerances,
            summary: self.summary(),
            time_fallbacks: self
                .time_fallbacks()
                .into_iter()
                .map(|(role, fallback)| TimeFallbackDto::new(role, fallback))
                .collect(),
        }
    }
}

/// Runs one reconciliation from raw operator tables. Stateless: repeated runs
/// over the same inputs re-normalize from scratch.
pub fn reconcile(
    raw_a: &RawTable,
    raw_b: &RawTable,
    tolerances: Tolerances,
) -> Result<Reconciliation, CoreError> {
    let source_a = normalize(raw_a, SourceRole::A)?;
    let source_b = normalize(raw_b, SourceRole::B)?;
    let result = match_records(&source_a.records, &source_b.records, &tolerances);
    Ok(Reconciliation {
        tolerances,
        source_a,
        source_b,
        result,
    })
}
