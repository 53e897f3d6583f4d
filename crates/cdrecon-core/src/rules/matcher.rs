use crate::domain::{LookupKey, NormalizedRecord};
use crate::rules::tolerance::Tolerances;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// One side of a join row: which record it came from and the values under
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateSide {
    pub record: usize,
    pub duration_seconds: Option<f64>,
    pub time_of_day_seconds: Option<i64>,
}

impl CandidateSide {
    fn of(record: usize, source: &NormalizedRecord) -> Self {
        Self {
            record,
            duration_seconds: source.duration_seconds,
            time_of_day_seconds: source.time_of_day_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub lookup_key: LookupKey,
    pub a: Option<CandidateSide>,
    pub b: Option<CandidateSide>,
}

impl MatchCandidate {
    pub fn is_match(&self, tolerances: &Tolerances) -> bool {
        let (Some(a), Some(b)) = (self.a.as_ref(), self.b.as_ref()) else {
            return false;
        };
        let durations = a.duration_seconds.zip(b.duration_seconds);
        let times = a.time_of_day_seconds.zip(b.time_of_day_seconds);
        match (durations, times) {
            (Some((duration_a, duration_b)), Some((time_a, time_b))) => {
                tolerances.accepts_duration(duration_a, duration_b)
                    && tolerances.accepts_time(time_a, time_b)
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchResult {
    pub matched: Vec<MatchCandidate>,
    pub source_a_only: Vec<NormalizedRecord>,
    pub source_b_only: Vec<NormalizedRecord>,
}

impl MatchResult {
    /// Distinct keys among matched candidates, in key order.
    pub fn matched_keys(&self) -> Vec<&LookupKey> {
        let mut keys: Vec<&LookupKey> = self.matched.iter().map(|c| &c.lookup_key).collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

/// Full outer join of both sides on `lookup_key`.
///
/// Rows are grouped per key and the groups are crossed explicitly, so a key
/// seen N times on side A and M times on side B yields N×M candidates, and a
/// key seen on one side only yields one candidate per row with the other side
/// empty. Candidates come out ordered by key, then A position, then B
/// position. Records without a key cannot be joined and produce no candidate.
pub fn join_candidates(a: &[NormalizedRecord], b: &[NormalizedRecord]) -> Vec<MatchCandidate> {
    let mut groups: BTreeMap<&LookupKey, (Vec<CandidateSide>, Vec<CandidateSide>)> =
        BTreeMap::new();
    for (index, record) in a.iter().enumerate() {
        if let Some(key) = record.lookup_key.as_ref() {
            groups
                .entry(key)
                .or_default()
                .0
                .push(CandidateSide::of(index, record));
        }
    }
    for (index, record) in b.iter().enumerate() {
        if let Some(key) = record.lookup_key.as_ref() {
            groups
                .entry(key)
                .or_default()
                .1
                .push(CandidateSide::of(index, record));
        }
    }

    let mut candidates = Vec::new();
    for (key, (left, right)) in groups {
        let left = with_absent_side(left);
        let right = with_absent_side(right);
        for side_a in &left {
            for side_b in &right {
                candidates.push(MatchCandidate {
                    lookup_key: key.clone(),
                    a: *side_a,
                    b: *side_b,
                });
            }
        }
    }
    candidates
}

fn with_absent_side(sides: Vec<CandidateSide>) -> Vec<Option<CandidateSide>> {
    if sides.is_empty() {
        return vec![None];
    }
    sides.into_iter().map(Some).collect()
}

/// Splits two normalized sets into matched candidates and per-side leftovers.
///
/// A record is left over when its key is absent from the matched key set.
/// Exclusion works on keys, not on individual candidates: once any pairing
/// for a key passes, every record carrying that key is considered matched,
/// including occurrences whose own pairings failed the tolerances.
pub fn match_records(
    a: &[NormalizedRecord],
    b: &[NormalizedRecord],
    tolerances: &Tolerances,
) -> MatchResult {
    let matched: Vec<MatchCandidate> = join_candidates(a, b)
        .into_iter()
        .filter(|candidate| candidate.is_match(tolerances))
        .collect();

    let matched_keys: HashSet<&LookupKey> = matched.iter().map(|c| &c.lookup_key).collect();
    let source_a_only = exclusive(a, &matched_keys);
    let source_b_only = exclusive(b, &matched_keys);

    MatchResult {
        matched,
        source_a_only,
        source_b_only,
    }
}

fn exclusive(
    records: &[NormalizedRecord],
    matched_keys: &HashSet<&LookupKey>,
) -> Vec<NormalizedRecord> {
    records
        .iter()
        .filter(|record| match record.lookup_key.as_ref() {
            Some(key) => !matched_keys.contains(key),
            None => true,
        })
        .cloned()
        .collect()
}
