use crate::domain::{
    subscriber_suffix, LookupKey, NormalizedRecord, NormalizedTable, RawTable, SourceRole,
};
use crate::error::CoreError;
use crate::time::{parse_time_column, TimeColumn};

/// Converts one operator's raw records into the shared shape the matcher
/// works on. Rows identical across every column are collapsed first.
pub fn normalize(raw: &RawTable, role: SourceRole) -> Result<NormalizedTable, CoreError> {
    let schema = role.schema();
    let calling = require_column(raw, role, schema.calling_number)?;
    let called = require_column(raw, role, schema.called_number)?;
    let time = require_column(raw, role, schema.time_of_day)?;
    let duration = require_column(raw, role, schema.duration)?;

    let deduped = raw.deduplicated();
    let TimeColumn {
        values: times,
        fallback,
    } = parse_time_column(deduped.rows().iter().map(|row| row[time].as_str()));

    let mut records = Vec::with_capacity(deduped.len());
    for ((index, row), time_of_day_seconds) in deduped.rows().iter().enumerate().zip(times) {
        let subscriber_a = subscriber_suffix(&row[calling]);
        let subscriber_b = subscriber_suffix(&row[called]);
        let lookup_key = match (&subscriber_a, &subscriber_b) {
            (Some(a), Some(b)) => Some(LookupKey::new(a, b)),
            _ => None,
        };
        let duration_seconds = parse_duration(role, index, &row[duration])?;
        records.push(NormalizedRecord {
            row: index,
            subscriber_a,
            subscriber_b,
            lookup_key,
            duration_seconds,
            time_of_day_seconds,
        });
    }

    Ok(NormalizedTable {
        role,
        raw: deduped,
        records,
        time_fallback: fallback,
    })
}

fn require_column(
    raw: &RawTable,
    role: SourceRole,
    column: &'static str,
) -> Result<usize, CoreError> {
    match raw.column_positions(column).as_slice() {
        [] => Err(CoreError::MissingColumn { role, column }),
        [index] => Ok(*index),
        _ => Err(CoreError::DuplicateColumn { role, column }),
    }
}

fn parse_duration(role: SourceRole, index: usize, value: &str) -> Result<Option<f64>, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        _ => Err(CoreError::InvalidDuration {
            role,
            row: index + 1,
            value: trimmed.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::domain::{LookupKey, RawTable, SourceRole};
    use crate::error::CoreError;
    use crate::time::TimeParseError;

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .expect("raw table")
    }

    #[test]
    fn normalize_source_a_derives_key_and_seconds() {
        let raw = table(
            &["a_number", "b_number", "call_time", "duration"],
            &[&["7070350149", "8120811866", "12:30:45", "120.5"]],
        );
        let normalized = normalize(&raw, SourceRole::A).unwrap();
        assert_eq!(normalized.len(), 1);
        let record = &normalized.records[0];
        assert_eq!(record.subscriber_a.as_deref(), Some("7070350149"));
        assert_eq!(record.subscriber_b.as_deref(), Some("8120811866"));
        assert_eq!(
            record.lookup_key,
            Some(LookupKey::new("7070350149", "8120811866"))
        );
        assert_eq!(record.duration_seconds, Some(120.5));
        assert_eq!(record.time_of_day_seconds, Some(45_045));
        assert!(normalized.time_fallback.is_none());
    }

    #[test]
    fn normalize_source_b_uses_its_own_columns() {
        let raw = table(
            &["originating_number", "terminating_number", "time_field", "duration", "cell_id"],
            &[&["2347070350149", "2348120811866", "12:30:47", "122", "LAG-01"]],
        );
        let normalized = normalize(&raw, SourceRole::B).unwrap();
        let record = &normalized.records[0];
        assert_eq!(
            record.lookup_key,
            Some(LookupKey::new("7070350149", "8120811866"))
        );
        assert_eq!(record.time_of_day_seconds, Some(45_047));
        assert_eq!(normalized.raw_row(record).unwrap()[4], "LAG-01");
    }

    #[test]
    fn normalize_reports_missing_column_with_source() {
        let raw = table(&["a_number", "b_number", "duration"], &[]);
        let err = normalize(&raw, SourceRole::A).unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingColumn {
                role: SourceRole::A,
                column: "call_time"
            }
        );
        assert_eq!(
            err.to_string(),
            "source A is missing required column `call_time`"
        );
    }

    #[test]
    fn normalize_rejects_a_schema_from_the_other_operator() {
        let raw = table(&["a_number", "b_number", "call_time", "duration"], &[]);
        let err = normalize(&raw, SourceRole::B).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingColumn {
                role: SourceRole::B,
                column: "originating_number"
            }
        ));
    }

    #[test]
    fn normalize_collapses_identical_rows_only() {
        let raw = table(
            &["a_number", "b_number", "call_time", "duration"],
            &[
                &["7070350149", "8120811866", "12:30:45", "120"],
                &["7070350149", "8120811866", "12:30:45", "120"],
                &["7070350149", "8120811866", "18:00:00", "30"],
            ],
        );
        let normalized = normalize(&raw, SourceRole::A).unwrap();
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized.raw.len(), 2);
        assert_eq!(normalized.records[0].lookup_key, normalized.records[1].lookup_key);
    }

    #[test]
    fn normalize_zeroes_every_time_when_one_fails() {
        let raw = table(
            &["a_number", "b_number", "call_time", "duration"],
            &[
                &["7070350149", "8120811866", "12:30:45", "120"],
                &["7063496606", "7010761254", "bad", "45"],
            ],
        );
        let normalized = normalize(&raw, SourceRole::A).unwrap();
        assert!(normalized
            .records
            .iter()
            .all(|record| record.time_of_day_seconds == Some(0)));
        let fallback = normalized.time_fallback.expect("fallback");
        assert_eq!(fallback.row, 1);
        assert!(matches!(fallback.error, TimeParseError::SegmentCount { .. }));
    }

    #[test]
    fn normalize_treats_blank_cells_as_absent() {
        let raw = table(
            &["a_number", "b_number", "call_time", "duration"],
            &[&["", "8120811866", "", ""]],
        );
        let normalized = normalize(&raw, SourceRole::A).unwrap();
        let record = &normalized.records[0];
        assert!(record.subscriber_a.is_none());
        assert!(record.lookup_key.is_none());
        assert!(record.duration_seconds.is_none());
        assert!(record.time_of_day_seconds.is_none());
        assert!(normalized.time_fallback.is_none());
    }

    #[test]
    fn normalize_rejects_non_numeric_duration() {
        let raw = table(
            &["a_number", "b_number", "call_time", "duration"],
            &[
                &["7070350149", "8120811866", "12:30:45", "120"],
                &["7070350149", "8120811866", "12:31:45", "2m"],
            ],
        );
        let err = normalize(&raw, SourceRole::A).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDuration {
                role: SourceRole::A,
                row: 2,
                value: "2m".to_string()
            }
        );
    }

    #[test]
    fn normalize_rejects_duplicate_required_column() {
        let raw = table(
            &["a_number", "b_number", "call_time", "duration", "duration"],
            &[],
        );
        let err = normalize(&raw, SourceRole::A).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateColumn { column: "duration", .. }));
    }
}
