use crate::error::{CsvError, Result};
use cdrecon_core::{MatchCandidate, NormalizedRecord, NormalizedTable};
use csv::{Writer, WriterBuilder};
use std::io;

pub const MATCHED_COLUMNS: [&str; 5] = [
    "lookup_key",
    "duration_a",
    "time_a",
    "duration_b",
    "time_b",
];

/// Appended after the operator's own columns in exclusive exports.
pub const EXCLUSIVE_COLUMNS: [&str; 5] = [
    "subscriber_a",
    "subscriber_b",
    "lookup_key",
    "duration_seconds",
    "time_of_day_seconds",
];

pub fn write_matched<W: io::Write>(
    writer: W,
    matched: &[MatchCandidate],
    delimiter: u8,
) -> Result<()> {
    let mut w = writer_for(writer, delimiter);
    w.write_record(MATCHED_COLUMNS)?;
    for candidate in matched {
        let a = candidate.a.as_ref();
        let b = candidate.b.as_ref();
        w.write_record([
            candidate.lookup_key.to_string(),
            format_duration(a.and_then(|side| side.duration_seconds)),
            format_time(a.and_then(|side| side.time_of_day_seconds)),
            format_duration(b.and_then(|side| side.duration_seconds)),
            format_time(b.and_then(|side| side.time_of_day_seconds)),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Writes exclusive records with every original column of their operator,
/// followed by the normalized fields.
pub fn write_exclusive<W: io::Write>(
    writer: W,
    table: &NormalizedTable,
    records: &[NormalizedRecord],
    delimiter: u8,
) -> Result<()> {
    let mut w = writer_for(writer, delimiter);
    let mut header: Vec<&str> = table.raw.columns().iter().map(String::as_str).collect();
    header.extend(EXCLUSIVE_COLUMNS);
    w.write_record(&header)?;

    for record in records {
        let raw = table
            .raw_row(record)
            .ok_or(CsvError::UnknownRow(record.row))?;
        let mut row: Vec<String> = raw.to_vec();
        row.push(record.subscriber_a.clone().unwrap_or_default());
        row.push(record.subscriber_b.clone().unwrap_or_default());
        row.push(
            record
                .lookup_key
                .as_ref()
                .map(|key| key.to_string())
                .unwrap_or_default(),
        );
        row.push(format_duration(record.duration_seconds));
        row.push(format_time(record.time_of_day_seconds));
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

fn writer_for<W: io::Write>(writer: W, delimiter: u8) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer)
}

fn format_duration(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_time(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
