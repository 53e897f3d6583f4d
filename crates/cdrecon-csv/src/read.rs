use crate::error::{CsvError, Result};
use cdrecon_core::RawTable;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

const BOM: char = '\u{feff}';

/// Reads a delimited file with a header row into a raw table. Headers and
/// cells are trimmed; rows with a different width than the header fail.
pub fn read_table<R: io::Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches(BOM).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(columns, rows)?)
}

pub fn read_table_path(path: &Path, delimiter: u8) -> Result<RawTable> {
    let file = File::open(path).map_err(|source| CsvError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(BufReader::new(file), delimiter)
}
