use crate::error::{CsvError, Result};
use crate::write::{write_exclusive, write_matched};
use cdrecon_core::Reconciliation;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Matched,
    SourceAOnly,
    SourceBOnly,
}

impl OutputKind {
    const fn file_prefix(self) -> &'static str {
        match self {
            OutputKind::Matched => "matched_cdr",
            OutputKind::SourceAOnly => "source_a_only",
            OutputKind::SourceBOnly => "source_b_only",
        }
    }

    pub const fn all() -> &'static [OutputKind] {
        &[
            OutputKind::Matched,
            OutputKind::SourceAOnly,
            OutputKind::SourceBOnly,
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub kind: OutputKind,
    pub path: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub date: String,
    pub files: Vec<ExportedFile>,
}

pub fn output_file_name(kind: OutputKind, date: NaiveDate) -> String {
    format!("{}_{}.csv", kind.file_prefix(), date.format("%Y%m%d"))
}

/// Writes the three result tables of a run into `dir`, creating it when
/// needed. Existing files with the same names are replaced. Every table is
/// staged under a temporary name first, so a failed write leaves none of the
/// final files behind.
pub fn export_run(
    dir: &Path,
    date: NaiveDate,
    run: &Reconciliation,
    delimiter: u8,
) -> Result<ExportReport> {
    fs::create_dir_all(dir)?;

    let mut staged: Vec<(PathBuf, ExportedFile)> = Vec::with_capacity(OutputKind::all().len());
    for kind in OutputKind::all() {
        let path = dir.join(output_file_name(*kind, date));
        let tmp = path.with_extension("csv.tmp");
        match stage(&tmp, *kind, run, delimiter) {
            Ok(rows) => staged.push((
                tmp,
                ExportedFile {
                    kind: *kind,
                    path: path.display().to_string(),
                    rows,
                },
            )),
            Err(err) => {
                let _ = fs::remove_file(&tmp);
                discard(&staged);
                return Err(err);
            }
        }
    }

    let mut files = Vec::with_capacity(staged.len());
    for (tmp, file) in &staged {
        fs::rename(tmp, &file.path)?;
        files.push(file.clone());
    }

    Ok(ExportReport {
        date: date.format("%Y-%m-%d").to_string(),
        files,
    })
}

fn stage(tmp: &Path, kind: OutputKind, run: &Reconciliation, delimiter: u8) -> Result<usize> {
    let mut out = create(tmp)?;
    let rows = match kind {
        OutputKind::Matched => {
            write_matched(&mut out, &run.result.matched, delimiter)?;
            run.result.matched.len()
        }
        OutputKind::SourceAOnly => {
            write_exclusive(&mut out, &run.source_a, &run.result.source_a_only, delimiter)?;
            run.result.source_a_only.len()
        }
        OutputKind::SourceBOnly => {
            write_exclusive(&mut out, &run.source_b, &run.result.source_b_only, delimiter)?;
            run.result.source_b_only.len()
        }
    };
    out.flush()?;
    Ok(rows)
}

fn discard(staged: &[(PathBuf, ExportedFile)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| CsvError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::{output_file_name, OutputKind};
    use chrono::NaiveDate;

    #[test]
    fn output_file_name_uses_compact_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        assert_eq!(
            output_file_name(OutputKind::Matched, date),
            "matched_cdr_20250703.csv"
        );
        assert_eq!(
            output_file_name(OutputKind::SourceBOnly, date),
            "source_b_only_20250703.csv"
        );
    }
}
