use crate::commands::{print_json, Context};
use crate::util::{format_optional, parse_role};
use anyhow::{Context as _, Result};
use cdrecon_core::SourceRole;
use cdrecon_csv::read_table_path;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(long, value_parser = parse_role, help = "Operator schema of the file (a or b)")]
    pub role: SourceRole,
    pub file: PathBuf,
    #[arg(long, help = "Field delimiter (single character, or `tab`)")]
    pub delimiter: Option<String>,
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let delimiter = ctx.delimiter(args.delimiter.as_deref())?;
    let raw = read_table_path(&args.file, delimiter)
        .with_context(|| format!("read {} file {}", args.role, args.file.display()))?;
    debug!(rows = raw.len(), path = %args.file.display(), "records loaded");

    let table = cdrecon_core::normalize(&raw, args.role)?;
    if let Some(fallback) = table.time_fallback.as_ref() {
        warn!(
            source = %table.role,
            row = fallback.row + 1,
            error = %fallback.error,
            "time column unparseable, every time set to 0"
        );
    }

    if ctx.json {
        return print_json(&table.records);
    }

    if table.is_empty() {
        println!("no records");
        return Ok(());
    }

    for record in &table.records {
        println!(
            "{}\t{}\t{}",
            format_optional(record.lookup_key.as_ref()),
            format_optional(record.duration_seconds),
            format_optional(record.time_of_day_seconds)
        );
    }
    Ok(())
}
