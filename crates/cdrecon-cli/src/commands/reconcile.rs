use crate::commands::{print_json, Context};
use crate::util::{parse_date, today_local};
use anyhow::{Context as _, Result};
use cdrecon_config as config;
use cdrecon_core::{ReconcileReportDto, SideSummary, Tolerances};
use cdrecon_csv::{export_run, read_table_path, ExportReport};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    #[arg(
        long,
        value_name = "CSV",
        help = "Source A file (a_number, b_number, call_time, duration)"
    )]
    pub source_a: PathBuf,
    #[arg(
        long,
        value_name = "CSV",
        help = "Source B file (originating_number, terminating_number, time_field, duration)"
    )]
    pub source_b: PathBuf,
    #[arg(long, value_name = "SECONDS", help = "Allowed duration difference (1-10)")]
    pub duration_tolerance: Option<f64>,
    #[arg(long, value_name = "SECONDS", help = "Allowed call time difference (1-10)")]
    pub time_tolerance: Option<f64>,
    #[arg(long, help = "Reconciliation date used in output file names (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[arg(long, value_name = "DIR", help = "Write matched and exclusive tables here")]
    pub out: Option<PathBuf>,
    #[arg(long, help = "Field delimiter (single character, or `tab`)")]
    pub delimiter: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReconcileReport {
    date: String,
    #[serde(flatten)]
    run: ReconcileReportDto,
    export: Option<ExportReport>,
}

pub fn reconcile(ctx: &Context<'_>, args: ReconcileArgs) -> Result<()> {
    let tolerances = resolve_tolerances(ctx, &args)?;
    let date = match args.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today_local(),
    };
    let delimiter = ctx.delimiter(args.delimiter.as_deref())?;

    let raw_a = read_table_path(&args.source_a, delimiter)
        .with_context(|| format!("read source A file {}", args.source_a.display()))?;
    debug!(rows = raw_a.len(), path = %args.source_a.display(), "source A loaded");
    let raw_b = read_table_path(&args.source_b, delimiter)
        .with_context(|| format!("read source B file {}", args.source_b.display()))?;
    debug!(rows = raw_b.len(), path = %args.source_b.display(), "source B loaded");

    let run = cdrecon_core::reconcile(&raw_a, &raw_b, tolerances)?;
    for (role, fallback) in run.time_fallbacks() {
        warn!(
            source = %role,
            row = fallback.row + 1,
            error = %fallback.error,
            "time column unparseable, every time set to 0"
        );
    }
    debug!(
        candidates = run.result.matched.len(),
        source_a_only = run.result.source_a_only.len(),
        source_b_only = run.result.source_b_only.len(),
        "matching finished"
    );

    let export = match args.out.or_else(|| ctx.config.output.dir.clone()) {
        Some(dir) => Some(
            export_run(&dir, date, &run, delimiter)
                .with_context(|| format!("export results to {}", dir.display()))?,
        ),
        None => None,
    };

    let report = ReconcileReport {
        date: date.format("%Y-%m-%d").to_string(),
        run: run.report(),
        export,
    };

    if ctx.json {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

fn resolve_tolerances(ctx: &Context<'_>, args: &ReconcileArgs) -> Result<Tolerances> {
    let mut resolved = ctx.config.tolerances;
    if let Some(value) = args.duration_tolerance {
        resolved.duration = config::validate_tolerance_range("duration", value)?;
    }
    if let Some(value) = args.time_tolerance {
        resolved.time = config::validate_tolerance_range("time", value)?;
    }
    Ok(resolved.to_tolerances()?)
}

fn print_report(report: &ReconcileReport) {
    let run = &report.run;
    println!(
        "Reconciliation for {} (duration +/-{}s, time +/-{}s)",
        report.date,
        run.tolerances.duration(),
        run.tolerances.time()
    );
    print_side("source A", &run.summary.source_a);
    print_side("source B", &run.summary.source_b);
    match run.summary.match_rate_percent {
        Some(rate) => println!("matched: {} (match rate {:.1}%)", run.summary.matched, rate),
        None => println!("matched: {}", run.summary.matched),
    }

    if let Some(export) = report.export.as_ref() {
        for file in &export.files {
            println!("wrote {} rows to {}", file.rows, file.path);
        }
    }
}

fn print_side(label: &str, side: &SideSummary) {
    println!(
        "{}: {} records, {} matched, {} only, {:.0} s ({:.0} min)",
        label,
        side.records,
        side.matched_records,
        side.exclusive_records,
        side.total_duration_seconds,
        side.total_duration_minutes()
    );
}
