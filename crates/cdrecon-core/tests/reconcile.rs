use cdrecon_core::{reconcile, CoreError, RawTable, SourceRole, Tolerances};

const SOURCE_A_COLUMNS: [&str; 4] = ["a_number", "b_number", "call_time", "duration"];
const SOURCE_B_COLUMNS: [&str; 4] = [
    "originating_number",
    "terminating_number",
    "time_field",
    "duration",
];

fn table(columns: &[&str], rows: &[[&str; 4]]) -> RawTable {
    RawTable::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
    .expect("raw table")
}

fn operator_pair() -> (RawTable, RawTable) {
    let a = table(
        &SOURCE_A_COLUMNS,
        &[["7070350149", "8120811866", "12:30:45", "120"]],
    );
    let b = table(
        &SOURCE_B_COLUMNS,
        &[["2347070350149", "2348120811866", "12:30:47", "122"]],
    );
    (a, b)
}

#[test]
fn international_and_local_numbers_reconcile() {
    let (a, b) = operator_pair();
    let tolerances = Tolerances::new(5.0, 5.0).expect("tolerances");
    let run = reconcile(&a, &b, tolerances).expect("reconcile");

    assert_eq!(run.result.matched.len(), 1);
    let matched = &run.result.matched[0];
    assert_eq!(matched.lookup_key.as_str(), "70703501498120811866");
    assert_eq!(matched.a.expect("a side").duration_seconds, Some(120.0));
    assert_eq!(matched.b.expect("b side").time_of_day_seconds, Some(45_047));
    assert!(run.result.source_a_only.is_empty());
    assert!(run.result.source_b_only.is_empty());

    let summary = run.summary();
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.match_rate_percent, Some(100.0));
}

#[test]
fn tight_time_tolerance_leaves_both_records_exclusive() {
    let (a, b) = operator_pair();
    let tolerances = Tolerances::new(5.0, 1.0).expect("tolerances");
    let run = reconcile(&a, &b, tolerances).expect("reconcile");

    assert!(run.result.matched.is_empty());
    assert_eq!(run.result.source_a_only.len(), 1);
    assert_eq!(run.result.source_b_only.len(), 1);
    assert_eq!(
        run.result.source_a_only[0].subscriber_a.as_deref(),
        Some("7070350149")
    );
    assert_eq!(run.summary().match_rate_percent, Some(0.0));
}

#[test]
fn unparseable_time_zeroes_batch_without_failing() {
    let a = table(
        &SOURCE_A_COLUMNS,
        &[
            ["7070350149", "8120811866", "12:30:45", "120"],
            ["7063496606", "7010761254", "bad", "45"],
        ],
    );
    let b = table(
        &SOURCE_B_COLUMNS,
        &[["2347070350149", "2348120811866", "00:00:03", "121"]],
    );
    let tolerances = Tolerances::new(5.0, 5.0).expect("tolerances");
    let run = reconcile(&a, &b, tolerances).expect("reconcile");

    assert!(run
        .source_a
        .records
        .iter()
        .all(|record| record.time_of_day_seconds == Some(0)));
    assert!(run.source_b.time_fallback.is_none());
    let fallbacks = run.time_fallbacks();
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(fallbacks[0].0, SourceRole::A);

    // Zeroed A times now sit within 5s of B's 00:00:03.
    assert_eq!(run.result.matched.len(), 1);
    assert_eq!(run.report().time_fallbacks[0].row, 2);
}

#[test]
fn missing_column_aborts_run() {
    let a = table(
        &["a_number", "b_number", "call_time", "length"],
        &[["7070350149", "8120811866", "12:30:45", "120"]],
    );
    let (_, b) = operator_pair();
    let tolerances = Tolerances::new(5.0, 5.0).expect("tolerances");
    let err = reconcile(&a, &b, tolerances).unwrap_err();
    assert_eq!(
        err,
        CoreError::MissingColumn {
            role: SourceRole::A,
            column: "duration"
        }
    );
}

#[test]
fn duplicate_rows_collapse_before_matching() {
    let a = table(
        &SOURCE_A_COLUMNS,
        &[
            ["7070350149", "8120811866", "12:30:45", "120"],
            ["7070350149", "8120811866", "12:30:45", "120"],
        ],
    );
    let (_, b) = operator_pair();
    let tolerances = Tolerances::new(5.0, 5.0).expect("tolerances");
    let run = reconcile(&a, &b, tolerances).expect("reconcile");
    assert_eq!(run.source_a.len(), 1);
    assert_eq!(run.result.matched.len(), 1);
}

#[test]
fn repeated_runs_are_independent() {
    let (a, b) = operator_pair();
    let loose = reconcile(&a, &b, Tolerances::new(5.0, 5.0).expect("tolerances"))
        .expect("loose run");
    let tight = reconcile(&a, &b, Tolerances::new(5.0, 1.0).expect("tolerances"))
        .expect("tight run");
    let again = reconcile(&a, &b, Tolerances::new(5.0, 5.0).expect("tolerances"))
        .expect("repeat run");

    assert_eq!(loose.result.matched.len(), 1);
    assert!(tight.result.matched.is_empty());
    assert_eq!(loose, again);
}
