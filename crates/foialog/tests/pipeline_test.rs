//! End-to-end tests for the full normalization run.

use std::io::Write;
use tempfile::NamedTempFile;

use foialog::{finalize, schema, DataTable, LogCatalog, Parser, Pipeline, RunReport, MISSING};

/// A small but faithful slice of the raw log: survey-question headers,
/// free-typed divisions and names, composite status columns.
const RAW_LOG: &str = "\
Request #,Date Received,Requester Name,Requester's Organization,Description of Records Requested (as written on the request form),Division,Assigned to:,Current Status,Were all of the requested records sent to the requester?,\"Was the request referred to another agency? If so, which one?\",Fee charged,Fee waived?,Date Closed,Comments
2016-001,01/14/2016,J. Smith,Lakeshore Gazette,deer cull records,Dir Office,B.ert,Closed - records sent via email,\"yrd, see attached\",referred to Egel,$0.00,yes,01/28/2016,
2016-002,02/02/2016,M. Lopez,,timber sale contracts,Director office,Bert!,Open - awaiting legal review,\"no, fee not paid\",none,$25.00,no,,
2016-003,02/10/2016,T. Nguyen,,boat launch permits,Director's office,bert,Closed - not in possession,\"Partial, remainder exempt\",sent to D. Whitfield,$0.00,waived for media,02/19/2016,
2016-004,03/01/2016,K. O'Hara,,fish stocking data,fisheries,Dana,Closed - request withdrawn,requester never picked up,Michigan State Police,$0.00,NO,03/05/2016,
2016-005,03/15/2016,,,wolf survey maps,wildlife div,D.ana,inactive - no response from requestor,Yes,not applicable,,no,,
";

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Run the complete normalization: parse, headers, pipeline, finalize.
fn run_full(content: &str) -> (DataTable, RunReport) {
    let file = create_test_file(content);
    let catalog = LogCatalog::records_request_log();

    let (mut table, meta) = Parser::new().parse_file(file.path()).expect("parse failed");
    assert_eq!(meta.format, "csv");

    schema::normalize_headers(&mut table, &catalog.renames).expect("header normalization failed");
    let mut report = Pipeline::new().run(&mut table, &catalog).expect("pipeline failed");
    report.pruned = finalize::finalize(
        &mut table,
        &catalog.prune_if_all_missing,
        &catalog.output_order,
    )
    .expect("finalize failed");

    (table, report)
}

fn column<'a>(table: &'a DataTable, name: &str) -> Vec<&'a str> {
    let index = table.column_index(name).unwrap_or_else(|| panic!("no column {}", name));
    table.column_values(index).collect()
}

// =============================================================================
// Full-run shape
// =============================================================================

#[test]
fn test_row_count_preserved() {
    let (table, report) = run_full(RAW_LOG);
    assert_eq!(table.row_count(), 5);
    assert_eq!(report.rows, 5);
}

#[test]
fn test_output_column_order() {
    let (table, _) = run_full(RAW_LOG);
    assert_eq!(
        table.headers,
        vec![
            "Request_Number",
            "Date_Received",
            "Requester_Name",
            "Requester_Organization",
            "Records_Requested",
            "Division",
            "Assigned_to",
            "Status",
            "Status_Detail",
            "Records_Sent",
            "Records_Sent_Detail",
            "Referred_To",
            "Fee_Charged",
            "Fee_Waived",
            "Date_Closed",
        ]
    );
}

#[test]
fn test_composite_sources_dropped_from_output() {
    let (table, _) = run_full(RAW_LOG);
    assert!(table.column_index("Current_Status").is_none());
    assert!(table.column_index("All_Requested_Records_Sent").is_none());
}

// =============================================================================
// Field normalization
// =============================================================================

#[test]
fn test_division_variants_consolidate() {
    let (table, _) = run_full(RAW_LOG);
    assert_eq!(
        column(&table, "Division"),
        vec![
            "Director's Office",
            "Director's Office",
            "Director's Office",
            "Fisheries",
            "Wildlife",
        ]
    );
}

#[test]
fn test_assigned_to_strips_punctuation_but_keeps_case() {
    let (table, _) = run_full(RAW_LOG);
    assert_eq!(
        column(&table, "Assigned_to"),
        vec!["Bert", "Bert", "bert", "Dana", "Dana"]
    );
}

#[test]
fn test_fee_waived_binary_with_information_loss() {
    let (table, report) = run_full(RAW_LOG);
    assert_eq!(
        column(&table, "Fee_Waived"),
        vec!["Yes", "No", MISSING, "No", "No"]
    );
    // The free-text elaboration was discarded, and the report says so.
    assert!(report
        .entries
        .iter()
        .any(|e| e.field == "Fee_Waived" && e.occurrences == Some(1)));
}

#[test]
fn test_referral_chain() {
    let (table, _) = run_full(RAW_LOG);
    assert_eq!(
        column(&table, "Referred_To"),
        vec!["EGLE", MISSING, "AGO", "MSP", MISSING]
    );
}

// =============================================================================
// Composite splits
// =============================================================================

#[test]
fn test_records_sent_flag_and_detail() {
    let (table, _) = run_full(RAW_LOG);
    assert_eq!(
        column(&table, "Records_Sent"),
        vec!["Yes", "No", "Partial", "Other", "Yes"]
    );
    assert_eq!(
        column(&table, "Records_Sent_Detail"),
        vec![
            "see attached",
            "fee not paid",
            "remainder exempt",
            "requester never picked up",
            MISSING,
        ]
    );
}

#[test]
fn test_status_overall_and_detail() {
    let (table, _) = run_full(RAW_LOG);
    assert_eq!(
        column(&table, "Status"),
        vec!["Closed", "Open", "Closed", "Closed", "Inactive"]
    );
    assert_eq!(
        column(&table, "Status_Detail"),
        vec!["Sent", "Open", "No Records", "Withdrawn", "No Response"]
    );
}

// =============================================================================
// Pruning and reporting
// =============================================================================

#[test]
fn test_fully_missing_column_pruned() {
    let (table, report) = run_full(RAW_LOG);
    assert!(table.column_index("Comments").is_none());
    assert_eq!(report.pruned, vec!["Comments"]);
}

#[test]
fn test_partially_missing_column_kept() {
    let (table, _) = run_full(RAW_LOG);
    // Requester_Organization is missing in 4 of 5 rows; it stays.
    assert!(table.column_index("Requester_Organization").is_some());
}

#[test]
fn test_unmatched_rules_reported_as_warnings() {
    let (_, report) = run_full(RAW_LOG);
    // No row mentions parks, law enforcement, or forestry in this slice.
    let noop_fields: Vec<&str> = report
        .entries
        .iter()
        .filter(|e| e.kind == foialog::EntryKind::NoOpRule)
        .map(|e| e.field.as_str())
        .collect();
    assert!(noop_fields.contains(&"Division"));
}

#[test]
fn test_clean_run_has_no_vocabulary_errors() {
    let (_, report) = run_full(RAW_LOG);
    assert!(!report.has_errors());
}

// =============================================================================
// Configuration drift
// =============================================================================

#[test]
fn test_missing_column_is_fatal() {
    // Same log, but someone renamed the Division column upstream.
    let without_division = RAW_LOG.replace("Division", "Unit");

    let file = create_test_file(&without_division);
    let catalog = LogCatalog::records_request_log();
    let (mut table, _) = Parser::new().parse_file(file.path()).unwrap();
    schema::normalize_headers(&mut table, &catalog.renames).unwrap();

    let err = Pipeline::new().run(&mut table, &catalog).unwrap_err();
    assert!(err.to_string().contains("Division"));
}

#[test]
fn test_stale_rename_is_fatal() {
    let content = RAW_LOG.replace("Request #", "Tracking Id");
    let file = create_test_file(&content);
    let catalog = LogCatalog::records_request_log();
    let (mut table, _) = Parser::new().parse_file(file.path()).unwrap();

    let err = schema::normalize_headers(&mut table, &catalog.renames).unwrap_err();
    assert!(err.to_string().contains("Request_"));
}
