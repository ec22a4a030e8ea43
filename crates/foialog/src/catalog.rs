//! Declarative catalogs: everything one agency's log needs, as data.
//!
//! A catalog carries the rename table, the per-field rule lists, the
//! composite-field splits, the prune set, and the output column order. It is
//! passed explicitly into the pipeline; nothing reads ambient state. The
//! literal markers, names, and phrases below are dataset-specific
//! configuration tied to one agency's staff and org chart, not logic.
//! Building a catalog for another agency means new source data, not new code.

use serde::{Deserialize, Serialize};

use crate::pipeline::FieldPlan;
use crate::rules::{AliasStep, DeriveOp, DetailGroup, FieldRule};
use crate::schema::HeaderRenames;

/// Full normalization configuration for one agency's FOIA log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogCatalog {
    /// Literal header rename table, applied after canonicalization.
    pub renames: HeaderRenames,
    /// Per-field rule lists, applied in declaration order.
    pub plans: Vec<FieldPlan>,
    /// Composite-field splits, run after every plan.
    pub derives: Vec<DeriveOp>,
    /// Fields dropped from the output when 100% missing.
    pub prune_if_all_missing: Vec<String>,
    /// Output column order; unlisted fields are dropped.
    pub output_order: Vec<String>,
}

impl LogCatalog {
    /// Catalog for the department's records-request log.
    ///
    /// Covers the log as kept since 2016: survey-style headers, free-typed
    /// division and staff names, composite status and fulfillment columns,
    /// and a referral column that mixes agency names, staff shorthand, and
    /// boilerplate.
    pub fn records_request_log() -> Self {
        let renames = HeaderRenames::new([
            ("Request_", "Request_Number"),
            ("Requesters_Organization", "Requester_Organization"),
            (
                "Description_of_Records_Requested_as_written_on_the_request_form",
                "Records_Requested",
            ),
            (
                "Were_all_of_the_requested_records_sent_to_the_requester",
                "All_Requested_Records_Sent",
            ),
            (
                "Was_the_request_referred_to_another_agency_If_so_which_one",
                "Referred_To",
            ),
            ("Fee_charged", "Fee_Charged"),
            ("Fee_waived", "Fee_Waived"),
        ]);

        let plans = vec![
            // Closed set of staff names under inconsistent punctuation; the
            // noise is entirely non-alphanumeric, so no name list is needed.
            FieldPlan::open("Assigned_to", vec![FieldRule::StripNonAlphanumeric]),
            FieldPlan::controlled(
                "Division",
                vec![
                    FieldRule::contains("dir", "Director's Office"),
                    FieldRule::contains("wildlife", "Wildlife"),
                    FieldRule::contains("fish", "Fisheries"),
                    FieldRule::contains("park", "Parks and Recreation"),
                    FieldRule::contains("law", "Law Enforcement"),
                    FieldRule::contains("forest", "Forest Resources"),
                ],
                &[
                    "Director's Office",
                    "Wildlife",
                    "Fisheries",
                    "Parks and Recreation",
                    "Law Enforcement",
                    "Forest Resources",
                ],
            ),
            FieldPlan::controlled("Fee_Waived", vec![FieldRule::YesNo], &["Yes", "No"]),
            FieldPlan::open(
                "Referred_To",
                vec![FieldRule::AliasChain {
                    steps: vec![
                        AliasStep::collapse("state police", "MSP"),
                        // Referrals logged by coordinator name rather than
                        // by the agency they sit in.
                        AliasStep::collapse("whitfield", "AGO"),
                        AliasStep::collapse("okafor", "EGLE"),
                        AliasStep::missing_tokens(&["no", "none", "not applicable"]),
                        AliasStep::strip_prefix("referred to "),
                        AliasStep::strip_prefix("per R. Calloway, "),
                        AliasStep::fix_spelling("EGEL", "EGLE"),
                    ],
                }],
            ),
            // Leading-token cleanup so the fulfillment split sees canonical
            // prefixes. "yrd" is the log's recurring shorthand for "yes,
            // records delivered".
            FieldPlan::open(
                "All_Requested_Records_Sent",
                vec![
                    FieldRule::prefix("yrd", "Yes"),
                    FieldRule::prefix("yes", "Yes"),
                    FieldRule::prefix("no", "No"),
                    FieldRule::prefix("partial", "Partial"),
                ],
            ),
        ];

        let derives = vec![
            DeriveOp::FlagDetail {
                source: "All_Requested_Records_Sent".to_string(),
                flag_field: "Records_Sent".to_string(),
                detail_field: "Records_Sent_Detail".to_string(),
            },
            DeriveOp::StatusDetail {
                source: "Current_Status".to_string(),
                overall_field: "Status".to_string(),
                detail_field: "Status_Detail".to_string(),
                overall_labels: vec![
                    "Closed".to_string(),
                    "Open".to_string(),
                    "Inactive".to_string(),
                ],
                groups: vec![
                    DetailGroup::new("Sent", &["sent", "emailed", "provided", "mailed"]),
                    DetailGroup::new("Partial", &["partial"]),
                    DetailGroup::new(
                        "No Records",
                        &["not in possession", "no responsive", "no records", "does not possess"],
                    ),
                    // Generic negation; must stay after the specific
                    // negative groups that subsume it.
                    DetailGroup::new("Denied", &["not", "denied", "none"]),
                    DetailGroup::new("Open", &["open", "in progress", "pending"]),
                    DetailGroup::new("Withdrawn", &["withdrawn", "cancelled"]),
                    DetailGroup::new(
                        "Referred",
                        &["referred", "another agency", "web", "msp", "ago", "egle"],
                    ),
                    DetailGroup::new("No Response", &["no response from requestor"]),
                ],
            },
        ];

        let output_order = [
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
            "Comments",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            renames,
            plans,
            derives,
            prune_if_all_missing: vec!["Comments".to_string()],
            output_order,
        }
    }
}
