//! foialog: normalizer for a single agency's FOIA request log.
//!
//! Takes the agency's spreadsheet-kept log (inconsistent spellings,
//! overloaded status columns, survey-question headers) and produces an
//! analysis-ready table with stable column names and controlled
//! vocabularies.
//!
//! # Core Principles
//!
//! - **Declarative**: every rename, rule, and ordering lives in a
//!   [`LogCatalog`] passed explicitly into the pipeline
//! - **Deterministic**: rules run per field in declared order, column by
//!   column, with no cross-row or cross-column dependencies
//! - **Accounted**: lossy transforms and rules that matched nothing are
//!   reported, never silent
//!
//! # Example
//!
//! ```no_run
//! use foialog::{finalize, schema, LogCatalog, Parser, Pipeline};
//!
//! let catalog = LogCatalog::records_request_log();
//! let (mut table, _meta) = Parser::new().parse_file("log.csv").unwrap();
//!
//! schema::normalize_headers(&mut table, &catalog.renames).unwrap();
//! let mut report = Pipeline::new().run(&mut table, &catalog).unwrap();
//! report.pruned = finalize::finalize(
//!     &mut table,
//!     &catalog.prune_if_all_missing,
//!     &catalog.output_order,
//! )
//! .unwrap();
//!
//! println!("{} rows, {} warnings", report.rows, report.count_at(foialog::Severity::Warning));
//! ```

pub mod catalog;
pub mod error;
pub mod finalize;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod schema;

pub use catalog::LogCatalog;
pub use error::{FoialogError, Result};
pub use input::{
    is_missing, sketch_column_type, ColumnType, DataTable, Parser, ParserConfig, SourceMetadata,
    MISSING,
};
pub use output::Writer;
pub use pipeline::{FieldPlan, Pipeline};
pub use report::{EntryKind, ReportEntry, RuleStat, RunReport, Severity};
pub use rules::{AliasAction, AliasMatch, AliasStep, DeriveOp, DetailGroup, FieldRule};
pub use schema::{canonicalize_headers, HeaderRenames};
