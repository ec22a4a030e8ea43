//! Check command - validate the catalog against a log file.
//!
//! Catches configuration drift (renamed or dropped columns upstream) before
//! a run, without writing anything.

use std::collections::BTreeSet;
use std::path::PathBuf;

use colored::Colorize;
use foialog::{canonicalize_headers, LogCatalog, Parser};

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let catalog = LogCatalog::records_request_log();
    let (table, meta) = Parser::new().parse_file(&file)?;

    // Replay the header normalization without touching the table.
    let mut headers = canonicalize_headers(&table.headers);
    let mut problems: Vec<String> = Vec::new();

    if let Err(e) = catalog.renames.apply(&mut headers) {
        problems.push(e.to_string());
    }

    // Every name the catalog mentions must resolve against the normalized
    // headers, plus the fields the derives will create.
    let mut known: BTreeSet<String> = headers.iter().cloned().collect();
    for derive in &catalog.derives {
        if !known.contains(derive.source()) {
            problems.push(format!("derive references unknown column '{}'", derive.source()));
        }
        for field in derive.derived_fields() {
            known.insert(field.to_string());
        }
    }
    for plan in &catalog.plans {
        if !known.contains(&plan.field) {
            problems.push(format!("field plan references unknown column '{}'", plan.field));
        }
    }
    for name in &catalog.prune_if_all_missing {
        if !known.contains(name) {
            problems.push(format!("prune set references unknown column '{}'", name));
        }
    }
    for name in &catalog.output_order {
        if !known.contains(name) {
            problems.push(format!("output order references unknown column '{}'", name));
        }
    }

    if json {
        let status = serde_json::json!({
            "file": meta.file,
            "rows": meta.row_count,
            "columns": meta.column_count,
            "problems": problems,
            "ok": problems.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!(
            "{} {}",
            "Checking catalog against".cyan().bold(),
            meta.file.white()
        );

        if verbose {
            println!();
            println!("{}", "Normalized headers:".yellow().bold());
            for header in &headers {
                println!("  {}", header);
            }
        }

        println!();
        if problems.is_empty() {
            println!(
                "{} {} columns resolve; catalog is current.",
                "OK".green().bold(),
                headers.len().to_string().white().bold()
            );
        } else {
            for problem in &problems {
                println!("{}: {}", "Mismatch".red().bold(), problem);
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(format!("{} configuration problem(s) found", problems.len()).into())
    }
}
