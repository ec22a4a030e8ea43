//! Normalize command - run the full pipeline and write the output table.

use std::path::PathBuf;

use colored::Colorize;
use foialog::{finalize, schema, LogCatalog, Parser, Pipeline, Severity, Writer};

use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    report_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Normalizing".cyan().bold(),
        file.display().to_string().white()
    );

    let catalog = LogCatalog::records_request_log();
    let (mut table, meta) = Parser::new().parse_file(&file)?;

    println!(
        "Read {} rows, {} columns ({})",
        meta.row_count.to_string().white().bold(),
        meta.column_count.to_string().white().bold(),
        meta.format
    );

    schema::normalize_headers(&mut table, &catalog.renames)?;
    let mut report = Pipeline::new().run(&mut table, &catalog)?;
    report.pruned = finalize::finalize(
        &mut table,
        &catalog.prune_if_all_missing,
        &catalog.output_order,
    )?;

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}_normalized.{}", stem, format.extension()))
    });

    Writer::new(format.delimiter()).write_file(&table, &output_path)?;

    if verbose {
        println!();
        println!("{}", "Rules:".yellow().bold());
        for stat in &report.rules {
            println!(
                "  {:28} {:40} matched {:4}  changed {:4}",
                stat.field, stat.rule, stat.matched, stat.changed
            );
        }
    }

    let warnings = report.count_at(Severity::Warning);
    let errors = report.count_at(Severity::Error);

    println!();
    for entry in &report.entries {
        let tag = match entry.severity {
            Severity::Error => entry.severity.label().red().bold(),
            Severity::Warning => entry.severity.label().yellow().bold(),
            Severity::Info => entry.severity.label().blue(),
        };
        if verbose || entry.severity != Severity::Info {
            match entry.occurrences {
                Some(n) => println!("{}: {} - {} ({} values)", tag, entry.field, entry.detail, n),
                None => println!("{}: {} - {}", tag, entry.field, entry.detail),
            }
        }
    }

    if !report.pruned.is_empty() {
        println!(
            "Pruned fully-missing column(s): {}",
            report.pruned.join(", ").white()
        );
    }

    println!(
        "Applied {} rules ({} warnings, {} errors)",
        report.rules.len().to_string().white().bold(),
        warnings.to_string().yellow(),
        errors.to_string().red()
    );

    if let Some(report_path) = report_path {
        std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
        println!(
            "{} {}",
            "Report saved to".green().bold(),
            report_path.display().to_string().white()
        );
    }

    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    if errors > 0 {
        println!(
            "{}",
            "Some values fell outside their declared vocabulary - the catalog may be stale."
                .red()
        );
    }

    Ok(())
}
