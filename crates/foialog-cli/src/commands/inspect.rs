//! Inspect command - per-column types and value counts.
//!
//! The quickest way to audit a vocabulary: run it on the raw file, eyeball
//! the variant spellings, then fix the catalog.

use std::path::PathBuf;

use colored::Colorize;
use foialog::{is_missing, schema, sketch_column_type, LogCatalog, Parser};
use indexmap::IndexMap;

pub fn run(
    file: PathBuf,
    column: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let catalog = LogCatalog::records_request_log();
    let (mut table, meta) = Parser::new().parse_file(&file)?;
    schema::normalize_headers(&mut table, &catalog.renames)?;

    println!(
        "{} {} ({} rows)",
        "Inspecting".cyan().bold(),
        meta.file.white(),
        meta.row_count.to_string().white().bold()
    );
    println!();

    match column {
        Some(name) => {
            let index = table
                .column_index(&name)
                .ok_or_else(|| format!("No column named '{}'", name))?;

            let mut counts: IndexMap<String, usize> = IndexMap::new();
            for value in table.column_values(index) {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
            counts.sort_by(|_, a, _, b| b.cmp(a));

            println!("{}", name.yellow().bold());
            for (value, count) in &counts {
                println!("  {:5}  {}", count, value);
            }
        }
        None => {
            for (index, header) in table.headers.iter().enumerate() {
                let column_type = sketch_column_type(table.column_values(index));
                let missing = table.column_values(index).filter(|v| is_missing(v)).count();
                let pct = (missing as f64 / table.row_count().max(1) as f64) * 100.0;

                println!(
                    "  {:32} {:8} {:5.1}% missing",
                    header,
                    column_type.label(),
                    pct
                );

                if verbose {
                    let distinct: IndexMap<&str, usize> = table
                        .column_values(index)
                        .filter(|v| !is_missing(v))
                        .fold(IndexMap::new(), |mut acc, v| {
                            *acc.entry(v).or_insert(0) += 1;
                            acc
                        });
                    println!("    {} distinct value(s)", distinct.len());
                }
            }
        }
    }

    Ok(())
}
