// Colored terminal output for matrices, encodings and salary reports.
//
// Every function writes to a caller-supplied sink so the CLI can route
// output through the timestamping or redirecting writers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::features::one_hot::EncodedRow;
use crate::salary::models::DepartmentSummary;

/// Widest column header shown before truncation.
const MAX_HEADER_CHARS: usize = 12;

/// Display a document-term matrix with the vocabulary as column headers.
pub fn display_matrix<T: Display>(
    out: &mut dyn Write,
    title: &str,
    feature_names: &[String],
    matrix: &[Vec<T>],
) -> Result<()> {
    writeln!(
        out,
        "\n{}",
        format!(
            "=== {title} ({} documents x {} terms) ===",
            matrix.len(),
            feature_names.len()
        )
        .bold()
    )?;

    if feature_names.is_empty() {
        writeln!(out, "  (empty vocabulary)")?;
        return Ok(());
    }

    let headers: Vec<String> = feature_names
        .iter()
        .map(|name| super::truncate_chars(name, MAX_HEADER_CHARS))
        .collect();
    let width = headers
        .iter()
        .map(|h| h.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    write!(out, "  {:>4} ", "doc".dimmed())?;
    for header in &headers {
        write!(out, " {:>width$}", header.dimmed())?;
    }
    writeln!(out)?;

    for (i, row) in matrix.iter().enumerate() {
        write!(out, "  {:>4} ", i + 1)?;
        for cell in row {
            write!(out, " {:>width$}", cell.to_string())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Display one-hot rows as `category  bits`.
pub fn display_one_hot(out: &mut dyn Write, rows: &[EncodedRow]) -> Result<()> {
    let width = rows
        .iter()
        .map(|(category, _)| category.chars().count())
        .max()
        .unwrap_or(0);

    for (category, bits) in rows {
        let bits: Vec<String> = bits
            .iter()
            .map(|&b| {
                if b == 1 {
                    "1".bright_green().to_string()
                } else {
                    "0".dimmed().to_string()
                }
            })
            .collect();
        let pad = width - category.chars().count();
        writeln!(out, "  {category}{}  [{}]", " ".repeat(pad), bits.join(", "))?;
    }
    Ok(())
}

/// Display departments with their teams indented below.
pub fn display_hierarchy(
    out: &mut dyn Write,
    hierarchy: &BTreeMap<String, BTreeSet<String>>,
) -> Result<()> {
    if hierarchy.is_empty() {
        writeln!(out, "No departments found.")?;
        return Ok(());
    }

    for (department, teams) in hierarchy {
        writeln!(out, "{}", department.bold())?;
        for team in teams {
            writeln!(out, "  - {team}")?;
        }
    }
    Ok(())
}

/// Display the department summary table.
pub fn display_report(out: &mut dyn Write, report: &[DepartmentSummary]) -> Result<()> {
    writeln!(
        out,
        "\n{}",
        format!("=== Department Report ({} departments) ===", report.len()).bold()
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "  {:<24} {:>6}  {:>10}  {:>10}  {:>12}",
        "Department".dimmed(),
        "Staff".dimmed(),
        "Min".dimmed(),
        "Max".dimmed(),
        "Average".dimmed(),
    )?;
    writeln!(out, "  {}", "-".repeat(68).dimmed())?;

    for summary in report {
        writeln!(
            out,
            "  {:<24} {:>6}  {:>10}  {:>10}  {:>12.2}",
            super::truncate_chars(&summary.department, 24),
            summary.headcount,
            summary.min_salary,
            summary.max_salary,
            summary.avg_salary,
        )?;
    }
    Ok(())
}
