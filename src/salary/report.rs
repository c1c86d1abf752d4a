// Loading the staff sheet and building department summaries.
//
// The sheet is semicolon-delimited with a fixed header row. Summaries are
// written back in the same dialect so they open cleanly in spreadsheet
// software configured for the same locale.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::models::{DepartmentSummary, Employee, EmployeeRecord};

const DELIMITER: u8 = b';';

/// Read and validate every employee from the sheet at `path`.
pub fn load_employees(path: &Path) -> Result<Vec<Employee>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open staff sheet {}", path.display()))?;
    let employees = read_employees(file)
        .with_context(|| format!("Failed to read staff sheet {}", path.display()))?;

    info!(
        path = %path.display(),
        employees = employees.len(),
        "Loaded staff sheet"
    );
    Ok(employees)
}

/// Read employees from any semicolon-delimited source.
pub fn read_employees<R: Read>(source: R) -> Result<Vec<Employee>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut employees = Vec::new();
    for (i, row) in reader.deserialize::<EmployeeRecord>().enumerate() {
        // Line 1 is the header
        let record = row.with_context(|| format!("Malformed row on line {}", i + 2))?;
        employees.push(Employee::try_from(record)?);
    }
    Ok(employees)
}

/// Map each department to the sorted set of its teams.
pub fn department_hierarchy(employees: &[Employee]) -> BTreeMap<String, BTreeSet<String>> {
    let mut hierarchy: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for employee in employees {
        hierarchy
            .entry(employee.department.clone())
            .or_default()
            .insert(employee.team.clone());
    }
    hierarchy
}

/// Summarize headcount and salary range per department, sorted by name.
pub fn department_report(employees: &[Employee]) -> Vec<DepartmentSummary> {
    let mut by_department: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for employee in employees {
        by_department
            .entry(employee.department.as_str())
            .or_default()
            .push(employee.salary);
    }

    by_department
        .into_iter()
        .filter_map(|(department, salaries)| {
            let min_salary = *salaries.iter().min()?;
            let max_salary = *salaries.iter().max()?;
            let total: u64 = salaries.iter().sum();
            let avg = total as f64 / salaries.len() as f64;

            Some(DepartmentSummary {
                department: department.to_string(),
                headcount: salaries.len(),
                min_salary,
                max_salary,
                avg_salary: (avg * 100.0).round_ties_even() / 100.0,
            })
        })
        .collect()
}

/// Write the summary as a semicolon-delimited sheet at `path`.
pub fn write_report(path: &Path, report: &[DepartmentSummary]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    write_report_to(file, report)?;

    info!(
        path = %path.display(),
        departments = report.len(),
        "Saved department report"
    );
    Ok(())
}

/// Write the summary to any sink, header row first.
pub fn write_report_to<W: Write>(sink: W, report: &[DepartmentSummary]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(sink);
    for summary in report {
        writer
            .serialize(summary)
            .with_context(|| format!("Failed to write row for {}", summary.department))?;
    }
    writer.flush().context("Failed to flush report")?;
    Ok(())
}
