// Row types for the staff sheet and the department summary.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One raw line of the staff sheet, exactly as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "ФИО полностью")]
    pub full_name: String,
    #[serde(rename = "Департамент")]
    pub department: String,
    #[serde(rename = "Отдел")]
    pub team: String,
    #[serde(rename = "Должность")]
    pub position: String,
    #[serde(rename = "Оценка")]
    pub rating: f64,
    #[serde(rename = "Оклад")]
    pub salary: i64,
}

/// A validated employee.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub full_name: String,
    pub department: String,
    pub team: String,
    pub position: String,
    pub rating: f64,
    pub salary: u64,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = anyhow::Error;

    fn try_from(record: EmployeeRecord) -> Result<Self> {
        let salary = u64::try_from(record.salary).map_err(|_| {
            anyhow::anyhow!(
                "Salary for {} must be >= 0, got {}",
                record.full_name,
                record.salary
            )
        })?;

        Ok(Self {
            full_name: record.full_name,
            department: record.department,
            team: record.team,
            position: record.position,
            rating: record.rating,
            salary,
        })
    }
}

/// Aggregated figures for one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    #[serde(rename = "Департамент")]
    pub department: String,
    #[serde(rename = "Численность")]
    pub headcount: usize,
    #[serde(rename = "Мин. зарплата")]
    pub min_salary: u64,
    #[serde(rename = "Макс. зарплата")]
    pub max_salary: u64,
    /// Mean salary, rounded to 2 decimals
    #[serde(rename = "Средняя зарплата")]
    pub avg_salary: f64,
}
