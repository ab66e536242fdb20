//! Employee records and the pure functions over them.

use serde::Serialize;

/// Salary at or above this is `Senior`
pub const SENIOR_THRESHOLD: i64 = 5_500_000;

/// Salary at or above this (and below senior) is `Mid-Level`
pub const MID_LEVEL_THRESHOLD: i64 = 4_500_000;

/// A payroll figure as it was recorded, which is not always a number
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    /// A usable number
    Value(i64),
    /// Nothing recorded
    Missing,
    /// Free text where a number was expected
    Text(String),
}

impl Amount {
    /// The number, if this is one
    #[must_use]
    pub const fn value(&self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Missing | Self::Text(_) => None,
        }
    }

    /// The number, or 0 for anything else
    #[must_use]
    pub const fn value_or_zero(&self) -> i64 {
        match self.value() {
            Some(v) => v,
            None => 0,
        }
    }

    /// Returns true if this is a number
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Missing => f.write_str("kosong"),
            Self::Text(text) => write!(f, "'{text}'"),
        }
    }
}

/// One row of the payroll
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Display name
    #[serde(rename = "nama")]
    pub name: String,
    /// Monthly salary
    #[serde(rename = "gaji")]
    pub salary: Amount,
    /// Monthly bonus
    pub bonus: Amount,
    /// Currently employed
    #[serde(rename = "status_aktif")]
    pub active: bool,
}

impl Employee {
    /// Creates an employee
    #[must_use]
    pub fn new(name: impl Into<String>, salary: Amount, bonus: Amount, active: bool) -> Self {
        Self {
            name: name.into(),
            salary,
            bonus,
            active,
        }
    }
}

/// The built-in sample payroll: ten employees, three with unusable figures
#[must_use]
pub fn dataset() -> Vec<Employee> {
    use Amount::{Missing, Text, Value};

    vec![
        Employee::new("Zaky", Value(5_000_000), Value(1_000_000), true),
        Employee::new("Fitra", Value(4_500_000), Missing, true),
        Employee::new("Fia", Value(5_200_000), Value(500_000), true),
        Employee::new("Adit", Value(6_000_000), Value(1_000_000), false),
        Employee::new("Faizal", Value(4_000_000), Value(700_000), true),
        Employee::new("Radan", Value(5_500_000), Text("tidak ada".to_string()), true),
        Employee::new("Wempy", Value(4_800_000), Value(600_000), true),
        Employee::new("Alfi", Value(5_000_000), Value(800_000), false),
        Employee::new("Hakim", Value(5_200_000), Value(1_000_000), true),
        Employee::new("Rama", Missing, Value(750_000), true),
    ]
}

/// Salary band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// `>= 5,500,000`
    Senior,
    /// `>= 4,500,000`
    #[serde(rename = "Mid-Level")]
    MidLevel,
    /// Everything else, including a missing salary
    Junior,
}

impl Category {
    /// All bands, highest first
    pub const ALL: [Self; 3] = [Self::Senior, Self::MidLevel, Self::Junior];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Senior => "Senior",
            Self::MidLevel => "Mid-Level",
            Self::Junior => "Junior",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Returns true if the employee is active
#[must_use]
pub const fn is_active(employee: &Employee) -> bool {
    employee.active
}

/// Returns true if salary or bonus is not a number
#[must_use]
pub const fn has_invalid_data(employee: &Employee) -> bool {
    !employee.salary.is_value() || !employee.bonus.is_value()
}

/// Returns true if salary and bonus are both numbers
#[must_use]
pub const fn has_valid_data(employee: &Employee) -> bool {
    !has_invalid_data(employee)
}

/// Salary plus bonus; anything that is not a number counts as 0
#[must_use]
pub const fn total_compensation(employee: &Employee) -> i64 {
    employee.salary.value_or_zero() + employee.bonus.value_or_zero()
}

/// Fold step: adds one employee's compensation to the running total
#[must_use]
pub const fn add_compensation(acc: i64, employee: &Employee) -> i64 {
    acc + total_compensation(employee)
}

/// The better paid of two employees; ties keep `first`
#[must_use]
pub const fn max_compensation<'a>(first: &'a Employee, second: &'a Employee) -> &'a Employee {
    if total_compensation(first) >= total_compensation(second) {
        first
    } else {
        second
    }
}

/// Salary band; a missing or textual salary counts as 0
#[must_use]
pub const fn categorize(employee: &Employee) -> Category {
    let salary = employee.salary.value_or_zero();
    if salary >= SENIOR_THRESHOLD {
        Category::Senior
    } else if salary >= MID_LEVEL_THRESHOLD {
        Category::MidLevel
    } else {
        Category::Junior
    }
}

/// Condensed view of one employee
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    /// Display name
    #[serde(rename = "nama")]
    pub name: String,
    /// Salary plus bonus
    #[serde(rename = "kompensasi")]
    pub compensation: i64,
    /// Salary band
    #[serde(rename = "kategori")]
    pub category: Category,
    /// `Aktif` or `Tidak Aktif`
    pub status: &'static str,
}

/// Builds the summary for one employee
#[must_use]
pub fn summarize(employee: &Employee) -> EmployeeSummary {
    EmployeeSummary {
        name: employee.name.clone(),
        compensation: total_compensation(employee),
        category: categorize(employee),
        status: if is_active(employee) { "Aktif" } else { "Tidak Aktif" },
    }
}
