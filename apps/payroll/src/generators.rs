//! Lazy sequences over the payroll.
//!
//! Nothing here does work until the caller asks for the next item. The
//! hand-written iterators log each decision at `debug` level as it happens.

use crate::employee::{has_invalid_data, has_valid_data, is_active, total_compensation, Employee};
use serde::Serialize;
use std::slice;

/// Active employees, filtered lazily
pub fn active_employees(employees: &[Employee]) -> impl Iterator<Item = &Employee> {
    employees.iter().filter(|employee| is_active(employee))
}

/// Names of employees whose salary or bonus is not a number
#[derive(Debug, Clone)]
pub struct InvalidEmployeeNames<'a> {
    inner: slice::Iter<'a, Employee>,
}

impl<'a> InvalidEmployeeNames<'a> {
    /// Starts a scan over `employees`
    #[must_use]
    pub fn new(employees: &'a [Employee]) -> Self {
        Self {
            inner: employees.iter(),
        }
    }
}

impl<'a> Iterator for InvalidEmployeeNames<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let employee = self.inner.find(|employee| has_invalid_data(employee))?;
        tracing::debug!(
            name = %employee.name,
            salary = %employee.salary,
            bonus = %employee.bonus,
            "Invalid payroll data"
        );
        Some(&employee.name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// `(name, compensation)` for active employees with valid figures
#[derive(Debug, Clone)]
pub struct ValidCompensations<'a> {
    inner: slice::Iter<'a, Employee>,
}

impl<'a> ValidCompensations<'a> {
    /// Starts a scan over `employees`
    #[must_use]
    pub fn new(employees: &'a [Employee]) -> Self {
        Self {
            inner: employees.iter(),
        }
    }
}

impl<'a> Iterator for ValidCompensations<'a> {
    type Item = (&'a str, i64);

    fn next(&mut self) -> Option<Self::Item> {
        for employee in self.inner.by_ref() {
            if !is_active(employee) {
                continue;
            }
            if !has_valid_data(employee) {
                tracing::debug!(name = %employee.name, "Skipping employee with invalid data");
                continue;
            }

            let compensation = total_compensation(employee);
            tracing::debug!(name = %employee.name, compensation, "Valid compensation");
            return Some((employee.name.as_str(), compensation));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// One employee's share of the total
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// Display name
    #[serde(rename = "nama")]
    pub name: String,
    /// Salary plus bonus
    #[serde(rename = "kompensasi")]
    pub compensation: i64,
    /// Share of the total, as `"12.34%"`
    #[serde(rename = "kontribusi")]
    pub share: String,
}

/// Each valid employee's share of the combined compensation
///
/// The total needs every row, so construction drains [`ValidCompensations`]
/// once; the shares themselves are computed one at a time.
#[derive(Debug, Clone)]
pub struct Contributions<'a> {
    rows: std::vec::IntoIter<(&'a str, i64)>,
    total: i64,
}

impl<'a> Contributions<'a> {
    /// Collects the valid rows and their total
    #[must_use]
    pub fn new(employees: &'a [Employee]) -> Self {
        let rows: Vec<_> = ValidCompensations::new(employees).collect();
        let total: i64 = rows.iter().map(|(_, compensation)| compensation).sum();
        tracing::debug!(total, rows = rows.len(), "Contribution total computed");

        Self {
            rows: rows.into_iter(),
            total,
        }
    }

    /// Combined compensation of all valid rows
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.total
    }
}

impl Iterator for Contributions<'_> {
    type Item = Contribution;

    fn next(&mut self) -> Option<Self::Item> {
        let (name, compensation) = self.rows.next()?;
        let share = format_share(compensation, self.total);
        tracing::debug!(name, %share, "Contribution");

        Some(Contribution {
            name: name.to_string(),
            compensation,
            share,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Contributions<'_> {}

/// `part / total` as a percentage with two decimals; a zero total is `0.00%`
#[must_use]
#[allow(clippy::cast_precision_loss)] // payroll figures are far below 2^52
pub fn format_share(part: i64, total: i64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", part as f64 / total as f64 * 100.0)
}
