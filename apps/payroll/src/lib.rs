//! Payroll processing with lazy iterators.
//!
//! A fixed ten-row payroll, some of it dirty, run through:
//!
//! - [`generators`]: hand-written and adapter-based lazy sequences
//! - [`analytics`]: map/filter, fold/reduce, grouping and recursion
//! - [`report`]: prints each sequence by pulling it with `next()`
//!
//! # Quick Start
//!
//! ```
//! use payroll_stream::{dataset, InvalidEmployeeNames};
//!
//! let employees = dataset();
//! let names: Vec<_> = InvalidEmployeeNames::new(&employees).collect();
//! assert_eq!(names, ["Fitra", "Radan", "Rama"]);
//! ```

pub mod analytics;
pub mod employee;
pub mod generators;
pub mod report;

// Re-export commonly used types
pub use analytics::{aggregate, group_by_category, Aggregate, CategoryGroup};
pub use employee::{dataset, Amount, Category, Employee, EmployeeSummary};
pub use generators::{
    active_employees, Contribution, Contributions, InvalidEmployeeNames, ValidCompensations,
};
pub use report::{run, write_report, ReportError, ReportSummary};
