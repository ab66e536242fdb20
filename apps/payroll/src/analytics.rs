//! Map/filter, fold, grouping and recursive passes over the payroll.

use crate::employee::{
    add_compensation, categorize, has_valid_data, is_active, max_compensation,
    summarize, total_compensation, Category, Employee, EmployeeSummary,
};

/// Summaries of active employees with valid figures, built lazily
pub fn summaries(employees: &[Employee]) -> impl Iterator<Item = EmployeeSummary> + '_ {
    employees
        .iter()
        .filter(|employee| is_active(employee))
        .filter(|employee| has_valid_data(employee))
        .map(summarize)
}

/// Totals over every employee with valid figures (active or not)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregate<'a> {
    /// Number of employees included
    pub count: usize,
    /// Sum of compensation
    pub total: i64,
    /// Best paid; ties keep the earlier one
    pub top: Option<&'a Employee>,
    /// Integer mean of compensation
    pub average: Option<i64>,
}

/// Folds the valid employees into an [`Aggregate`]
#[must_use]
pub fn aggregate(employees: &[Employee]) -> Aggregate<'_> {
    let valid: Vec<&Employee> = employees.iter().filter(|e| has_valid_data(e)).collect();

    let total = valid.iter().copied().fold(0, add_compensation);
    let top = valid.iter().copied().reduce(max_compensation);
    let average = i64::try_from(valid.len())
        .ok()
        .filter(|&count| count > 0)
        .map(|count| total.div_euclid(count));

    Aggregate {
        count: valid.len(),
        total,
        top,
        average,
    }
}

/// Active employees in one salary band
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    /// The band
    pub category: Category,
    /// Names in dataset order
    pub names: Vec<&'a str>,
}

impl CategoryGroup<'_> {
    /// Number of employees in the band
    #[must_use]
    pub fn count(&self) -> usize {
        self.names.len()
    }
}

/// Groups active employees by band, always in `Senior, Mid-Level, Junior` order
#[must_use]
pub fn group_by_category(employees: &[Employee]) -> Vec<CategoryGroup<'_>> {
    Category::ALL
        .iter()
        .map(|&category| CategoryGroup {
            category,
            names: employees
                .iter()
                .filter(|e| is_active(e) && categorize(e) == category)
                .map(|e| e.name.as_str())
                .collect(),
        })
        .collect()
}

/// Flattens groups into `"{name} ({category})"` entries
#[must_use]
pub fn flatten_groups(groups: &[CategoryGroup<'_>]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|group| {
            group
                .names
                .iter()
                .map(move |name| format!("{name} ({})", group.category))
        })
        .collect()
}

/// Sum of compensation, one element per call
#[must_use]
pub fn sum_recursive(employees: &[&Employee]) -> i64 {
    match employees {
        [] => 0,
        [first, rest @ ..] => total_compensation(first) + sum_recursive(rest),
    }
}

/// Keeps the employees matching `predicate`, preserving order
pub fn filter_recursive<'a, P>(employees: &[&'a Employee], predicate: &P) -> Vec<&'a Employee>
where
    P: Fn(&Employee) -> bool,
{
    fn step<'a, P>(
        rest: &[&'a Employee],
        predicate: &P,
        mut kept: Vec<&'a Employee>,
    ) -> Vec<&'a Employee>
    where
        P: Fn(&Employee) -> bool,
    {
        match rest {
            [] => kept,
            [first, tail @ ..] => {
                if predicate(*first) {
                    kept.push(*first);
                }
                step(tail, predicate, kept)
            },
        }
    }

    step(employees, predicate, Vec::new())
}

/// First employee matching `predicate`
pub fn find_recursive<'a, P>(employees: &[&'a Employee], predicate: &P) -> Option<&'a Employee>
where
    P: Fn(&Employee) -> bool,
{
    match employees {
        [] => None,
        [first, rest @ ..] => {
            if predicate(*first) {
                Some(*first)
            } else {
                find_recursive(rest, predicate)
            }
        },
    }
}

/// Best paid employee; ties keep the earlier one
#[must_use]
pub fn max_recursive<'a>(employees: &[&'a Employee]) -> Option<&'a Employee> {
    match employees {
        [] => None,
        [first, rest @ ..] => Some(match max_recursive(rest) {
            Some(best) => max_compensation(*first, best),
            None => *first,
        }),
    }
}
