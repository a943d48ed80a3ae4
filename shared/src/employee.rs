//! Employee list helpers

use crate::mission::collate::compare;
use crate::models::Employee;

/// Pending first, then accepted, then rejected; alphabetical inside a status
pub fn sort_employees(employees: &[Employee]) -> Vec<&Employee> {
    let mut sorted: Vec<&Employee> = employees.iter().collect();
    sorted.sort_by(|a, b| {
        a.status
            .rank()
            .cmp(&b.status.rank())
            .then_with(|| compare(&a.family_name.to_lowercase(), &b.family_name.to_lowercase()))
            .then_with(|| compare(&a.first_name.to_lowercase(), &b.first_name.to_lowercase()))
    });
    sorted
}

/// Case-insensitive substring search over first name, family name and e-mail
///
/// A blank term matches everyone.
pub fn filter_employees<'a, I>(employees: I, term: &str) -> Vec<&'a Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    if term.trim().is_empty() {
        return employees.into_iter().collect();
    }
    let term = term.to_lowercase();
    employees
        .into_iter()
        .filter(|e| {
            e.first_name.to_lowercase().contains(&term)
                || e.family_name.to_lowercase().contains(&term)
                || e.email.to_lowercase().contains(&term)
        })
        .collect()
}

/// Employees of a conciergerie, plus those not attached to any
///
/// No conciergerie name means no employees.
pub fn filter_employees_by_conciergerie<'a, I>(employees: I, name: Option<&str>) -> Vec<&'a Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Vec::new();
    };
    employees
        .into_iter()
        .filter(|e| is_in_scope(e, name))
        .collect()
}

/// Whether `name` manages `e`: its own employees and unattached ones
///
/// Names compare case-insensitively, accented capitals included.
pub fn is_in_scope(e: &Employee, name: &str) -> bool {
    match e.conciergerie_name.as_deref() {
        None | Some("") => true,
        Some(c) => c.to_lowercase() == name.to_lowercase(),
    }
}
