//! Bucket survey records by group key and order each bucket by salary.
//!
//! ```text
//! Records (flat)                              Grouped
//! ┌──────────────────────────────┐           ┌────────────────────────────────────┐
//! │ Dev, 1-3, Backend!, 50-100, B │           │ Dev | 1-3 | Backend | 50-100       │
//! │ Dev, 1-3, Backend,  50-100, A │    →      │   [A, B]                           │
//! │ QA,  3-5, Test,     1-10,   C │           ├────────────────────────────────────┤
//! └──────────────────────────────┘           │ QA | 3-5 | Test | 1-10   [C]       │
//!                                            └────────────────────────────────────┘
//! ```
//!
//! Key order is first-seen order. Salary ranges compare as plain strings, so
//! `"10.000"` sorts before `"9.000"`.

use std::cmp::Ordering;

use super::key::KeyBuilder;
use crate::models::{GroupedData, Record};

/// Partition records by key, keeping first-seen key order and input order
/// within each bucket.
pub fn group(records: Vec<Record>, keys: &KeyBuilder) -> GroupedData {
    let mut grouped = GroupedData::new();

    for record in records {
        let key = keys.build_key(&record);
        grouped.entry(key).or_default().push(record);
    }

    grouped
}

/// Stable-sort every bucket by the salary column.
///
/// Values compare lexicographically; records without a salary go last.
pub fn sort_groups(mut grouped: GroupedData, salary_column: &str) -> GroupedData {
    for records in grouped.values_mut() {
        records.sort_by(|a, b| compare_salary(a.get(salary_column), b.get(salary_column)));
    }
    grouped
}

/// Group then sort, the way the pipeline does it.
pub fn group_and_sort(records: Vec<Record>, keys: &KeyBuilder) -> GroupedData {
    let salary = keys.columns().salary.clone();
    sort_groups(group(records, keys), &salary)
}

fn compare_salary(a: Option<&String>, b: Option<&String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
