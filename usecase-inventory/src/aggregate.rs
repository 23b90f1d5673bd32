//! Dashboard aggregates over the full record set.
//!
//! Each computation is independent and pure. Sorting is stable, so records
//! with equal `updated_at` keep their store order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::{Department, Stage, UseCase};

/// Number of entries in the "recently updated" list.
pub const RECENTLY_UPDATED_LIMIT: usize = 5;

/// Record count and number of departments represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_use_cases: usize,
    /// Distinct departments present, not the size of the enumeration
    pub departments_represented: usize,
}

/// Count of records at one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct StageCount {
    pub stage: Stage,
    pub count: usize,
}

/// Count of records owned by one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCount {
    pub department: Department,
    /// Chart label (first three words of the name)
    pub label: String,
    pub count: usize,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: Totals,
    /// "In Production" card
    pub in_production: usize,
    /// "In Development" card (pilot stage)
    pub in_development: usize,
    pub stages: Vec<StageCount>,
    pub departments: Vec<DepartmentCount>,
    pub recently_updated: Vec<UseCase>,
}

impl DashboardSummary {
    /// Compute every dashboard aggregate, with `recent_limit` recent entries.
    pub fn compute(records: &[UseCase], recent_limit: usize) -> Self {
        let stages = stage_histogram(records);
        let count_for = |stage: Stage| {
            stages
                .iter()
                .find(|s| s.stage == stage)
                .map(|s| s.count)
                .unwrap_or(0)
        };

        Self {
            totals: totals(records),
            in_production: count_for(Stage::Production),
            in_development: count_for(Stage::Pilot),
            departments: department_histogram(records),
            recently_updated: recently_updated(records, recent_limit)
                .into_iter()
                .cloned()
                .collect(),
            stages,
        }
    }
}

/// Record count and distinct departments present.
pub fn totals(records: &[UseCase]) -> Totals {
    let departments: HashSet<Department> = records.iter().map(|r| r.department).collect();
    Totals {
        total_use_cases: records.len(),
        departments_represented: departments.len(),
    }
}

/// Per-stage counts in `Idea, Pilot, Production` order; zero counts included.
pub fn stage_histogram(records: &[UseCase]) -> Vec<StageCount> {
    Stage::ALL
        .iter()
        .map(|&stage| StageCount {
            stage,
            count: records.iter().filter(|r| r.stage == stage).count(),
        })
        .collect()
}

/// Per-department counts in first-seen order.
///
/// Only departments with at least one record get a bucket.
pub fn department_histogram(records: &[UseCase]) -> Vec<DepartmentCount> {
    records
        .iter()
        .fold(Vec::<DepartmentCount>::new(), |mut acc, record| {
            match acc.iter_mut().find(|b| b.department == record.department) {
                Some(bucket) => bucket.count += 1,
                None => acc.push(DepartmentCount {
                    department: record.department,
                    label: record.department.short_label(),
                    count: 1,
                }),
            }
            acc
        })
}

/// The `limit` most recently updated records, newest first.
pub fn recently_updated(records: &[UseCase], limit: usize) -> Vec<&UseCase> {
    let mut sorted: Vec<&UseCase> = records.iter().collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(limit);
    sorted
}
