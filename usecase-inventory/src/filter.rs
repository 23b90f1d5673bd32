//! Search and selector filtering for the use-case list.
//!
//! Filtering is stable: matches come back in store order, never re-sorted.
//! A query that matches nothing yields an empty list, which callers render
//! as "no results" rather than treating as a failure.

use serde::{Deserialize, Serialize};

use crate::types::{Department, Stage, UseCase};

/// Search text plus department and stage selectors.
///
/// `None` selectors mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseQuery {
    /// Free text matched case-insensitively against title, description and owner
    pub text: String,
    pub department: Option<Department>,
    pub stage: Option<Stage>,
}

impl UseCaseQuery {
    /// A query that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Whether no constraint is set.
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_empty() && self.department.is_none() && self.stage.is_none()
    }

    /// Check a single record against all three constraints.
    pub fn matches(&self, record: &UseCase) -> bool {
        self.matches_with_needle(record, &self.text.to_lowercase())
    }

    /// Filter `records`, preserving their order.
    pub fn apply<'a>(&self, records: &'a [UseCase]) -> Vec<&'a UseCase> {
        let needle = self.text.to_lowercase();
        records
            .iter()
            .filter(|record| self.matches_with_needle(record, &needle))
            .collect()
    }

    fn matches_with_needle(&self, record: &UseCase, needle: &str) -> bool {
        let matches_department = self.department.map_or(true, |d| record.department == d);
        let matches_stage = self.stage.map_or(true, |s| record.stage == s);
        matches_department && matches_stage && record.matches_text(needle)
    }
}

/// Owned-result convenience over [`UseCaseQuery::apply`].
pub fn filter_use_cases(records: &[UseCase], query: &UseCaseQuery) -> Vec<UseCase> {
    query.apply(records).into_iter().cloned().collect()
}
