//! Audit trail for use cases.
//!
//! Two sources feed the audit page:
//! - [`project`] derives one synthetic `Updated` entry per record from its
//!   latest `updated_at`.
//! - [`AuditLog`] journals every mutation accepted by the store.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::{Department, UseCase};

/// Maximum entries in the audit log before pruning.
pub const MAX_AUDIT_ENTRIES: usize = 10_000;

/// Kind of change an audit entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        }
    }
}

/// An entry in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AuditEntry {
    /// Use case ID
    pub id: String,
    pub title: String,
    pub action: AuditAction,
    pub owner: String,
    pub timestamp: DateTime<Utc>,
    pub department: Department,
}

impl AuditEntry {
    /// Build an entry describing `action` on `record` at `timestamp`.
    pub fn for_record(record: &UseCase, action: AuditAction, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            action,
            owner: record.owner.clone(),
            timestamp,
            department: record.department,
        }
    }
}

/// One `Updated` entry per record, newest first.
///
/// Entries with equal timestamps keep store order.
pub fn project(records: &[UseCase]) -> Vec<AuditEntry> {
    let mut entries: Vec<AuditEntry> = records
        .iter()
        .map(|r| AuditEntry::for_record(r, AuditAction::Updated, r.updated_at))
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}

/// Bounded journal of accepted mutations.
#[derive(Debug, Clone)]
pub struct AuditLog {
    /// Log entries (newest first)
    entries: VecDeque<AuditEntry>,
    /// Maximum entries to retain
    max_entries: usize,
}

impl AuditLog {
    /// Create a new audit log.
    pub fn new() -> Self {
        Self::with_max_entries(MAX_AUDIT_ENTRIES)
    }

    /// Create with custom max entries.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Append an entry, pruning the oldest beyond the limit.
    pub fn record(&mut self, entry: AuditEntry) {
        tracing::debug!(
            use_case_id = %entry.id,
            action = entry.action.as_str(),
            "Recorded audit entry"
        );
        self.entries.push_front(entry);

        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
    }

    /// Get recent entries.
    pub fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Get entries for one use case, newest first.
    pub fn for_use_case(&self, id: &str) -> Vec<AuditEntry> {
        self.entries.iter().filter(|e| e.id == id).cloned().collect()
    }

    /// Get statistics.
    pub fn stats(&self) -> AuditStats {
        let count = |action: AuditAction| self.entries.iter().filter(|e| e.action == action).count();
        AuditStats {
            total: self.entries.len(),
            created: count(AuditAction::Created),
            updated: count(AuditAction::Updated),
            deleted: count(AuditAction::Deleted),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear the log.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics from the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStats {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}
