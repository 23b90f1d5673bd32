//! Use-case record store.
//!
//! Holds records in insertion order together with the mutation journal.
//! Derived views (filter, dashboard, audit, lookup) are computed from a
//! snapshot on every call; the store never caches them.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::aggregate::DashboardSummary;
use crate::audit::{self, AuditAction, AuditEntry, AuditLog, AuditStats};
use crate::catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::InventoryConfig;
use crate::draft::UseCaseDraft;
use crate::error::{InventoryError, Result};
use crate::filter::UseCaseQuery;
use crate::types::{Department, UseCase};

/// Find a record by id.
///
/// Empty or malformed ids simply find nothing.
pub fn lookup<'a>(records: &'a [UseCase], id: &str) -> Option<&'a UseCase> {
    records.iter().find(|r| r.id == id)
}

struct StoreState {
    records: Vec<UseCase>,
    journal: AuditLog,
}

/// In-memory use-case store with a mutation journal.
#[derive(Clone)]
pub struct UseCaseStore {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<dyn Clock>,
}

impl UseCaseStore {
    /// Create a new empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new empty store with a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                records: Vec::new(),
                journal: AuditLog::new(),
            })),
            clock,
        }
    }

    /// Create a store holding the built-in sample catalog.
    pub fn seeded() -> Result<Self> {
        Self::from_records(catalog::sample_catalog()?, Arc::new(SystemClock))
    }

    /// Create a store from existing records.
    ///
    /// Rejects duplicate ids and records updated before they were created.
    pub fn from_records(records: Vec<UseCase>, clock: Arc<dyn Clock>) -> Result<Self> {
        check_records(&records)?;
        let count = records.len();
        let store = Self {
            state: Arc::new(RwLock::new(StoreState {
                records,
                journal: AuditLog::new(),
            })),
            clock,
        };
        tracing::debug!(records = count, "Seeded use case store");
        Ok(store)
    }

    /// Build a store as described by `config`.
    pub fn from_config(config: &InventoryConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let mut records = if config.catalog.seed_sample_data {
            catalog::sample_catalog()?
        } else {
            Vec::new()
        };
        if let Some(path) = &config.catalog.path {
            records.extend(catalog::load_catalog(path)?);
        }

        check_records(&records)?;
        let count = records.len();
        let store = Self {
            state: Arc::new(RwLock::new(StoreState {
                records,
                journal: AuditLog::with_max_entries(config.audit.max_history_entries),
            })),
            clock,
        };
        tracing::info!(records = count, "Initialized use case store");
        Ok(store)
    }

    /// Canonical department list, in selector order.
    pub fn departments(&self) -> &'static [Department] {
        &Department::ALL
    }

    /// Current time on the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// All records in insertion order.
    pub async fn snapshot(&self) -> Vec<UseCase> {
        let state = self.state.read().await;
        state.records.clone()
    }

    /// Get total count of stored records.
    pub async fn count(&self) -> usize {
        let state = self.state.read().await;
        state.records.len()
    }

    /// Get a use case by ID.
    pub async fn get(&self, id: &str) -> Result<UseCase> {
        let state = self.state.read().await;
        lookup(&state.records, id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }

    /// Records matching `query`, in store order.
    pub async fn filter(&self, query: &UseCaseQuery) -> Vec<UseCase> {
        let state = self.state.read().await;
        query.apply(&state.records).into_iter().cloned().collect()
    }

    /// Dashboard aggregates with `recent_limit` recent entries.
    pub async fn dashboard(&self, recent_limit: usize) -> DashboardSummary {
        let state = self.state.read().await;
        DashboardSummary::compute(&state.records, recent_limit)
    }

    /// One synthetic entry per record, newest first.
    pub async fn audit_trail(&self) -> Vec<AuditEntry> {
        let state = self.state.read().await;
        audit::project(&state.records)
    }

    /// Journal of accepted mutations, newest first.
    pub async fn history(&self, limit: usize) -> Vec<AuditEntry> {
        let state = self.state.read().await;
        state.journal.recent(limit)
    }

    /// Journal entries for one use case, newest first.
    pub async fn history_for(&self, id: &str) -> Vec<AuditEntry> {
        let state = self.state.read().await;
        state.journal.for_use_case(id)
    }

    pub async fn history_stats(&self) -> AuditStats {
        let state = self.state.read().await;
        state.journal.stats()
    }

    /// Validate and add a new use case.
    pub async fn create(&self, draft: UseCaseDraft) -> Result<UseCase> {
        let draft = draft.into_checked()?;

        let now = self.clock.now();
        let record = UseCase {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            department: draft.department,
            stage: draft.stage,
            owner: draft.owner,
            kpis: draft.kpis,
            kpis_achieved: draft.kpis_achieved,
            ethical_considerations: draft.ethical_considerations,
            challenges: draft.challenges,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.write().await;
        if lookup(&state.records, &record.id).is_some() {
            return Err(InventoryError::DuplicateId(record.id));
        }
        state.records.push(record.clone());
        state
            .journal
            .record(AuditEntry::for_record(&record, AuditAction::Created, now));

        tracing::info!(use_case_id = %record.id, title = %record.title, "Created use case");
        Ok(record)
    }

    /// Validate and replace the editable fields of an existing use case.
    ///
    /// `created_at` is kept; `updated_at` moves to the clock's now, never
    /// earlier than `created_at`.
    pub async fn update(&self, id: &str, draft: UseCaseDraft) -> Result<UseCase> {
        let draft = draft.into_checked()?;
        let now = self.clock.now();

        let mut state = self.state.write().await;
        let record = state
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;

        record.title = draft.title;
        record.description = draft.description;
        record.department = draft.department;
        record.stage = draft.stage;
        record.owner = draft.owner;
        record.kpis = draft.kpis;
        record.kpis_achieved = draft.kpis_achieved;
        record.ethical_considerations = draft.ethical_considerations;
        record.challenges = draft.challenges;
        record.updated_at = refreshed_at(now, record.created_at);

        let updated = record.clone();
        state.journal.record(AuditEntry::for_record(
            &updated,
            AuditAction::Updated,
            updated.updated_at,
        ));

        tracing::info!(use_case_id = %id, "Updated use case");
        Ok(updated)
    }

    /// Remove a use case, returning the removed record.
    pub async fn delete(&self, id: &str) -> Result<UseCase> {
        let now = self.clock.now();

        let mut state = self.state.write().await;
        let index = state
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        let removed = state.records.remove(index);
        state
            .journal
            .record(AuditEntry::for_record(&removed, AuditAction::Deleted, now));

        tracing::info!(use_case_id = %id, "Deleted use case");
        Ok(removed)
    }
}

impl Default for UseCaseStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_records(records: &[UseCase]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(InventoryError::DuplicateId(record.id.clone()));
        }
        if record.updated_at < record.created_at {
            return Err(InventoryError::InvalidTimestamps(record.id.clone()));
        }
        UseCaseDraft::from_record(record).validate().map_err(|failure| {
            tracing::warn!(use_case_id = %record.id, %failure, "Rejected catalog record");
            InventoryError::Validation(failure)
        })?;
    }
    Ok(())
}

fn refreshed_at(now: DateTime<Utc>, created_at: DateTime<Utc>) -> DateTime<Utc> {
    now.max(created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::Stage;
    use chrono::Duration;

    fn draft() -> UseCaseDraft {
        UseCaseDraft::new()
            .title("Grain Quality Grading")
            .description("Grade grain samples from photos at elevators.")
            .department(Department::MarketingAndRegulatoryPrograms)
            .stage(Stage::Idea)
            .owner("Priya Nair")
            .kpi("Grade within 10 seconds")
            .ethical_considerations("Appeals process for disputed grades.")
    }

    fn clock_at(rfc3339: &str) -> Arc<ManualClock> {
        Arc::new(ManualClock::new(rfc3339.parse().unwrap()))
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = UseCaseStore::seeded().unwrap();
        assert_eq!(store.count().await, 10);
        assert_eq!(store.departments().len(), 7);

        let record = store.get("3").await.unwrap();
        assert_eq!(record.title, "Smart Irrigation System");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = UseCaseStore::seeded().unwrap();
        for id in ["999", "", "  ", "1; DROP TABLE"] {
            let err = store.get(id).await.unwrap_err();
            assert!(err.is_not_found());
        }
    }

    #[tokio::test]
    async fn test_rejects_duplicate_ids() {
        let mut records = catalog::sample_catalog().unwrap();
        records[1].id = "1".to_string();
        let result = UseCaseStore::from_records(records, Arc::new(SystemClock));
        assert!(matches!(result, Err(InventoryError::DuplicateId(id)) if id == "1"));
    }

    #[tokio::test]
    async fn test_rejects_inverted_timestamps() {
        let mut records = catalog::sample_catalog().unwrap();
        records[0].updated_at = records[0].created_at - Duration::days(1);
        let result = UseCaseStore::from_records(records, Arc::new(SystemClock));
        assert!(matches!(result, Err(InventoryError::InvalidTimestamps(_))));
    }

    #[tokio::test]
    async fn test_create_appends_and_journals() {
        let clock = clock_at("2024-11-01T09:00:00Z");
        let store =
            UseCaseStore::from_records(catalog::sample_catalog().unwrap(), clock.clone()).unwrap();

        let created = store.create(draft()).await.unwrap();
        assert_eq!(created.created_at, clock.now());
        assert_eq!(created.updated_at, created.created_at);
        assert!(created.kpis_achieved.is_none());

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 11);
        assert_eq!(snapshot.last().unwrap().id, created.id);

        let history = store.history(10).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Created);
        assert_eq!(history[0].id, created.id);

        // Newest record now leads the dashboard.
        let summary = store.dashboard(5).await;
        assert_eq!(summary.recently_updated[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let store = UseCaseStore::seeded().unwrap();
        let err = store.create(draft().owner("")).await.unwrap_err();
        match err {
            InventoryError::Validation(failure) => assert!(failure.has_field("owner")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.count().await, 10);
        assert!(store.history(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let clock = clock_at("2024-11-01T09:00:00Z");
        let store =
            UseCaseStore::from_records(catalog::sample_catalog().unwrap(), clock.clone()).unwrap();
        let before = store.get("5").await.unwrap();

        clock.advance(Duration::hours(2));
        let edited = UseCaseDraft::from_record(&before)
            .stage(Stage::Pilot)
            .achieved("Reduce food waste by 25%");
        let after = store.update("5", edited).await.unwrap();

        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.updated_at, clock.now());
        assert_eq!(after.stage, Stage::Pilot);
        assert!(after.is_kpi_achieved("Reduce food waste by 25%"));

        let history = store.history_for("5").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Updated);
        assert_eq!(history[0].timestamp, after.updated_at);
    }

    #[tokio::test]
    async fn test_update_never_predates_creation() {
        let clock = clock_at("2020-01-01T00:00:00Z");
        let store =
            UseCaseStore::from_records(catalog::sample_catalog().unwrap(), clock.clone()).unwrap();
        let before = store.get("1").await.unwrap();

        let after = store
            .update("1", UseCaseDraft::from_record(&before))
            .await
            .unwrap();
        assert_eq!(after.updated_at, after.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_achievement() {
        let store = UseCaseStore::seeded().unwrap();
        let before = store.get("2").await.unwrap();
        let edited = UseCaseDraft::from_record(&before).achieved("Not a declared KPI");

        let err = store.update("2", edited).await.unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
        assert_eq!(store.get("2").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = UseCaseStore::seeded().unwrap();
        let err = store.update("missing", draft()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let clock = clock_at("2024-11-02T12:00:00Z");
        let store =
            UseCaseStore::from_records(catalog::sample_catalog().unwrap(), clock.clone()).unwrap();

        let removed = store.delete("4").await.unwrap();
        assert_eq!(removed.title, "Pest Detection Using Computer Vision");
        assert_eq!(store.count().await, 9);
        assert!(store.get("4").await.unwrap_err().is_not_found());
        assert!(store.delete("4").await.unwrap_err().is_not_found());

        let history = store.history(10).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Deleted);
        assert_eq!(history[0].timestamp, clock.now());

        assert_eq!(store.audit_trail().await.len(), 9);
    }

    #[tokio::test]
    async fn test_from_config_without_sample_data() {
        let mut config = InventoryConfig::default();
        config.catalog.seed_sample_data = false;
        let store = UseCaseStore::from_config(&config, Arc::new(SystemClock)).unwrap();
        assert_eq!(store.count().await, 0);
        assert_eq!(store.dashboard(5).await.totals.total_use_cases, 0);
    }

    #[tokio::test]
    async fn test_history_respects_configured_limit() {
        let mut config = InventoryConfig::default();
        config.audit.max_history_entries = 2;
        let store = UseCaseStore::from_config(&config, Arc::new(SystemClock)).unwrap();

        for _ in 0..3 {
            store.create(draft()).await.unwrap();
        }
        assert_eq!(store.history(10).await.len(), 2);
        assert_eq!(store.history_stats().await.created, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_kpi_entry() {
        let store = UseCaseStore::new();
        let mut blank = draft();
        blank.kpis.push("   ".to_string());

        let err = store.create(blank).await.unwrap_err();
        assert!(matches!(err, InventoryError::Validation(ref f) if f.has_field("kpis")));
        assert_eq!(store.count().await, 0);
    }

    #[test]
    fn test_catalog_records_must_pass_draft_validation() {
        let yaml = r#"
- id: "x"
  title: ""
  description: "D"
  department: "Forest Service"
  stage: "Idea"
  owner: "O"
  kpis: ["k"]
  kpisAchieved: ["not-declared"]
  ethicalConsiderations: "E"
  createdAt: "2024-01-01T00:00:00Z"
  updatedAt: "2024-01-01T00:00:00Z"
"#;
        let records = catalog::parse_catalog(yaml).unwrap();
        let err = UseCaseStore::from_records(records, Arc::new(SystemClock))
            .err()
            .unwrap();
        match err {
            InventoryError::Validation(failure) => {
                assert!(failure.has_field("title"));
                assert!(failure.has_field("kpisAchieved"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_from_config_rejects_invalid_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(
            &path,
            r#"
- id: "x"
  title: "Timber Stand Mapping"
  description: "D"
  department: "Forest Service"
  stage: "Pilot"
  owner: "O"
  kpis: ["k"]
  kpisAchieved: ["not-declared"]
  ethicalConsiderations: "E"
  createdAt: "2024-01-01T00:00:00Z"
  updatedAt: "2024-01-01T00:00:00Z"
"#,
        )
        .unwrap();

        let mut config = InventoryConfig::default();
        config.catalog.path = Some(path.display().to_string());
        let result = UseCaseStore::from_config(&config, Arc::new(SystemClock));
        assert!(matches!(result, Err(InventoryError::Validation(_))));
    }

    #[test]
    fn test_lookup() {
        let records = catalog::sample_catalog().unwrap();
        assert_eq!(lookup(&records, "7").map(|r| r.owner.as_str()), Some("Jennifer Lee"));
        assert!(lookup(&records, "").is_none());
    }
}
