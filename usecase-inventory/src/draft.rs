//! Submission drafts and write-boundary validation.
//!
//! A draft is the editable form of a use case. Nothing reaches the store
//! until [`UseCaseDraft::validate`] passes; failures list every offending
//! field so the form can flag them all at once.

use serde::{Deserialize, Serialize};

use crate::types::{Department, Stage, UseCase};

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field name, as serialized on the record
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// All validation failures for one draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_fields(.fields))]
pub struct ValidationFailure {
    pub fields: Vec<FieldError>,
}

impl ValidationFailure {
    /// Whether `field` is among the failures.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Editable use-case fields, as collected by the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseDraft {
    pub title: String,
    pub description: String,
    pub department: Option<Department>,
    pub stage: Option<Stage>,
    pub owner: String,
    pub kpis: Vec<String>,
    #[serde(default)]
    pub kpis_achieved: Vec<String>,
    pub ethical_considerations: String,
    #[serde(default)]
    pub challenges: Option<String>,
}

impl UseCaseDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill a draft from an existing record for editing.
    pub fn from_record(record: &UseCase) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            department: Some(record.department),
            stage: Some(record.stage),
            owner: record.owner.clone(),
            kpis: record.kpis.clone(),
            kpis_achieved: record.achieved().to_vec(),
            ethical_considerations: record.ethical_considerations.clone(),
            challenges: record.challenges.clone(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
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

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn kpi(mut self, kpi: impl Into<String>) -> Self {
        self.add_kpi(kpi);
        self
    }

    pub fn achieved(mut self, kpi: impl Into<String>) -> Self {
        self.kpis_achieved.push(kpi.into());
        self
    }

    pub fn ethical_considerations(mut self, text: impl Into<String>) -> Self {
        self.ethical_considerations = text.into();
        self
    }

    pub fn challenges(mut self, text: impl Into<String>) -> Self {
        self.challenges = Some(text.into());
        self
    }

    /// Append a KPI. Input is trimmed; blank input is ignored.
    ///
    /// Returns whether the KPI was added.
    pub fn add_kpi(&mut self, kpi: impl Into<String>) -> bool {
        let kpi = kpi.into();
        let trimmed = kpi.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.kpis.push(trimmed.to_string());
        true
    }

    /// Remove the KPI at `index`, also un-marking it as achieved.
    ///
    /// Out-of-range indexes are ignored.
    pub fn remove_kpi(&mut self, index: usize) -> Option<String> {
        if index >= self.kpis.len() {
            return None;
        }
        let removed = self.kpis.remove(index);
        if !self.kpis.contains(&removed) {
            self.kpis_achieved.retain(|k| k != &removed);
        }
        Some(removed)
    }

    /// Check every required field and the achieved-KPI subset rule.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let fields = self.field_errors();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { fields })
        }
    }

    /// Validate and normalize into record-ready fields.
    pub(crate) fn into_checked(self) -> Result<CheckedDraft, ValidationFailure> {
        let fields = self.field_errors();
        match (self.department, self.stage) {
            (Some(department), Some(stage)) if fields.is_empty() => Ok(CheckedDraft {
                kpis_achieved: self.achieved_for_record(),
                challenges: self.challenges_for_record(),
                title: self.title,
                description: self.description,
                department,
                stage,
                owner: self.owner,
                kpis: self.kpis,
                ethical_considerations: self.ethical_considerations,
            }),
            _ => Err(ValidationFailure { fields }),
        }
    }

    fn field_errors(&self) -> Vec<FieldError> {
        let mut fields = Vec::new();

        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("owner", &self.owner),
            ("ethicalConsiderations", &self.ethical_considerations),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                fields.push(FieldError::new(field, "is required"));
            }
        }

        if self.department.is_none() {
            fields.push(FieldError::new("department", "must be selected"));
        }
        if self.stage.is_none() {
            fields.push(FieldError::new("stage", "must be selected"));
        }

        if self.kpis.iter().all(|k| k.trim().is_empty()) {
            fields.push(FieldError::new("kpis", "at least one KPI is required"));
        } else if self.kpis.iter().any(|k| k.trim().is_empty()) {
            fields.push(FieldError::new("kpis", "KPIs must not be blank"));
        }

        for achieved in &self.kpis_achieved {
            if !self.kpis.contains(achieved) {
                fields.push(FieldError::new(
                    "kpisAchieved",
                    format!("'{}' is not one of the declared KPIs", achieved),
                ));
            }
        }

        fields
    }

    /// Achieved list in record form: `None` when empty.
    fn achieved_for_record(&self) -> Option<Vec<String>> {
        if self.kpis_achieved.is_empty() {
            None
        } else {
            Some(self.kpis_achieved.clone())
        }
    }

    /// Challenges in record form: blank text counts as absent.
    fn challenges_for_record(&self) -> Option<String> {
        self.challenges
            .as_ref()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

/// A draft that passed validation, with selectors resolved.
#[derive(Debug, Clone)]
pub(crate) struct CheckedDraft {
    pub title: String,
    pub description: String,
    pub department: Department,
    pub stage: Stage,
    pub owner: String,
    pub kpis: Vec<String>,
    pub kpis_achieved: Option<Vec<String>>,
    pub ethical_considerations: String,
    pub challenges: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> UseCaseDraft {
        UseCaseDraft::new()
            .title("Drought Early Warning")
            .description("Forecast drought onset from satellite moisture data.")
            .department(Department::NaturalResourcesConservation)
            .stage(Stage::Idea)
            .owner("Dana Ortiz")
            .kpi("2-week lead time")
            .ethical_considerations("Public release of forecasts to all producers.")
    }

    #[test]
    fn test_complete_draft_validates() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let failure = UseCaseDraft::new().validate().unwrap_err();
        for field in [
            "title",
            "description",
            "department",
            "stage",
            "owner",
            "kpis",
            "ethicalConsiderations",
        ] {
            assert!(failure.has_field(field), "missing {field}");
        }
        assert_eq!(failure.fields.len(), 7);
    }

    #[test]
    fn test_blank_strings_are_missing() {
        let failure = complete_draft().title("   ").validate().unwrap_err();
        assert_eq!(failure.fields.len(), 1);
        assert!(failure.has_field("title"));
    }

    #[test]
    fn test_blank_kpi_alongside_real_one_is_rejected() {
        let mut draft = complete_draft();
        draft.kpis.push("   ".to_string());
        let failure = draft.validate().unwrap_err();
        assert_eq!(failure.fields.len(), 1);
        assert!(failure.has_field("kpis"));
        assert!(failure.to_string().contains("must not be blank"));
    }

    #[test]
    fn test_achieved_must_be_declared() {
        let failure = complete_draft()
            .achieved("2-week lead time")
            .achieved("Nationwide coverage")
            .validate()
            .unwrap_err();
        assert_eq!(failure.fields.len(), 1);
        assert!(failure.has_field("kpisAchieved"));
        assert!(failure.to_string().contains("Nationwide coverage"));
    }

    #[test]
    fn test_add_kpi_trims_and_skips_blank() {
        let mut draft = UseCaseDraft::new();
        assert!(draft.add_kpi("  95% accuracy  "));
        assert!(!draft.add_kpi("   "));
        assert_eq!(draft.kpis, vec!["95% accuracy".to_string()]);
    }

    #[test]
    fn test_remove_kpi_drops_achievement() {
        let mut draft = complete_draft().kpi("Lower cost").achieved("Lower cost");
        assert_eq!(draft.remove_kpi(1).as_deref(), Some("Lower cost"));
        assert!(draft.kpis_achieved.is_empty());
        assert_eq!(draft.remove_kpi(5), None);
        assert_eq!(draft.kpis.len(), 1);
    }

    #[test]
    fn test_into_checked_normalizes() {
        let checked = complete_draft().challenges("  ").into_checked().unwrap();
        assert_eq!(checked.department, Department::NaturalResourcesConservation);
        assert_eq!(checked.challenges, None);
        assert_eq!(checked.kpis_achieved, None);

        let failure = UseCaseDraft::new().into_checked().unwrap_err();
        assert!(failure.has_field("department"));
    }

    #[test]
    fn test_blank_challenges_become_none() {
        let draft = complete_draft().challenges("  ");
        assert_eq!(draft.challenges_for_record(), None);
        assert_eq!(draft.achieved_for_record(), None);
    }
}
