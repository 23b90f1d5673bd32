//! Core types for the use-case inventory.
//!
//! A use case is the only entity; its department and stage are closed
//! enumerations rather than separate records.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the browser front-end.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::InventoryError;

/// Maturity stage of a use case.
///
/// Declaration order is the display order for histograms and selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum Stage {
    /// Proposed, not yet built
    Idea,
    /// Running with a limited audience
    Pilot,
    /// Fully deployed
    Production,
}

impl Stage {
    /// All stages in maturity order.
    pub const ALL: [Stage; 3] = [Stage::Idea, Stage::Pilot, Stage::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Pilot => "Pilot",
            Self::Production => "Production",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|stage| stage.as_str() == s)
            .or_else(|| {
                Self::ALL
                    .iter()
                    .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            })
            .copied()
            .ok_or_else(|| InventoryError::UnknownStage(s.to_string()))
    }
}

/// Departments that may own a use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum Department {
    #[serde(rename = "Farm Production and Conservation")]
    FarmProductionAndConservation,
    #[serde(rename = "Food, Nutrition and Consumer Services")]
    FoodNutritionAndConsumerServices,
    #[serde(rename = "Natural Resources Conservation")]
    NaturalResourcesConservation,
    #[serde(rename = "Research, Education and Economics")]
    ResearchEducationAndEconomics,
    #[serde(rename = "Animal and Plant Health Inspection")]
    AnimalAndPlantHealthInspection,
    #[serde(rename = "Marketing and Regulatory Programs")]
    MarketingAndRegulatoryPrograms,
    #[serde(rename = "Forest Service")]
    ForestService,
}

impl Department {
    /// Canonical department list, in selector order.
    pub const ALL: [Department; 7] = [
        Department::FarmProductionAndConservation,
        Department::FoodNutritionAndConsumerServices,
        Department::NaturalResourcesConservation,
        Department::ResearchEducationAndEconomics,
        Department::AnimalAndPlantHealthInspection,
        Department::MarketingAndRegulatoryPrograms,
        Department::ForestService,
    ];

    /// Full display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FarmProductionAndConservation => "Farm Production and Conservation",
            Self::FoodNutritionAndConsumerServices => "Food, Nutrition and Consumer Services",
            Self::NaturalResourcesConservation => "Natural Resources Conservation",
            Self::ResearchEducationAndEconomics => "Research, Education and Economics",
            Self::AnimalAndPlantHealthInspection => "Animal and Plant Health Inspection",
            Self::MarketingAndRegulatoryPrograms => "Marketing and Regulatory Programs",
            Self::ForestService => "Forest Service",
        }
    }

    /// First three words of the name, used for chart axes and compact lists.
    pub fn short_label(&self) -> String {
        self.as_str()
            .split(' ')
            .take(3)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|dept| dept.as_str() == s)
            .or_else(|| {
                Self::ALL
                    .iter()
                    .find(|dept| dept.as_str().eq_ignore_ascii_case(s.trim()))
            })
            .copied()
            .ok_or_else(|| InventoryError::UnknownDepartment(s.to_string()))
    }
}

/// A tracked AI use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UseCase {
    /// Unique identifier, stable for the record's lifetime
    pub id: String,
    pub title: String,
    pub description: String,
    pub department: Department,
    pub stage: Stage,
    /// Person accountable for the initiative
    pub owner: String,
    /// Declared targets, in display order
    pub kpis: Vec<String>,
    /// Targets already met; always a subset of `kpis` for records admitted through the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpis_achieved: Option<Vec<String>>,
    pub ethical_considerations: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Never earlier than `created_at`
    pub updated_at: DateTime<Utc>,
}

impl UseCase {
    /// Achieved KPIs, or an empty slice when none were recorded.
    pub fn achieved(&self) -> &[String] {
        self.kpis_achieved.as_deref().unwrap_or(&[])
    }

    /// Whether `kpi` has been marked as met.
    pub fn is_kpi_achieved(&self, kpi: &str) -> bool {
        self.achieved().iter().any(|k| k == kpi)
    }

    /// Whole days since creation as of `now`, never negative.
    pub fn days_active(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.created_at).num_days().max(0)
    }

    /// Case-insensitive substring match on title, description or owner.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.owner.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert!(Stage::Idea < Stage::Pilot);
        assert!(Stage::Pilot < Stage::Production);
        assert_eq!(Stage::ALL[0], Stage::Idea);
        assert_eq!(Stage::ALL[2], Stage::Production);
    }

    #[test]
    fn test_stage_parse() {
        assert_eq!("Pilot".parse::<Stage>().unwrap(), Stage::Pilot);
        assert_eq!("production".parse::<Stage>().unwrap(), Stage::Production);
        assert!(matches!(
            "Retired".parse::<Stage>(),
            Err(InventoryError::UnknownStage(_))
        ));
    }

    #[test]
    fn test_department_parse_and_labels() {
        assert_eq!(Department::ALL.len(), 7);
        let dept: Department = "Forest Service".parse().unwrap();
        assert_eq!(dept, Department::ForestService);
        assert_eq!(
            "food, nutrition and consumer services".parse::<Department>().unwrap(),
            Department::FoodNutritionAndConsumerServices
        );
        assert!("Space Program".parse::<Department>().is_err());

        assert_eq!(
            Department::FoodNutritionAndConsumerServices.short_label(),
            "Food, Nutrition and"
        );
        assert_eq!(Department::ForestService.short_label(), "Forest Service");
    }

    #[test]
    fn test_department_serializes_as_display_name() {
        let json = serde_json::to_string(&Department::ResearchEducationAndEconomics).unwrap();
        assert_eq!(json, "\"Research, Education and Economics\"");
    }

    #[test]
    fn test_days_active_follows_clock() {
        use crate::clock::{Clock, ManualClock};
        use chrono::Duration;

        let record = crate::catalog::sample_catalog().unwrap().remove(0);
        let clock = ManualClock::new(record.created_at);
        assert_eq!(record.days_active(clock.now()), 0);

        clock.advance(Duration::hours(23));
        assert_eq!(record.days_active(clock.now()), 0);

        clock.advance(Duration::hours(1));
        assert_eq!(record.days_active(clock.now()), 1);

        clock.advance(Duration::days(365));
        assert_eq!(record.days_active(clock.now()), 366);

        clock.set(record.created_at - Duration::days(3));
        assert_eq!(record.days_active(clock.now()), 0);
    }
}
