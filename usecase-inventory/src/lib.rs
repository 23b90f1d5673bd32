//! AI Use-Case Inventory
//!
//! Tracks an organization's AI initiatives and computes the views the
//! inventory front-end renders:
//!
//! - **List**: text search plus department and stage selectors ([`UseCaseQuery`])
//! - **Dashboard**: totals, stage and department histograms, recently updated
//!   ([`DashboardSummary`])
//! - **Audit**: one entry per record, newest first ([`audit::project`]), plus
//!   a journal of accepted mutations ([`AuditLog`])
//! - **Detail**: lookup by id with a not-found outcome ([`UseCaseStore::get`])
//!
//! Every view is a pure function over a record slice; [`UseCaseStore`] holds
//! the records and routes create/update/delete through draft validation.
//!
//! # Example
//!
//! ```ignore
//! use usecase_inventory::{Stage, UseCaseQuery, UseCaseStore};
//!
//! let store = UseCaseStore::seeded()?;
//! let pilots = store.filter(&UseCaseQuery::all().text("crop").stage(Stage::Pilot)).await;
//! let summary = store.dashboard(5).await;
//! ```

pub mod aggregate;
pub mod audit;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod draft;
pub mod error;
pub mod filter;
pub mod session;
pub mod store;
pub mod types;

// Re-export main types
pub use aggregate::{DashboardSummary, DepartmentCount, StageCount, Totals};
pub use audit::{AuditAction, AuditEntry, AuditLog, AuditStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::InventoryConfig;
pub use draft::{FieldError, UseCaseDraft, ValidationFailure};
pub use error::{InventoryError, Result};
pub use filter::{filter_use_cases, UseCaseQuery};
pub use session::{DemoAuthenticator, Session};
pub use store::{lookup, UseCaseStore};
pub use types::*;
