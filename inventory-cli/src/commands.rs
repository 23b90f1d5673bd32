//! Inventory CLI commands.
//!
//! Each command reads the store through one derived view and renders it as
//! text or JSON.

use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;
use tracing::debug;

use usecase_inventory::{
    DemoAuthenticator, Department, InventoryConfig, InventoryError, Stage, UseCaseDraft,
    UseCaseQuery, UseCaseStore,
};

use crate::format;

/// Inventory CLI commands
#[derive(Debug, Subcommand)]
pub enum InventoryCommands {
    /// Show dashboard statistics
    Dashboard,

    /// Search and filter use cases
    List {
        /// Text matched against title, description and owner
        #[arg(short, long, default_value = "")]
        query: String,
        /// Department name, or "all"
        #[arg(short, long, default_value = "all")]
        department: String,
        /// Stage (Idea, Pilot, Production), or "all"
        #[arg(short, long, default_value = "all")]
        stage: String,
    },

    /// Show one use case
    Show {
        /// Use case ID
        id: String,
    },

    /// Show the audit trail
    Audit,

    /// List known departments
    Departments,

    /// Submit a new use case
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        stage: String,
        #[arg(long)]
        owner: String,
        /// KPI (repeatable)
        #[arg(long = "kpi")]
        kpis: Vec<String>,
        /// Achieved KPI (repeatable, must match a --kpi)
        #[arg(long = "achieved")]
        achieved: Vec<String>,
        /// Ethical considerations
        #[arg(long)]
        ethics: String,
        #[arg(long)]
        challenges: Option<String>,
    },

    /// Sign in (demo mode, any credentials)
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
}

/// Execute an inventory CLI command
pub async fn execute_command(
    store: &UseCaseStore,
    config: &InventoryConfig,
    command: InventoryCommands,
    json: bool,
) -> anyhow::Result<String> {
    match command {
        InventoryCommands::Dashboard => {
            let summary = store.dashboard(config.dashboard.recent_limit).await;
            render(json, &summary, format::format_dashboard)
        }

        InventoryCommands::List {
            query,
            department,
            stage,
        } => {
            let query = build_query(query, &department, &stage)?;
            debug!(?query, "Filtering use cases");
            let results = store.filter(&query).await;
            let total = store.count().await;
            render(json, &results, |r| format::format_list(r, total))
        }

        InventoryCommands::Show { id } => match store.get(&id).await {
            Ok(record) => {
                let now = store.now();
                if json {
                    return Ok(serde_json::to_string_pretty(&serde_json::json!({
                        "useCase": record,
                        "daysActive": record.days_active(now),
                    }))?);
                }
                Ok(format::format_detail(&record, now))
            }
            Err(e) if e.is_not_found() => {
                if json {
                    Ok("null".to_string())
                } else {
                    Ok(format::format_not_found(&id))
                }
            }
            Err(e) => Err(e.into()),
        },

        InventoryCommands::Audit => {
            let entries = store.audit_trail().await;
            render(json, &entries, |e| format::format_audit(e))
        }

        InventoryCommands::Departments => {
            render(json, store.departments(), format::format_departments)
        }

        InventoryCommands::Submit {
            title,
            description,
            department,
            stage,
            owner,
            kpis,
            achieved,
            ethics,
            challenges,
        } => {
            let mut draft = UseCaseDraft::new()
                .title(title)
                .description(description)
                .owner(owner)
                .ethical_considerations(ethics);
            draft.department = Some(department.parse::<Department>()?);
            draft.stage = Some(stage.parse::<Stage>()?);
            for kpi in kpis {
                draft.add_kpi(kpi);
            }
            draft.kpis_achieved = achieved;
            draft.challenges = challenges;

            let record = match store.create(draft).await {
                Ok(record) => record,
                Err(InventoryError::Validation(failure)) => {
                    anyhow::bail!("{}", format::format_validation(&failure))
                }
                Err(e) => return Err(e.into()),
            };
            let history = store.history_for(&record.id).await;

            if json {
                return Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "useCase": record,
                    "history": history,
                }))?);
            }
            let mut output = String::from("Use case saved successfully!\n\n");
            output.push_str(&format::format_detail(&record, store.now()));
            output.push('\n');
            output.push_str(&format::format_history(&history));
            Ok(output)
        }

        InventoryCommands::Login { email, password } => {
            let session = DemoAuthenticator.sign_in(&email, &password)?;
            render(json, &session, |s| {
                format!("Login successful! Welcome, {}", s.email)
            })
        }
    }
}

/// Map CLI selector strings onto a query; "all" clears a selector.
fn build_query(text: String, department: &str, stage: &str) -> anyhow::Result<UseCaseQuery> {
    let mut query = UseCaseQuery::all().text(text);
    if !department.eq_ignore_ascii_case("all") {
        query = query.department(
            department
                .parse()
                .with_context(|| format!("invalid --department '{}'", department))?,
        );
    }
    if !stage.eq_ignore_ascii_case("all") {
        query = query.stage(
            stage
                .parse()
                .with_context(|| format!("invalid --stage '{}'", stage))?,
        );
    }
    Ok(query)
}

fn render<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}
