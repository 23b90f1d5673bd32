//! Text rendering for CLI output.

use chrono::{DateTime, Utc};

use usecase_inventory::{
    AuditEntry, DashboardSummary, Department, UseCase, ValidationFailure,
};

/// Format a timestamp as e.g. "Mar 2, 2024 09:15 AM"
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %I:%M %p").to_string()
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Format the dashboard for display
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let mut output = String::new();
    output.push_str("AI Use Case Dashboard\n");
    output.push_str("=====================\n\n");

    output.push_str(&format!("Total Use Cases:  {}\n", summary.totals.total_use_cases));
    output.push_str(&format!("In Production:    {}\n", summary.in_production));
    output.push_str(&format!("In Development:   {}\n", summary.in_development));
    output.push_str(&format!(
        "Departments:      {}\n",
        summary.totals.departments_represented
    ));

    output.push_str("\nBy Stage:\n");
    for stage in &summary.stages {
        output.push_str(&format!("  {:<12} {}\n", stage.stage.as_str(), stage.count));
    }

    if !summary.departments.is_empty() {
        output.push_str("\nBy Department:\n");
        for dept in &summary.departments {
            output.push_str(&format!("  {:<28} {}\n", dept.label, dept.count));
        }
    }

    output.push_str("\nRecently Updated:\n");
    if summary.recently_updated.is_empty() {
        output.push_str("  (none)\n");
    }
    for record in &summary.recently_updated {
        output.push_str(&format!(
            "  [{}] {} - {} ({})\n",
            record.id,
            record.title,
            record.stage,
            format_date(record.updated_at)
        ));
    }

    output
}

/// Format a filtered list for display
pub fn format_list(records: &[UseCase], total: usize) -> String {
    if records.is_empty() {
        return "No use cases found matching your search criteria.".to_string();
    }

    let mut output = String::new();
    output.push_str("AI Use Cases\n");
    output.push_str("============\n\n");

    for record in records {
        output.push_str(&format!("[{}] {}\n", record.id, record.title));
        output.push_str(&format!(
            "     {} | {} | {}\n",
            record.stage,
            record.department.short_label(),
            record.owner
        ));
    }

    output.push_str(&format!(
        "\nShowing {} of {} use cases\n",
        records.len(),
        total
    ));
    output
}

/// Format a single use case for display
pub fn format_detail(record: &UseCase, now: DateTime<Utc>) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", record.title));
    output.push_str(&format!("{}\n\n", "=".repeat(record.title.chars().count())));

    output.push_str(&format!("ID:          {}\n", record.id));
    output.push_str(&format!("Department:  {}\n", record.department));
    output.push_str(&format!("Stage:       {}\n", record.stage));
    output.push_str(&format!("Owner:       {}\n", record.owner));
    output.push_str(&format!("Created:     {}\n", format_date(record.created_at)));
    output.push_str(&format!("Updated:     {}\n", format_date(record.updated_at)));
    output.push_str(&format!("Days Active: {}\n", record.days_active(now)));

    output.push_str(&format!("\nDescription:\n  {}\n", record.description));

    output.push_str("\nKPIs:\n");
    for kpi in &record.kpis {
        let mark = if record.is_kpi_achieved(kpi) { "x" } else { " " };
        output.push_str(&format!("  [{}] {}\n", mark, kpi));
    }

    output.push_str(&format!(
        "\nEthical Considerations:\n  {}\n",
        record.ethical_considerations
    ));

    if let Some(challenges) = &record.challenges {
        output.push_str(&format!("\nChallenges:\n  {}\n", challenges));
    }

    output
}

pub fn format_not_found(id: &str) -> String {
    format!(
        "Use case not found\n\nNo use case with ID '{}' exists in the inventory.",
        id
    )
}

/// Format the audit trail for display
pub fn format_audit(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries".to_string();
    }

    let mut output = String::new();
    output.push_str("Audit Log\n");
    output.push_str("=========\n\n");

    for entry in entries {
        output.push_str(&format!(
            "{}  {:<8} {}\n",
            format_timestamp(entry.timestamp),
            entry.action.as_str(),
            entry.title
        ));
        output.push_str(&format!(
            "     {} | {}\n",
            entry.owner,
            entry.department.short_label()
        ));
    }

    output
}

/// Format mutation history for display
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history".to_string();
    }

    let mut output = String::new();
    output.push_str("History\n");
    output.push_str("-------\n");
    for entry in entries {
        output.push_str(&format!(
            "  {} {} by {}\n",
            format_timestamp(entry.timestamp),
            entry.action.as_str(),
            entry.owner
        ));
    }
    output
}

/// Format the canonical department list
pub fn format_departments(departments: &[Department]) -> String {
    let mut output = String::new();
    output.push_str("Departments\n");
    output.push_str("===========\n\n");
    for dept in departments {
        output.push_str(&format!("  - {}\n", dept));
    }
    output
}

/// Format validation errors one field per line
pub fn format_validation(failure: &ValidationFailure) -> String {
    let mut output = String::from("Please fix the following fields:\n");
    for error in &failure.fields {
        output.push_str(&format!("  {}: {}\n", error.field, error.message));
    }
    output
}
