use compare_core::{AppViewModel, Phase, PlatformRowView, TaskStatus};

use super::format::{format_inr, format_price};

/// Renders the view model as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    match view.phase {
        Phase::Idle => {}
        Phase::Searching => {
            lines.push(format!(
                "Searching for \"{}\"...",
                view.query.as_deref().unwrap_or_default()
            ));
            lines.extend(view.platforms.iter().map(render_row));
        }
        Phase::Succeeded => {
            let name = view
                .echoed_name
                .as_deref()
                .or(view.query.as_deref())
                .unwrap_or_default();
            lines.push(format!("Search results for: \"{name}\""));
            lines.extend(view.platforms.iter().map(render_row));
            lines.extend(render_summary(view));
        }
        Phase::Failed => {}
    }

    if let Some(error) = view.last_error.as_deref() {
        lines.push(format!("✗ {error}"));
    }
    lines
}

fn render_row(row: &PlatformRowView) -> String {
    let mut line = format!(
        "  {} {:<9} {:>14}",
        status_icon(row.status),
        row.platform.display_name(),
        format_price(row.price),
    );
    if row.is_lowest {
        line.push_str("  [Best Price]");
    }
    match row.status {
        Some(TaskStatus::Running) => line.push_str("  Searching..."),
        Some(TaskStatus::Failed) => line.push_str("  Failed"),
        Some(TaskStatus::Timeout) => line.push_str("  Timeout"),
        _ => {}
    }
    if let Some(error) = row.error.as_deref() {
        line.push_str(&format!(" ({error})"));
    }
    line
}

fn render_summary(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(deal) = view.best_deal {
        lines.push(format!(
            "Best Deal Found! ₹{} on {}",
            format_inr(deal.price),
            deal.platform.display_name()
        ));
        if let Some(savings) = view.comparison.and_then(|comparison| comparison.savings()) {
            lines.push(format!("Saves ₹{} over the highest price", format_inr(savings)));
        }
    } else if view.comparison_unavailable() {
        lines.push("⚠ Could not determine prices for comparison".to_string());
    }
    lines
}

fn status_icon(status: Option<TaskStatus>) -> &'static str {
    match status {
        Some(TaskStatus::Completed) => "✓",
        Some(TaskStatus::Failed | TaskStatus::Timeout) => "✗",
        Some(TaskStatus::Pending | TaskStatus::Running) | None => "⟳",
    }
}
