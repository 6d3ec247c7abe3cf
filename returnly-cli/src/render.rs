//! Terminal rendering for returnly types.
//!
//! Extension traits that add colored output to returnly-core types using
//! owo_colors, plus the end-of-batch summary.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use returnly_core::batch::{BatchReport, ReminderOutcome};
use returnly_core::record::ReminderRecord;
use returnly_core::transaction::Transaction;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Transaction {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {}  bought {}, return by {}",
            "·".dimmed(),
            self.store.bold(),
            self.transaction_date,
            self.estimated_return_date
        );
        if let Some(item_type) = &self.item_type {
            line.push_str(&format!(" {}", format!("[{}]", item_type).dimmed()));
        }
        line
    }
}

impl Render for ReminderOutcome {
    fn render(&self) -> String {
        format!(
            "• {}: Reminder set for {}",
            self.store.green(),
            self.reminder_date
        )
    }
}

impl Render for ReminderRecord {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {}  last return date {}",
            "·".dimmed(),
            self.store.bold(),
            self.last_return_date
        );
        if let Some(item_type) = &self.item_type {
            line.push_str(&format!(" {}", format!("[{}]", item_type).dimmed()));
        }
        line
    }
}

/// The single end-of-batch summary message.
pub fn render_report(report: &BatchReport) -> String {
    if report.cancelled {
        return "No calendar selected. Nothing performed."
            .yellow()
            .to_string();
    }

    if report.outcomes.is_empty() {
        if report.failed > 0 {
            return format!("No reminders created ({} transaction(s) failed).", report.failed)
                .red()
                .to_string();
        }
        return "All reminders have already been created. Nothing new to do."
            .yellow()
            .to_string();
    }

    let mut lines = vec!["Reminders created:".green().bold().to_string()];
    for outcome in &report.outcomes {
        lines.push(format!("  {}", outcome.render()));
    }
    if report.failed > 0 {
        lines.push(
            format!("  {} transaction(s) skipped due to errors", report.failed)
                .yellow()
                .to_string(),
        );
    }

    lines.join("\n")
}

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
