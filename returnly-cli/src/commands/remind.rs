use anyhow::Result;
use dialoguer::Select;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use returnly_core::batch::ReminderBatch;
use returnly_core::config::ReturnlyConfig;
use returnly_core::destination::{CalendarDestination, DestinationChooser};
use returnly_core::error::{ReturnlyError, ReturnlyResult};
use returnly_core::provider::Provider;
use returnly_core::transaction::FileTransactionSource;

use crate::backend::BackendClient;
use crate::render;
use crate::session::FileSession;

pub async fn run(calendar: Option<String>) -> Result<()> {
    let config = ReturnlyConfig::load()?;

    let sessions = FileSession::new(FileSession::default_path()?);
    let Some(data) = sessions.load()? else {
        println!("{}", "User not logged in. Please log in again.".red());
        return Ok(());
    };

    let (url, key) = config.backend()?;
    let backend = BackendClient::new(url, key, &data.access_token);
    let provider = Provider::from_name(&config.provider);
    let source = FileTransactionSource::new(config.transactions_path());

    let batch = ReminderBatch {
        sessions: &sessions,
        calendar: &provider,
        records: &backend,
        source: &source,
    };

    let spinner = render::create_spinner("Creating reminders".to_string());
    let chooser = CliChooser {
        preselected: calendar,
        spinner: &spinner,
    };

    let result = batch.run(&chooser).await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(ReturnlyError::NoWritableCalendar) => {
            println!(
                "{}",
                "No calendars available that allow modifications.".red()
            );
            return Ok(());
        }
        Err(ReturnlyError::NotAuthenticated) => {
            println!("{}", "User not logged in. Please log in again.".red());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", render::render_report(&report));

    Ok(())
}

/// Picks the destination calendar: either the one named on the command line,
/// or a single interactive prompt (once per batch).
struct CliChooser<'a> {
    preselected: Option<String>,
    spinner: &'a ProgressBar,
}

impl DestinationChooser for CliChooser<'_> {
    fn choose(&self, candidates: &[CalendarDestination]) -> ReturnlyResult<Option<usize>> {
        if let Some(id) = &self.preselected {
            let index = candidates.iter().position(|c| &c.id == id).ok_or_else(|| {
                let available: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
                ReturnlyError::InvalidInput(format!(
                    "Calendar '{}' not found. Writable calendars: {}",
                    id,
                    available.join(", ")
                ))
            })?;
            return Ok(Some(index));
        }

        let items: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();

        // Pause the spinner while the prompt owns the terminal.
        let selection = self
            .spinner
            .suspend(|| {
                Select::new()
                    .with_prompt("Select a calendar for the reminders")
                    .items(&items)
                    .default(0)
                    .interact_opt()
            })
            .map_err(|e| ReturnlyError::Io(std::io::Error::other(e)))?;

        Ok(selection)
    }
}
