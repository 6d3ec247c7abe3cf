use anyhow::Result;
use owo_colors::OwoColorize;

use returnly_core::config::ReturnlyConfig;
use returnly_core::ports::RecordStore;

use crate::backend::BackendClient;
use crate::render::Render;
use crate::session::FileSession;

pub async fn run() -> Result<()> {
    let config = ReturnlyConfig::load()?;

    let session = FileSession::new(FileSession::default_path()?);
    let Some(data) = session.load()? else {
        println!("{}", "User not logged in. Please log in again.".red());
        return Ok(());
    };

    let (url, key) = config.backend()?;
    let backend = BackendClient::new(url, key, &data.access_token);
    let records = backend.records_for_user(&data.user_id).await?;

    if records.is_empty() {
        println!("No reminder records yet.");
        return Ok(());
    }

    for record in &records {
        println!("{}", record.render());
    }

    Ok(())
}
