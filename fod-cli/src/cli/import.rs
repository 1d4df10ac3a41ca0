//! The import command: wires spreadsheet, authentication, user directory and
//! the row orchestrator together.

use anyhow::{Context, Result};
use log::{info, warn};

use crate::api::FodClient;
use crate::import::logfile::{DEFAULT_LOG_DIR, ImportLog};
use crate::import::pacing::PacingConfig;
use crate::import::spreadsheet::read_import_file;
use crate::import::{ImportOptions, run_import};

use super::Cli;

pub async fn handle_import_command(args: Cli) -> Result<()> {
    let mut log = ImportLog::open(DEFAULT_LOG_DIR)?;

    let sheet = read_import_file(&args.file)
        .with_context(|| format!("failed to read import file {}", args.file.display()))?;
    if sheet.rows.is_empty() {
        println!("No data rows found in {}", args.file.display());
        return Ok(());
    }
    info!(
        "loaded {} rows from {}",
        sheet.rows.len(),
        args.file.display()
    );
    if let Some(name) = &sheet.custom_attribute {
        info!("custom attribute column enabled: {name}");
    }

    let mut client = FodClient::new();
    client.authenticate(&args.key, &args.secret).await?;

    let users = client
        .fetch_all_users()
        .await
        .context("failed to load the user directory")?;
    if users.is_empty() {
        warn!("user directory is empty; every row will fail owner resolution");
    }

    let options = ImportOptions {
        populate_dynamic_form: args.dynamic,
        pacing: PacingConfig::default(),
    };

    let summary = run_import(&sheet, &client, &users, &mut log, &options).await?;

    println!(
        "Import finished: {} attempted, {} succeeded, {} failed (see {})",
        summary.attempted,
        summary.succeeded,
        summary.failed,
        log.path().display()
    );
    Ok(())
}
