use anyhow::Result;
use clap::Parser;

use fod_cli::cli::{Cli, handle_import_command};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();
    handle_import_command(args).await
}
