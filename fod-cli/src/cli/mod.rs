//! Command-line surface.

pub mod import;

use std::path::PathBuf;

use clap::Parser;

pub use import::handle_import_command;

/// Bulk-import applications into Fortify on Demand from a spreadsheet.
///
/// The workbook must follow the distributed import template. When the
/// template's dynamic-scan columns are filled in, pass `-d` to also populate
/// the dynamic scan form for each created application's first release.
#[derive(Parser, Debug)]
#[command(
    name = "fod-cli",
    version,
    about = "Bulk-import applications into Fortify on Demand"
)]
pub struct Cli {
    /// Path to the import workbook, e.g. ./applications.xlsx
    pub file: PathBuf,

    /// API key provided by your security lead
    pub key: String,

    /// Secret associated with the API key
    pub secret: String,

    /// Also fill out the dynamic scan form for each created release
    #[arg(short = 'd', long = "dynamic")]
    pub dynamic: bool,
}
