//! Bulk application importer for Fortify on Demand.
//!
//! Reads an Excel template describing applications to onboard, authenticates
//! once against the platform, and issues one creation request per row,
//! optionally followed by a dynamic-scan configuration request for each
//! created application's first release.

pub mod api;
pub mod cli;
pub mod import;
