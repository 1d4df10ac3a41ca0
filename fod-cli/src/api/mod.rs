//! Fortify on Demand API module.
//!
//! [`FodClient`] is the reqwest-backed transport; [`ImportApi`] is the seam
//! the import orchestrator drives, so tests can substitute an in-memory
//! platform without touching the network.

pub mod client;
pub mod directory;
pub mod models;

use anyhow::Result;
use async_trait::async_trait;

pub use client::{DEFAULT_BASE_URL, FodClient};
pub use directory::UserDirectory;
pub use models::{
    AttributeAssignment, AttributeDefinition, CreateApplicationRequest, CreatedApplication,
    DynamicScanSetupRequest, ExclusionEntry, WeeklySchedule,
};

/// Platform operations the import orchestrator needs.
///
/// Application creation returns the raw response body rather than a parsed
/// model: the audit log records whatever the platform said verbatim, and the
/// application id is extracted afterwards.
#[async_trait]
pub trait ImportApi {
    /// POST a new application; returns the raw response body.
    async fn create_application(&self, request: &CreateApplicationRequest) -> Result<String>;

    /// Id of the first release listed for an application.
    async fn first_release_id(&self, application_id: i64) -> Result<i64>;

    /// PUT the dynamic-scan setup for a release; returns the raw response body.
    async fn configure_dynamic_scan(
        &self,
        release_id: i64,
        request: &DynamicScanSetupRequest,
    ) -> Result<String>;

    /// Attribute definitions matching the given name filter.
    async fn attributes_by_name(&self, name: &str) -> Result<Vec<AttributeDefinition>>;
}
