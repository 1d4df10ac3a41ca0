//! Wire models for the Fortify on Demand REST API.
//!
//! Request bodies are assembled by the import module; the platform's JSON
//! field names are preserved through serde renames, so these types are the
//! single place the wire contract lives.

use serde::{Deserialize, Serialize};

/// Fixed day order for the availability grid, Sunday first.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Response from the OAuth token exchange.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

/// One page of the paginated user listing.
#[derive(Debug, Deserialize)]
pub struct UserPage {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    pub items: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "userName")]
    pub user_name: String,
}

/// Creation response; only the application id is consumed.
#[derive(Debug, Deserialize)]
pub struct CreatedApplication {
    #[serde(rename = "applicationId")]
    pub application_id: i64,
}

/// Release listing for an application.
#[derive(Debug, Deserialize)]
pub struct ReleasePage {
    pub items: Vec<ReleaseRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseRecord {
    #[serde(rename = "releaseId")]
    pub release_id: i64,
}

/// Attribute listing, filterable by name on the server side.
#[derive(Debug, Deserialize)]
pub struct AttributePage {
    pub items: Vec<AttributeDefinition>,
}

/// A custom attribute definition with its selectable picklist options.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeDefinition {
    pub id: i64,
    pub name: String,
    #[serde(rename = "picklistValues", default)]
    pub picklist_values: Vec<PicklistValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PicklistValue {
    pub id: i64,
    pub name: String,
}

/// Body for `POST /api/v3/applications`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub application_name: String,
    pub application_type: String,
    pub release_name: String,
    pub owner_id: i64,
    pub business_criticality_type: String,
    pub sdlc_status_type: String,
    /// Omitted entirely when the run has no custom-attribute column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeAssignment>>,
}

/// Pairing of an attribute definition id with a resolved picklist option id.
///
/// An option id of 0 means no picklist label matched the requested value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeAssignment {
    pub id: i64,
    pub value: i64,
}

/// Single exclusion entry as the scan-setup endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionEntry {
    pub value: String,
}

/// Weekly site-availability grid: always 7 days of 24 hour blocks each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    pub days: Vec<DaySchedule>,
}

impl WeeklySchedule {
    /// Grid with every hour of every day set to `checked`.
    pub fn uniform(checked: bool) -> Self {
        let days = DAY_NAMES
            .iter()
            .map(|day| DaySchedule {
                day,
                hour_blocks: (0..24).map(|hour| HourBlock { hour, checked }).collect(),
            })
            .collect();
        Self { days }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day: &'static str,
    #[serde(rename = "hourBlocks")]
    pub hour_blocks: Vec<HourBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourBlock {
    pub hour: u8,
    pub checked: bool,
}

/// Body for `PUT /api/v3/releases/{id}/dynamic-scans/scan-setup`.
///
/// Credential fields are present only for authenticated scan modes, and the
/// exclusion list only when the spreadsheet supplied one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicScanSetupRequest {
    pub geo_location_id: i64,
    pub multi_factor_auth: bool,
    pub dynamic_scan_environment_facing_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions_list: Option<Vec<ExclusionEntry>>,
    pub dynamic_scan_authentication_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_user_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_user_password: Option<String>,
    #[serde(rename = "dynamicSiteURL")]
    pub dynamic_site_url: String,
    pub time_zone: String,
    pub blockout: WeeklySchedule,
    pub repeat_schedule_type: String,
    pub assessment_type_id: i64,
    pub restrict_to_directory_and_subdirectories: bool,
    pub entitlement_frequency_type: String,
}
