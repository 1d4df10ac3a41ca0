//! Request-body construction for application creation and scan setup.
//!
//! Everything here is a pure derivation from spreadsheet cells; the
//! orchestrator supplies resolved identifiers (owner, attribute) and submits
//! the results.

use anyhow::Result;

use crate::api::models::{AttributeAssignment, CreateApplicationRequest, DynamicScanSetupRequest};

use super::availability;
use super::exclusions;
use super::types::{ApplicationRow, DynamicScanFields};

/// Assessment type id for "dynamic" assessments.
const ASSESSMENT_TYPE_DYNAMIC: i64 = 268;
/// Assessment type id used for every other assessment label.
const ASSESSMENT_TYPE_DYNAMIC_PLUS: i64 = 269;
/// Scans run from the platform's default geo location.
const DEFAULT_GEO_LOCATION: i64 = 1;

/// Auth mode meaning the scan logs in to nothing.
const NO_AUTHENTICATION: &str = "NoAuthentication";

/// Build the application-creation body for one row.
pub fn build_create_request(
    row: &ApplicationRow,
    owner_id: i64,
    attribute: Option<AttributeAssignment>,
) -> CreateApplicationRequest {
    CreateApplicationRequest {
        application_name: row.application_name.clone(),
        application_type: row.normalized_application_type(),
        release_name: row.release_name.clone(),
        owner_id,
        business_criticality_type: row.business_criticality.clone(),
        sdlc_status_type: row.normalized_sdlc_status().to_string(),
        attributes: attribute.map(|assignment| vec![assignment]),
    }
}

/// Build the scan-setup body from the row's dynamic columns.
///
/// Fails when the availability cell cannot be parsed; that failure belongs to
/// the row, not to the scan-setup submission.
pub fn build_dynamic_scan_request(fields: &DynamicScanFields) -> Result<DynamicScanSetupRequest> {
    let blockout = availability::encode(&fields.site_availability)?;

    // An empty exclusions cell omits the field entirely rather than sending a
    // list with one empty entry.
    let exclusions_list = if fields.exclusions.is_empty() {
        None
    } else {
        Some(exclusions::encode(&fields.exclusions))
    };

    let authenticated = !fields.auth_mode.is_empty() && fields.auth_mode != NO_AUTHENTICATION;
    let auth_mode = if authenticated {
        fields.auth_mode.clone()
    } else {
        NO_AUTHENTICATION.to_string()
    };

    Ok(DynamicScanSetupRequest {
        geo_location_id: DEFAULT_GEO_LOCATION,
        multi_factor_auth: false,
        dynamic_scan_environment_facing_type: fields.environment_facing.clone(),
        exclusions_list,
        dynamic_scan_authentication_type: auth_mode,
        primary_user_name: authenticated.then(|| fields.primary_username.clone()),
        primary_user_password: authenticated.then(|| fields.primary_password.clone()),
        secondary_user_name: authenticated.then(|| fields.secondary_username.clone()),
        secondary_user_password: authenticated.then(|| fields.secondary_password.clone()),
        dynamic_site_url: fields.site_url.clone(),
        time_zone: fields.time_zone.clone(),
        blockout,
        repeat_schedule_type: repeat_schedule_type(&fields.repeat_frequency).to_string(),
        assessment_type_id: assessment_type_id(&fields.assessment_type),
        restrict_to_directory_and_subdirectories: restrict_to_directory(
            &fields.restrict_to_directory,
        ),
        entitlement_frequency_type: entitlement_type(&fields.subscription).to_string(),
    })
}

/// `Subscription` when the cell is `1` or any casing of `true`, otherwise a
/// single-use scan credit.
fn entitlement_type(subscription: &str) -> &'static str {
    if subscription == "1" || subscription.eq_ignore_ascii_case("true") {
        "Subscription"
    } else {
        "SingleScan"
    }
}

fn assessment_type_id(assessment_type: &str) -> i64 {
    if assessment_type.eq_ignore_ascii_case("dynamic") {
        ASSESSMENT_TYPE_DYNAMIC
    } else {
        ASSESSMENT_TYPE_DYNAMIC_PLUS
    }
}

/// Only monthly repetition is supported; anything that is not an explicit
/// "do not repeat" (or an empty cell) repeats monthly.
fn repeat_schedule_type(repeat_frequency: &str) -> &'static str {
    if repeat_frequency.is_empty() || repeat_frequency.eq_ignore_ascii_case("do not repeat") {
        "NoRepeat"
    } else {
        "Monthly"
    }
}

/// An empty cell defaults to restricting the scan to the given directory and
/// its subdirectories.
fn restrict_to_directory(value: &str) -> bool {
    value.is_empty() || value == "1" || value.eq_ignore_ascii_case("true")
}
