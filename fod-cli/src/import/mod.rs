//! Application onboarding orchestration.
//!
//! Rows are processed strictly sequentially: one creation request per row, an
//! optional scan-setup request for the created release, a fixed pause, then
//! the next row. A failing row is logged and never aborts the rest of the
//! batch; only authentication failure (before any row) stops a run.

pub mod attributes;
pub mod availability;
pub mod exclusions;
pub mod logfile;
pub mod pacing;
pub mod request;
pub mod spreadsheet;
pub mod types;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::api::models::CreatedApplication;
use crate::api::{ImportApi, UserDirectory};

use logfile::ImportLog;
use pacing::PacingConfig;
use spreadsheet::ImportSheet;
use types::ApplicationRow;

/// Run-level switches, threaded explicitly rather than read from ambient
/// state.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Fill out the dynamic-scan form for each created release (`-d`).
    pub populate_dynamic_form: bool,
    pub pacing: PacingConfig,
}

/// Counts for the end-of-run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Process every row of the sheet against the platform.
///
/// Re-running the same sheet creates duplicate applications; nothing here
/// checks whether an application already exists.
pub async fn run_import<A>(
    sheet: &ImportSheet,
    api: &A,
    users: &UserDirectory,
    log: &mut ImportLog,
    options: &ImportOptions,
) -> Result<ImportSummary>
where
    A: ImportApi + Sync,
{
    let total = sheet.rows.len();
    let mut summary = ImportSummary::default();

    for (index, row) in sheet.rows.iter().enumerate() {
        summary.attempted += 1;
        let outcome = process_row(
            row,
            sheet.custom_attribute.as_deref(),
            api,
            users,
            log,
            options,
        )
        .await;

        match outcome {
            Ok(()) => summary.succeeded += 1,
            Err(error) => {
                summary.failed += 1;
                warn!("row {} failed: {error:#}", row.row_number);
                log.error(&format!(
                    "Row {} ({}) failed: {error:#}",
                    row.row_number, row.application_name
                ))?;
            }
        }

        println!("Added {}% of applications", progress_percent(index, total));

        if index + 1 < total {
            options.pacing.pause().await;
        }
    }

    Ok(summary)
}

async fn process_row<A>(
    row: &ApplicationRow,
    custom_attribute: Option<&str>,
    api: &A,
    users: &UserDirectory,
    log: &mut ImportLog,
    options: &ImportOptions,
) -> Result<()>
where
    A: ImportApi + Sync,
{
    let owner_id = users
        .resolve(&row.owner_name)
        .with_context(|| format!("unknown application owner {:?}", row.owner_name))?;

    // Resolved per row: the column is a run-level decision but the value
    // differs row to row (and may resolve to the sentinel option).
    let attribute = match custom_attribute {
        Some(name) => Some(attributes::resolve(api, name, &row.custom_attribute_value).await?),
        None => None,
    };

    let create = request::build_create_request(row, owner_id, attribute);
    debug!(
        "creating application {:?}: {}",
        row.application_name,
        serde_json::to_string(&create)?
    );

    let response = api.create_application(&create).await?;
    println!("{response}");
    log.info(&format!(
        "Application: {} API Response: {}",
        row.application_name, response
    ))?;

    // The body is logged verbatim above; only now do we insist it carries an
    // application id.
    let created: CreatedApplication = serde_json::from_str(&response)
        .with_context(|| format!("creation response carried no application id: {response}"))?;

    let release_id = api.first_release_id(created.application_id).await?;

    if options.populate_dynamic_form {
        let setup = request::build_dynamic_scan_request(&row.dynamic)?;
        // The application is already created and stays created; a scan-setup
        // failure gets its own log entry and the row moves on.
        match api.configure_dynamic_scan(release_id, &setup).await {
            Ok(response) => log.info(&format!(
                "API Response while populating dynamic form: {response}"
            ))?,
            Err(error) => log.error(&format!(
                "Failed to populate dynamic form for release {release_id}: {error:#}"
            ))?,
        }
    }

    Ok(())
}

/// Percentage of rows completed after finishing row `index` (0-based) of
/// `total`; reaches exactly 100 on the last row.
fn progress_percent(index: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (((index + 1) * 100) as f64 / total as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{
        AttributeDefinition, CreateApplicationRequest, DynamicScanSetupRequest, PicklistValue,
    };
    use anyhow::bail;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// In-memory platform standing in for Fortify on Demand.
    #[derive(Default)]
    struct MockApi {
        created: Mutex<Vec<CreateApplicationRequest>>,
        scans: Mutex<Vec<(i64, DynamicScanSetupRequest)>>,
        attribute_queries: Mutex<Vec<String>>,
        definitions: Vec<AttributeDefinition>,
        next_id: AtomicI64,
        fail_scan_setup: bool,
    }

    #[async_trait]
    impl ImportApi for MockApi {
        async fn create_application(&self, request: &CreateApplicationRequest) -> Result<String> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            self.created.lock().unwrap().push(request.clone());
            Ok(format!("{{\"applicationId\": {id}}}"))
        }

        async fn first_release_id(&self, application_id: i64) -> Result<i64> {
            Ok(application_id + 1000)
        }

        async fn configure_dynamic_scan(
            &self,
            release_id: i64,
            request: &DynamicScanSetupRequest,
        ) -> Result<String> {
            if self.fail_scan_setup {
                bail!("scan setup rejected");
            }
            self.scans.lock().unwrap().push((release_id, request.clone()));
            Ok("{}".to_string())
        }

        async fn attributes_by_name(&self, name: &str) -> Result<Vec<AttributeDefinition>> {
            self.attribute_queries.lock().unwrap().push(name.to_string());
            Ok(self.definitions.clone())
        }
    }

    fn make_row(name: &str, owner: &str) -> ApplicationRow {
        ApplicationRow {
            application_name: name.to_string(),
            business_criticality: "High".to_string(),
            application_type: "Web".to_string(),
            release_name: "1.0".to_string(),
            sdlc_status: "Production".to_string(),
            owner_name: owner.to_string(),
            dynamic: types::DynamicScanFields {
                site_url: "https://app.example.com".to_string(),
                assessment_type: "Dynamic".to_string(),
                time_zone: "UTC".to_string(),
                environment_facing: "External".to_string(),
                site_availability: "ALL DAY".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn make_sheet(rows: Vec<ApplicationRow>) -> ImportSheet {
        ImportSheet {
            custom_attribute: None,
            rows,
        }
    }

    fn known_users() -> UserDirectory {
        let mut users = UserDirectory::new();
        users.insert("jdoe", 17);
        users.insert("asmith", 23);
        users
    }

    fn test_options(populate_dynamic_form: bool) -> ImportOptions {
        ImportOptions {
            populate_dynamic_form,
            pacing: PacingConfig::disabled(),
        }
    }

    fn temp_log(dir: &tempfile::TempDir) -> ImportLog {
        ImportLog::open(dir.path()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_owner_fails_only_that_row() {
        let api = MockApi::default();
        let sheet = make_sheet(vec![
            make_row("Billing", "jdoe"),
            make_row("Portal", "nobody"),
            make_row("Reports", "asmith"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut log = temp_log(&dir);

        let summary = run_import(&sheet, &api, &known_users(), &mut log, &test_options(false))
            .await
            .unwrap();

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);

        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].application_name, "Billing");
        assert_eq!(created[1].application_name, "Reports");

        let logged = fs::read_to_string(log.path()).unwrap();
        assert!(logged.contains("ERROR"));
        assert!(logged.contains("unknown application owner \"nobody\""));
    }

    #[tokio::test]
    async fn test_dynamic_form_submitted_only_when_requested() {
        let sheet = make_sheet(vec![make_row("Billing", "jdoe")]);
        let dir = tempfile::tempdir().unwrap();

        let api = MockApi::default();
        let mut log = temp_log(&dir);
        run_import(&sheet, &api, &known_users(), &mut log, &test_options(false))
            .await
            .unwrap();
        assert!(api.scans.lock().unwrap().is_empty());

        let api = MockApi::default();
        let mut log = temp_log(&dir);
        run_import(&sheet, &api, &known_users(), &mut log, &test_options(true))
            .await
            .unwrap();

        let scans = api.scans.lock().unwrap();
        assert_eq!(scans.len(), 1);
        // Release id comes from the release listing for the created app.
        assert_eq!(scans[0].0, 1001);
    }

    #[tokio::test]
    async fn test_scan_setup_failure_is_partial_success() {
        let api = MockApi {
            fail_scan_setup: true,
            ..Default::default()
        };
        let sheet = make_sheet(vec![make_row("Billing", "jdoe")]);
        let dir = tempfile::tempdir().unwrap();
        let mut log = temp_log(&dir);

        let summary = run_import(&sheet, &api, &known_users(), &mut log, &test_options(true))
            .await
            .unwrap();

        // The row still counts as succeeded: the application exists.
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(api.created.lock().unwrap().len(), 1);

        let logged = fs::read_to_string(log.path()).unwrap();
        assert!(logged.contains("INFO Application: Billing"));
        assert!(logged.contains("ERROR Failed to populate dynamic form"));
    }

    #[tokio::test]
    async fn test_malformed_availability_fails_the_row_after_creation() {
        let api = MockApi::default();
        let mut row = make_row("Billing", "jdoe");
        row.dynamic.site_availability = "Friday: 0800-late;".to_string();
        let sheet = make_sheet(vec![row]);
        let dir = tempfile::tempdir().unwrap();
        let mut log = temp_log(&dir);

        let summary = run_import(&sheet, &api, &known_users(), &mut log, &test_options(true))
            .await
            .unwrap();

        assert_eq!(summary.failed, 1);
        // Creation had already happened when the parse failed; no rollback.
        assert_eq!(api.created.lock().unwrap().len(), 1);
        assert!(api.scans.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_attribute_resolved_and_attached() {
        let api = MockApi {
            definitions: vec![AttributeDefinition {
                id: 40,
                name: "Cost Center".to_string(),
                picklist_values: vec![PicklistValue {
                    id: 7,
                    name: "CC-100".to_string(),
                }],
            }],
            ..Default::default()
        };

        let mut row = make_row("Billing", "jdoe");
        row.custom_attribute_value = "CC-100".to_string();
        let sheet = ImportSheet {
            custom_attribute: Some("Cost Center".to_string()),
            rows: vec![row],
        };
        let dir = tempfile::tempdir().unwrap();
        let mut log = temp_log(&dir);

        run_import(&sheet, &api, &known_users(), &mut log, &test_options(false))
            .await
            .unwrap();

        assert_eq!(*api.attribute_queries.lock().unwrap(), ["Cost Center"]);
        let created = api.created.lock().unwrap();
        let attributes = created[0].attributes.as_ref().unwrap();
        assert_eq!(attributes[0].id, 40);
        assert_eq!(attributes[0].value, 7);
    }

    #[tokio::test]
    async fn test_no_custom_attribute_omits_the_field() {
        let api = MockApi::default();
        let sheet = make_sheet(vec![make_row("Billing", "jdoe")]);
        let dir = tempfile::tempdir().unwrap();
        let mut log = temp_log(&dir);

        run_import(&sheet, &api, &known_users(), &mut log, &test_options(false))
            .await
            .unwrap();

        assert!(api.attribute_queries.lock().unwrap().is_empty());
        assert!(api.created.lock().unwrap()[0].attributes.is_none());
    }

    #[tokio::test]
    async fn test_rerunning_the_same_sheet_creates_duplicates() {
        // Imports are not idempotent: the platform is asked to create the
        // same applications again and nothing here prevents it.
        let api = MockApi::default();
        let sheet = make_sheet(vec![make_row("Billing", "jdoe")]);
        let dir = tempfile::tempdir().unwrap();
        let mut log = temp_log(&dir);

        for _ in 0..2 {
            run_import(&sheet, &api, &known_users(), &mut log, &test_options(false))
                .await
                .unwrap();
        }

        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].application_name, created[1].application_name);
    }

    #[test]
    fn test_progress_reaches_exactly_one_hundred() {
        let series: Vec<u32> = (0..5).map(|index| progress_percent(index, 5)).collect();
        assert_eq!(series, vec![20, 40, 60, 80, 100]);

        for index in 0..7 {
            assert!(progress_percent(index, 7) <= 100);
        }
        assert_eq!(progress_percent(6, 7), 100);
        assert_eq!(progress_percent(0, 1), 100);
    }
}
