//! Read the import workbook into application rows.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::types::{ApplicationRow, DynamicScanFields};

/// Column indices in the import template (must match the distributed sheet).
mod cols {
    pub const APPLICATION_NAME: usize = 0;
    pub const BUSINESS_CRITICALITY: usize = 1;
    pub const APPLICATION_TYPE: usize = 2;
    pub const RELEASE_NAME: usize = 3;
    pub const SDLC_STATUS: usize = 4;
    pub const OWNER_NAME: usize = 5;
    pub const SITE_URL: usize = 6;
    pub const ASSESSMENT_TYPE: usize = 7;
    pub const TIME_ZONE: usize = 8;
    pub const ENVIRONMENT_FACING: usize = 9;
    pub const EXCLUSIONS: usize = 10;
    pub const REPEAT_FREQUENCY: usize = 11;
    pub const SITE_AVAILABILITY: usize = 12;
    pub const AUTH_MODE: usize = 13;
    pub const PRIMARY_USERNAME: usize = 14;
    pub const PRIMARY_PASSWORD: usize = 15;
    pub const SECONDARY_USERNAME: usize = 16;
    pub const SECONDARY_PASSWORD: usize = 17;
    pub const SUBSCRIPTION: usize = 18;
    pub const CUSTOM_ATTRIBUTE: usize = 19;
    pub const RESTRICT_TO_DIRECTORY: usize = 20;
}

/// Parsed workbook: the data rows plus the run-level custom-attribute column.
#[derive(Debug, Default)]
pub struct ImportSheet {
    /// Name of the custom attribute (the header cell of the attribute
    /// column), when the column is populated for this run.
    pub custom_attribute: Option<String>,
    pub rows: Vec<ApplicationRow>,
}

/// Read the first worksheet of the import workbook.
///
/// The first row is the template header and is skipped. The custom-attribute
/// column counts as populated when both its header cell and the first data
/// row's cell are non-empty; that check happens once for the whole run, not
/// per row.
pub fn read_import_file(path: impl AsRef<Path>) -> Result<ImportSheet> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("workbook has no sheets")?
        .clone();
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet {sheet_name}"))?;

    let mut sheet_rows = range.rows();
    let header = sheet_rows.next().context("workbook is empty")?;
    let attribute_name = get_cell_string(header, cols::CUSTOM_ATTRIBUTE);

    let mut sheet = ImportSheet::default();
    for (index, row) in sheet_rows.enumerate() {
        // Skip rows that are entirely empty (trailing formatting rows etc).
        if row.iter().all(|cell| cell.to_string().trim().is_empty()) {
            continue;
        }
        // Header is spreadsheet row 1, the first data row is row 2.
        sheet.rows.push(parse_row(row, index + 2));
    }

    if !attribute_name.is_empty()
        && sheet
            .rows
            .first()
            .is_some_and(|row| !row.custom_attribute_value.is_empty())
    {
        sheet.custom_attribute = Some(attribute_name);
    }

    Ok(sheet)
}

fn parse_row(row: &[Data], row_number: usize) -> ApplicationRow {
    ApplicationRow {
        row_number,
        application_name: get_cell_string(row, cols::APPLICATION_NAME),
        business_criticality: get_cell_string(row, cols::BUSINESS_CRITICALITY),
        application_type: get_cell_string(row, cols::APPLICATION_TYPE),
        release_name: get_cell_string(row, cols::RELEASE_NAME),
        sdlc_status: get_cell_string(row, cols::SDLC_STATUS),
        owner_name: get_cell_string(row, cols::OWNER_NAME),
        custom_attribute_value: get_cell_string(row, cols::CUSTOM_ATTRIBUTE),
        dynamic: DynamicScanFields {
            site_url: get_cell_string(row, cols::SITE_URL),
            assessment_type: get_cell_string(row, cols::ASSESSMENT_TYPE),
            time_zone: get_cell_string(row, cols::TIME_ZONE),
            environment_facing: get_cell_string(row, cols::ENVIRONMENT_FACING),
            exclusions: get_cell_string(row, cols::EXCLUSIONS),
            repeat_frequency: get_cell_string(row, cols::REPEAT_FREQUENCY),
            site_availability: get_cell_string(row, cols::SITE_AVAILABILITY),
            auth_mode: get_cell_string(row, cols::AUTH_MODE),
            primary_username: get_cell_string(row, cols::PRIMARY_USERNAME),
            primary_password: get_cell_string(row, cols::PRIMARY_PASSWORD),
            secondary_username: get_cell_string(row, cols::SECONDARY_USERNAME),
            secondary_password: get_cell_string(row, cols::SECONDARY_PASSWORD),
            subscription: get_cell_string(row, cols::SUBSCRIPTION),
            restrict_to_directory: get_cell_string(row, cols::RESTRICT_TO_DIRECTORY),
        },
    }
}

/// Coerce a cell to text; whole-number cells lose their trailing `.0` so a
/// numeric `1` reads back as `"1"`.
fn get_cell_string(row: &[Data], col: usize) -> String {
    row.get(col)
        .map(|cell| match cell {
            Data::String(text) => text.clone(),
            Data::Int(value) => value.to_string(),
            Data::Float(value) => {
                if value.fract() == 0.0 {
                    (*value as i64).to_string()
                } else {
                    value.to_string()
                }
            }
            Data::Bool(value) => value.to_string(),
            _ => String::new(),
        })
        .unwrap_or_default()
}
