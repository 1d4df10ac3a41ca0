//! Spreadsheet row types and field normalization.

/// One data row of the import spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct ApplicationRow {
    /// 1-based spreadsheet row, for error reporting.
    pub row_number: usize,
    pub application_name: String,
    pub business_criticality: String,
    pub application_type: String,
    pub release_name: String,
    pub sdlc_status: String,
    pub owner_name: String,
    /// Value of the custom-attribute column. May be empty on individual rows
    /// even when the column is enabled for the run.
    pub custom_attribute_value: String,
    pub dynamic: DynamicScanFields,
}

impl ApplicationRow {
    /// Application type with spaces and slashes normalized to underscores,
    /// the form the creation endpoint accepts ("Web / Thick-Client" becomes
    /// "Web___Thick-Client").
    pub fn normalized_application_type(&self) -> String {
        self.application_type.replace([' ', '/'], "_")
    }

    /// SDLC status with a trailing `/Test` suffix stripped, so the template's
    /// combined "Development/Test" label maps onto a single platform status.
    pub fn normalized_sdlc_status(&self) -> &str {
        self.sdlc_status
            .strip_suffix("/Test")
            .unwrap_or(&self.sdlc_status)
    }
}

/// The dynamic-scan columns of the template, in their positional order. The
/// custom-attribute column sits inside this block in the spreadsheet but is
/// carried on [`ApplicationRow`] instead.
#[derive(Debug, Clone, Default)]
pub struct DynamicScanFields {
    pub site_url: String,
    pub assessment_type: String,
    pub time_zone: String,
    pub environment_facing: String,
    pub exclusions: String,
    pub repeat_frequency: String,
    pub site_availability: String,
    pub auth_mode: String,
    pub primary_username: String,
    pub primary_password: String,
    pub secondary_username: String,
    pub secondary_password: String,
    pub subscription: String,
    pub restrict_to_directory: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_type(application_type: &str) -> ApplicationRow {
        ApplicationRow {
            application_type: application_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_application_type_normalizes_spaces_and_slashes() {
        assert_eq!(
            row_with_type("Web / Thick-Client").normalized_application_type(),
            "Web___Thick-Client"
        );
        assert_eq!(
            row_with_type("Mobile").normalized_application_type(),
            "Mobile"
        );
    }

    #[test]
    fn test_sdlc_status_strips_trailing_test_suffix() {
        let row = ApplicationRow {
            sdlc_status: "Development/Test".to_string(),
            ..Default::default()
        };
        assert_eq!(row.normalized_sdlc_status(), "Development");

        let row = ApplicationRow {
            sdlc_status: "Production".to_string(),
            ..Default::default()
        };
        assert_eq!(row.normalized_sdlc_status(), "Production");
    }
}
