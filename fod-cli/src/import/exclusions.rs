//! Exclusion-list encoding for the scan-setup payload.

use crate::api::models::ExclusionEntry;

/// Split a semicolon-delimited cell into wire-format exclusion entries.
///
/// Every substring becomes one entry, untrimmed and in input order;
/// duplicates and empty segments are kept. Callers must branch on an empty
/// cell *before* calling: the literal result for `""` is a single empty
/// entry, not an empty list, and the request omits the field instead.
pub fn encode(raw: &str) -> Vec<ExclusionEntry> {
    raw.split(';')
        .map(|value| ExclusionEntry {
            value: value.to_string(),
        })
        .collect()
}
