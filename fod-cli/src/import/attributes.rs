//! Custom-attribute resolution.
//!
//! The spreadsheet names an attribute and a desired picklist label; the
//! platform wants their internal identifiers. Resolution queries the
//! attribute listing (filtered by name) and picks identifiers out of it.

use anyhow::{Context, Result};

use crate::api::ImportApi;
use crate::api::models::{AttributeAssignment, AttributeDefinition};

/// Option id used when no picklist label matches the requested value.
const UNRESOLVED_OPTION: i64 = 0;

/// Resolve an attribute assignment by querying the platform's definitions.
pub async fn resolve<A>(
    api: &A,
    attribute_name: &str,
    desired_value: &str,
) -> Result<AttributeAssignment>
where
    A: ImportApi + ?Sized + Sync,
{
    let definitions = api.attributes_by_name(attribute_name).await?;
    resolve_from_definitions(&definitions, attribute_name, desired_value)
}

/// Pick identifiers out of an already-fetched definition list.
///
/// The name filter is a server-side prefix match, so the exact-name check is
/// repeated here; when several definitions carry the same name the last one
/// wins. A desired value with no matching picklist label resolves to the
/// sentinel option id 0.
pub fn resolve_from_definitions(
    definitions: &[AttributeDefinition],
    attribute_name: &str,
    desired_value: &str,
) -> Result<AttributeAssignment> {
    let definition = definitions
        .iter()
        .filter(|definition| definition.name == attribute_name)
        .last()
        .with_context(|| format!("no attribute definition named {attribute_name:?}"))?;

    let option_id = definition
        .picklist_values
        .iter()
        .find(|option| option.name == desired_value)
        .map(|option| option.id)
        .unwrap_or(UNRESOLVED_OPTION);

    Ok(AttributeAssignment {
        id: definition.id,
        value: option_id,
    })
}
