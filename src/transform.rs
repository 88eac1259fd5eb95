//! User overrides and filters applied to a context.

use crate::error::{YucaError, YucaResult};
use crate::navigator::{kind_of, locate};
use crate::path::{resolve, Route};
use log::debug;
use serde_json::{Map, Value};

/// Replaces every value addressed by `overrides` with the override's leaf.
///
/// The replacement may change the value's kind; a missing final field is
/// created.
pub fn apply_overrides(context: &mut Value, overrides: &Map<String, Value>) -> YucaResult<()> {
    for directive in resolve(overrides) {
        let (route, value) = directive?;
        debug!("Overriding '{route}'");
        let (parent, key) = locate(context, &route)?;
        parent.insert(key.to_string(), value.clone());
    }
    Ok(())
}

fn parse_indices(route: &Route, indices: &Value) -> YucaResult<Vec<usize>> {
    let invalid = || YucaError::InvalidFilter {
        route: route.to_string(),
    };
    indices
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|index| {
            index
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(invalid)
        })
        .collect()
}

/// Reduces every sequence addressed by `filters` to the listed indices.
///
/// The result follows the order of the index list; repeated indices repeat
/// the element.
///
/// # Errors
/// * `YucaError::InvalidFilter` if a leaf is not a list of non-negative integers
/// * `YucaError::StructuralMismatch` if the addressed value is not a sequence
/// * `YucaError::IndexOutOfRange` if an index is past the end of the sequence
pub fn apply_filters(context: &mut Value, filters: &Map<String, Value>) -> YucaResult<()> {
    for directive in resolve(filters) {
        let (route, indices) = directive?;
        let indices = parse_indices(&route, indices)?;
        debug!("Filtering '{route}' to {indices:?}");

        let (parent, key) = locate(context, &route)?;
        let items = match parent.get(key) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(YucaError::StructuralMismatch {
                    route: route.to_string(),
                    expected: "sequence",
                    found: kind_of(other),
                })
            }
            None => {
                return Err(YucaError::MissingField {
                    field: key.to_string(),
                    route: route.to_string(),
                })
            }
        };

        let selected = indices
            .iter()
            .map(|&index| {
                items.get(index).cloned().ok_or_else(|| YucaError::IndexOutOfRange {
                    route: route.to_string(),
                    index,
                    len: items.len(),
                })
            })
            .collect::<YucaResult<Vec<_>>>()?;

        parent.insert(key.to_string(), Value::Array(selected));
    }
    Ok(())
}

/// Applies overrides, then filters.
///
/// A filter therefore sees values introduced by overrides, while an override
/// cannot bring back an element that a filter dropped.
pub fn apply_user_settings(
    context: &mut Value,
    overrides: &Map<String, Value>,
    filters: &Map<String, Value>,
) -> YucaResult<()> {
    apply_overrides(context, overrides)?;
    apply_filters(context, filters)
}
