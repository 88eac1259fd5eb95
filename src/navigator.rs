//! Walks a context along a [`Route`].

use crate::error::{YucaError, YucaResult};
use crate::path::{Route, Segment};
use serde_json::{Map, Value};

/// Name of a value's kind, for diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn descend_field<'c>(data: &'c mut Value, name: &str, route: &Route) -> YucaResult<&'c mut Value> {
    match data {
        Value::Object(map) => map.get_mut(name).ok_or_else(|| YucaError::MissingField {
            field: name.to_string(),
            route: route.to_string(),
        }),
        other => Err(YucaError::StructuralMismatch {
            route: route.to_string(),
            expected: "mapping",
            found: kind_of(other),
        }),
    }
}

fn descend_index<'c>(data: &'c mut Value, index: usize, route: &Route) -> YucaResult<&'c mut Value> {
    match data {
        Value::Array(items) => {
            let len = items.len();
            items.get_mut(index).ok_or_else(|| YucaError::IndexOutOfRange {
                route: route.to_string(),
                index,
                len,
            })
        }
        other => Err(YucaError::StructuralMismatch {
            route: route.to_string(),
            expected: "sequence",
            found: kind_of(other),
        }),
    }
}

/// Finds the mapping that holds the last element of `route`.
///
/// Returns that mapping together with the final field name, so the caller
/// can read, replace or insert the addressed value. Every intermediate step
/// has to end on a mapping; a field followed by an index has to be a
/// sequence.
///
/// # Errors
/// * `YucaError::EmptyRoute` if the route has no segments
/// * `YucaError::StructuralMismatch` if a step finds a value of the wrong kind,
///   or the route ends on an index
/// * `YucaError::MissingField` if an intermediate field does not exist
/// * `YucaError::IndexOutOfRange` if an intermediate index is past the end
pub fn locate<'c, 'r>(
    context: &'c mut Value,
    route: &'r Route,
) -> YucaResult<(&'c mut Map<String, Value>, &'r str)> {
    let segments = route.segments();
    let last = match segments.last() {
        Some(Segment::Field(name)) => name.as_str(),
        Some(Segment::Index(_)) => {
            return Err(YucaError::StructuralMismatch {
                route: route.to_string(),
                expected: "field name as final route element",
                found: "index",
            })
        }
        None => return Err(YucaError::EmptyRoute),
    };

    let mut data = context;
    for pair in segments.windows(2) {
        // Indices are consumed together with the field that precedes them.
        let Segment::Field(name) = &pair[0] else {
            continue;
        };

        data = descend_field(data, name, route)?;
        if let Segment::Index(index) = pair[1] {
            data = descend_index(data, index, route)?;
        }

        if !data.is_object() {
            return Err(YucaError::StructuralMismatch {
                route: route.to_string(),
                expected: "mapping",
                found: kind_of(data),
            });
        }
    }

    match data {
        Value::Object(map) => Ok((map, last)),
        other => Err(YucaError::StructuralMismatch {
            route: route.to_string(),
            expected: "mapping",
            found: kind_of(other),
        }),
    }
}
