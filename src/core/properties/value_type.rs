//! Typed-Value Parser
//!
//! Classifies the text of a table's type column.

use super::types::{PropertyType, PropertyValues, BOOLEAN_TYPENAME, INTEGER_TYPENAME, STRING_TYPENAME};

/// Maps a trimmed type cell to a [`PropertyType`] and its initial values.
///
/// Integer cells carry free text such as `integer (0-256)`, so any text
/// containing `integer` counts; bounds are left unset for the range
/// resolver. Boolean and string must match exactly. Anything else is
/// unrecognized and returns `None`.
pub fn parse_value_type(raw: &str) -> Option<(PropertyType, PropertyValues)> {
    let mut values = PropertyValues::default();
    let property_type = if raw == BOOLEAN_TYPENAME {
        values.set_bounds(0, 1);
        PropertyType::Boolean
    } else if raw.contains(INTEGER_TYPENAME) {
        PropertyType::Integer
    } else if raw == STRING_TYPENAME {
        PropertyType::String
    } else {
        return None;
    };
    Some((property_type, values))
}
