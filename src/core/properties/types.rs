//! Property Types
//!
//! Records produced by the extraction engine and the fixed metadata table
//! callers use to interpret them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// Type name of boolean keys as documented on the wiki.
pub const BOOLEAN_TYPENAME: &str = "boolean";
/// Type name of integer keys as documented on the wiki.
pub const INTEGER_TYPENAME: &str = "integer";
/// Type name of string keys as documented on the wiki.
pub const STRING_TYPENAME: &str = "string";

/// Sentinel stored in both `min` and `max` when a key documents no range.
///
/// It is the minimum 32-bit signed integer, kept in an `i64` because some
/// documented bounds (`2^63 - 1`) do not fit 32 bits.
pub const UNBOUNDED: i64 = i32::MIN as i64;

// ============================================================================
// Property Type
// ============================================================================

/// Value type of a configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Boolean,
    Integer,
    String,
}

impl PropertyType {
    /// All known types, in the order used when closing a type filter.
    pub const ALL: [PropertyType; 3] = [Self::Boolean, Self::Integer, Self::String];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => BOOLEAN_TYPENAME,
            Self::Integer => INTEGER_TYPENAME,
            Self::String => STRING_TYPENAME,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            BOOLEAN_TYPENAME => Ok(Self::Boolean),
            INTEGER_TYPENAME => Ok(Self::Integer),
            STRING_TYPENAME => Ok(Self::String),
            other => Err(format!("unknown property type: {other}")),
        }
    }
}

// ============================================================================
// Property Values
// ============================================================================

/// Value-space envelope of a configuration key.
///
/// `min` and `max` are either both [`UNBOUNDED`] or both documented bounds.
/// When the bounds are unset but `possible` is not empty, the key takes one
/// of the listed literals; when both are set, the literals usually carry a
/// special meaning explained in the description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValues {
    /// Default literal exactly as documented.
    #[serde(rename = "default")]
    pub default_value: String,
    pub min: i64,
    pub max: i64,
    pub possible: Vec<String>,
}

impl Default for PropertyValues {
    fn default() -> Self {
        Self {
            default_value: String::new(),
            min: UNBOUNDED,
            max: UNBOUNDED,
            possible: Vec::new(),
        }
    }
}

impl PropertyValues {
    /// Whether the key documents a numeric range.
    pub fn is_bounded(&self) -> bool {
        self.min != UNBOUNDED
    }

    /// Sets both bounds at once so the sentinel invariant cannot be split.
    pub fn set_bounds(&mut self, min: i64, max: i64) {
        self.min = min;
        self.max = max;
    }

    /// Resets both bounds to [`UNBOUNDED`].
    pub fn clear_bounds(&mut self) {
        self.min = UNBOUNDED;
        self.max = UNBOUNDED;
    }
}

// ============================================================================
// Property
// ============================================================================

/// One documented `server.properties` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub values: PropertyValues,
    pub description: String,
    pub upcoming: bool,
    pub upcoming_version: String,
}

impl Property {
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        let mut values = PropertyValues::default();
        if property_type == PropertyType::Boolean {
            values.set_bounds(0, 1);
        }
        Self {
            name: name.into(),
            property_type,
            values,
            description: String::new(),
            upcoming: false,
            upcoming_version: String::new(),
        }
    }

    /// Marks the key as arriving in `version`. An empty version clears the flag.
    pub fn set_upcoming(&mut self, version: impl Into<String>) {
        self.upcoming_version = version.into();
        self.upcoming = !self.upcoming_version.is_empty();
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Constants a client needs to interpret records without hardcoding them.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub minecraft_boolean_typename: &'static str,
    pub minecraft_integer_typename: &'static str,
    pub minecraft_string_typename: &'static str,
    pub property_default_limit_value: i64,
}

pub const METADATA: Metadata = Metadata {
    minecraft_boolean_typename: BOOLEAN_TYPENAME,
    minecraft_integer_typename: INTEGER_TYPENAME,
    minecraft_string_typename: STRING_TYPENAME,
    property_default_limit_value: UNBOUNDED,
};
