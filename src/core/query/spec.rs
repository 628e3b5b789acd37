//! Query Model
//!
//! Turns caller-supplied query parameters into a validated [`QuerySpec`].
//! Validation happens before any page is fetched; an invalid request is
//! rejected as a whole.

use indexmap::IndexMap;
use thiserror::Error;

use crate::core::properties::locale::{InvalidLanguageTag, LanguageTag};
use crate::core::properties::types::{Property, PropertyType};

/// Marks an excluded entry in `contains` and `types`.
pub const EXCLUDE_MARKER: char = '!';
/// Marks a descending entry in `sort`.
pub const DESCENDING_MARKER: char = '-';

// ============================================================================
// Errors
// ============================================================================

/// A query parameter failed validation. Always the caller's fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown type {0:?}, expected one of boolean, integer, string")]
    UnknownType(String),

    #[error("the type filter mixes allowed and excluded types")]
    MixedTypePolarity,

    #[error("unknown sort field {0:?}, expected one of name, type, upcoming")]
    UnknownSortField(String),

    #[error("upcoming must be \"true\" or \"false\", got {0:?}")]
    InvalidUpcoming(String),

    #[error("{parameter} contains an entry with a marker but no value")]
    EmptyEntry { parameter: &'static str },

    #[error(transparent)]
    InvalidLocale(#[from] InvalidLanguageTag),
}

// ============================================================================
// Raw Parameters
// ============================================================================

/// Query inputs as received. List inputs may repeat and may be comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub contains: Vec<String>,
    pub types: Vec<String>,
    pub upcoming: Option<String>,
    pub sort: Vec<String>,
    pub lang: Option<String>,
}

impl QueryParams {
    /// Collects the known keys of a decoded query string; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "contains" => params.contains.push(value.into()),
                "types" => params.types.push(value.into()),
                "sort" => params.sort.push(value.into()),
                "upcoming" => {
                    params.upcoming.get_or_insert(value.into());
                }
                "lang" => {
                    params.lang.get_or_insert(value.into());
                }
                _ => {}
            }
        }
        params
    }
}

/// Flattens repeated and comma-joined values into one ordered list.
/// Empty entries are dropped.
///
/// `["a", "b,c"]` and `["a", "b", "c"]` both give `["a", "b", "c"]`.
pub fn flatten_list(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Splits a leading `marker` off `entry`; `true` means the entry was unmarked.
fn split_marker<'a>(
    entry: &'a str,
    marker: char,
    parameter: &'static str,
) -> Result<(&'a str, bool), QueryError> {
    match entry.strip_prefix(marker) {
        Some("") => Err(QueryError::EmptyEntry { parameter }),
        Some(rest) => Ok((rest, false)),
        None => Ok((entry, true)),
    }
}

// ============================================================================
// Query Spec
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Type,
    Upcoming,
}

impl std::str::FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "type" => Ok(Self::Type),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(QueryError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRule {
    pub field: SortField,
    pub ascending: bool,
}

impl SortRule {
    pub fn asc(field: SortField) -> Self {
        Self { field, ascending: true }
    }

    pub fn desc(field: SortField) -> Self {
        Self { field, ascending: false }
    }
}

/// A validated filter, sort and locale request.
///
/// Only constructed through [`QuerySpec::parse`], [`QuerySpec::exact`] or
/// the builder methods, all of which keep it self-consistent: the type map
/// is empty or holds all three types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    contains: IndexMap<String, bool>,
    types: IndexMap<PropertyType, bool>,
    upcoming: Option<bool>,
    exact_name: Option<String>,
    sort: Vec<SortRule>,
    locale: Option<LanguageTag>,
}

impl QuerySpec {
    /// Validates raw parameters.
    pub fn parse(params: &QueryParams) -> Result<Self, QueryError> {
        let mut contains = IndexMap::new();
        for entry in flatten_list(&params.contains) {
            let (substring, must_contain) = split_marker(entry, EXCLUDE_MARKER, "contains")?;
            contains.insert(substring.to_string(), must_contain);
        }

        let mut types: IndexMap<PropertyType, bool> = IndexMap::new();
        for entry in flatten_list(&params.types) {
            let (name, allowed) = split_marker(entry, EXCLUDE_MARKER, "types")?;
            let property_type = name
                .parse::<PropertyType>()
                .map_err(|_| QueryError::UnknownType(name.to_string()))?;
            if types.values().any(|&other| other != allowed) {
                return Err(QueryError::MixedTypePolarity);
            }
            types.insert(property_type, allowed);
        }
        close_types(&mut types);

        let mut sort: IndexMap<SortField, bool> = IndexMap::new();
        for entry in flatten_list(&params.sort) {
            let (field, ascending) = split_marker(entry, DESCENDING_MARKER, "sort")?;
            sort.insert(field.parse()?, ascending);
        }

        let upcoming = match params.upcoming.as_deref() {
            None | Some("") => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => return Err(QueryError::InvalidUpcoming(other.to_string())),
        };

        let locale = match params.lang.as_deref() {
            None | Some("") => None,
            Some(tag) => Some(tag.parse::<LanguageTag>()?),
        };

        Ok(Self {
            contains,
            types,
            upcoming,
            exact_name: None,
            sort: sort
                .into_iter()
                .map(|(field, ascending)| SortRule { field, ascending })
                .collect(),
            locale,
        })
    }

    /// A lookup of one key by exact, case-sensitive name.
    pub fn exact(name: impl Into<String>) -> Self {
        Self {
            exact_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: Option<LanguageTag>) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_sort(mut self, sort: Vec<SortRule>) -> Self {
        self.sort = sort;
        self
    }

    pub fn contains_rules(&self) -> &IndexMap<String, bool> {
        &self.contains
    }

    pub fn type_rules(&self) -> &IndexMap<PropertyType, bool> {
        &self.types
    }

    pub fn upcoming(&self) -> Option<bool> {
        self.upcoming
    }

    pub fn exact_name(&self) -> Option<&str> {
        self.exact_name.as_deref()
    }

    pub fn sort_rules(&self) -> &[SortRule] {
        &self.sort
    }

    pub fn locale(&self) -> Option<&LanguageTag> {
        self.locale.as_ref()
    }

    /// Whether any rule can drop a record. Sorting and locale never do.
    pub fn has_filters(&self) -> bool {
        self.exact_name.is_some()
            || !self.contains.is_empty()
            || !self.types.is_empty()
            || self.upcoming.is_some()
    }

    /// Name rules: exact name when set, otherwise every contains rule.
    pub fn admits_name(&self, name: &str) -> bool {
        if let Some(exact) = &self.exact_name {
            return name == exact;
        }
        self.contains
            .iter()
            .all(|(substring, &must_contain)| name.contains(substring.as_str()) == must_contain)
    }

    pub fn admits_type(&self, property_type: PropertyType) -> bool {
        if self.exact_name.is_some() || self.types.is_empty() {
            return true;
        }
        self.types.get(&property_type).copied().unwrap_or(false)
    }

    pub fn admits_upcoming(&self, upcoming: bool) -> bool {
        if self.exact_name.is_some() {
            return true;
        }
        self.upcoming.map_or(true, |wanted| wanted == upcoming)
    }

    /// Type, then name, then upcoming state.
    pub fn admits(&self, property: &Property) -> bool {
        self.admits_type(property.property_type)
            && self.admits_name(&property.name)
            && self.admits_upcoming(property.upcoming)
    }
}

/// Adds every type missing from a non-empty map with the opposite polarity
/// of the ones present.
fn close_types(types: &mut IndexMap<PropertyType, bool>) {
    let Some(&polarity) = types.values().next() else {
        return;
    };
    for property_type in PropertyType::ALL {
        types.entry(property_type).or_insert(!polarity);
    }
}
