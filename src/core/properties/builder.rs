//! Record Builder
//!
//! Turns the rows of a documentation table into [`Property`] records.
//!
//! Two modes exist. [`Extraction::Full`] requires every row to parse
//! completely and fails the whole call on the first incomplete row or
//! unresolved range. [`Extraction::Filtered`] drops rows as soon as they
//! contradict the query, before resolving their range, and leaves a
//! range it cannot resolve unbounded.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::query::spec::QuerySpec;

use super::error::{ExtractError, Result};
use super::range::{resolve_range, ExpressionEvaluator};
use super::table::{SourceRow, SourceTable};
use super::types::{Property, PropertyType};
use super::value_type::parse_value_type;

/// Footnote label marking a key that only exists in an upcoming version.
const UPCOMING_MARKER: &str = "upcoming";

/// Lead term of explanatory entries in the description's definition lists.
const NOTE_TERM: &str = "Note:";

/// How strictly rows are extracted.
#[derive(Debug, Clone, Copy)]
pub enum Extraction<'a> {
    Full,
    Filtered(&'a QuerySpec),
}

impl<'a> Extraction<'a> {
    /// Full extraction when the query has no filters, filtered otherwise.
    pub fn for_query(spec: &'a QuerySpec) -> Self {
        if spec.has_filters() {
            Self::Filtered(spec)
        } else {
            Self::Full
        }
    }

    fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Outcome of building a single row.
enum RowOutcome {
    Built(Property),
    Skipped,
}

/// Builds one record per data row of `table`, in row order.
pub async fn build_records(
    table: &SourceTable,
    mode: Extraction<'_>,
    evaluator: &dyn ExpressionEvaluator,
) -> Result<Vec<Property>> {
    let mut records = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        match build_row(index, row, mode, evaluator).await? {
            RowOutcome::Built(property) => records.push(property),
            RowOutcome::Skipped => continue,
        }
        if let Extraction::Filtered(spec) = mode {
            if spec.exact_name().is_some() {
                break;
            }
        }
    }
    debug!(rows = table.rows.len(), records = records.len(), "Built property records");
    Ok(records)
}

async fn build_row(
    index: usize,
    row: &SourceRow,
    mode: Extraction<'_>,
    evaluator: &dyn ExpressionEvaluator,
) -> Result<RowOutcome> {
    // Full mode turns a missing field into drift; filtered mode skips the row.
    let missing = |field: &str| -> Result<RowOutcome> {
        if mode.is_full() {
            Err(ExtractError::drift(format!("row {index} has no {field}")))
        } else {
            debug!(row = index, field, "Dropping incomplete row");
            Ok(RowOutcome::Skipped)
        }
    };

    // Column 0: key name and upcoming footnote.
    let Some(key_cell) = row.cell(0).filter(|c| !c.bold.is_empty()) else {
        return missing("name");
    };
    let name = key_cell.bold.clone();
    let upcoming_version = if key_cell.footnote.contains(UPCOMING_MARKER) {
        key_cell.footnote_link.clone()
    } else {
        String::new()
    };
    if let Extraction::Filtered(spec) = mode {
        if !spec.admits_name(&name) || !spec.admits_upcoming(!upcoming_version.is_empty()) {
            return Ok(RowOutcome::Skipped);
        }
    }

    // Column 1: type, then its range.
    let raw_type = row.cell(1).map(|c| c.text.as_str()).unwrap_or_default();
    let Some((property_type, values)) = parse_value_type(raw_type) else {
        return missing("recognized type");
    };
    if let Extraction::Filtered(spec) = mode {
        if !spec.admits_type(property_type) {
            return Ok(RowOutcome::Skipped);
        }
    }

    let mut property = Property::new(name, property_type);
    property.values = values;
    property.set_upcoming(upcoming_version);

    if property_type == PropertyType::Integer {
        match resolve_range(raw_type, evaluator).await {
            Ok(Some((min, max))) => property.values.set_bounds(min, max),
            Ok(None) => {}
            Err(e) if mode.is_full() => return Err(e.into()),
            Err(e) => {
                warn!(key = %property.name, error = %e, "Leaving range unbounded");
                property.values.clear_bounds();
            }
        }
    }

    // Column 2: default value.
    property.values.default_value = row.cell(2).map(|c| c.text.clone()).unwrap_or_default();
    if property.values.default_value.is_empty() && mode.is_full() {
        return missing("default value");
    }

    // Column 3: description and enumerated values.
    let Some(description) = row.cell(3).filter(|c| !c.text.is_empty()) else {
        if mode.is_full() {
            return missing("description");
        }
        return Ok(RowOutcome::Built(property));
    };
    property.description = description.text.clone();
    if property_type != PropertyType::Boolean {
        property.values.possible = description
            .definitions
            .iter()
            .filter(|term| !term.is_empty() && term.as_str() != NOTE_TERM)
            .cloned()
            .collect();
    }

    Ok(RowOutcome::Built(property))
}

/// Replaces English descriptions with the translated ones from `localized`,
/// matching rows by key name. Other fields are left untouched, as are
/// records whose translation is missing or empty.
pub fn apply_translations(records: &mut [Property], localized: &SourceTable) {
    let index: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.clone(), i))
        .collect();

    let mut translated = 0;
    for row in &localized.rows {
        // Some translations move the key into a header cell, which shifts
        // the description from the fourth to the third data cell.
        let (name, description) = if row.header_name.is_empty() {
            (row.cell(0).map(|c| c.bold.as_str()).unwrap_or_default(), row.cell(3))
        } else {
            (row.header_name.as_str(), row.cell(2))
        };
        let (Some(&i), Some(description)) = (index.get(name), description) else {
            continue;
        };
        if !description.text.is_empty() {
            records[i].description = description.text.clone();
            translated += 1;
        }
    }
    debug!(translated, total = records.len(), "Applied translated descriptions");
}
