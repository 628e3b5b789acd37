//! Filter & Sort Engine
//!
//! Applies a [`QuerySpec`] to a record set.

use std::cmp::Ordering;

use crate::core::properties::types::Property;

use super::spec::{QuerySpec, SortField, SortRule};

/// Filters then sorts `properties`.
pub fn apply(spec: &QuerySpec, properties: Vec<Property>) -> Vec<Property> {
    let mut result = filter(spec, properties);
    sort(spec.sort_rules(), &mut result);
    result
}

/// Keeps the records every rule admits, preserving their order.
///
/// With an exact name only the first record carrying that name survives.
pub fn filter(spec: &QuerySpec, properties: Vec<Property>) -> Vec<Property> {
    if let Some(name) = spec.exact_name() {
        return properties.into_iter().filter(|p| p.name == name).take(1).collect();
    }
    if !spec.has_filters() {
        return properties;
    }
    properties.into_iter().filter(|p| spec.admits(p)).collect()
}

/// Stable multi-key sort. The first rule is the primary key; each later
/// rule only orders records the previous ones consider equal.
pub fn sort(rules: &[SortRule], properties: &mut [Property]) {
    if rules.is_empty() {
        return;
    }
    properties.sort_by(|a, b| {
        rules
            .iter()
            .map(|rule| compare(rule, a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

fn compare(rule: &SortRule, a: &Property, b: &Property) -> Ordering {
    let ordering = match rule.field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Type => a.property_type.as_str().cmp(b.property_type.as_str()),
        // false before true
        SortField::Upcoming => a.upcoming.cmp(&b.upcoming),
    };
    if rule.ascending {
        ordering
    } else {
        ordering.reverse()
    }
}
