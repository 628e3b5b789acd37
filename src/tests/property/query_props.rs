//! Property-based tests for the Query Model and Filter & Sort Engine
//!
//! Tests invariants:
//! - A non-empty type mapping always names all three types
//! - `contains=x` and `contains=!x` split any record set in two
//! - An exact-name lookup returns at most one record with that name
//! - A sort is independent of any earlier sort

use proptest::prelude::*;

use crate::core::properties::{Property, PropertyType};
use crate::core::query::filter::{apply, filter, sort};
use crate::core::query::{QueryParams, QuerySpec, SortField, SortRule};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_type() -> impl Strategy<Value = PropertyType> {
    prop_oneof![
        Just(PropertyType::Boolean),
        Just(PropertyType::Integer),
        Just(PropertyType::String),
    ]
}

/// Property keys look like `max-players`.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(-[a-z]{1,6}){0,2}"
}

fn arb_property() -> impl Strategy<Value = Property> {
    (arb_name(), arb_type(), any::<bool>()).prop_map(|(name, property_type, upcoming)| {
        let mut property = Property::new(name, property_type);
        if upcoming {
            property.set_upcoming("1.22");
        }
        property
    })
}

fn arb_properties() -> impl Strategy<Value = Vec<Property>> {
    prop::collection::vec(arb_property(), 0..30)
}

/// Records with pairwise distinct names.
fn arb_unique_properties() -> impl Strategy<Value = Vec<Property>> {
    prop::collection::hash_set(arb_name(), 0..30).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let count = names.len();
        (
            Just(names),
            prop::collection::vec((arb_type(), any::<bool>()), count),
        )
            .prop_map(|(names, attrs)| {
                names
                    .into_iter()
                    .zip(attrs)
                    .map(|(name, (property_type, upcoming))| {
                        let mut property = Property::new(name, property_type);
                        if upcoming {
                            property.set_upcoming("1.22");
                        }
                        property
                    })
                    .collect()
            })
    })
}

/// A single-polarity `types` value; mixes like `string,!integer` are never produced.
fn arb_types_param() -> impl Strategy<Value = String> {
    (prop::sample::subsequence(vec!["boolean", "integer", "string"], 1..=3), any::<bool>()).prop_map(
        |(types, excluded)| {
            types
                .iter()
                .map(|t| if excluded { format!("!{t}") } else { t.to_string() })
                .collect::<Vec<_>>()
                .join(",")
        },
    )
}

fn spec(pairs: &[(&str, &str)]) -> QuerySpec {
    QuerySpec::parse(&QueryParams::from_pairs(pairs.iter().copied())).unwrap()
}

fn names(properties: &[Property]) -> Vec<String> {
    properties.iter().map(|p| p.name.clone()).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn type_mapping_is_closed(types in arb_types_param()) {
        let spec = spec(&[("types", types.as_str())]);
        let rules = spec.type_rules();
        prop_assert_eq!(rules.len(), 3);
        for property_type in PropertyType::ALL {
            prop_assert!(rules.contains_key(&property_type));
        }
    }

    #[test]
    fn type_filter_admits_exactly_allowed_types(types in arb_types_param(), properties in arb_properties()) {
        let spec = spec(&[("types", types.as_str())]);
        let kept = filter(&spec, properties.clone());
        for property in &properties {
            let allowed = spec.type_rules()[&property.property_type];
            prop_assert_eq!(kept.iter().any(|p| p == property), allowed);
        }
    }

    #[test]
    fn negated_contains_is_complement(properties in arb_properties(), needle in "[a-z]{1,2}") {
        let negated = format!("!{needle}");
        let with = filter(&spec(&[("contains", needle.as_str())]), properties.clone());
        let without = filter(&spec(&[("contains", negated.as_str())]), properties.clone());

        prop_assert_eq!(with.len() + without.len(), properties.len());
        prop_assert!(with.iter().all(|p| p.name.contains(&needle)));
        prop_assert!(without.iter().all(|p| !p.name.contains(&needle)));
    }

    #[test]
    fn exact_name_returns_at_most_one(properties in arb_properties(), index in any::<prop::sample::Index>()) {
        let name = if properties.is_empty() {
            "absent".to_string()
        } else {
            properties[index.index(properties.len())].name.clone()
        };
        let result = apply(&QuerySpec::exact(name.clone()), properties.clone());

        prop_assert!(result.len() <= 1);
        if let Some(found) = result.first() {
            prop_assert_eq!(&found.name, &name);
            let first = properties.iter().find(|p| p.name == name);
            prop_assert_eq!(Some(found), first);
        }
    }

    #[test]
    fn sort_is_independent_of_previous_sort(properties in arb_unique_properties()) {
        let by_name = [SortRule::asc(SortField::Name)];

        let mut resorted = properties.clone();
        sort(&[SortRule::asc(SortField::Type), SortRule::asc(SortField::Name)], &mut resorted);
        sort(&by_name, &mut resorted);

        let mut direct = properties;
        sort(&by_name, &mut direct);

        prop_assert_eq!(names(&resorted), names(&direct));
    }

    #[test]
    fn sort_is_stable(properties in arb_properties()) {
        let mut sorted = properties.clone();
        sort(&[SortRule::asc(SortField::Upcoming)], &mut sorted);

        let (current, upcoming): (Vec<_>, Vec<_>) = properties.into_iter().partition(|p| !p.upcoming);
        let expected: Vec<Property> = current.into_iter().chain(upcoming).collect();
        prop_assert_eq!(names(&sorted), names(&expected));
    }

    #[test]
    fn descending_reverses_distinct_names(properties in arb_unique_properties()) {
        let mut ascending = properties.clone();
        sort(&[SortRule::asc(SortField::Name)], &mut ascending);
        let mut descending = properties;
        sort(&[SortRule::desc(SortField::Name)], &mut descending);

        descending.reverse();
        prop_assert_eq!(names(&ascending), names(&descending));
    }
}
