//! Property-based tests for the Record Builder
//!
//! Tests invariants:
//! - `min` is unbounded exactly when `max` is
//! - `upcoming` is set exactly when `upcoming_version` is non-empty
//! - A literal range never reaches the evaluator

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use proptest::prelude::*;

use crate::core::properties::builder::{build_records, Extraction};
use crate::core::properties::error::RangeError;
use crate::core::properties::table::{SourceCell, SourceRow, SourceTable};
use crate::core::properties::{ExpressionEvaluator, Property, UNBOUNDED};
use crate::core::query::{QueryParams, QuerySpec};

// ============================================================================
// Test Evaluator
// ============================================================================

/// Answers `a*b` expressions, or fails every call when `failing` is set.
#[derive(Default)]
struct Multiplier {
    failing: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl ExpressionEvaluator for Multiplier {
    async fn evaluate(&self, expr: &str) -> Result<i64, RangeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let unreachable = || RangeError::EvaluatorUnreachable {
            expr: expr.to_string(),
            reason: "scripted failure".to_string(),
        };
        if self.failing {
            return Err(unreachable());
        }
        let (a, b) = expr.split_once('*').ok_or_else(unreachable)?;
        let a: i64 = a.trim().parse().map_err(|_| unreachable())?;
        let b: i64 = b.trim().parse().map_err(|_| unreachable())?;
        Ok(a.saturating_mul(b))
    }
}

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_raw_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("boolean".to_string()),
        Just("string".to_string()),
        Just("integer".to_string()),
        (0u32..1000, 0u32..100_000).prop_map(|(lo, hi)| format!("integer ({lo}-{hi})")),
        (0u32..1000, 0u32..100_000).prop_map(|(lo, hi)| format!("integer ({lo}–{hi})")),
        (0u32..10, 1u32..100_000, 1u32..100).prop_map(|(lo, a, b)| format!("integer ({lo}-({a}*{b}))")),
    ]
}

fn arb_row() -> impl Strategy<Value = SourceRow> {
    (
        "[a-z]{1,8}(-[a-z]{1,8}){0,2}",
        arb_raw_type(),
        prop::option::of("1\\.[0-9]{1,2}"),
    )
        .prop_map(|(name, raw_type, version)| {
            let mut key = SourceCell {
                text: name.clone(),
                bold: name,
                ..SourceCell::default()
            };
            if let Some(version) = version {
                key.footnote = "upcoming".to_string();
                key.footnote_link = version;
            }
            let cell = |text: &str| SourceCell {
                text: text.to_string(),
                ..SourceCell::default()
            };
            SourceRow {
                header_name: String::new(),
                cells: vec![key, cell(&raw_type), cell("0"), cell("desc")],
            }
        })
}

fn arb_table() -> impl Strategy<Value = SourceTable> {
    prop::collection::vec(arb_row(), 0..20).prop_map(|rows| SourceTable { rows })
}

fn build(table: &SourceTable, mode: Extraction<'_>, evaluator: &Multiplier) -> Vec<Property> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(build_records(table, mode, evaluator))
        .unwrap()
}

fn assert_sentinels(records: &[Property]) -> Result<(), TestCaseError> {
    for record in records {
        prop_assert_eq!(record.values.min == UNBOUNDED, record.values.max == UNBOUNDED);
        prop_assert_eq!(record.upcoming, !record.upcoming_version.is_empty());
    }
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn full_extraction_keeps_sentinels_consistent(table in arb_table()) {
        let records = build(&table, Extraction::Full, &Multiplier::default());
        prop_assert_eq!(records.len(), table.rows.len());
        assert_sentinels(&records)?;
    }

    #[test]
    fn filtered_extraction_keeps_sentinels_consistent(table in arb_table(), failing in any::<bool>()) {
        let spec = QuerySpec::parse(&QueryParams::from_pairs([("types", "!string")])).unwrap();
        let evaluator = Multiplier { failing, ..Multiplier::default() };
        let records = build(&table, Extraction::Filtered(&spec), &evaluator);
        assert_sentinels(&records)?;
    }

    #[test]
    fn literal_ranges_skip_evaluator(lo in 0u32..1000, hi in 0u32..100_000) {
        let row = SourceRow {
            header_name: String::new(),
            cells: ["max-players", format!("integer ({lo}-{hi})").as_str(), "20", "desc"]
                .iter()
                .map(|text| SourceCell {
                    text: text.to_string(),
                    bold: text.to_string(),
                    ..SourceCell::default()
                })
                .collect(),
        };
        let evaluator = Multiplier::default();
        let records = build(&SourceTable { rows: vec![row] }, Extraction::Full, &evaluator);

        prop_assert_eq!(records[0].values.min, i64::from(lo));
        prop_assert_eq!(records[0].values.max, i64::from(hi));
        prop_assert_eq!(evaluator.calls.load(Ordering::SeqCst), 0);
    }
}
