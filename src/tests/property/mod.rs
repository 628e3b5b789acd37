//! Property-based tests for serverprops
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `query_props`: Query Model and Filter & Sort Engine
//!   - Type mapping is closed over all three types
//!   - Negated substring rules are complements
//!   - Exact-name lookup returns at most one record
//!   - Sorting is stable and independent of earlier sorts
//!
//! - `record_props`: Record Builder
//!   - Bound sentinels agree (`min` and `max` unbounded together)
//!   - Upcoming flag agrees with the upcoming version
//!   - Literal ranges never call the evaluator
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod query_props;
mod record_props;
