//! Test modules for serverprops
//!
//! Run all tests: `cargo test`
//! Run property tests only: `cargo test property`

mod common;
mod integration;
mod property;
