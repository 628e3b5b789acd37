//! Common Test Utilities
//!
//! Shared fixtures and in-memory collaborators used across test modules.


pub use fixtures::*;
