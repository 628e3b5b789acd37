//! Integration Tests Module
//!
//! # Test Categories
//!
//! ## Service Pipeline (`service_pipeline`)
//! - Full and filtered extraction over in-memory pages
//! - Exact-name lookup
//! - Translation overlay, link and template URLs, strict table selection
//! - Structural drift and unreachable sources
//!
//! ## HTTP Collaborators (`http_sources`)
//! - mathjs evaluator requests and answer parsing (wiremock)
//! - Page fetching and error statuses
//! - Service built from configuration end to end

mod http_sources;
