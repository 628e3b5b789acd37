/// serverprops - server.properties documentation extractor
///
/// Core library that reads the `server.properties` reference table from
/// the wiki, turns it into typed records, and serves them filtered, sorted
/// and optionally translated over an HTTP API.

pub mod api;
pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
