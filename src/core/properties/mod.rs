//! Server Properties Extraction
//!
//! Reads the `server.properties` documentation table from the wiki and
//! turns it into typed [`Property`] records.

pub mod builder;
pub mod document;
pub mod error;
pub mod locale;
pub mod range;
pub mod service;
pub mod source;
pub mod table;
pub mod types;
pub mod value_type;

pub use error::{ExtractError, RangeError, Result};
pub use locale::{match_locale, LanguageTag, LocaleMatch};
pub use range::{ExpressionEvaluator, MathJsEvaluator};
pub use service::{PropertyService, ServiceSettings};
pub use source::{DocumentSource, HttpSource};
pub use types::{Metadata, Property, PropertyType, PropertyValues, METADATA, UNBOUNDED};
