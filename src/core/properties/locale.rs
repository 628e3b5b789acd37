//! Locale Matcher
//!
//! Picks the best available translation of the documentation page for a
//! caller's language preference.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid language tag: {0:?}")]
pub struct InvalidLanguageTag(pub String);

/// A BCP-47 language tag reduced to the subtags used for matching.
///
/// Variants and extensions are accepted but dropped. Subtags are stored in
/// canonical case: `zh-Hant-TW`, `es-419`, `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl LanguageTag {
    pub fn english() -> Self {
        Self {
            language: "en".to_string(),
            script: None,
            region: None,
        }
    }

    /// Primary language subtag, e.g. `es` for `es-419`.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The tag with script and region removed.
    pub fn base(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: None,
            region: None,
        }
    }

    pub fn is_english(&self) -> bool {
        self.language == "en"
    }
}

impl FromStr for LanguageTag {
    type Err = InvalidLanguageTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidLanguageTag(s.to_string());
        let mut subtags = s.trim().split(['-', '_']);

        let language = subtags.next().ok_or_else(invalid)?;
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let mut tag = Self {
            language: language.to_ascii_lowercase(),
            script: None,
            region: None,
        };
        for subtag in subtags {
            if subtag.is_empty() || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid());
            }
            let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let numeric = subtag.chars().all(|c| c.is_ascii_digit());
            if tag.script.is_none() && tag.region.is_none() && subtag.len() == 4 && alphabetic {
                let (head, tail) = subtag.split_at(1);
                tag.script = Some(head.to_ascii_uppercase() + &tail.to_ascii_lowercase());
            } else if tag.region.is_none()
                && ((subtag.len() == 2 && alphabetic) || (subtag.len() == 3 && numeric))
            {
                tag.region = Some(subtag.to_ascii_uppercase());
            }
        }
        Ok(tag)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        Ok(())
    }
}

/// Outcome of locale negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMatch {
    /// The chosen tag, always one of the supported tags.
    pub tag: LanguageTag,
    /// Whether the English page was chosen, in which case no overlay is needed.
    pub is_default: bool,
}

/// Chooses among the `supported` tags for a `requested` one.
///
/// English is always available. The order of preference is an exact match,
/// then a supported tag carrying only the requested language (`es-419` →
/// `es`), then any supported tag of the same language, then English.
pub fn match_locale(supported: &[LanguageTag], requested: &LanguageTag) -> LocaleMatch {
    let english = LanguageTag::english();
    let same_language = |t: &&LanguageTag| t.language == requested.language;

    let tag = supported
        .iter()
        .find(|t| *t == requested)
        .or_else(|| {
            supported
                .iter()
                .filter(same_language)
                .find(|t| t.region.is_none() && (t.script.is_none() || t.script == requested.script))
        })
        .or_else(|| supported.iter().find(same_language))
        .cloned()
        .unwrap_or(english);

    LocaleMatch {
        is_default: tag.is_english(),
        tag,
    }
}
