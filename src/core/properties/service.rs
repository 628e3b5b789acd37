//! Property Service
//!
//! Runs one query end to end: fetch the English page, build the records,
//! overlay a translation when a locale is requested, then filter and sort.
//! The service is constructed once and shared; it holds no per-request state.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use url::Url;

use crate::config::AppConfig;
use crate::core::query::filter;
use crate::core::query::spec::QuerySpec;

use super::builder::{apply_translations, build_records, Extraction};
use super::error::{ExtractError, Result};
use super::locale::{match_locale, LanguageTag};
use super::range::{ExpressionEvaluator, MathJsEvaluator};
use super::source::{build_client, DocumentSource, HttpSource};
use super::table::{parse_localized_table, EnglishPage, LanguageLink};
use super::types::Property;

/// Placeholder replaced by the language subtag in the localized URL template.
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Where the pages live and how strictly they are read.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub wiki_url: String,
    pub localized_url_template: String,
    pub table_marker: String,
    pub strict_table_selection: bool,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            wiki_url: config.source.wiki_url.clone(),
            localized_url_template: config.source.localized_url_template.clone(),
            table_marker: config.source.table_marker.clone(),
            strict_table_selection: config.extraction.strict_table_selection,
        }
    }
}

/// Answers property queries against the live documentation.
#[derive(Clone)]
pub struct PropertyService {
    source: Arc<dyn DocumentSource>,
    evaluator: Arc<dyn ExpressionEvaluator>,
    settings: Arc<ServiceSettings>,
}

impl PropertyService {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        evaluator: Arc<dyn ExpressionEvaluator>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            source,
            evaluator,
            settings: Arc::new(settings),
        }
    }

    /// Wires the HTTP page source and the mathjs evaluator over one client.
    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        let client = build_client(&config.source)?;
        Ok(Self::new(
            Arc::new(HttpSource::new(client.clone())),
            Arc::new(MathJsEvaluator::new(config.source.math_api_url.clone(), client)),
            ServiceSettings::from_config(config),
        ))
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Records matching `spec`, in the order its sort rules give.
    #[instrument(skip(self, spec), fields(locale = ?spec.locale()))]
    pub async fn query(&self, spec: &QuerySpec) -> Result<Vec<Property>> {
        let html = self.source.fetch(&self.settings.wiki_url).await?;
        let page = EnglishPage::parse(&html, &self.settings.table_marker)?;

        let mut records =
            build_records(&page.table, Extraction::for_query(spec), self.evaluator.as_ref()).await?;

        if let Some(requested) = spec.locale() {
            if !records.is_empty() {
                self.translate(&mut records, &page.languages, requested).await?;
            }
        }

        let records = filter::apply(spec, records);
        info!(count = records.len(), "Query answered");
        Ok(records)
    }

    /// The record named exactly `name`, if the page documents it.
    pub async fn property(
        &self,
        name: &str,
        locale: Option<LanguageTag>,
    ) -> Result<Option<Property>> {
        let spec = QuerySpec::exact(name).with_locale(locale);
        Ok(self.query(&spec).await?.into_iter().next())
    }

    async fn translate(
        &self,
        records: &mut [Property],
        languages: &[LanguageLink],
        requested: &LanguageTag,
    ) -> Result<()> {
        let supported: Vec<LanguageTag> = languages.iter().map(|l| l.tag.clone()).collect();
        let matched = match_locale(&supported, requested);
        if matched.is_default {
            debug!(%requested, "No translation available, keeping English");
            return Ok(());
        }

        let href = languages
            .iter()
            .find(|l| l.tag == matched.tag)
            .and_then(|l| l.href.as_deref());
        let url = self.localized_url(&matched.tag, href)?;
        debug!(%requested, matched = %matched.tag, %url, "Fetching translation");

        let html = self.source.fetch(&url).await?;
        let localized = parse_localized_table(&html, self.settings.strict_table_selection)?;
        apply_translations(records, &localized);
        Ok(())
    }

    /// The link target resolved against the English page, or the template
    /// filled with the language subtag when the link has none.
    fn localized_url(&self, tag: &LanguageTag, href: Option<&str>) -> Result<String> {
        let Some(href) = href else {
            return Ok(self
                .settings
                .localized_url_template
                .replace(LANG_PLACEHOLDER, tag.language()));
        };

        Url::parse(&self.settings.wiki_url)
            .and_then(|base| base.join(href))
            .map(String::from)
            .map_err(|e| ExtractError::SourceUnreachable {
                url: href.to_string(),
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for PropertyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
