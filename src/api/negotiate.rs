//! Content Negotiation
//!
//! `Accept` checking for every request and `Accept-Language` parsing for
//! the locale preference.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::core::properties::LanguageTag;

use super::error::ApiError;

/// Media ranges the API can answer.
pub const ACCEPTED_TYPES: [&str; 3] = ["*/*", "application/json", "application/problem+json"];

/// Whether an `Accept` header value admits one of [`ACCEPTED_TYPES`].
/// An absent or blank header accepts anything.
pub fn is_acceptable(accept: &str) -> bool {
    if accept.trim().is_empty() {
        return true;
    }
    accept.split(',').any(|range| {
        let media_type = range.split(';').next().unwrap_or_default().trim();
        ACCEPTED_TYPES
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(media_type))
    })
}

/// Rejects requests whose `Accept` header no representation satisfies.
pub async fn require_acceptable(request: Request, next: Next) -> Response {
    let accept = request
        .headers()
        .get(header::ACCEPT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    if !is_acceptable(&accept) {
        return ApiError::NotAcceptable(accept).into_response();
    }
    next.run(request).await
}

/// The highest-weighted language of an `Accept-Language` value.
///
/// Ties keep header order. Wildcards, zero weights and unparsable tags
/// are ignored.
pub fn preferred_language(accept_language: &str) -> Option<LanguageTag> {
    let mut best: Option<(f32, LanguageTag)> = None;
    for entry in accept_language.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or_default().trim();
        let weight = parts
            .filter_map(|p| p.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        if tag == "*" || weight <= 0.0 {
            continue;
        }
        let Ok(tag) = tag.parse::<LanguageTag>() else {
            continue;
        };
        if best.as_ref().map_or(true, |(w, _)| weight > *w) {
            best = Some((weight, tag));
        }
    }
    best.map(|(_, tag)| tag)
}

/// [`preferred_language`] of the request's `Accept-Language` header.
pub fn header_language(headers: &HeaderMap) -> Option<LanguageTag> {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(preferred_language)
}
