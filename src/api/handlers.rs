//! HTTP Handlers

use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
    Json,
};
use tracing::instrument;

use crate::core::properties::{LanguageTag, Metadata, Property, METADATA};
use crate::core::query::{QueryError, QueryParams, QuerySpec};

use super::error::{ApiError, ApiResult};
use super::negotiate::header_language;
use super::AppState;

/// Decodes a raw query string, keeping repeated keys.
fn query_params(raw: Option<&str>) -> QueryParams {
    let pairs = url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes());
    QueryParams::from_pairs(pairs)
}

/// `GET /v1/serverproperties`
#[instrument(skip(state, headers))]
pub async fn list_properties(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Vec<Property>>> {
    let mut spec = QuerySpec::parse(&query_params(query.as_deref()))?;
    if spec.locale().is_none() {
        spec = spec.with_locale(header_language(&headers));
    }
    Ok(Json(state.service.query(&spec).await?))
}

/// `GET /v1/serverproperties/:key`
#[instrument(skip(state, headers, query))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Property>> {
    let params = query_params(query.as_deref());
    let locale = match params.lang.as_deref() {
        None | Some("") => header_language(&headers),
        Some(tag) => Some(tag.parse::<LanguageTag>().map_err(QueryError::from)?),
    };

    state
        .service
        .property(&key, locale)
        .await?
        .map(Json)
        .ok_or(ApiError::PropertyNotFound(key))
}

/// `GET /v1/serverproperties/meta`
pub async fn metadata() -> Json<Metadata> {
    Json(METADATA)
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::EndpointNotFound
}
