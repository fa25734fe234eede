//! `/api/tmdb/*` proxy handlers.
//!
//! Each handler validates its input, makes exactly one upstream call and
//! normalizes the payload. Validation failures never reach the provider.

use std::ops::RangeInclusive;

use axum::Json;
use axum::extract::State;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reelgate_core::error::ApiError;
use reelgate_core::types::{MediaType, SEARCH_PAGE_RANGE, TRENDING_PAGE_RANGE, TimeWindow};
use reelgate_metadata::normalize::{normalize_listing, normalize_movie_detail};
use reelgate_metadata::{Listing, MovieDetail};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

const MULTI_SEARCH: &str = "multi";

/// Characters left unescaped in the search type path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub time_window: TimeWindow,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

fn validate_page(page: Option<u32>, range: RangeInclusive<u32>) -> Result<u32, ApiError> {
    let page = page.unwrap_or(*range.start());
    if !range.contains(&page) {
        return Err(ApiError::BadRequest(format!(
            "page must be between {} and {}",
            range.start(),
            range.end()
        )));
    }
    Ok(page)
}

/// Upstream path for a search type. Anything but `multi` is used as a single
/// escaped path segment.
fn search_path(kind: &str) -> String {
    if kind == MULTI_SEARCH {
        format!("/search/{MULTI_SEARCH}")
    } else {
        format!("/search/{}", utf8_percent_encode(kind, SEGMENT))
    }
}

pub async fn trending(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TrendingParams>,
) -> Result<Json<Listing>, AppError> {
    let page = validate_page(params.page, TRENDING_PAGE_RANGE)?;
    let path = format!("/trending/{}/{}", params.media_type, params.time_window);
    debug!(path = %path, page, "trending");

    let data = state
        .upstream
        .fetch(&path, &[("page", page.to_string())])
        .await?;
    Ok(Json(normalize_listing(&data)?))
}

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<Listing>, AppError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("query is required".into()))?;
    let page = validate_page(params.page, SEARCH_PAGE_RANGE)?;
    let kind = params
        .kind
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| MULTI_SEARCH.to_string());
    if kind.chars().all(|c| c == '.') {
        return Err(ApiError::BadRequest(format!("invalid search type {kind:?}")).into());
    }
    let path = search_path(&kind);
    debug!(path = %path, page, "search");

    let data = state
        .upstream
        .fetch(
            &path,
            &[
                ("query", query),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
        )
        .await?;
    Ok(Json(normalize_listing(&data)?))
}

pub async fn movie_detail(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<i64>,
) -> Result<Json<MovieDetail>, AppError> {
    let data = state
        .upstream
        .fetch(
            &format!("/movie/{movie_id}"),
            &[("append_to_response", "videos,credits".to_string())],
        )
        .await?;
    Ok(Json(normalize_movie_detail(&data)?))
}
