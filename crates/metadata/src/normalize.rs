//! Mapping from provider records to the canonical item shape.
//!
//! Movie, TV and person records share one optional-field struct: every field
//! the normalizer reads may be absent depending on the record kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::MetadataError;

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const POSTER_SIZE: &str = "w500";
const BACKDROP_SIZE: &str = "w780";
const UNTITLED: &str = "Untitled";

/// One upstream result record as the provider sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub media_type: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub original_language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawListing {
    page: Option<u32>,
    total_pages: Option<u32>,
    results: Option<Vec<RawItem>>,
}

/// Movie-only sub-resources returned with `append_to_response=videos,credits`.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawMovieExtras {
    genres: Option<Vec<Genre>>,
    runtime: Option<i64>,
    videos: Option<RawVideos>,
    credits: Option<Value>,
    homepage: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawVideos {
    results: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalItem {
    pub id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub media_type: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub overview: Option<String>,
    pub original_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Canonical item plus the movie detail sub-resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub item: CanonicalItem,
    pub genres: Vec<Genre>,
    pub runtime: Option<i64>,
    pub videos: Vec<Value>,
    pub credits: Value,
    pub homepage: Option<String>,
    pub status: Option<String>,
    pub release_date: Option<String>,
}

/// Listing envelope shared by trending and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<CanonicalItem>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn image_url(size: &str, path: &Option<String>) -> Option<String> {
    non_empty(path).map(|p| format!("{IMAGE_BASE}/{size}{p}"))
}

/// Leading `-`-separated segment of a date, as a year. An empty date has no
/// year; a non-empty date that does not start with an integer is malformed.
fn parse_year(date: &str) -> Result<Option<i32>, MetadataError> {
    if date.is_empty() {
        return Ok(None);
    }
    let head = date.split('-').next().unwrap_or_default();
    head.parse()
        .map(Some)
        .map_err(|_| MetadataError::MalformedRecord(format!("unparseable date {date:?}")))
}

/// Convert one provider record into a [`CanonicalItem`]. Pure.
pub fn normalize(raw: &RawItem) -> Result<CanonicalItem, MetadataError> {
    let id = raw
        .id
        .ok_or_else(|| MetadataError::MalformedRecord("record without id".into()))?;

    let title = non_empty(&raw.title)
        .or_else(|| non_empty(&raw.name))
        .unwrap_or(UNTITLED)
        .to_string();

    let date = non_empty(&raw.release_date)
        .or_else(|| non_empty(&raw.first_air_date))
        .unwrap_or_default();

    Ok(CanonicalItem {
        id,
        title,
        year: parse_year(date)?,
        rating: raw.vote_average,
        media_type: raw.media_type.clone(),
        poster: image_url(POSTER_SIZE, &raw.poster_path),
        backdrop: image_url(BACKDROP_SIZE, &raw.backdrop_path),
        overview: raw.overview.clone(),
        original_language: raw.original_language.clone(),
    })
}

fn decode<'de, T: Deserialize<'de>>(data: &'de Value, what: &str) -> Result<T, MetadataError> {
    T::deserialize(data).map_err(|e| MetadataError::MalformedRecord(format!("{what}: {e}")))
}

/// Normalize a `{page, total_pages, results}` page. Missing `results` is an
/// empty list; missing counters default to 1.
pub fn normalize_listing(data: &Value) -> Result<Listing, MetadataError> {
    let raw: RawListing = decode(data, "listing")?;
    let results = raw
        .results
        .unwrap_or_default()
        .iter()
        .map(normalize)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Listing {
        page: raw.page.unwrap_or(1),
        total_pages: raw.total_pages.unwrap_or(1),
        results,
    })
}

/// Normalize a `/movie/{id}` payload fetched with videos and credits appended.
pub fn normalize_movie_detail(data: &Value) -> Result<MovieDetail, MetadataError> {
    let base: RawItem = decode(data, "movie")?;
    let extras: RawMovieExtras = decode(data, "movie")?;
    let item = normalize(&base)?;

    Ok(MovieDetail {
        item,
        genres: extras.genres.unwrap_or_default(),
        runtime: extras.runtime,
        videos: extras
            .videos
            .and_then(|v| v.results)
            .unwrap_or_default(),
        credits: extras
            .credits
            .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        homepage: extras.homepage,
        status: extras.status,
        release_date: base.release_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalize_movie_record() {
        let item = normalize(&raw(json!({
            "id": 42,
            "title": "X",
            "release_date": "2020-01-01",
            "poster_path": "/a.jpg",
            "vote_average": 7.5,
            "media_type": "movie",
            "original_language": "en"
        })))
        .unwrap();

        assert_eq!(item.id, 42);
        assert_eq!(item.title, "X");
        assert_eq!(item.year, Some(2020));
        assert_eq!(item.poster.as_deref(), Some("https://image.tmdb.org/t/p/w500/a.jpg"));
        assert_eq!(item.backdrop, None);
        assert_eq!(item.rating, Some(7.5));
        assert_eq!(item.media_type.as_deref(), Some("movie"));
        assert_eq!(item.original_language.as_deref(), Some("en"));
        assert_eq!(item.overview, None);
    }

    #[test]
    fn normalize_tv_record_uses_name_and_first_air_date() {
        let item = normalize(&raw(json!({
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "backdrop_path": "/bb.jpg"
        })))
        .unwrap();

        assert_eq!(item.title, "Breaking Bad");
        assert_eq!(item.year, Some(2008));
        assert_eq!(item.backdrop.as_deref(), Some("https://image.tmdb.org/t/p/w780/bb.jpg"));
    }

    #[test]
    fn person_record_without_title_or_date() {
        let item = normalize(&raw(json!({ "id": 7, "media_type": "person" }))).unwrap();
        assert_eq!(item.title, "Untitled");
        assert_eq!(item.year, None);
        assert_eq!(item.poster, None);
    }

    #[test]
    fn empty_strings_fall_through() {
        let item = normalize(&raw(json!({
            "id": 1,
            "title": "",
            "name": "Fallback",
            "release_date": "",
            "first_air_date": "1999-03-31",
            "poster_path": ""
        })))
        .unwrap();

        assert_eq!(item.title, "Fallback");
        assert_eq!(item.year, Some(1999));
        assert_eq!(item.poster, None);
    }

    #[test]
    fn release_date_wins_over_first_air_date() {
        let item = normalize(&raw(json!({
            "id": 1,
            "release_date": "2021-05-04",
            "first_air_date": "1990-01-01"
        })))
        .unwrap();
        assert_eq!(item.year, Some(2021));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = normalize(&raw(json!({ "id": 1, "release_date": "soon" }))).unwrap_err();
        assert!(matches!(err, MetadataError::MalformedRecord(_)));
    }

    #[test]
    fn record_without_id_is_rejected() {
        let err = normalize(&raw(json!({ "title": "No id" }))).unwrap_err();
        assert!(matches!(err, MetadataError::MalformedRecord(_)));
    }

    #[test]
    fn image_fields_are_never_bare_paths() {
        for path in ["/p.jpg", "/nested/q.png"] {
            let item = normalize(&raw(json!({
                "id": 1,
                "poster_path": path,
                "backdrop_path": path
            })))
            .unwrap();
            assert!(item.poster.unwrap().starts_with(IMAGE_BASE));
            assert!(item.backdrop.unwrap().starts_with(IMAGE_BASE));
        }
    }

    #[test]
    fn normalize_is_deterministic() {
        let record = raw(json!({ "id": 3, "title": "Same", "release_date": "2001-09-09" }));
        assert_eq!(normalize(&record).unwrap(), normalize(&record).unwrap());
    }

    #[test]
    fn listing_without_results_is_empty() {
        let listing = normalize_listing(&json!({ "page": 2, "total_pages": 5 })).unwrap();
        assert_eq!(listing.page, 2);
        assert_eq!(listing.total_pages, 5);
        assert!(listing.results.is_empty());

        let listing = normalize_listing(&json!({})).unwrap();
        assert_eq!((listing.page, listing.total_pages), (1, 1));
    }

    #[test]
    fn listing_normalizes_every_result() {
        let listing = normalize_listing(&json!({
            "page": 1,
            "total_pages": 10,
            "results": [
                { "id": 42, "title": "X", "release_date": "2020-01-01", "poster_path": "/a.jpg" },
                { "id": 43, "name": "Y", "media_type": "tv" }
            ]
        }))
        .unwrap();

        assert_eq!(listing.results.len(), 2);
        assert_eq!(listing.results[0].year, Some(2020));
        assert_eq!(listing.results[1].title, "Y");
    }

    #[test]
    fn movie_detail_merges_sub_resources() {
        let detail = normalize_movie_detail(&json!({
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-16",
            "runtime": 148,
            "vote_average": 8.4,
            "homepage": "https://example.com",
            "status": "Released",
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ],
            "videos": { "results": [ { "key": "abc", "site": "YouTube" } ] },
            "credits": { "cast": [ { "name": "Leonardo DiCaprio" } ], "crew": [] }
        }))
        .unwrap();

        assert_eq!(detail.item.year, Some(2010));
        assert_eq!(detail.runtime, Some(148));
        assert_eq!(detail.genres[1].name, "Science Fiction");
        assert_eq!(detail.videos.len(), 1);
        assert_eq!(detail.credits["cast"][0]["name"], "Leonardo DiCaprio");
        assert_eq!(detail.release_date.as_deref(), Some("2010-07-16"));

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["title"], "Inception");
        assert_eq!(json["status"], "Released");
    }

    #[test]
    fn movie_detail_defaults_missing_sub_resources() {
        let detail = normalize_movie_detail(&json!({ "id": 5, "title": "Bare" })).unwrap();
        assert!(detail.genres.is_empty());
        assert!(detail.videos.is_empty());
        assert_eq!(detail.credits, json!({}));
        assert_eq!(detail.runtime, None);
        assert_eq!(detail.release_date, None);
    }
}
