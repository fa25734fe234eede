pub mod normalize;
pub mod provider;
pub mod tmdb;

use thiserror::Error;

pub use normalize::{CanonicalItem, Genre, Listing, MovieDetail};

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("TMDB request failed: {0}")]
    Unavailable(String),
    #[error("TMDB returned {status}")]
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: bytes::Bytes,
    },
    #[error("malformed upstream record: {0}")]
    MalformedRecord(String),
}
