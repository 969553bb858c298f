/// Show directory client.
///
/// This module provides the normalized show and episode records the widget works
/// with, the error type for directory lookups, and the trait implemented by
/// directory providers.
mod transport;
mod tvmaze;
mod tvmaze_types;

pub use transport::{ReqwestTransport, Transport};
pub use tvmaze::TvMazeDirectory;

#[cfg(test)]
pub(crate) use transport::stub::StubTransport;

use serde::Serialize;
use thiserror::Error;

/// Base URL of the public TVmaze API.
pub const DEFAULT_BASE_URL: &str = "http://api.tvmaze.com/";

/// Image shown for shows the directory has no artwork for.
pub const MISSING_IMAGE_URL: &str = "http://tinyurl.com/tv-missing";

/// Errors that can occur while talking to the show directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The configured base URL cannot be used to build request URLs
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The request could not be sent or the response body could not be read
    #[error("Request failed: {0}")]
    Request(String),

    /// The directory answered with a non-success status code
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response did not have the expected JSON shape
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

/// A show as returned by a search, reduced to what the widget displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSummary {
    /// Directory-assigned show identifier
    pub id: u64,
    /// The show title
    pub name: String,
    /// Show description as delivered upstream (may contain HTML markup)
    pub summary: Option<String>,
    /// Medium-resolution artwork, or the fallback image URL
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    /// Episode identifier
    pub id: u64,
    /// The episode title as delivered upstream (null for untitled episodes)
    pub name: Option<String>,
    /// Season number (1-based)
    pub season: u32,
    /// Episode number within the season (1-based)
    pub number: u32,
}

/// Trait for directories that can search shows and list their episodes.
///
/// Both operations preserve the order the directory returns and never retry:
/// any failure is handed straight back to the caller.
pub trait ShowDirectory {
    /// Searches for shows matching `term`.
    ///
    /// The term is passed through verbatim, including the empty string.
    fn search_shows(&self, term: &str) -> Result<Vec<ShowSummary>, DirectoryError>;

    /// Fetches the episode list of the show with the given identifier.
    fn get_episodes(&self, show_id: u64) -> Result<Vec<EpisodeSummary>, DirectoryError>;
}

impl<D: ShowDirectory + ?Sized> ShowDirectory for &D {
    fn search_shows(&self, term: &str) -> Result<Vec<ShowSummary>, DirectoryError> {
        (**self).search_shows(term)
    }

    fn get_episodes(&self, show_id: u64) -> Result<Vec<EpisodeSummary>, DirectoryError> {
        (**self).get_episodes(show_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_serialize_with_upstream_field_names() {
        let show = ShowSummary {
            id: 1,
            name: "Test Show".to_string(),
            summary: None,
            image: MISSING_IMAGE_URL.to_string(),
        };
        let episode = EpisodeSummary {
            id: 2,
            name: None,
            season: 1,
            number: 2,
        };

        assert_eq!(
            serde_json::to_value(&show).unwrap(),
            json!({
                "id": 1,
                "name": "Test Show",
                "summary": null,
                "image": "http://tinyurl.com/tv-missing"
            })
        );
        assert_eq!(
            serde_json::to_value(&episode).unwrap(),
            json!({ "id": 2, "name": null, "season": 1, "number": 2 })
        );
    }
}
