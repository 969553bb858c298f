/// TVmaze directory implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult, TvMazeShow};
use super::{
    DirectoryError, EpisodeSummary, MISSING_IMAGE_URL, ShowDirectory, ShowSummary, Transport,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Show directory backed by the TVmaze API.
///
/// Uses the `search/shows` endpoint for searches and `shows/<id>/episodes`
/// for episode lists. Requests go through the injected `Transport`.
pub struct TvMazeDirectory<T: Transport> {
    transport: T,
    missing_image: String,
}

impl<T: Transport> TvMazeDirectory<T> {
    /// Creates a directory using the default fallback image.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            missing_image: MISSING_IMAGE_URL.to_string(),
        }
    }

    /// Replaces the image URL substituted for shows without artwork.
    pub fn with_missing_image(mut self, url: impl Into<String>) -> Self {
        self.missing_image = url.into();
        self
    }

    /// Converts a TVmaze show to our `ShowSummary`.
    ///
    /// The only local recovery in the client: shows without artwork get the
    /// fallback image so `image` is always a usable URL.
    fn convert_show(&self, show: TvMazeShow) -> ShowSummary {
        ShowSummary {
            id: show.id,
            name: show.name,
            summary: show.summary,
            image: show
                .image
                .map(|image| image.medium)
                .unwrap_or_else(|| self.missing_image.clone()),
        }
    }

    fn convert_episode(episode: TvMazeEpisode) -> EpisodeSummary {
        EpisodeSummary {
            id: episode.id,
            name: episode.name,
            season: episode.season,
            number: episode.number,
        }
    }

    fn decode<R: DeserializeOwned>(body: serde_json::Value) -> Result<R, DirectoryError> {
        serde_json::from_value(body).map_err(|e| DirectoryError::Parse(e.to_string()))
    }
}

impl<T: Transport> ShowDirectory for TvMazeDirectory<T> {
    fn search_shows(&self, term: &str) -> Result<Vec<ShowSummary>, DirectoryError> {
        let body = self.transport.get_json("search/shows", &[("q", term)])?;
        let results: Vec<TvMazeSearchResult> = Self::decode(body)?;

        debug!(term, count = results.len(), "search results received");

        Ok(results
            .into_iter()
            .map(|result| self.convert_show(result.show))
            .collect())
    }

    fn get_episodes(&self, show_id: u64) -> Result<Vec<EpisodeSummary>, DirectoryError> {
        let path = format!("shows/{}/episodes", show_id);
        let body = self.transport.get_json(&path, &[])?;
        let episodes: Vec<TvMazeEpisode> = Self::decode(body)?;

        debug!(show_id, count = episodes.len(), "episodes received");

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StubTransport;
    use serde_json::json;

    #[test]
    fn test_search_maps_show_with_image() {
        let transport = StubTransport::new().reply_json(
            "search/shows",
            json!([{
                "score": 0.9,
                "show": {
                    "id": 1,
                    "name": "Test Show",
                    "summary": "A test show",
                    "image": { "medium": "http://example.com/test.jpg", "original": "http://example.com/big.jpg" }
                }
            }]),
        );
        let directory = TvMazeDirectory::new(transport);

        let shows = directory.search_shows("test").unwrap();

        assert_eq!(
            shows,
            vec![ShowSummary {
                id: 1,
                name: "Test Show".to_string(),
                summary: Some("A test show".to_string()),
                image: "http://example.com/test.jpg".to_string(),
            }]
        );
    }

    #[test]
    fn test_search_passes_term_verbatim() {
        let transport = StubTransport::new().reply_json("search/shows", json!([]));
        let directory = TvMazeDirectory::new(transport);

        directory.search_shows("  no image ").unwrap();
        directory.search_shows("").unwrap();

        let requests = directory.transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "search/shows");
        assert_eq!(
            requests[0].1,
            vec![("q".to_string(), "  no image ".to_string())]
        );
        assert_eq!(requests[1].1, vec![("q".to_string(), String::new())]);
    }

    #[test]
    fn test_search_uses_fallback_image() {
        let transport = StubTransport::new().reply_json(
            "search/shows",
            json!([
                { "show": { "id": 3, "name": "No Image Show", "summary": "This show has no image", "image": null } },
                { "show": { "id": 4, "name": "Absent Image", "summary": null } }
            ]),
        );
        let directory = TvMazeDirectory::new(transport);

        let shows = directory.search_shows("no image").unwrap();

        assert_eq!(shows[0].image, MISSING_IMAGE_URL);
        assert_eq!(shows[1].image, "http://tinyurl.com/tv-missing");
        assert_eq!(shows[1].summary, None);
    }

    #[test]
    fn test_search_custom_fallback_image() {
        let transport = StubTransport::new().reply_json(
            "search/shows",
            json!([{ "show": { "id": 3, "name": "X", "summary": "", "image": null } }]),
        );
        let directory =
            TvMazeDirectory::new(transport).with_missing_image("http://localhost/none.png");

        let shows = directory.search_shows("x").unwrap();

        assert_eq!(shows[0].image, "http://localhost/none.png");
        assert_eq!(shows[0].summary.as_deref(), Some(""));
    }

    #[test]
    fn test_search_preserves_order_and_count() {
        let transport = StubTransport::new().reply_json(
            "search/shows",
            json!([
                { "show": { "id": 30, "name": "C", "summary": null, "image": null } },
                { "show": { "id": 10, "name": "A", "summary": null, "image": null } },
                { "show": { "id": 30, "name": "C", "summary": null, "image": null } }
            ]),
        );
        let directory = TvMazeDirectory::new(transport);

        let ids: Vec<u64> = directory
            .search_shows("c")
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();

        assert_eq!(ids, vec![30, 10, 30]);
    }

    #[test]
    fn test_search_rejects_missing_show_wrapper() {
        let transport = StubTransport::new().reply_json(
            "search/shows",
            json!([{ "id": 1, "name": "Unwrapped" }]),
        );
        let directory = TvMazeDirectory::new(transport);

        let result = directory.search_shows("unwrapped");

        assert!(matches!(result, Err(DirectoryError::Parse(_))));
    }

    #[test]
    fn test_search_propagates_status_error() {
        let transport = StubTransport::new().reply_status("search/shows", 503);
        let directory = TvMazeDirectory::new(transport);

        let result = directory.search_shows("test");

        assert!(matches!(
            result,
            Err(DirectoryError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn test_get_episodes_copies_fields() {
        let transport = StubTransport::new().reply_json(
            "shows/1/episodes",
            json!([
                { "id": 1, "name": "Pilot", "season": 1, "number": 1, "airdate": "2020-01-01" },
                { "id": 2, "name": "Second Episode", "season": 1, "number": 2 }
            ]),
        );
        let directory = TvMazeDirectory::new(transport);

        let episodes = directory.get_episodes(1).unwrap();

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].name.as_deref(), Some("Pilot"));
        assert_eq!(
            episodes[1],
            EpisodeSummary {
                id: 2,
                name: Some("Second Episode".to_string()),
                season: 1,
                number: 2,
            }
        );

        let requests = directory.transport.requests();
        assert_eq!(requests, vec![("shows/1/episodes".to_string(), vec![])]);
    }

    #[test]
    fn test_get_episodes_keeps_untitled_episodes() {
        let transport = StubTransport::new().reply_json(
            "shows/1/episodes",
            json!([
                { "id": 1, "name": "Pilot", "season": 1, "number": 1 },
                { "id": 2, "name": null, "season": 1, "number": 2 },
                { "id": 3, "season": 1, "number": 3 }
            ]),
        );
        let directory = TvMazeDirectory::new(transport);

        let episodes = directory.get_episodes(1).unwrap();

        assert_eq!(episodes.len(), 3);
        assert_eq!(episodes[0].name.as_deref(), Some("Pilot"));
        assert_eq!(episodes[1].name, None);
        assert_eq!(episodes[1].number, 2);
        assert_eq!(episodes[2].name, None);
    }

    #[test]
    fn test_get_episodes_does_not_resort() {
        let transport = StubTransport::new().reply_json(
            "shows/5/episodes",
            json!([
                { "id": 9, "name": "Late", "season": 2, "number": 1 },
                { "id": 8, "name": "Early", "season": 1, "number": 3 }
            ]),
        );
        let directory = TvMazeDirectory::new(transport);

        let episodes = directory.get_episodes(5).unwrap();

        assert_eq!(episodes[0].id, 9);
        assert_eq!(episodes[1].id, 8);
    }

    #[test]
    fn test_get_episodes_propagates_transport_error() {
        let directory = TvMazeDirectory::new(StubTransport::new());

        let result = directory.get_episodes(42);

        assert!(matches!(result, Err(DirectoryError::Request(_))));
    }
}
