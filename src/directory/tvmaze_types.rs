/// TVmaze API response types for deserialization.
///
/// These structures mirror the parts of the TVmaze JSON responses the widget
/// reads. Unknown fields are ignored.
use serde::Deserialize;

/// One entry of the `search/shows` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show
    pub show: TvMazeShow,
}

/// A show object as embedded in search results.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: u64,
    pub name: String,
    /// Summary in HTML format (may be null)
    #[serde(default)]
    pub summary: Option<String>,
    /// Artwork links (null when the show has no image)
    #[serde(default)]
    pub image: Option<TvMazeImage>,
}

/// Artwork links of a show.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    pub medium: String,
}

/// One entry of the `shows/<id>/episodes` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    pub id: u64,
    /// Episode title (may be null for episodes without a title)
    #[serde(default)]
    pub name: Option<String>,
    pub season: u32,
    pub number: u32,
}
