//! Rendering of show and episode lists
//!
//! Both renderers replace the full contents of their target container, so
//! rendering twice never leaves a mix of old and new entries behind.

use crate::directory::{EpisodeSummary, ShowSummary};
use crate::page::{Element, NodePath};

/// Class of a rendered show entry.
pub const SHOW_CLASS: &str = "Show";
/// Class of the "Episodes" button inside each show entry.
pub const GET_EPISODES_CLASS: &str = "Show-getEpisodes";
/// Attribute carrying the show id on each show entry.
pub const SHOW_ID_ATTRIBUTE: &str = "data-show-id";

/// Replaces the contents of `container` with one entry per show.
///
/// Each entry carries the show id in `data-show-id` and ends with an
/// "Episodes" button. Summaries are converted from HTML to plain text before
/// insertion.
pub fn render_shows(container: &mut Element, shows: &[ShowSummary]) {
    container.empty();

    for show in shows {
        container.append(show_entry(show));
    }
}

fn show_entry(show: &ShowSummary) -> Element {
    let summary = show
        .summary
        .as_deref()
        .map(|s| nanohtml2text::html2text(s).trim().to_string())
        .unwrap_or_default();

    let body = Element::new("div")
        .with_class("media-body")
        .with_child(
            Element::new("h5")
                .with_class("text-primary")
                .with_text(&show.name),
        )
        .with_child(Element::new("div").with_child(Element::new("small").with_text(&summary)))
        .with_child(
            Element::new("button")
                .with_class("btn btn-outline-light btn-sm")
                .with_class(GET_EPISODES_CLASS)
                .with_text("Episodes"),
        );

    let media = Element::new("div")
        .with_class("media")
        .with_child(
            Element::new("img")
                .with_attribute("src", &show.image)
                .with_attribute("alt", &show.name)
                .with_class("w-25 me-3"),
        )
        .with_child(body);

    Element::new("div")
        .with_attribute(SHOW_ID_ATTRIBUTE, &show.id.to_string())
        .with_class(SHOW_CLASS)
        .with_class("col-md-12 col-lg-6 mb-4")
        .with_child(media)
}

/// Formats one line of the episode list.
///
/// Untitled episodes keep an empty name.
pub fn episode_line(episode: &EpisodeSummary) -> String {
    format!(
        "{} (season {}, episode {})",
        episode.name.as_deref().unwrap_or_default(),
        episode.season,
        episode.number
    )
}

/// Replaces the contents of `list` with one line per episode and reveals
/// `area`, even when there are no episodes.
pub fn render_episodes(list: &mut Element, area: &mut Element, episodes: &[EpisodeSummary]) {
    list.empty();

    for episode in episodes {
        list.append(Element::new("li").with_text(&episode_line(episode)));
    }

    area.show();
}

/// Path of the "Episodes" button of the rendered show with `show_id`.
pub fn find_episodes_button(container: &Element, show_id: u64) -> Option<NodePath> {
    let id = show_id.to_string();

    container
        .find_by_class(GET_EPISODES_CLASS)
        .into_iter()
        .find(|button| {
            container
                .closest(button, SHOW_CLASS)
                .and_then(|entry| container.node_at(&entry))
                .and_then(|entry| entry.attribute(SHOW_ID_ATTRIBUTE))
                == Some(id.as_str())
        })
}
