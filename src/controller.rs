//! Search and episode controllers
//!
//! The controllers tie user actions on the page to the directory and the
//! renderers. Each action is one complete cycle: read from the page, ask the
//! directory, render. Because a cycle holds the page mutably from start to
//! finish, a response can never be rendered over a newer one.

use crate::WidgetError;
use crate::directory::ShowDirectory;
use crate::page::{NodePath, Page};
use crate::render::{
    GET_EPISODES_CLASS, SHOW_CLASS, SHOW_ID_ATTRIBUTE, render_episodes, render_shows,
};
use tracing::{debug, info};

/// A click inside the show results container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// The clicked node, relative to the results container
    pub target: NodePath,
}

impl ClickEvent {
    pub fn new(target: NodePath) -> Self {
        Self { target }
    }
}

/// Handles search form submissions.
pub struct SearchController<D: ShowDirectory> {
    directory: D,
}

impl<D: ShowDirectory> SearchController<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Runs one search cycle for the term currently in the search input.
    ///
    /// The episode area is hidden before the directory is asked, so episodes
    /// of a previously selected show never sit under new search results. On
    /// failure the results container keeps its previous contents.
    ///
    /// # Returns
    ///
    /// The number of shows rendered
    pub fn submit(&self, page: &mut Page) -> Result<usize, WidgetError> {
        let term = page.search_term();
        info!(term = %term, "searching shows");

        page.episodes_area.hide();

        let shows = self.directory.search_shows(&term)?;
        render_shows(&mut page.shows_list, &shows);

        info!(term = %term, count = shows.len(), "shows rendered");
        Ok(shows.len())
    }
}

/// Handles clicks on the "Episodes" buttons of rendered shows.
///
/// A single handler serves the whole results container: the clicked show is
/// resolved at click time from the ancestry of the click target.
pub struct EpisodeController<D: ShowDirectory> {
    directory: D,
}

impl<D: ShowDirectory> EpisodeController<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Runs one episode cycle for a click inside the results container.
    ///
    /// # Returns
    ///
    /// `None` if the click did not hit an "Episodes" button, otherwise the
    /// number of episodes rendered
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::MissingShowId` if the button does not sit inside
    /// a show entry with a numeric id, or the directory error if the lookup
    /// fails.
    pub fn handle_click(
        &self,
        page: &mut Page,
        event: &ClickEvent,
    ) -> Result<Option<usize>, WidgetError> {
        if page
            .shows_list
            .closest(&event.target, GET_EPISODES_CLASS)
            .is_none()
        {
            debug!(target_path = ?event.target, "click outside an episodes button ignored");
            return Ok(None);
        }

        let show_id = resolve_show_id(page, &event.target)?;
        info!(show_id, "fetching episodes");

        let episodes = self.directory.get_episodes(show_id)?;
        render_episodes(&mut page.episodes_list, &mut page.episodes_area, &episodes);

        info!(show_id, count = episodes.len(), "episodes rendered");
        Ok(Some(episodes.len()))
    }
}

/// Reads the show id from the nearest show entry enclosing `target`.
fn resolve_show_id(page: &Page, target: &NodePath) -> Result<u64, WidgetError> {
    let entry = page
        .shows_list
        .closest(target, SHOW_CLASS)
        .and_then(|path| page.shows_list.node_at(&path))
        .ok_or_else(|| WidgetError::MissingShowId("no enclosing show entry".to_string()))?;

    let raw = entry.attribute(SHOW_ID_ATTRIBUTE).ok_or_else(|| {
        WidgetError::MissingShowId(format!("show entry has no {}", SHOW_ID_ATTRIBUTE))
    })?;

    raw.parse()
        .map_err(|_| WidgetError::MissingShowId(format!("invalid show id '{}'", raw)))
}
