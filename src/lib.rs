//! ShowFinder - Search a TV show directory and browse episode lists
//!
//! This library provides a small show-search widget: a client for the TVmaze
//! directory, a page model the widget renders into, and the two controllers
//! that react to a search submission and to a click on a show's "Episodes"
//! button.

mod config;
mod controller;
mod directory;
mod page;
mod render;

pub use config::{DEFAULT_USER_AGENT, WidgetConfig};
pub use controller::{ClickEvent, EpisodeController, SearchController};
pub use directory::{
    DEFAULT_BASE_URL, DirectoryError, EpisodeSummary, MISSING_IMAGE_URL, ReqwestTransport,
    ShowDirectory, ShowSummary, Transport, TvMazeDirectory,
};
pub use page::{Element, Node, NodePath, Page};
pub use render::{
    GET_EPISODES_CLASS, SHOW_CLASS, SHOW_ID_ATTRIBUTE, episode_line, find_episodes_button,
    render_episodes, render_shows,
};

use thiserror::Error;

/// Top-level error type for widget operations
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Error while querying the show directory
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// An episodes button could not be traced back to a show
    #[error("Cannot determine show for episodes button: {0}")]
    MissingShowId(String),
}
