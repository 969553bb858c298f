//! Widget configuration
//!
//! The widget needs very little: where the directory lives, which image to
//! show for shows without artwork, and how to identify itself upstream.

use crate::directory::{
    DEFAULT_BASE_URL, DirectoryError, MISSING_IMAGE_URL, ReqwestTransport, TvMazeDirectory,
};

/// User agent sent with every directory request.
pub const DEFAULT_USER_AGENT: &str = concat!("show-finder/", env!("CARGO_PKG_VERSION"));

/// Configuration for the widget's directory connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Base URL of the TVmaze API
    pub base_url: String,
    /// Image URL substituted for shows without artwork
    pub missing_image_url: String,
    /// User agent header for directory requests
    pub user_agent: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            missing_image_url: MISSING_IMAGE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Builds the HTTP-backed directory described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidBaseUrl` if the base URL cannot be
    /// parsed, or `DirectoryError::Request` if the HTTP client cannot be set up.
    pub fn build_directory(&self) -> Result<TvMazeDirectory<ReqwestTransport>, DirectoryError> {
        let transport = ReqwestTransport::new(&self.base_url, &self.user_agent)?;
        Ok(TvMazeDirectory::new(transport).with_missing_image(self.missing_image_url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.base_url, "http://api.tvmaze.com/");
        assert_eq!(config.missing_image_url, "http://tinyurl.com/tv-missing");
        assert!(config.user_agent.starts_with("show-finder/"));
    }

    #[test]
    fn test_build_directory_rejects_bad_base_url() {
        let config = WidgetConfig {
            base_url: "::nope::".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            config.build_directory(),
            Err(DirectoryError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_build_directory_with_defaults() {
        assert!(WidgetConfig::default().build_directory().is_ok());
    }
}
