//! HTTP transport for directory requests
//!
//! The directory client only needs one primitive from the network layer:
//! "GET this path below the base URL with these query parameters and hand me
//! the JSON body". The `Transport` trait captures exactly that, so the mapping
//! logic can be exercised without a live server.

use super::DirectoryError;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// A minimal JSON-over-HTTP GET primitive.
pub trait Transport {
    /// Performs a GET request for `path` (relative to the base URL) with the
    /// given query parameters and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Request` if the request cannot be sent,
    /// `DirectoryError::Status` for non-2xx responses and
    /// `DirectoryError::Parse` if the body is not JSON.
    fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, DirectoryError>;
}

/// Transport backed by a blocking reqwest client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Creates a transport issuing requests below `base_url`.
    ///
    /// A trailing slash is added to the base URL if missing, so relative
    /// paths always resolve beneath it rather than replacing its last segment.
    /// No request timeout is configured.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, DirectoryError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| DirectoryError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidBaseUrl {
                url: normalized,
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// The normalized base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, DirectoryError> {
        self.base_url
            .join(path)
            .map_err(|e| DirectoryError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: format!("cannot join '{}': {}", path, e),
            })
    }
}

impl Transport for ReqwestTransport {
    fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, DirectoryError> {
        let url = self.resolve(path)?;
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .map_err(|e| DirectoryError::Parse(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! In-memory transport used by the unit tests.

    use super::{DirectoryError, Transport};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// A canned reply for one path.
    pub(crate) enum StubReply {
        Json(serde_json::Value),
        Status(u16),
    }

    /// Transport answering from a fixed table and recording every request.
    #[derive(Default)]
    pub(crate) struct StubTransport {
        replies: HashMap<String, StubReply>,
        requests: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl StubTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn reply_json(mut self, path: &str, body: serde_json::Value) -> Self {
            self.replies.insert(path.to_string(), StubReply::Json(body));
            self
        }

        pub(crate) fn reply_status(mut self, path: &str, status: u16) -> Self {
            self.replies
                .insert(path.to_string(), StubReply::Status(status));
            self
        }

        /// Every request seen so far as `(path, query)` pairs.
        pub(crate) fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for StubTransport {
        fn get_json(
            &self,
            path: &str,
            query: &[(&str, &str)],
        ) -> Result<serde_json::Value, DirectoryError> {
            self.requests.borrow_mut().push((
                path.to_string(),
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));

            match self.replies.get(path) {
                Some(StubReply::Json(body)) => Ok(body.clone()),
                Some(StubReply::Status(status)) => Err(DirectoryError::Status {
                    status: *status,
                    url: path.to_string(),
                }),
                None => Err(DirectoryError::Request(format!(
                    "connection refused: {}",
                    path
                ))),
            }
        }
    }
}
