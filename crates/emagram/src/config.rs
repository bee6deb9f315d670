//! Client configuration.
//!
//! A [`ClientConfig`] names the base URL of each service endpoint. Every
//! endpoint is optional: a client can be built from an empty configuration and
//! only fails once an operation needs an endpoint that is not set.
//!
//! The JSON form mirrors the service's own configuration document:
//!
//! ```json
//! {
//!   "endpoints": {
//!     "pictures": "http://emagram.test/picture",
//!     "users": "http://emagram.test/user",
//!     "auth": "http://emagram.test/auth"
//!   }
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::traits::ClientError;

/// One of the service's resource groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Picture storage, likes and listings.
    Pictures,
    /// User registration and profiles.
    Users,
    /// Credential exchange.
    Auth,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pictures => write!(f, "pictures"),
            Self::Users => write!(f, "users"),
            Self::Auth => write!(f, "auth"),
        }
    }
}

/// Base URLs for each endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Pictures endpoint base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pictures: Option<String>,
    /// Users endpoint base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    /// Auth endpoint base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl Endpoints {
    /// Raw configured URL for `endpoint`.
    #[must_use]
    pub fn get(&self, endpoint: Endpoint) -> Option<&str> {
        match endpoint {
            Endpoint::Pictures => self.pictures.as_deref(),
            Endpoint::Users => self.users.as_deref(),
            Endpoint::Auth => self.auth.as_deref(),
        }
    }

    /// Parse the configured URL for `endpoint`.
    ///
    /// # Errors
    /// [`ClientError::MissingEndpoint`] when the endpoint is unset and
    /// [`ClientError::InvalidEndpoint`] when it is not an absolute http(s) URL.
    pub fn resolve(&self, endpoint: Endpoint) -> Result<Url, ClientError> {
        let raw = self
            .get(endpoint)
            .ok_or(ClientError::MissingEndpoint(endpoint))?;

        let invalid = |reason: String| ClientError::InvalidEndpoint {
            endpoint,
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint base URLs.
    pub endpoints: Endpoints,
}

impl ClientConfig {
    /// Empty configuration with no endpoints set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pictures endpoint.
    #[must_use]
    pub fn with_pictures(mut self, url: impl Into<String>) -> Self {
        self.endpoints.pictures = Some(url.into());
        self
    }

    /// Set the users endpoint.
    #[must_use]
    pub fn with_users(mut self, url: impl Into<String>) -> Self {
        self.endpoints.users = Some(url.into());
        self
    }

    /// Set the auth endpoint.
    #[must_use]
    pub fn with_auth(mut self, url: impl Into<String>) -> Self {
        self.endpoints.auth = Some(url.into());
        self
    }

    /// Parse a JSON configuration document.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the document is not valid JSON or has
    /// the wrong shape. URLs themselves are not checked until first use.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        serde_json::from_str(json).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Load a JSON configuration document from disk.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }
}
