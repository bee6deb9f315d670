//! Client trait and error type.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Endpoint;
use crate::models::{AuthToken, NewPicture, NewUser, Picture, User};

/// Errors that can occur during emagram client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The operation needs an endpoint the configuration does not set.
    #[error("No URL configured for the {0} endpoint")]
    MissingEndpoint(Endpoint),

    /// The configured endpoint URL cannot be used as a request base.
    #[error("Invalid {endpoint} endpoint URL '{url}': {reason}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        url: String,
        reason: String,
    },

    /// Configuration document could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Authentication succeeded but no token came back.
    #[error("Authentication response did not contain a token")]
    EmptyToken,
}

impl ClientError {
    /// HTTP status code of the failed response, if the service answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Operations offered by the emagram service.
///
/// Each call issues exactly one HTTP request and resolves once that request
/// completes. Nothing is cached or retried.
#[async_trait]
pub trait EmagramApi: Send + Sync {
    /// Fetch a single picture by its public identifier.
    async fn get_picture(&self, id: &str) -> Result<Picture, ClientError>;

    /// Upload a new picture on behalf of the token's owner.
    async fn save_picture(
        &self,
        picture: &NewPicture,
        token: &AuthToken,
    ) -> Result<Picture, ClientError>;

    /// Like a picture. The service answers with the updated picture.
    async fn like_picture(&self, id: &str) -> Result<Picture, ClientError>;

    /// List all pictures, in the order the service returns them.
    async fn list_pictures(&self) -> Result<Vec<Picture>, ClientError>;

    /// List the pictures carrying `tag`.
    async fn list_pictures_by_tag(&self, tag: &str) -> Result<Vec<Picture>, ClientError>;

    /// Register a new user.
    async fn save_user(&self, user: &NewUser) -> Result<User, ClientError>;

    /// Fetch a user by username.
    async fn get_user(&self, username: &str) -> Result<User, ClientError>;

    /// Exchange credentials for a bearer token.
    async fn auth(&self, username: &str, password: &str) -> Result<AuthToken, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::MissingEndpoint(Endpoint::Pictures);
        assert_eq!(err.to_string(), "No URL configured for the pictures endpoint");

        let err = ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(ClientError::NotFound(String::new()).status(), Some(404));
        assert_eq!(
            ClientError::Api {
                status: 503,
                message: String::new(),
            }
            .status(),
            Some(503)
        );
        assert_eq!(ClientError::EmptyToken.status(), None);
        assert_eq!(ClientError::MissingEndpoint(Endpoint::Auth).status(), None);
    }
}
