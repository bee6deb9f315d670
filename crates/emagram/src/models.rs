//! emagram API models.
//!
//! Response types keep any attribute they do not model in an `extra` map, so a
//! decoded value re-encodes to the body the service sent.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::traits::ClientError;

// ============================================================================
// Pictures
// ============================================================================

/// A picture as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    /// Opaque public identifier.
    pub public_id: String,
    /// Image source reference.
    pub src: String,
    /// Free-form description.
    pub description: String,
    /// Whether the picture has been liked.
    pub liked: bool,
    /// Like count.
    pub likes: u64,
    /// Tags extracted from the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Attributes not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a save-picture request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPicture {
    /// Image source reference.
    pub src: String,
    /// Free-form description.
    pub description: String,
}

impl NewPicture {
    /// Create a new picture payload.
    #[must_use]
    pub fn new(src: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            description: description.into(),
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique username.
    pub username: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Attributes not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a sign-up request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    /// Requested username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, sent once at sign-up.
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Body of an auth request.
#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Opaque bearer token.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Extract the token from an auth response body.
    ///
    /// Accepts a JSON string, an object with a `token` field, or bare text.
    pub(crate) fn from_response_body(body: &str) -> Result<Self, ClientError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TokenBody {
            Plain(String),
            Wrapped { token: String },
        }

        let body = body.trim();
        let token = match serde_json::from_str::<TokenBody>(body) {
            Ok(TokenBody::Plain(token) | TokenBody::Wrapped { token }) => token,
            Err(e) if body.starts_with(['{', '[', '"']) => return Err(ClientError::Decode(e)),
            Err(_) => body.to_string(),
        };

        if token.is_empty() {
            Err(ClientError::EmptyToken)
        } else {
            Ok(Self(token))
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_picture_camel_case_fields() {
        let body = json!({
            "publicId": "abc",
            "src": "https://emagram.test/abc.jpg",
            "description": "#sunset at the beach",
            "liked": false,
            "likes": 3
        });

        let picture: Picture = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(picture.public_id, "abc");
        assert_eq!(picture.likes, 3);
        assert!(!picture.liked);
        assert!(picture.tags.is_none());
        assert_eq!(serde_json::to_value(&picture).unwrap(), body);
    }

    #[test]
    fn test_picture_keeps_unknown_attributes() {
        let body = json!({
            "publicId": "abc",
            "src": "https://emagram.test/abc.jpg",
            "description": "",
            "liked": true,
            "likes": 1,
            "tags": [],
            "userId": "u-1",
            "createdAt": "2026-01-01T00:00:00Z"
        });

        let picture: Picture = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(picture.tags, Some(vec![]));
        assert_eq!(picture.extra["userId"], "u-1");
        assert_eq!(serde_json::to_value(&picture).unwrap(), body);
    }

    #[test]
    fn test_picture_requires_identifier() {
        let result = serde_json::from_value::<Picture>(json!({"src": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_picture_requires_like_state() {
        for body in [
            json!({"publicId": "abc", "src": "x"}),
            json!({"publicId": "abc", "src": "x", "description": "", "liked": true}),
            json!({"publicId": "abc", "src": "x", "description": null, "liked": true, "likes": 4}),
        ] {
            assert!(serde_json::from_value::<Picture>(body).is_err());
        }
    }

    #[test]
    fn test_auth_token_from_string() {
        assert_eq!(AuthToken::from("abc"), AuthToken::new("abc"));
        assert_eq!(AuthToken::from("abc".to_string()).as_str(), "abc");
    }

    #[test]
    fn test_new_picture_body() {
        let body = serde_json::to_value(NewPicture::new("a.jpg", "nice")).unwrap();
        assert_eq!(body, json!({"src": "a.jpg", "description": "nice"}));
    }

    #[test]
    fn test_new_user_debug_hides_password() {
        let user = NewUser {
            username: "ana".to_string(),
            name: "Ana".to_string(),
            email: "ana@emagram.test".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{user:?}");
        assert!(debug.contains("ana@emagram.test"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_auth_token_redacted() {
        let token = AuthToken::new("secret-token");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(token.as_str(), "secret-token");
        assert_eq!(token.bearer(), "Bearer secret-token");
    }

    #[test]
    fn test_token_from_response_body() {
        let expected = AuthToken::new("xxx-xxxx-xxx");
        assert_eq!(
            AuthToken::from_response_body(r#""xxx-xxxx-xxx""#).unwrap(),
            expected
        );
        assert_eq!(
            AuthToken::from_response_body(r#"{"token": "xxx-xxxx-xxx"}"#).unwrap(),
            expected
        );
        assert_eq!(
            AuthToken::from_response_body("xxx-xxxx-xxx\n").unwrap(),
            expected
        );
    }

    #[test]
    fn test_token_from_bad_response_body() {
        assert!(matches!(
            AuthToken::from_response_body(""),
            Err(ClientError::EmptyToken)
        ));
        assert!(matches!(
            AuthToken::from_response_body(r#""""#),
            Err(ClientError::EmptyToken)
        ));
        assert!(matches!(
            AuthToken::from_response_body(r#"{"jwt": "abc"}"#),
            Err(ClientError::Decode(_))
        ));
    }
}
