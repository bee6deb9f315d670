//! Async client for the emagram picture sharing service.
//!
//! The service is split into three resource groups, each behind its own base
//! URL: pictures, users and auth. [`Client`] maps every operation onto exactly
//! one HTTP request against one of them and decodes the JSON answer.
//!
//! | Operation | Request |
//! |---|---|
//! | `get_picture(id)` | `GET {pictures}/{id}` |
//! | `save_picture(picture, token)` | `POST {pictures}/` with `Authorization: Bearer` |
//! | `like_picture(id)` | `POST {pictures}/{id}/like` |
//! | `list_pictures()` | `GET {pictures}/list` |
//! | `list_pictures_by_tag(tag)` | `GET {pictures}/tag/{tag}` |
//! | `save_user(user)` | `POST {users}/` |
//! | `get_user(username)` | `GET {users}/{username}` |
//! | `auth(username, password)` | `POST {auth}/` |
//!
//! Nothing is cached, retried or timed out by the client itself; failures from
//! the transport or non-2xx answers surface as [`ClientError`].
//!
//! ## Example
//!
//! ```ignore
//! use emagram::{create_client, ClientConfig, EmagramApi, NewPicture};
//!
//! let client = create_client(
//!     ClientConfig::new()
//!         .with_pictures("http://emagram.test/picture")
//!         .with_users("http://emagram.test/user")
//!         .with_auth("http://emagram.test/auth"),
//! )?;
//!
//! let token = client.auth("ana", "s3cret").await?;
//! let picture = client
//!     .save_picture(&NewPicture::new("https://cdn.emagram.test/a.jpg", "#sunset"), &token)
//!     .await?;
//! let liked = client.like_picture(&picture.public_id).await?;
//! ```

pub mod client;
pub mod config;
pub mod models;
pub mod traits;

pub use client::Client;
pub use config::{ClientConfig, Endpoint, Endpoints};
pub use models::{AuthToken, NewPicture, NewUser, Picture, User};
pub use traits::{ClientError, EmagramApi};

/// Create a client from `config`.
///
/// An empty configuration is accepted; see [`Client::new`].
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn create_client(config: ClientConfig) -> Result<Client, ClientError> {
    Client::new(config)
}
