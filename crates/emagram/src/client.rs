//! emagram HTTP client implementation.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ClientConfig, Endpoint};
use crate::models::{AuthToken, Credentials, NewPicture, NewUser, Picture, User};
use crate::traits::{ClientError, EmagramApi};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("emagram/", env!("CARGO_PKG_VERSION"));

/// Longest response body prefix written to logs.
const LOG_BODY_LIMIT: usize = 512;

/// emagram service client.
///
/// Holds only the endpoint configuration and a shared HTTP transport, so it is
/// cheap to clone and safe to use from many tasks at once.
#[derive(Debug, Clone)]
pub struct Client {
    /// HTTP client.
    http: reqwest::Client,
    /// Endpoint configuration, fixed for the client's lifetime.
    config: ClientConfig,
}

impl Client {
    /// Create a new client.
    ///
    /// Endpoints are not validated here; an unset or malformed endpoint is
    /// reported by the first operation that needs it.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client on top of an existing HTTP client.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build `{endpoint}/{segments...}`, percent-encoding each segment.
    fn url(&self, endpoint: Endpoint, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.config.endpoints.resolve(endpoint)?;
        // http(s) URLs always accept path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, url = %url, "Sending request");
        self.http.request(method, url)
    }

    /// Send a request and return the body of a successful response.
    async fn execute(request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();

        if status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Request succeeded");
            Ok(response.text().await?)
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(url.to_string()))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
        serde_json::from_str(body).map_err(|e| {
            warn!(
                error = %e,
                body = %body_prefix(body),
                body_len = body.len(),
                "Failed to parse response"
            );
            ClientError::Decode(e)
        })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let body = Self::execute(request).await?;
        Self::decode(&body)
    }
}

/// Leading part of `body` that fits in a log line.
fn body_prefix(body: &str) -> &str {
    if body.len() <= LOG_BODY_LIMIT {
        return body;
    }
    let mut end = LOG_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[async_trait]
impl EmagramApi for Client {
    async fn get_picture(&self, id: &str) -> Result<Picture, ClientError> {
        let url = self.url(Endpoint::Pictures, &[id])?;
        Self::fetch(self.request(Method::GET, url)).await
    }

    async fn save_picture(
        &self,
        picture: &NewPicture,
        token: &AuthToken,
    ) -> Result<Picture, ClientError> {
        let url = self.url(Endpoint::Pictures, &[""])?;
        info!(src = %picture.src, "Saving picture");

        let request = self
            .request(Method::POST, url)
            .header(AUTHORIZATION, token.bearer())
            .json(picture);
        let saved: Picture = Self::fetch(request).await?;

        info!(public_id = %saved.public_id, "Picture saved");
        Ok(saved)
    }

    async fn like_picture(&self, id: &str) -> Result<Picture, ClientError> {
        let url = self.url(Endpoint::Pictures, &[id, "like"])?;
        info!(public_id = %id, "Liking picture");

        let picture: Picture = Self::fetch(self.request(Method::POST, url)).await?;

        info!(public_id = %id, likes = picture.likes, "Picture liked");
        Ok(picture)
    }

    async fn list_pictures(&self) -> Result<Vec<Picture>, ClientError> {
        let url = self.url(Endpoint::Pictures, &["list"])?;
        Self::fetch(self.request(Method::GET, url)).await
    }

    async fn list_pictures_by_tag(&self, tag: &str) -> Result<Vec<Picture>, ClientError> {
        let url = self.url(Endpoint::Pictures, &["tag", tag])?;
        Self::fetch(self.request(Method::GET, url)).await
    }

    async fn save_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let url = self.url(Endpoint::Users, &[""])?;
        info!(username = %user.username, "Saving user");

        let saved: User = Self::fetch(self.request(Method::POST, url).json(user)).await?;

        info!(username = %saved.username, "User saved");
        Ok(saved)
    }

    async fn get_user(&self, username: &str) -> Result<User, ClientError> {
        let url = self.url(Endpoint::Users, &[username])?;
        Self::fetch(self.request(Method::GET, url)).await
    }

    async fn auth(&self, username: &str, password: &str) -> Result<AuthToken, ClientError> {
        let url = self.url(Endpoint::Auth, &[""])?;
        info!(username = %username, "Authenticating");

        let body = Credentials { username, password };
        let text = Self::execute(self.request(Method::POST, url).json(&body)).await?;
        AuthToken::from_response_body(&text)
    }
}
