//! HTTP client for the user directory service.
//!
//! A thin wrapper over `reqwest` that attaches the shared Basic Auth pair
//! to every request and normalizes any non-2xx response or transport
//! failure into a single error carrying the status and body context.
//!
//! Timeouts are client-side only; the server enforces none.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("status=>{status}, message=>{body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// A user as returned by the single-resource endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct UserReply {
    pub id: Uuid,
    pub username: String,
    pub address: String,
    pub message: String,
}

/// The list endpoint's envelope
#[derive(Debug, Clone, Deserialize)]
pub struct UserListReply {
    pub data: Vec<UserListEntry>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserListEntry {
    pub id: Uuid,
    pub username: String,
    pub address: String,
}

/// Message-only reply (delete, password-check)
#[derive(Debug, Clone, Deserialize)]
pub struct MessageReply {
    pub message: String,
}

#[derive(Debug, Serialize)]
struct UserPayload<'a> {
    username: &'a str,
    password: &'a str,
    address: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordCheckPayload<'a> {
    username: &'a str,
    password: &'a str,
}

/// Client for the user directory API.
///
/// # Example
/// ```ignore
/// let client = DirectoryClient::new("http://localhost:4000", "gatekeeper", "sesame42")?;
/// let created = client.create("alice01", "Passw0rd", "Tokyo").await?;
/// let fetched = client.read(created.id).await?;
/// ```
#[derive(Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl DirectoryClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// POST /users
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        address: &str,
    ) -> ClientResult<UserReply> {
        self.send(self.http.post(self.url("/users")).json(&UserPayload {
            username,
            password,
            address,
        }))
        .await
    }

    /// GET /users/:id
    pub async fn read(&self, id: Uuid) -> ClientResult<UserReply> {
        self.send(self.http.get(self.url(&format!("/users/{id}"))))
            .await
    }

    /// GET /users
    pub async fn read_all(&self) -> ClientResult<UserListReply> {
        self.send(self.http.get(self.url("/users"))).await
    }

    /// PUT /users/:id
    pub async fn update(
        &self,
        id: Uuid,
        username: &str,
        password: &str,
        address: &str,
    ) -> ClientResult<UserReply> {
        self.send(
            self.http
                .put(self.url(&format!("/users/{id}")))
                .json(&UserPayload {
                    username,
                    password,
                    address,
                }),
        )
        .await
    }

    /// DELETE /users/:id
    pub async fn destroy(&self, id: Uuid) -> ClientResult<MessageReply> {
        self.send(self.http.delete(self.url(&format!("/users/{id}"))))
            .await
    }

    /// POST /password-check
    pub async fn pass_check(&self, username: &str, password: &str) -> ClientResult<MessageReply> {
        self.send(
            self.http
                .post(self.url("/password-check"))
                .json(&PasswordCheckPayload { username, password }),
        )
        .await
    }
}
