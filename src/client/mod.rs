//! HTTP client for the `/api/users` resource. One request per operation;
//! no retries, no caching and no client-side timeout.

mod errors;

pub use self::errors::ClientError;

use crate::{
    users::{NewUser, User, UserId},
    APP_USER_AGENT,
};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use std::future::Future;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// The five operations the console needs from a users backend.
pub trait UsersApi {
    fn list(&self) -> impl Future<Output = Result<Vec<User>, ClientError>>;

    fn get(&self, id: UserId) -> impl Future<Output = Result<User, ClientError>>;

    fn create(&self, user: &NewUser) -> impl Future<Output = Result<User, ClientError>>;

    fn update(&self, user: &User) -> impl Future<Output = Result<User, ClientError>>;

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), ClientError>>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed [`UsersApi`].
#[derive(Clone, Debug)]
pub struct UsersClient {
    http: Client,
    base_url: String,
}

impl UsersClient {
    /// Builds a client rooted at `base_url`, e.g. `http://localhost:8080/api`.
    ///
    /// # Errors
    /// Returns an error if the URL does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.trim())?;
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl UsersApi for UsersClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, ClientError> {
        let response = send(self.http.get(self.url("users"))).await?;
        if !response.status().is_success() {
            return Err(failed(&response, "Failed to fetch users"));
        }
        decode(response).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: UserId) -> Result<User, ClientError> {
        let response = send(self.http.get(self.url(&format!("users/{id}")))).await?;
        if !response.status().is_success() {
            debug!("get user {id} answered {}", response.status());
            return Err(ClientError::NotFound);
        }
        decode(response).await
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: &NewUser) -> Result<User, ClientError> {
        let response = send(self.http.post(self.url("users")).json(user)).await?;
        let status = response.status();

        if status.is_success() {
            return decode(response).await;
        }
        if status == reqwest::StatusCode::CONFLICT {
            return Err(ClientError::DuplicateEmail);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .ok()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| "Failed to create user".to_string());

        Err(ClientError::Request {
            status: status.as_u16(),
            message,
        })
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn update(&self, user: &User) -> Result<User, ClientError> {
        let response =
            send(self.http.put(self.url(&format!("users/{}", user.id))).json(user)).await?;
        if !response.status().is_success() {
            return Err(failed(&response, "Failed to update user"));
        }
        decode(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> Result<(), ClientError> {
        let response = send(self.http.delete(self.url(&format!("users/{id}")))).await?;
        if !response.status().is_success() {
            return Err(failed(&response, "Failed to delete user"));
        }
        Ok(())
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
    request.send().await.map_err(ClientError::Network)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response.json::<T>().await.map_err(ClientError::Decode)
}

fn failed(response: &Response, message: &str) -> ClientError {
    debug!("{} answered {}", response.url(), response.status());
    ClientError::Request {
        status: response.status().as_u16(),
        message: message.to_string(),
    }
}
