use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("<no error body>"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
}

impl HttpError {
    /// The message shown to the user: the server body's `message` when one
    /// was sent, `fallback` for other non-2xx responses, and a generic retry
    /// hint for transport failures. The underlying cause only goes to the
    /// logs.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            HttpError::Transport(_) => "Network error. Please try again.".to_string(),
            HttpError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            HttpError::Status { message: None, .. } => fallback.to_string(),
        }
    }
}

/// Error payload the backend sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        // One request id per process run, so a whole command invocation can
        // be correlated in the backend logs.
        if let Ok(request_id) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            headers.insert("x-request-id", request_id);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("reelist/0.1.0")
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn get(&self, url: &str, token: Option<&str>) -> Result<Response, HttpError> {
        debug!("Making GET request");
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::checked(request.send().await?).await
    }

    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, HttpError> {
        let response = self.get(url, token).await?;
        Ok(response.json::<T>().await?)
    }

    #[instrument(skip(self, body, token), fields(url = %url))]
    pub async fn post<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response, HttpError> {
        debug!("Making POST request");
        let mut request = self.client.post(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::checked(request.send().await?).await
    }

    #[instrument(skip(self, body, token), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, HttpError> {
        let response = self.post(url, body, token).await?;
        Ok(response.json::<T>().await?)
    }

    #[instrument(skip(self, body, token), fields(url = %url))]
    pub async fn put<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response, HttpError> {
        debug!("Making PUT request");
        let mut request = self.client.put(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::checked(request.send().await?).await
    }

    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn delete(&self, url: &str, token: Option<&str>) -> Result<(), HttpError> {
        debug!("Making DELETE request");
        let mut request = self.client.delete(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::checked(request.send().await?).await?;
        Ok(())
    }

    async fn checked(response: Response) -> Result<Response, HttpError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        error!("HTTP request failed with status: {}", status);
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(HttpError::Status { status, message })
    }
}
