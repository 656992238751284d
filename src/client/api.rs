use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::models::{Draft, ErrorResponse, GenerateRequest, SendRequest, SendResponse};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const GENERATE_FALLBACK: &str = "Failed to generate email";
const SEND_FALLBACK: &str = "Failed to send email";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response; carries the server's `error` text.
    #[error("{0}")]
    Server(String),
}

/// The two calls a compose front end makes.
#[async_trait]
pub trait EmailApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Draft, ClientError>;

    async fn send(&self, request: &SendRequest) -> Result<String, ClientError>;
}

#[derive(Clone)]
pub struct HttpEmailApi {
    client: Client,
    base_url: String,
}

impl HttpEmailApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read<T: DeserializeOwned>(res: Response, fallback: &str) -> Result<T, ClientError> {
        if res.status().is_success() {
            return Ok(res.json().await?);
        }

        let message = res
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.error)
            .filter(|error| !error.is_empty())
            .unwrap_or_else(|| fallback.to_string());

        Err(ClientError::Server(message))
    }
}

impl Default for HttpEmailApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl EmailApi for HttpEmailApi {
    async fn generate(&self, prompt: &str) -> Result<Draft, ClientError> {
        let res = self
            .client
            .post(format!("{}/generate-email", self.base_url))
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await?;

        Self::read(res, GENERATE_FALLBACK).await
    }

    async fn send(&self, request: &SendRequest) -> Result<String, ClientError> {
        let res = self
            .client
            .post(format!("{}/send-email", self.base_url))
            .json(request)
            .send()
            .await?;

        let body: SendResponse = Self::read(res, SEND_FALLBACK).await?;
        Ok(body.message)
    }
}
