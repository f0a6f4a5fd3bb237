//! KiteBot backend client

pub mod error;
pub mod types;

use crate::config::ApiConfig;
use error::ClientError;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use types::{
    ApiResponse, CheckKeyRequest, Endpoint, FeedbackRequest, LoginRequest, RegisterRequest,
};

/// JSON-over-POST client bound to a single base URL
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for an already validated configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = ClientBuilder::new()
            .user_agent(concat!("kitebot-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Browsers own the user agent
        #[cfg(target_arch = "wasm32")]
        let client = ClientBuilder::new().build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// POST `body` as JSON and accept only `2xx` with `status: "success"`.
    ///
    /// The body is parsed as JSON whatever the HTTP status, because the backend
    /// puts its user-facing message in error bodies as well.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let parsed: ApiResponse = response.json().await?;

        if status.is_success() && parsed.is_success() {
            Ok(parsed)
        } else {
            tracing::warn!(
                %url,
                status = status.as_u16(),
                app_status = %parsed.status,
                "backend rejected request"
            );
            Err(ClientError::Rejected {
                status: status.as_u16(),
                message: parsed.message,
            })
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<ApiResponse, ClientError> {
        self.post(Endpoint::Login, request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse, ClientError> {
        self.post(Endpoint::Register, request).await
    }

    pub async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<ApiResponse, ClientError> {
        self.post(Endpoint::SubmitFeedback, request).await
    }

    /// Ask the backend whether `key` is still valid
    pub async fn check_key(&self, key: &str) -> Result<ApiResponse, ClientError> {
        self.post(
            Endpoint::CheckKey,
            &CheckKeyRequest {
                key: key.to_string(),
            },
        )
        .await
    }
}
