use reqwest::Client;
use serde_json::Value;

use crate::translate::TranslationRequest;

use super::error::ClientError;

/// The server answered with a JSON body, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// HTTP client for `POST /api/translate`.
#[derive(Debug, Clone)]
pub struct TranslateApi {
    client: Client,
    endpoint: String,
}

impl TranslateApi {
    pub fn new(server_url: &str) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(client: Client, server_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/translate", server_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fails only when no JSON body could be obtained (connection refused,
    /// interrupted transfer, non-JSON body).
    pub async fn post(&self, request: &TranslationRequest) -> Result<ApiResponse, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok(ApiResponse { status, body })
    }
}
