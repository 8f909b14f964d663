use serde_json::Value;
use thiserror::Error;

use libris_core::record::{Document, Record, RecordId};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server error ({status}): {message}")]
    Server { status: reqwest::StatusCode, message: String },
}

/// Thin HTTP wrapper over the four catalog endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self { Self { http: reqwest::Client::new(), base_url: base_url.into() } }

    pub fn base_url(&self) -> &str { &self.base_url }

    pub async fn list_books(&self) -> Result<Vec<Record>, ClientError> {
        let response = self.http.get(format!("{}/books", self.base_url)).send().await?;
        Self::decode(response).await
    }

    pub async fn create_book(&self, fields: &Document) -> Result<Record, ClientError> {
        let response = self.http.post(format!("{}/books", self.base_url)).json(fields).send().await?;
        Self::decode(response).await
    }

    pub async fn update_book(&self, id: RecordId, fields: &Document) -> Result<Record, ClientError> {
        let response = self.http.put(format!("{}/books/{}", self.base_url, id)).json(fields).send().await?;
        Self::decode(response).await
    }

    pub async fn delete_book(&self, id: RecordId) -> Result<Record, ClientError> {
        let response = self.http.delete(format!("{}/books/{}", self.base_url, id)).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            // failure bodies are `{"message": ...}`; fall back to the status line
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Server { status, message });
        }
        Ok(response.json().await?)
    }
}
