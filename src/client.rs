use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use crate::error::ToddError;
use crate::models::{InferenceRequest, InferenceResponse};
use crate::persona::GenerationParams;

/// Anything that turns a prompt into raw generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ToddError>;
}

/// Client for a Hugging Face style text-generation endpoint.
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    token: String,
    params: GenerationParams,
}

impl InferenceClient {
    pub fn new(endpoint: &str, token: &str, timeout: Option<Duration>) -> Result<Self, ToddError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
            params: GenerationParams::default(),
        })
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(&self, prompt: &str) -> Result<String, ToddError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: &self.params,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToddError::Remote { status, body });
        }

        let body: InferenceResponse = response
            .json()
            .await
            .map_err(|e| ToddError::MalformedResponse(e.to_string()))?;
        let text = body
            .into_iter()
            .next()
            .and_then(|g| g.generated_text)
            .unwrap_or_default();
        debug!(chars = text.len(), "remote model replied");
        Ok(text)
    }
}
