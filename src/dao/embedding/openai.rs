use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{
    Embedder,
    config::OpenAiConfig,
    error::{EmbeddingError, EmbeddingResult},
};

/// Embedding backend talking to an OpenAI-compatible `/embeddings` endpoint.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
    model: Arc<str>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// Build an embedder from the given configuration.
    pub fn new(config: OpenAiConfig) -> EmbeddingResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| EmbeddingError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            api_key: Arc::from(config.api_key),
            model: Arc::from(config.model),
        })
    }

    async fn fetch_embedding(&self, text: String) -> EmbeddingResult<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url);
        let body = EmbeddingRequest {
            model: &self.model,
            input: &text,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|source| EmbeddingError::RequestSend { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::RequestStatus { status });
        }

        let payload = response
            .json::<EmbeddingResponse>()
            .await
            .map_err(|source| EmbeddingError::DecodeResponse { source })?;

        payload
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or(EmbeddingError::EmptyResponse)
    }
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, text: String) -> BoxFuture<'static, EmbeddingResult<Vec<f32>>> {
        let embedder = self.clone();
        Box::pin(async move { embedder.fetch_embedding(text).await })
    }
}
