use super::error::{EmbeddingError, EmbeddingResult};

/// Default OpenAI-compatible API root used when no override is configured.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default embedding model identifier.
const DEFAULT_MODEL: &str = "text-embedding-ada-002";

/// Runtime configuration describing how to reach the embedding backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API root of an OpenAI-compatible provider, without the trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Embedding model identifier.
    pub model: String,
}

impl OpenAiConfig {
    /// Construct a configuration from an explicit API key, keeping the default
    /// endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the configuration at a different API root (proxy or compatible provider).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Select a different embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build a configuration by reading the expected environment variables.
    ///
    /// `EMBEDDING_API_KEY` is required, with `OPENAI_API_KEY` accepted as a
    /// fallback. `EMBEDDING_BASE_URL` and `EMBEDDING_MODEL` are optional.
    pub fn from_env() -> EmbeddingResult<Self> {
        let api_key = std::env::var("EMBEDDING_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| EmbeddingError::MissingEnvVar {
                var: "EMBEDDING_API_KEY",
            })?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("EMBEDDING_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config = config.with_model(model);
        }

        Ok(config)
    }
}
