mod config;
mod error;
mod openai;

use futures::future::BoxFuture;

pub use config::OpenAiConfig;
pub use error::{EmbeddingError, EmbeddingResult};
pub use openai::OpenAiEmbedder;

/// Abstraction over the text embedding backend used for hint ranking.
///
/// Implementations are cheap to clone and run their requests on owned data,
/// so callers can fan out one future per candidate link.
pub trait Embedder: Send + Sync {
    /// Produce an embedding vector for a single text.
    fn embed(&self, text: String) -> BoxFuture<'static, EmbeddingResult<Vec<f32>>>;
}
