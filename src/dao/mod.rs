/// Embedding backend used for hint ranking.
pub mod embedding;
