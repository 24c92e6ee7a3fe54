/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Hint ranking orchestration.
pub mod hint_service;
/// Session lifecycle coordination.
pub mod session_service;
/// Cosine similarity over embedding vectors.
pub mod similarity;
