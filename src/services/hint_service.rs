use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    dto::hint::{Closeness, HintRequest, HintResponse, LinkSimilarity},
    error::ServiceError,
    services::similarity::cosine_similarity,
    state::SharedState,
};

/// Score every candidate link against the target article.
///
/// The target is embedded once, candidates concurrently. A candidate whose
/// embedding fails is dropped from the response; a failure on the target
/// aborts the whole call.
pub async fn rank_links(
    state: &SharedState,
    request: HintRequest,
) -> Result<HintResponse, ServiceError> {
    let HintRequest { links, target } = request;

    let target = target.trim().to_string();
    if target.is_empty() {
        return Err(ServiceError::InvalidInput(
            "target must not be empty".into(),
        ));
    }
    if links.is_empty() {
        return Err(ServiceError::InvalidInput("links must not be empty".into()));
    }
    let max_candidates = state.config().hint().max_candidates;
    if links.len() > max_candidates {
        return Err(ServiceError::InvalidInput(format!(
            "too many links: {} exceeds the limit of {max_candidates}",
            links.len()
        )));
    }

    let embedder = state.require_embedder()?;

    let target_embedding = embedder.embed(target.clone()).await?;

    let candidates: Vec<_> = links.iter().map(|link| embedder.embed(link.clone())).collect();
    let embeddings = join_all(candidates).await;

    let policy = state.config().hint();
    let mut similarities = Vec::with_capacity(links.len());
    for (link, embedding) in links.into_iter().zip(embeddings) {
        match embedding {
            Ok(embedding) => {
                let similarity = cosine_similarity(&target_embedding, &embedding);
                similarities.push(LinkSimilarity {
                    link,
                    similarity,
                    closeness: Closeness::bucket(similarity, policy),
                });
            }
            Err(err) => {
                warn!(link = %link, error = %err, "dropping candidate after embedding failure");
            }
        }
    }

    debug!(target = %target, scored = similarities.len(), "ranked hint candidates");

    Ok(HintResponse { similarities })
}
