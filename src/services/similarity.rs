//! Cosine similarity over embedding vectors.

/// Cosine similarity between two vectors: `dot / (|a| * |b|)`.
///
/// Zero-norm inputs score 0.0. Vectors of different lengths are compared
/// over their common prefix.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert!(close(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0));
    }

    #[test]
    fn identical_vectors_score_one() {
        assert!(close(cosine_similarity(&[0.3, 0.4, 0.5], &[0.3, 0.4, 0.5]), 1.0));
    }

    #[test]
    fn opposite_vectors_score_minus_one() {
        assert!(close(cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]), -1.0));
    }

    #[test]
    fn scale_does_not_change_the_score() {
        let a = [0.2, 0.7, 0.1];
        let b = [0.4, 1.4, 0.2];

        assert!(close(cosine_similarity(&a, &b), 1.0));
    }

    #[test]
    fn zero_norm_inputs_score_zero() {
        assert!(close(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0));
        assert!(close(cosine_similarity(&[], &[]), 0.0));
    }
}
