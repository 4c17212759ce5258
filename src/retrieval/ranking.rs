use std::cmp::Ordering;

use crate::catalog::{MovieCandidate, ScoredMovie};

/// Exact cosine similarity, accumulated in double precision.
///
/// Returns a value in `[-1, 1]`. A zero-norm vector (or a length mismatch)
/// scores 0.0 instead of dividing by zero.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&av, &bv)| {
                let av = av as f64;
                let bv = bv as f64;
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Scores candidates against the query vector and returns the top `limit`.
///
/// Candidates without a stored embedding are dropped; zero-norm embeddings
/// stay in with score 0.0. The sort is stable and descending, so equal scores
/// keep their original retrieval order. The returned projections carry no
/// embedding by construction.
pub fn rank_candidates(
    query: &[f32],
    candidates: Vec<MovieCandidate>,
    limit: usize,
) -> Vec<ScoredMovie> {
    let mut scored: Vec<ScoredMovie> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let embedding = candidate.embedding?;
            Some(ScoredMovie {
                score: cosine_similarity(query, &embedding),
                movie: candidate.summary,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
