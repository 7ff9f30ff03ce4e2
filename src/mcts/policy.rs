//! PUCT selection and visit-count policies.
//!
//! - `puct_score` / `select_puct`: which edge a simulation follows
//! - `visits_to_policy`: turn root visit counts into a move distribution

use crate::core::GameRng;

use super::node::NodeStats;

/// Keeps the exploration term of unvisited edges non-zero at `N_s = 0`.
pub const EXPLORATION_EPSILON: f64 = 1e-8;

/// PUCT score of `action` at `node`.
///
/// Traversed edges: `Q + c * P * sqrt(N_s) / (1 + N_sa)`.
/// Untraversed edges: `c * P * sqrt(N_s + eps)`.
#[must_use]
pub fn puct_score(node: &NodeStats, action: usize, c_puct: f64) -> f64 {
    let prior = f64::from(node.priors[action]);
    let n_s = f64::from(node.visits);
    match node.edge(action) {
        Some(edge) => edge.q + c_puct * prior * n_s.sqrt() / (1.0 + f64::from(edge.visits)),
        None => c_puct * prior * (n_s + EXPLORATION_EPSILON).sqrt(),
    }
}

/// Legal action with the highest PUCT score.
///
/// Ties go to the lowest action index. `None` only when nothing is legal.
#[must_use]
pub fn select_puct(node: &NodeStats, c_puct: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for action in node.legal_actions() {
        let score = puct_score(node, action, c_puct);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((action, score)),
        }
    }
    best.map(|(action, _)| action)
}

/// Convert root visit counts into a probability vector.
///
/// At temperature 0 the result is one-hot on a most-visited action, ties
/// broken uniformly with `rng`. Otherwise each entry is `N^(1/T)`
/// normalized. Counts must not all be zero.
#[must_use]
pub fn visits_to_policy(counts: &[u32], temperature: f64, rng: &mut GameRng) -> Vec<f32> {
    let max = counts.iter().copied().max().unwrap_or(0);
    let mut probs = vec![0.0f32; counts.len()];
    if max == 0 {
        return probs;
    }

    if temperature <= 0.0 {
        let best: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter_map(|(a, &c)| (c == max).then_some(a))
            .collect();
        if let Some(&action) = rng.choose(&best) {
            probs[action] = 1.0;
        }
        return probs;
    }

    // Scale by the max first so small temperatures don't overflow.
    let exponent = 1.0 / temperature;
    let weights: Vec<f64> = counts
        .iter()
        .map(|&c| (f64::from(c) / f64::from(max)).powf(exponent))
        .collect();
    let total: f64 = weights.iter().sum();
    for (p, w) in probs.iter_mut().zip(&weights) {
        *p = (w / total) as f32;
    }
    probs
}
