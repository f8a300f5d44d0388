use super::errors::PlayerError;

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, IteratorRandom};
use std::cmp::Ordering;
use tracing::warn;

/// Index of a maximal value, uniform among all maximizers.
pub(crate) fn pick_max(values: &[f64], rng: &mut SmallRng) -> Option<usize> {
    let best = values.iter().fold(f64::NEG_INFINITY, |acc, &value| acc.max(value));

    (0..values.len())
        .filter(|&arm| values[arm] == best)
        .choose(rng)
}

/// The m arms with the largest values, by decreasing value. Ties are broken
/// deterministically by arm index.
pub(crate) fn top_m(values: &[f64], m: usize) -> Vec<usize> {
    let mut arms: Vec<usize> = (0..values.len()).collect();
    arms.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(Ordering::Equal));
    arms.truncate(m);

    arms
}

/// Arms eligible to replace `current`: previously ranked no better than the
/// current arm, and now ranked at least as high as the worst of the top-m arms.
pub(crate) fn eligible_arms(
    ucbs_old: &[f64],
    ucbs_new: &[f64],
    current: usize,
    min_ucb_of_best: f64,
) -> Vec<usize> {
    (0..ucbs_new.len())
        .filter(|&arm| ucbs_old[arm] <= ucbs_old[current] && ucbs_new[arm] >= min_ucb_of_best)
        .collect()
}

/// Uniform draw among the arms eligible to replace `current`. The eligibility
/// set can be empty when every top ranked arm was previously ranked above the
/// current one; the draw then falls back to the full top-m set.
pub(crate) fn draw_replacement(
    ucbs_old: &[f64],
    ucbs_new: &[f64],
    best_arms: &[usize],
    current: usize,
    rng: &mut SmallRng,
) -> Result<usize, PlayerError> {
    let &worst_of_best = best_arms.last().ok_or(PlayerError::NoArmsAvailable)?;
    let candidates = eligible_arms(ucbs_old, ucbs_new, current, ucbs_new[worst_of_best]);

    if let Some(&arm) = candidates.choose(rng) {
        Ok(arm)
    } else {
        warn!(
            current,
            "Empty replacement candidate set, drawing from the {} best arms",
            best_arms.len()
        );
        best_arms.choose(rng).copied().ok_or(PlayerError::NoArmsAvailable)
    }
}
