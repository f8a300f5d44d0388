use super::policy::{CloneBoxedIndexPolicy, IndexPolicy};

use crate::players::PlayerState;

use serde::{Deserialize, Serialize};

/// UCB1 index: empirical mean plus an exploration bonus shrinking with the
/// number of draws. Arms never drawn get an infinite index so they rank
/// first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ucb1 {
    alpha: f64,
}

impl Ucb1 {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl CloneBoxedIndexPolicy for Ucb1 {
    fn clone_box(&self) -> Box<dyn IndexPolicy + Send> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl IndexPolicy for Ucb1 {
    fn compute_index(&self, state: &PlayerState) -> Vec<f64> {
        let log_t = (state.t().max(1) as f64).ln();

        state
            .nb_draws()
            .iter()
            .zip(state.cum_rewards().iter())
            .map(|(&draws, &rewards)| {
                if draws == 0 {
                    f64::INFINITY
                } else {
                    let mean = rewards / draws as f64;
                    mean + (self.alpha * log_t / (2.0 * draws as f64)).sqrt()
                }
            })
            .collect()
    }
}
