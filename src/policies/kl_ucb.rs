use super::policy::{CloneBoxedIndexPolicy, IndexPolicy};

use crate::players::PlayerState;

use serde::{Deserialize, Serialize};

const EPSILON: f64 = 1e-9;
const PRECISION: f64 = 1e-6;
const MAX_ITERATIONS: usize = 50;

/// Bernoulli Kullback-Leibler divergence kl(p, q), with both arguments
/// clamped away from 0 and 1.
fn kl_bernoulli(p: f64, q: f64) -> f64 {
    let p = p.clamp(EPSILON, 1.0 - EPSILON);
    let q = q.clamp(EPSILON, 1.0 - EPSILON);

    p * (p / q).ln() + (1.0 - p) * ((1.0 - p) / (1.0 - q)).ln()
}

/// Largest q in [mean, 1] with kl(mean, q) <= budget, by bisection.
fn kl_upper_bound(mean: f64, budget: f64) -> f64 {
    let mut lower = mean;
    let mut upper = 1.0;

    for _ in 0..MAX_ITERATIONS {
        if upper - lower < PRECISION {
            break;
        }
        let q = 0.5 * (lower + upper);
        if kl_bernoulli(mean, q) > budget {
            upper = q;
        } else {
            lower = q;
        }
    }

    0.5 * (lower + upper)
}

/// klUCB index for Bernoulli rewards: the largest mean still compatible with
/// the observations at exploration budget ln(t) + c ln(ln(t)). Tighter than
/// UCB1 on bounded rewards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KlUcb {
    c: f64,
}

impl KlUcb {
    pub fn new(c: f64) -> Self {
        Self { c }
    }
}

impl CloneBoxedIndexPolicy for KlUcb {
    fn clone_box(&self) -> Box<dyn IndexPolicy + Send> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl IndexPolicy for KlUcb {
    fn compute_index(&self, state: &PlayerState) -> Vec<f64> {
        // ln(ln(t)) needs t >= 2 to stay finite
        let log_t = (state.t().max(2) as f64).ln();
        let budget = log_t + self.c * log_t.ln();

        state
            .nb_draws()
            .iter()
            .zip(state.cum_rewards().iter())
            .map(|(&draws, &rewards)| {
                if draws == 0 {
                    1.0
                } else {
                    let mean = (rewards / draws as f64).clamp(0.0, 1.0);
                    kl_upper_bound(mean, budget / draws as f64)
                }
            })
            .collect()
    }
}
