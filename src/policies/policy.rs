use super::kl_ucb::KlUcb;
use super::ucb::Ucb1;

use crate::players::PlayerState;

use serde::{Deserialize, Serialize};

impl Clone for Box<dyn IndexPolicy + Send> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub trait CloneBoxedIndexPolicy {
    fn clone_box(&self) -> Box<dyn IndexPolicy + Send>;
}

/// Maps a player's own statistics (draw counts, cumulative rewards, round
/// counter) to one quality index per arm. Pure: a call never mutates the
/// state it reads.
#[typetag::serde(tag = "type")]
pub trait IndexPolicy: Send + CloneBoxedIndexPolicy {
    fn compute_index(&self, state: &PlayerState) -> Vec<f64>;
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum PolicyType {
    Ucb1 { alpha: f64 },
    KlUcb { c: f64 },
}

impl PolicyType {
    pub fn into_inner(self) -> Box<dyn IndexPolicy + Send> {
        match self {
            PolicyType::Ucb1 { alpha } => Box::new(Ucb1::new(alpha)),
            PolicyType::KlUcb { c } => Box::new(KlUcb::new(c)),
        }
    }
}

impl From<PolicyType> for Box<dyn IndexPolicy + Send> {
    fn from(policy: PolicyType) -> Self {
        policy.into_inner()
    }
}
