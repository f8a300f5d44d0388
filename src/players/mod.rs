pub mod errors;
mod mc_top_m;
mod player;
mod rand_top_m;
mod rand_top_m_old;
mod ranking;
mod selfish;

pub use errors::{PlayerError, StrategyError};
pub use mc_top_m::PlayerMCTop;
pub use player::{new_players, Player, PlayerState, StrategyType};
pub use rand_top_m::PlayerRandTop;
pub use rand_top_m_old::PlayerRandTopOld;
pub use selfish::PlayerSelfish;

#[cfg(test)]
pub(crate) mod testing {
    use super::player::PlayerState;
    use crate::policies::{CloneBoxedIndexPolicy, IndexPolicy};

    use serde::{Deserialize, Serialize};

    /// Index policy replaying a fixed script of index vectors, keyed by the
    /// player's round counter. The last vector repeats once the script is
    /// exhausted.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ScriptedPolicy {
        scripts: Vec<Vec<f64>>,
    }

    impl ScriptedPolicy {
        pub fn new(scripts: Vec<Vec<f64>>) -> Box<dyn IndexPolicy + Send> {
            Box::new(Self { scripts })
        }

        /// A script with one flat index vector, for tests that only exercise
        /// warm-up and bookkeeping.
        pub fn flat(nb_arms: usize) -> Box<dyn IndexPolicy + Send> {
            Self::new(vec![vec![1.0; nb_arms]])
        }
    }

    impl CloneBoxedIndexPolicy for ScriptedPolicy {
        fn clone_box(&self) -> Box<dyn IndexPolicy + Send> {
            Box::new(self.clone())
        }
    }

    #[typetag::serde]
    impl IndexPolicy for ScriptedPolicy {
        fn compute_index(&self, state: &PlayerState) -> Vec<f64> {
            let step = (state.t() as usize).min(self.scripts.len() - 1);

            self.scripts[step].clone()
        }
    }

    /// Put a state past the warm-up phase: every arm drawn a few times, flat
    /// per arm statistics, stored indices zeroed.
    pub fn ranked_player(state: &mut PlayerState) {
        state.nb_draws = vec![5; state.nb_arms];
        state.cum_rewards = vec![0.0; state.nb_arms];
        state.t = 5 * state.nb_arms as u64;
        state.ucbs = vec![0.0; state.nb_arms];
        state.my_arm = Some(0);
    }
}
