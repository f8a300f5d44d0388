use super::errors::PlayerError;
use super::player::{ClonePlayer, Player, PlayerState, StrategyType};
use super::ranking;

use crate::policies::IndexPolicy;
use crate::rng::MaybeSeededRng;

use serde::{Deserialize, Serialize};

/// Selfish heuristic for the no-sensing setting. The player simply plays the
/// arm with the best stored index; it never observes the raw reward nor the
/// collision flag, only the net reward (zero on collision), so collisions
/// corrupt its indices instead of triggering an explicit reaction.
#[derive(Clone, Serialize, Deserialize)]
pub struct PlayerSelfish {
    state: PlayerState,
    policy: Box<dyn IndexPolicy + Send>,
    rng: MaybeSeededRng,
}

impl PlayerSelfish {
    pub fn new(
        nb_arms: usize,
        nb_players: usize,
        policy: Box<dyn IndexPolicy + Send>,
        seed: Option<u64>,
    ) -> Self {
        Self {
            state: PlayerState::new(nb_arms, nb_players),
            policy,
            rng: MaybeSeededRng::new(seed),
        }
    }
}

impl ClonePlayer for PlayerSelfish {
    fn clone_box(&self) -> Box<dyn Player + Send> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl Player for PlayerSelfish {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Selfish
    }

    fn name(&self) -> &'static str {
        "Selfish"
    }

    fn clear(&mut self) {
        self.state.clear();
    }

    fn state(&self) -> &PlayerState {
        &self.state
    }

    fn choose_arm_to_play(&mut self) -> Result<usize, PlayerError> {
        if self.state.needs_warmup() {
            let arm = self.state.least_drawn_arm(self.rng.get_rng())?;
            self.state.my_arm = Some(arm);
            return Ok(arm);
        }

        // best arm according to the indices stored last round, then refresh
        // them for the next comparison
        let arm = ranking::pick_max(&self.state.ucbs, self.rng.get_rng())
            .ok_or(PlayerError::NoArmsAvailable)?;
        self.state.my_arm = Some(arm);
        self.state.ucbs = self.policy.compute_index(&self.state);

        Ok(arm)
    }

    fn receive_reward(&mut self, reward: f64, collision: bool) -> Result<(), PlayerError> {
        // no sensing: only the net reward is observed, never the collision
        let reward_no_sensing = if collision { 0.0 } else { reward };

        self.state.record(reward_no_sensing, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::testing::{ranked_player, ScriptedPolicy};

    fn player(scripts: Vec<Vec<f64>>, seed: u64) -> PlayerSelfish {
        let mut player = PlayerSelfish::new(3, 2, ScriptedPolicy::new(scripts), Some(seed));
        ranked_player(&mut player.state);
        player
    }

    #[test]
    fn collision_suppresses_the_reward() {
        let mut player = player(vec![vec![1.0, 1.0, 1.0]], 1234);
        player.state.my_arm = Some(1);

        player.receive_reward(5.0, true).unwrap();
        assert_eq!(player.state().cum_rewards()[1], 0.0);
        assert_eq!(player.state().nb_draws()[1], 1);
    }

    #[test]
    fn clean_reward_is_credited() {
        let mut player = player(vec![vec![1.0, 1.0, 1.0]], 1234);
        player.state.my_arm = Some(1);

        player.receive_reward(5.0, false).unwrap();
        assert_eq!(player.state().cum_rewards()[1], 5.0);
    }

    #[test]
    fn collision_flag_is_never_stored() {
        let mut player = player(vec![vec![1.0, 1.0, 1.0]], 1234);
        player.state.my_arm = Some(1);

        player.receive_reward(5.0, true).unwrap();
        assert!(!player.state().has_collided());
    }

    #[test]
    fn plays_best_stored_index() {
        let mut player = player(vec![vec![0.5, 0.5, 0.5]], 1234);
        player.state.ucbs = vec![0.1, 0.9, 0.2];
        player.state.my_arm = Some(0);

        assert_eq!(player.choose_arm_to_play().unwrap(), 1);
        // indices were refreshed from the policy for the next round
        assert_eq!(player.state().ucbs(), &[0.5, 0.5, 0.5]);
    }
}
