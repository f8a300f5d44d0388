use super::errors::PlayerError;
use super::player::{ClonePlayer, Player, PlayerState, StrategyType};
use super::ranking;

use crate::policies::IndexPolicy;
use crate::rng::MaybeSeededRng;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// RandTopM as written in the literature, quirk included: a player only reacts
/// when its arm drops out of the M best. A collision alone never triggers a
/// switch, which is certainly not the spirit of the algorithm as described by
/// L. Besson, but it is kept as a separate variant on purpose.
#[derive(Clone, Serialize, Deserialize)]
pub struct PlayerRandTopOld {
    state: PlayerState,
    policy: Box<dyn IndexPolicy + Send>,
    rng: MaybeSeededRng,
}

impl PlayerRandTopOld {
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

impl ClonePlayer for PlayerRandTopOld {
    fn clone_box(&self) -> Box<dyn Player + Send> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl Player for PlayerRandTopOld {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::RandTopMOld
    }

    fn name(&self) -> &'static str {
        "RandTopMOld"
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
        let current = self.state.my_arm.ok_or(PlayerError::NoArmPlayed)?;

        let ucbs_new = self.policy.compute_index(&self.state);
        let best_arms = ranking::top_m(&ucbs_new, self.state.nb_players);

        let mut arm = current;
        if !best_arms.contains(&current) {
            // the current arm is no longer a good choice
            arm = if self.state.has_collided {
                // after a collision, any of the M best arms will do
                best_arms
                    .choose(self.rng.get_rng())
                    .copied()
                    .ok_or(PlayerError::NoArmsAvailable)?
            } else {
                ranking::draw_replacement(
                    &self.state.ucbs,
                    &ucbs_new,
                    &best_arms,
                    current,
                    self.rng.get_rng(),
                )?
            };
        }

        self.state.my_arm = Some(arm);
        self.state.ucbs = ucbs_new;

        Ok(arm)
    }

    fn receive_reward(&mut self, reward: f64, collision: bool) -> Result<(), PlayerError> {
        self.state.record(reward, collision)
    }
}
