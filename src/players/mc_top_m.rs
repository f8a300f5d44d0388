use super::errors::PlayerError;
use super::player::{ClonePlayer, Player, PlayerState, StrategyType};
use super::ranking;

use crate::policies::IndexPolicy;
use crate::rng::MaybeSeededRng;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// MCTopM, the "musical chairs" refinement of RandTopM. A player that kept
/// its arm through a collision-free round marks it as its chair; once seated
/// it tolerates collisions and only moves when the arm drops out of the M
/// best. An unseated player still vacates its arm on collision.
#[derive(Clone, Serialize, Deserialize)]
pub struct PlayerMCTop {
    state: PlayerState,
    policy: Box<dyn IndexPolicy + Send>,
    rng: MaybeSeededRng,
    is_on_chair: bool,
}

impl PlayerMCTop {
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
            is_on_chair: false,
        }
    }

    pub fn is_on_chair(&self) -> bool {
        self.is_on_chair
    }
}

impl ClonePlayer for PlayerMCTop {
    fn clone_box(&self) -> Box<dyn Player + Send> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl Player for PlayerMCTop {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::MCTopM
    }

    fn name(&self) -> &'static str {
        "MCTopM"
    }

    fn clear(&mut self) {
        self.state.clear();
        self.is_on_chair = false;
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
            // the current arm is no longer a good choice, move and stand up
            arm = ranking::draw_replacement(
                &self.state.ucbs,
                &ucbs_new,
                &best_arms,
                current,
                self.rng.get_rng(),
            )?;
            self.is_on_chair = false;
        } else if self.state.has_collided && !self.is_on_chair {
            // contested arm and no chair yet, move to any of the M best
            arm = best_arms
                .choose(self.rng.get_rng())
                .copied()
                .ok_or(PlayerError::NoArmsAvailable)?;
            self.is_on_chair = false;
        } else {
            // an uncontested round earns the chair; once seated, the player
            // sits through collisions
            self.is_on_chair = true;
        }

        self.state.my_arm = Some(arm);
        self.state.ucbs = ucbs_new;

        Ok(arm)
    }

    fn receive_reward(&mut self, reward: f64, collision: bool) -> Result<(), PlayerError> {
        self.state.record(reward, collision)
    }
}
