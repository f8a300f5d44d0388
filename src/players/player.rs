use super::errors::{PlayerError, StrategyError};
use super::mc_top_m::PlayerMCTop;
use super::rand_top_m::PlayerRandTop;
use super::rand_top_m_old::PlayerRandTopOld;
use super::ranking;
use super::selfish::PlayerSelfish;

use crate::policies::IndexPolicy;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

/// Statistics a player accumulates about its own draws. Owned exclusively by
/// one player and never shared: the only information flow between players goes
/// through the collision flags computed by the environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub(crate) nb_arms: usize,
    pub(crate) nb_players: usize,
    pub(crate) nb_draws: Vec<u64>,
    pub(crate) cum_rewards: Vec<f64>,
    pub(crate) t: u64,
    pub(crate) ucbs: Vec<f64>,
    pub(crate) my_arm: Option<usize>,
    pub(crate) has_collided: bool,
}

impl PlayerState {
    pub fn new(nb_arms: usize, nb_players: usize) -> Self {
        let mut state = Self {
            nb_arms,
            nb_players,
            nb_draws: Vec::new(),
            cum_rewards: Vec::new(),
            t: 0,
            ucbs: Vec::new(),
            my_arm: None,
            has_collided: false,
        };
        state.clear();

        state
    }

    pub fn clear(&mut self) {
        self.nb_draws = vec![0; self.nb_arms];
        self.cum_rewards = vec![0.0; self.nb_arms];
        self.t = 0;
        self.ucbs = vec![0.0; self.nb_arms];
        self.my_arm = None;
        self.has_collided = false;
    }

    pub fn nb_arms(&self) -> usize {
        self.nb_arms
    }

    pub fn nb_players(&self) -> usize {
        self.nb_players
    }

    /// Number of times this player selected each arm.
    pub fn nb_draws(&self) -> &[u64] {
        &self.nb_draws
    }

    /// Cumulative reward collected on each arm. Not the player's total reward,
    /// these are the per arm statistics feeding the index policy.
    pub fn cum_rewards(&self) -> &[f64] {
        &self.cum_rewards
    }

    pub fn t(&self) -> u64 {
        self.t
    }

    /// Index vector from the previous round's policy evaluation.
    pub fn ucbs(&self) -> &[f64] {
        &self.ucbs
    }

    pub fn my_arm(&self) -> Option<usize> {
        self.my_arm
    }

    pub fn has_collided(&self) -> bool {
        self.has_collided
    }

    /// True while ranking must be ignored: some arm has never been drawn (or
    /// no arm is held yet), so every arm has to be sampled once first.
    pub(crate) fn needs_warmup(&self) -> bool {
        self.my_arm.is_none() || self.nb_draws.iter().any(|&draws| draws == 0)
    }

    /// A least drawn arm, uniform among ties.
    pub(crate) fn least_drawn_arm(&self, rng: &mut SmallRng) -> Result<usize, PlayerError> {
        let negated_draws: Vec<f64> = self.nb_draws.iter().map(|&draws| -(draws as f64)).collect();

        ranking::pick_max(&negated_draws, rng).ok_or(PlayerError::NoArmsAvailable)
    }

    /// Bookkeeping shared by every strategy: credit the reward to the arm just
    /// played, record the collision flag and advance the round counter.
    pub(crate) fn record(&mut self, reward: f64, collision: bool) -> Result<(), PlayerError> {
        let arm = self.my_arm.ok_or(PlayerError::NoArmPlayed)?;

        self.cum_rewards[arm] += reward;
        self.nb_draws[arm] += 1;
        self.has_collided = collision;
        self.t += 1;

        Ok(())
    }
}

impl Clone for Box<dyn Player + Send> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub trait ClonePlayer {
    fn clone_box(&self) -> Box<dyn Player + Send>;
}

/// One independent decision agent. Per round the environment first asks every
/// player for its next arm through `choose_arm_to_play`, resolves collisions
/// and rewards, then hands each player its own outcome through
/// `receive_reward`.
#[typetag::serde(tag = "type")]
pub trait Player: Send + ClonePlayer {
    fn strategy_type(&self) -> StrategyType;

    /// Stable display name for reporting.
    fn name(&self) -> &'static str;

    /// Reset all counters for a fresh trial, keeping arm and player counts.
    fn clear(&mut self);

    fn state(&self) -> &PlayerState;

    /// Decide which arm to play this round, from this player's own state only.
    fn choose_arm_to_play(&mut self) -> Result<usize, PlayerError>;

    /// Observe the outcome of the arm reported by the last
    /// `choose_arm_to_play` call.
    fn receive_reward(&mut self, reward: f64, collision: bool) -> Result<(), PlayerError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyType {
    RandTopMOld,
    RandTopM,
    MCTopM,
    Selfish,
}

impl FromStr for StrategyType {
    type Err = StrategyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "RandTopMOld" => Ok(StrategyType::RandTopMOld),
            "RandTopM" => Ok(StrategyType::RandTopM),
            "MCTopM" => Ok(StrategyType::MCTopM),
            "Selfish" => Ok(StrategyType::Selfish),
            _ => Err(StrategyError::UnknownStrategy(name.to_string())),
        }
    }
}

/// Build `nb_players` independently seeded players running the same strategy
/// over `nb_arms` arms, each with its own instance of the index policy.
pub fn new_players(
    strategy: StrategyType,
    nb_arms: usize,
    nb_players: usize,
    policy: impl Into<Box<dyn IndexPolicy + Send>>,
    seed: Option<u64>,
) -> Result<Vec<Box<dyn Player + Send>>, StrategyError> {
    if nb_players == 0 {
        return Err(StrategyError::NoPlayers);
    }
    if nb_arms < nb_players {
        return Err(StrategyError::NotEnoughArms {
            nb_arms,
            nb_players,
        });
    }

    info!(?strategy, nb_arms, nb_players, "Creating players");

    let policy = policy.into();

    Ok((0..nb_players)
        .map(|player_id| {
            let player_seed = seed.map(|seed| seed.wrapping_add(player_id as u64));
            build_player(strategy, nb_arms, nb_players, policy.clone(), player_seed)
        })
        .collect())
}

fn build_player(
    strategy: StrategyType,
    nb_arms: usize,
    nb_players: usize,
    policy: Box<dyn IndexPolicy + Send>,
    seed: Option<u64>,
) -> Box<dyn Player + Send> {
    match strategy {
        StrategyType::RandTopMOld => {
            Box::new(PlayerRandTopOld::new(nb_arms, nb_players, policy, seed))
        }
        StrategyType::RandTopM => Box::new(PlayerRandTop::new(nb_arms, nb_players, policy, seed)),
        StrategyType::MCTopM => Box::new(PlayerMCTop::new(nb_arms, nb_players, policy, seed)),
        StrategyType::Selfish => Box::new(PlayerSelfish::new(nb_arms, nb_players, policy, seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::testing::ScriptedPolicy;
    use rand::SeedableRng;

    const SEED: u64 = 1234;

    #[test]
    fn clear_resets_counters() {
        let mut state = PlayerState::new(3, 2);
        state.my_arm = Some(1);
        state.record(1.0, true).unwrap();
        assert_eq!(state.t(), 1);

        state.clear();
        assert_eq!(state.nb_draws(), &[0, 0, 0]);
        assert_eq!(state.cum_rewards(), &[0.0, 0.0, 0.0]);
        assert_eq!(state.t(), 0);
        assert_eq!(state.my_arm(), None);
        assert!(!state.has_collided());
    }

    #[test]
    fn record_without_arm_fails() {
        let mut state = PlayerState::new(3, 2);
        assert!(state.record(1.0, false).is_err());
    }

    #[test]
    fn record_updates_played_arm_only() {
        let mut state = PlayerState::new(3, 2);
        state.my_arm = Some(2);

        state.record(0.5, true).unwrap();
        assert_eq!(state.nb_draws(), &[0, 0, 1]);
        assert_eq!(state.cum_rewards(), &[0.0, 0.0, 0.5]);
        assert!(state.has_collided());
        assert_eq!(state.t(), 1);
    }

    #[test]
    fn least_drawn_arm_has_min_draws() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut state = PlayerState::new(4, 2);
        state.nb_draws = vec![2, 0, 1, 0];

        for _ in 0..20 {
            let arm = state.least_drawn_arm(&mut rng).unwrap();
            assert!(arm == 1 || arm == 3);
        }
    }

    #[test]
    fn warmup_covers_every_arm() {
        let nb_arms = 5;
        let mut players = new_players(
            StrategyType::MCTopM,
            nb_arms,
            2,
            ScriptedPolicy::flat(nb_arms),
            Some(SEED),
        )
        .unwrap();

        let player = &mut players[0];
        for _ in 0..nb_arms {
            let min_draws = *player.state().nb_draws().iter().min().unwrap();
            let arm = player.choose_arm_to_play().unwrap();
            assert!(arm < nb_arms);
            assert_eq!(player.state().nb_draws()[arm], min_draws);
            player.receive_reward(1.0, false).unwrap();
        }

        assert!(player.state().nb_draws().iter().all(|&draws| draws == 1));
    }

    #[test]
    fn draw_counts_never_decrease() {
        let nb_arms = 4;
        let mut players = new_players(
            StrategyType::RandTopM,
            nb_arms,
            2,
            ScriptedPolicy::flat(nb_arms),
            Some(SEED),
        )
        .unwrap();

        let player = &mut players[0];
        let mut previous = player.state().nb_draws().to_vec();
        for round in 0..50 {
            let arm = player.choose_arm_to_play().unwrap();
            assert!(arm < nb_arms);
            player.receive_reward(0.0, round % 3 == 0).unwrap();

            let current = player.state().nb_draws().to_vec();
            assert!(previous.iter().zip(current.iter()).all(|(&a, &b)| a <= b));
            previous = current;
        }
    }

    #[test]
    fn strategy_from_name() {
        assert_eq!(
            StrategyType::from_str("RandTopMOld").unwrap(),
            StrategyType::RandTopMOld
        );
        assert_eq!(
            StrategyType::from_str("RandTopM").unwrap(),
            StrategyType::RandTopM
        );
        assert_eq!(
            StrategyType::from_str("MCTopM").unwrap(),
            StrategyType::MCTopM
        );
        assert_eq!(
            StrategyType::from_str("Selfish").unwrap(),
            StrategyType::Selfish
        );
        assert!(matches!(
            StrategyType::from_str("GreedyTopM"),
            Err(StrategyError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn factory_rejects_bad_configuration() {
        assert!(matches!(
            new_players(StrategyType::RandTopM, 3, 0, ScriptedPolicy::flat(3), None),
            Err(StrategyError::NoPlayers)
        ));
        assert!(matches!(
            new_players(StrategyType::RandTopM, 2, 3, ScriptedPolicy::flat(2), None),
            Err(StrategyError::NotEnoughArms { .. })
        ));
    }

    #[test]
    fn players_are_independent() {
        let mut players = new_players(
            StrategyType::Selfish,
            3,
            2,
            ScriptedPolicy::flat(3),
            Some(SEED),
        )
        .unwrap();

        let arm = players[0].choose_arm_to_play().unwrap();
        players[0].receive_reward(1.0, false).unwrap();

        assert_eq!(players[0].state().t(), 1);
        assert_eq!(players[0].state().nb_draws()[arm], 1);
        assert_eq!(players[1].state().t(), 0);
        assert!(players[1].state().nb_draws().iter().all(|&draws| draws == 0));
    }

    #[test]
    fn display_names_are_stable() {
        let names: Vec<&str> = [
            StrategyType::RandTopMOld,
            StrategyType::RandTopM,
            StrategyType::MCTopM,
            StrategyType::Selfish,
        ]
        .into_iter()
        .map(|strategy| {
            new_players(strategy, 3, 2, ScriptedPolicy::flat(3), Some(SEED)).unwrap()[0].name()
        })
        .collect();

        assert_eq!(names, vec!["RandTopMOld", "RandTopM", "MCTopM", "Selfish"]);
    }

    #[test]
    fn serde_round_trip() {
        let mut players = new_players(
            StrategyType::MCTopM,
            4,
            2,
            ScriptedPolicy::flat(4),
            Some(SEED),
        )
        .unwrap();

        for _ in 0..6 {
            players[0].choose_arm_to_play().unwrap();
            players[0].receive_reward(1.0, false).unwrap();
        }

        let serialized = serde_json::to_string(&players[0]).unwrap();
        let restored: Box<dyn Player + Send> = serde_json::from_str(&serialized).unwrap();

        assert_eq!(restored.strategy_type(), StrategyType::MCTopM);
        assert_eq!(restored.state(), players[0].state());
    }
}
