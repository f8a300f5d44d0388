//! Decentralized multi-player multi-armed bandits with collision sensing.
//!
//! M independent players repeatedly pick among K shared arms; when two or more
//! players pick the same arm in the same round their rewards are suppressed.
//! Each player runs a local strategy deciding which arm to play from its own
//! observation history only:
//! * `PlayerRandTopOld`, RandTopM as defined in L. Besson, É. Kaufmann,
//!   "Multi-Player Bandits Models Revisited".
//! * `PlayerRandTop`, a fixed version of RandTopM where a collision always
//!   forces a player to change arm.
//! * `PlayerMCTop`, MCTopM as defined in the considered article.
//! * `PlayerSelfish`, a heuristic for the no-sensing framework.

pub mod players;
pub mod policies;
mod rng;

pub use players::{
    new_players, Player, PlayerError, PlayerMCTop, PlayerRandTop, PlayerRandTopOld, PlayerSelfish,
    PlayerState, StrategyError, StrategyType,
};
pub use policies::{IndexPolicy, PolicyType};
