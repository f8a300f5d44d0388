use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("No arm played yet, call choose_arm_to_play first")]
    NoArmPlayed,
    #[error("No arms available to select from")]
    NoArmsAvailable,
}

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Unknown strategy {0}")]
    UnknownStrategy(String),
    #[error("Not enough arms: {nb_arms} arms for {nb_players} players")]
    NotEnoughArms { nb_arms: usize, nb_players: usize },
    #[error("At least one player is required")]
    NoPlayers,
}
