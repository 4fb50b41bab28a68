use alloc::string::String;
use thiserror::Error;

use crate::CardIndex;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Flip duration must be between 350 and 3000 ms (got {requested}), it has been set to 350 ms")]
    InvalidFlipDuration { requested: f64 },
    #[error("No card at position {0}")]
    InvalidCard(CardIndex),
    #[error("Every card needs a pair, got an odd number of cards ({0})")]
    UnpairedCards(usize),
    #[error("Board needs at least one pair of cards")]
    EmptyBoard,
    #[error("Invalid card catalog: {0}")]
    InvalidCatalog(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
