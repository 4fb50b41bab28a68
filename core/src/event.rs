use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub elapsed_secs: u32,
    pub moves: u32,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game Over! Time: {}s, Moves: {}",
            self.elapsed_secs, self.moves
        )
    }
}

/// Semantic state changes a presentation layer can follow.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    CardFlipped { index: CardIndex, face_up: bool },
    LayoutChanged(Layout),
    MovesChanged(u32),
    TimeChanged(u32),
    /// Non-fatal problem the player should be told about.
    Warning(GameError),
    Completed(GameSummary),
}

pub trait GameObserver {
    fn notify(&mut self, event: GameEvent);
}

impl GameObserver for () {
    fn notify(&mut self, _event: GameEvent) {}
}

impl GameObserver for Vec<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<F: FnMut(GameEvent)> GameObserver for F {
    fn notify(&mut self, event: GameEvent) {
        self(event)
    }
}
