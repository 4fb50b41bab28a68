#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use schedule::*;

mod board;
mod card;
mod catalog;
mod engine;
mod error;
mod event;
mod schedule;

/// How long two revealed cards stay up before the pair is resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlipDuration(u32);

impl FlipDuration {
    pub const MIN: Self = Self(350);
    pub const MAX: Self = Self(3000);
    pub const DEFAULT: Self = Self(500);

    pub fn try_from_millis(millis: f64) -> Result<Self> {
        if millis.is_finite() && millis >= Self::MIN.0 as f64 && millis <= Self::MAX.0 as f64 {
            Ok(Self(millis as u32))
        } else {
            Err(GameError::InvalidFlipDuration { requested: millis })
        }
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.0 as u64)
    }
}

impl Default for FlipDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Requested flip duration, validated when the game is created.
    pub flip_duration_ms: f64,
    /// Seed for the board shuffle.
    pub seed: u64,
}

impl GameConfig {
    pub const fn new(flip_duration_ms: f64, seed: u64) -> Self {
        Self {
            flip_duration_ms,
            seed,
        }
    }

    /// Takes the flip duration from user text, anything non-numeric ends up rejected at game creation.
    pub fn with_flip_duration_str(self, text: &str) -> Self {
        Self {
            flip_duration_ms: text.trim().parse().unwrap_or(f64::NAN),
            ..self
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(FlipDuration::DEFAULT.as_millis() as f64, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_duration_accepts_inclusive_range() {
        assert_eq!(FlipDuration::try_from_millis(350.0), Ok(FlipDuration::MIN));
        assert_eq!(FlipDuration::try_from_millis(3000.0), Ok(FlipDuration::MAX));
        assert_eq!(
            FlipDuration::try_from_millis(1000.0).map(FlipDuration::as_millis),
            Ok(1000)
        );
    }

    #[test]
    fn flip_duration_rejects_out_of_range_and_nan() {
        for millis in [100.0, 349.9, 3000.5, -1.0, f64::INFINITY] {
            assert_eq!(
                FlipDuration::try_from_millis(millis),
                Err(GameError::InvalidFlipDuration { requested: millis })
            );
        }
        assert!(FlipDuration::try_from_millis(f64::NAN).is_err());
    }

    #[test]
    fn non_numeric_text_becomes_nan() {
        let config = GameConfig::default().with_flip_duration_str("slow");
        assert!(config.flip_duration_ms.is_nan());

        let config = GameConfig::default().with_flip_duration_str(" 750 ");
        assert_eq!(config.flip_duration_ms, 750.0);
    }

    #[test]
    fn default_config_uses_default_duration() {
        assert_eq!(GameConfig::default().flip_duration_ms, 500.0);
        assert_eq!(
            FlipDuration::DEFAULT.as_duration(),
            Duration::from_millis(500)
        );
    }
}
