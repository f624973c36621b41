use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::deck::DECK_SIZE;
use crate::domain::hand::HAND_SIZE;

/// Минимум игроков для старта.
pub const MIN_PLAYERS: usize = 2;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_players={0}: нужно хотя бы {MIN_PLAYERS} игрока")]
    TooFewSeats(usize),

    #[error("max_players={0}: начальная раздача не помещается в колоду из {DECK_SIZE} карт")]
    DealDoesNotFit(usize),
}

/// Конфиг сессии (одного стола).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Сколько игроков можно посадить за стол.
    pub max_players: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_players: DECK_SIZE / HAND_SIZE,
        }
    }
}

impl SessionConfig {
    pub fn new(max_players: usize) -> Result<Self, ConfigError> {
        let config = Self { max_players };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players < MIN_PLAYERS {
            return Err(ConfigError::TooFewSeats(self.max_players));
        }
        if self.max_players * HAND_SIZE > DECK_SIZE {
            return Err(ConfigError::DealDoesNotFit(self.max_players));
        }
        Ok(())
    }
}
