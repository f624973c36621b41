use serde::{Deserialize, Serialize};

use crate::domain::hand::Hand;
use crate::domain::PlayerId;

/// Номер хода: 1..N, выдаётся при входе и не меняется до конца игры.
pub type TurnNumber = u8;

/// Игрок за конкретным столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub player_id: PlayerId,
    pub turn_number: TurnNumber,
    pub hand: Hand,
}

impl Player {
    pub fn new(player_id: PlayerId, turn_number: TurnNumber) -> Self {
        Self {
            player_id,
            turn_number,
            hand: Hand::new(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.hand.len()
    }
}
