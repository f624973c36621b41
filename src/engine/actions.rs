use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Ход игрока. Карты приходят токенами (`"7♠"`), разбор делает движок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Пойти или подкинуть карты одного ранга.
    Attack(Vec<String>),
    /// Отбить все неотбитые карты, по порядку.
    Defend(Vec<String>),
    /// Защитник забирает стол.
    Take,
    /// Атакующий говорит «бито».
    GiveUp,
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub player_id: PlayerId,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn attack<S: ToString>(player_id: PlayerId, cards: &[S]) -> Self {
        Self {
            player_id,
            kind: PlayerActionKind::Attack(cards.iter().map(ToString::to_string).collect()),
        }
    }

    pub fn defend<S: ToString>(player_id: PlayerId, cards: &[S]) -> Self {
        Self {
            player_id,
            kind: PlayerActionKind::Defend(cards.iter().map(ToString::to_string).collect()),
        }
    }

    pub fn take(player_id: PlayerId) -> Self {
        Self {
            player_id,
            kind: PlayerActionKind::Take,
        }
    }

    pub fn give_up(player_id: PlayerId) -> Self {
        Self {
            player_id,
            kind: PlayerActionKind::GiveUp,
        }
    }
}
