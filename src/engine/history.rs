use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit};
use crate::domain::player::TurnNumber;
use crate::domain::table::TablePair;
use crate::domain::{PlayerId, TableId};

/// Тип события в игре. Хост рендерит их как хочет.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameEventKind {
    /// Стол переведён в набор игроков (новая игра).
    SessionReset {
        table_id: TableId,
        game_number: u64,
    },

    PlayerJoined {
        player_id: PlayerId,
        turn_number: TurnNumber,
    },

    /// Колода перемешана, козырь открыт.
    GameStarted {
        trump_card: Card,
        players: Vec<PlayerId>,
    },

    /// Игрок получил карты (при раздаче или доборе).
    CardsDealt {
        player_id: PlayerId,
        cards: Vec<Card>,
    },

    /// Козырная карта ушла из колоды в руку.
    TrumpCardDrawn {
        player_id: PlayerId,
        trump_suit: Suit,
    },

    Attacked {
        player_id: PlayerId,
        cards: Vec<Card>,
    },

    Defended {
        player_id: PlayerId,
        pairs: Vec<TablePair>,
    },

    CardsTaken {
        player_id: PlayerId,
        cards: Vec<Card>,
    },

    /// «Бито»: карты со стола ушли в отбой.
    AttackGivenUp {
        player_id: PlayerId,
        discarded: Vec<Card>,
    },

    /// Новый ход: кто атакует и кто защищается.
    TurnPassed {
        attacker: PlayerId,
        defender: PlayerId,
    },

    /// Игрок избавился от всех карт и вышел из игры.
    PlayerFinished {
        player_id: PlayerId,
        place: usize,
    },

    /// Игра окончена. `durak == None`: ничья.
    GameFinished {
        durak: Option<PlayerId>,
        winners: Vec<PlayerId>,
    },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEvent {
    pub index: u32,
    pub kind: GameEventKind,
}

/// Полная история текущей игры на столе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GameHistory {
    pub events: Vec<GameEvent>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: GameEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(GameEvent { index: idx, kind });
    }

    pub fn extend(&mut self, kinds: impl IntoIterator<Item = GameEventKind>) {
        for kind in kinds {
            self.push(kind);
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
