use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit};
use crate::domain::player::TurnNumber;
use crate::domain::{PlayerId, TableId};
use crate::engine::{GameEventKind, GameStatus, SessionState};

/// Козырь глазами игроков: пока карта лежит под колодой, видна вся карта,
/// после добора остаётся только масть.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrumpViewDto {
    Card(Card),
    Suit(Suit),
}

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerViewDto {
    pub player_id: PlayerId,
    pub turn_number: TurnNumber,
    pub card_count: usize,
    pub is_attacker: bool,
    pub is_defender: bool,
    /// Карты видны только самому игроку.
    pub hand: Option<Vec<Card>>,
}

/// DTO стола целиком.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionViewDto {
    pub table_id: TableId,
    pub game_number: u64,
    pub state: SessionState,
    pub trump: Option<TrumpViewDto>,
    pub deck_size: usize,
    pub discard_size: usize,
    /// Пары на столе в виде `"7♠<-8♠"` (неотбитая: `"7♠"`).
    pub table: Vec<String>,
    pub attacker: Option<PlayerId>,
    pub defender: Option<PlayerId>,
    pub players: Vec<PlayerViewDto>,
    pub finished_players: Vec<PlayerId>,
    pub durak: Option<PlayerId>,
}

/// Ответ на успешную команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Команда применена: события и новый статус игры.
    Applied {
        events: Vec<GameEventKind>,
        status: GameStatus,
    },
    /// Стол удалён (или его и не было).
    TableRemoved { table_id: TableId, existed: bool },
}
