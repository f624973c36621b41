use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CardParseError, EmptyDeck, PlayerId};

/// Ошибки движка «Дурака».
///
/// Все ошибки локальные: операция либо применилась целиком, либо
/// отклонена без изменений в сессии.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineError {
    #[error("Недостаточно игроков для начала игры")]
    NotEnoughPlayers,

    #[error("За столом нет свободных мест")]
    TableFull,

    #[error("Игрок {0} уже в игре")]
    AlreadyJoined(PlayerId),

    #[error("Операция недоступна в текущем состоянии игры")]
    WrongState,

    #[error("Игрок {0} не сидит за этим столом")]
    NotAPlayer(PlayerId),

    #[error("Сейчас не ход игрока с id={0}")]
    NotYourTurn(PlayerId),

    #[error("Карты не указаны")]
    NoCardsGiven,

    #[error("Неверный формат карты: {0}")]
    InvalidCardFormat(String),

    #[error("Этих карт нет на руке")]
    CardsNotInHand,

    #[error("Ходить можно только картами одного ранга")]
    InvalidRankGroup,

    #[error("Подкидывать можно только ранги, которые уже есть на столе")]
    RankNotOnTable,

    #[error("Нужно отбить все {expected} неотбитые карты, указано {given}")]
    WrongDefenseCount { expected: usize, given: usize },

    #[error("Эти карты не отбивают атаку")]
    InvalidDefense,

    #[error("На столе нечего отбивать")]
    NothingToDefend,

    #[error("На столе нечего брать")]
    NothingToTake,

    #[error("Все карты уже отбиты")]
    AlreadyFullyDefended,

    #[error("Нельзя сказать «бито» до первого хода")]
    NothingToGiveUp,

    #[error("Нельзя сказать «бито», пока не все карты отбиты")]
    AttackNotFullyDefended,

    #[error("Колода должна быть перестановкой 36 карт")]
    InvalidDeck,

    #[error("Внутренняя ошибка: колода пуста")]
    EmptyDeck,
}

impl From<CardParseError> for EngineError {
    fn from(e: CardParseError) -> Self {
        EngineError::InvalidCardFormat(e.to_string())
    }
}

impl From<EmptyDeck> for EngineError {
    fn from(_: EmptyDeck) -> Self {
        EngineError::EmptyDeck
    }
}
