use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, TableId};
use crate::engine::actions::PlayerAction;

/// Команда верхнего уровня.
///
/// Хост (чат-бот, сервер) собирает её из пользовательского ввода.
/// Карты передаются токенами как есть (`"7♠"`, `"10h"`), разбирает их движок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Открыть стол для набора на новую игру.
    Setup { table_id: TableId },

    /// Сесть за стол.
    Join { table_id: TableId, player_id: PlayerId },

    /// Перемешать, раздать и начать.
    Start { table_id: TableId },

    /// Действие игрока в идущей игре.
    Action(PlayerActionCommand),

    /// Удалить стол целиком.
    RemoveTable { table_id: TableId },
}

/// Ход игрока на конкретном столе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerActionCommand {
    pub table_id: TableId,
    pub action: PlayerAction,
}

impl Command {
    pub fn table_id(&self) -> TableId {
        match self {
            Command::Setup { table_id }
            | Command::Join { table_id, .. }
            | Command::Start { table_id }
            | Command::RemoveTable { table_id } => *table_id,
            Command::Action(cmd) => cmd.table_id,
        }
    }

    pub fn attack<S: ToString>(table_id: TableId, player_id: PlayerId, cards: &[S]) -> Self {
        Command::Action(PlayerActionCommand {
            table_id,
            action: PlayerAction::attack(player_id, cards),
        })
    }

    pub fn defend<S: ToString>(table_id: TableId, player_id: PlayerId, cards: &[S]) -> Self {
        Command::Action(PlayerActionCommand {
            table_id,
            action: PlayerAction::defend(player_id, cards),
        })
    }

    pub fn take(table_id: TableId, player_id: PlayerId) -> Self {
        Command::Action(PlayerActionCommand {
            table_id,
            action: PlayerAction::take(player_id),
        })
    }

    pub fn give_up(table_id: TableId, player_id: PlayerId) -> Self {
        Command::Action(PlayerActionCommand {
            table_id,
            action: PlayerAction::give_up(player_id),
        })
    }
}
