//! Движок «Дурака»: правила, смена ролей, добор, выбывание.
//!
//! Высокоуровневый объект: `Session`
//! Основные операции:
//!   - `setup` / `join` / `start` – набор игроков и раздача
//!   - `attack` / `defend` / `take` / `give_up` – ходы
//!   - `apply` – то же через `PlayerAction`

pub mod actions;
pub mod autoplay;
pub mod errors;
pub mod game_loop;
pub mod history;
pub mod positions;
pub mod rules;
pub mod table_manager;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::EngineError;
pub use game_loop::{ActionOutcome, GameStatus, GameSummary, Session, SessionState};
pub use history::{GameEvent, GameEventKind, GameHistory};
pub use rules::{all_defended, can_attack, is_defense_valid};

use crate::domain::{PlayerId, TableId};

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртка над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Колбэк хоста: игрок вышел из игры, можно освободить его ресурсы
/// (роль, личный канал и т.п.). Вызывается ровно один раз на игрока.
pub trait ResourceReleaser {
    fn release(&mut self, table_id: TableId, player_id: PlayerId);
}

impl<F: FnMut(TableId, PlayerId)> ResourceReleaser for F {
    fn release(&mut self, table_id: TableId, player_id: PlayerId) {
        self(table_id, player_id)
    }
}

/// Хосту нечего освобождать.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopReleaser;

impl ResourceReleaser for NoopReleaser {
    fn release(&mut self, _table_id: TableId, _player_id: PlayerId) {}
}

pub use table_manager::{ManagerError, TableManager};
