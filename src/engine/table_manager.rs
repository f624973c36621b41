// src/engine/table_manager.rs

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::info;

use crate::domain::config::{ConfigError, SessionConfig};
use crate::domain::{PlayerId, TableId};
use crate::engine::{ActionOutcome, EngineError, PlayerAction, RandomSource, ResourceReleaser, Session};

/// Ошибки уровня менеджера столов (над движком одной сессии).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// Стол с таким ID не найден.
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    /// Проброшенная ошибка из движка (EngineError).
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Одна сессия под своим мьютексом.
pub type SharedSession = Arc<Mutex<Session>>;

/// Менеджер столов:
/// - хранит сессии по TableId;
/// - создаёт сессию при первом обращении (`setup` / `join`);
/// - операции над одной сессией идут строго по очереди (мьютекс сессии),
///   разные столы работают параллельно и ничего не делят.
pub struct TableManager {
    tables: DashMap<TableId, SharedSession>,
    config: SessionConfig,
}

impl Default for TableManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TableManager {
    /// Создать пустой менеджер с конфигом по умолчанию.
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
            config: SessionConfig::default(),
        }
    }

    /// Менеджер с общим конфигом для всех столов. Конфиг проверяется сразу.
    pub fn with_config(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tables: DashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Есть ли стол с таким id.
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.tables.contains_key(&table_id)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Все id столов, по возрастанию.
    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Сессия стола, если она есть.
    ///
    /// Возвращаем клон `Arc`, чтобы не держать шард DashMap во время работы с сессией.
    pub fn session(&self, table_id: TableId) -> Option<SharedSession> {
        self.tables.get(&table_id).map(|e| Arc::clone(e.value()))
    }

    /// Сессия стола; если её нет, создаём пустую (в наборе игроков).
    pub fn session_or_create(&self, table_id: TableId) -> SharedSession {
        let entry = self.tables.entry(table_id).or_insert_with(|| {
            info!(table_id, "создан новый стол");
            Arc::new(Mutex::new(Session::new(table_id, self.config.clone())))
        });
        Arc::clone(entry.value())
    }

    /// Выполнить `f` над сессией под её мьютексом.
    pub fn with_session<T>(
        &self,
        table_id: TableId,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, ManagerError> {
        let shared = self
            .session(table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;
        let mut session = shared.lock();
        Ok(f(&mut session))
    }

    /// Начать набор на новую игру (создаёт стол при первом обращении).
    pub fn setup(&self, table_id: TableId) -> ActionOutcome {
        let shared = self.session_or_create(table_id);
        let mut session = shared.lock();
        session.setup()
    }

    /// Сесть за стол (создаёт стол при первом обращении).
    pub fn join(&self, table_id: TableId, player_id: PlayerId) -> Result<ActionOutcome, ManagerError> {
        let shared = self.session_or_create(table_id);
        let mut session = shared.lock();
        Ok(session.join(player_id)?)
    }

    /// Раздать карты и начать игру на конкретном столе.
    pub fn start<R: RandomSource>(
        &self,
        table_id: TableId,
        rng: &mut R,
    ) -> Result<ActionOutcome, ManagerError> {
        self.with_session(table_id, |s| s.start(rng))?
            .map_err(ManagerError::from)
    }

    /// Применить действие игрока на конкретном столе.
    ///
    /// Внутри просто вызывает Session::apply под мьютексом стола.
    pub fn apply_action<E: ResourceReleaser>(
        &self,
        table_id: TableId,
        action: &PlayerAction,
        releaser: &mut E,
    ) -> Result<ActionOutcome, ManagerError> {
        self.with_session(table_id, |s| s.apply(action, releaser))?
            .map_err(ManagerError::from)
    }

    /// Убрать стол целиком (админская очистка).
    pub fn remove_table(&self, table_id: TableId) -> bool {
        let removed = self.tables.remove(&table_id).is_some();
        if removed {
            info!(table_id, "стол удалён");
        }
        removed
    }
}
