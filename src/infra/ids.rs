use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{PlayerId, TableId};

/// Генерация ID на монотонных счётчиках.
/// Для dev-CLI, стресс-теста и хостов без своих идентификаторов
/// (обычно хост передаёт id канала и пользователя сам).
#[derive(Debug)]
pub struct IdGenerator {
    table_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            table_counter: AtomicU64::new(1),
            player_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_table_id(&self) -> TableId {
        self.table_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }
}
