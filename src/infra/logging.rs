//! Инициализация tracing для бинарей и тестов.
//!
//! Обе функции идемпотентны: повторный вызов ничего не делает,
//! уже установленный чужой subscriber не ломает.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Уровень логов: `DURAK_LOG`, потом `RUST_LOG`, иначе `default`.
fn filter_from_env(default: &str) -> EnvFilter {
    std::env::var("DURAK_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Логирование для бинарей (по умолчанию `info`).
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(filter_from_env("info"))
            .with_target(false)
            .try_init()
            .ok();
    });
}

/// Логирование для тестов: вывод через test writer, по умолчанию тихо (`warn`).
pub fn init_for_tests() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(filter_from_env("warn"))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
