//! Внешний API движка «Дурака».
//!
//! Здесь описываются:
//! - команды (commands.rs), всё, что меняет состояние стола;
//! - запросы (queries.rs), только чтение;
//! - DTO (dto.rs), удобные структуры для рендера в чате/фронте;
//! - ошибки (errors.rs), то, что видит клиент;
//! - диспетчер (handler.rs), который прогоняет команды через TableManager.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod handler;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use handler::{handle_command, handle_query};
pub use queries::*;
