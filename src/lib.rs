//! Движок карточной игры «Дурак» (36 карт, подкидной без переводов).
//!
//! Слои:
//! - `domain` – карты, колода, руки, поле хода;
//! - `engine` – правила и сессия одного стола (`Session`), реестр столов;
//! - `api` – сериализуемые команды/запросы для хоста (чат-бот, сервер);
//! - `infra` – RNG, генерация ID, логирование.
//!
//! Рендер, хранение и транспорт остаются на стороне хоста.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use api::{handle_command, handle_query, ApiError, Command, CommandResponse, Query, QueryResponse};
pub use domain::{Card, Deck, PlayerId, Rank, SessionConfig, Suit, TableId};
pub use engine::{
    EngineError, GameStatus, ManagerError, NoopReleaser, PlayerAction, RandomSource,
    ResourceReleaser, Session, SessionState, TableManager,
};
