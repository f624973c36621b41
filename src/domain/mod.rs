//! Доменная модель «Дурака»: карты, колода, руки, игроки, поле хода.

pub mod card;
pub mod config;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

// Идентификаторы приходят от хост-слоя (id участника / id сервера чата).
pub type PlayerId = u64;
pub type TableId = u64;

pub use card::*;
pub use config::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
