//! Инфраструктурный слой вокруг движка «Дурака»:
//! - генерация ID столов и игроков;
//! - RNG-реализации для движка;
//! - инициализация логирования (tracing).

pub mod ids;
pub mod logging;
pub mod rng;

pub use ids::*;
pub use rng::*;
