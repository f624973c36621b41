use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TableId;
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (битый токен карты).
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    /// Стол не найден.
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    /// Ход отклонён правилами; состояние стола не изменилось.
    #[error("{0}")]
    Rejected(EngineError),

    /// Внутренняя ошибка (нарушен инвариант движка).
    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidCardFormat(_) => ApiError::BadRequest(err.to_string()),
            EngineError::EmptyDeck => ApiError::Internal(err.to_string()),
            other => ApiError::Rejected(other),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(id) => ApiError::TableNotFound(id),
            ManagerError::Engine(e) => e.into(),
        }
    }
}
