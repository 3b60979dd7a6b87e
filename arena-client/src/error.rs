use arena_core::{FormError, SessionError};
use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `arena-client`.
pub enum ArenaClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ответ сервера не удалось разобрать.
    #[error("decode error: {0}")]
    Decode(String),

    /// Требуется авторизация (нет токена, 401 или 403).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос или бизнес-ошибка сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Форма не прошла проверку, запрос не отправлялся.
    #[error("{0}")]
    Form(#[from] FormError),

    /// Ошибка хранилища токенов.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Результат операций `arena-client`.
pub type ArenaClientResult<T> = Result<T, ArenaClientError>;

impl ArenaClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Http(err)
    }
}
