//! Сессия пользователя поверх хранилища токенов.
//!
//! Флаг аутентификации меняется только в двух местах: [`SessionService::login`]
//! и [`SessionService::logout`]. Сервис передаётся экранам явно, глобального
//! изменяемого состояния нет.

use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

use crate::models::TokenPair;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Ошибки хранилища токенов.
pub enum SessionError {
    /// Хранилище недоступно (нет окна, нет localStorage, нет доступа к файлу).
    #[error("token storage is unavailable: {0}")]
    Unavailable(String),

    /// Не удалось записать или удалить токены.
    #[error("failed to write tokens: {0}")]
    Write(String),

    /// Сохранённые данные повреждены.
    #[error("stored tokens are corrupted: {0}")]
    Corrupted(String),
}

/// Постоянное хранилище пары токенов.
pub trait TokenStore {
    /// Читает сохранённые токены.
    fn load(&self) -> Result<Option<TokenPair>, SessionError>;

    /// Сохраняет оба токена.
    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError>;

    /// Удаляет оба токена.
    fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
/// Хранилище в памяти процесса.
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с уже сохранёнными токенами.
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionError> {
        let guard = self
            .tokens
            .lock()
            .map_err(|_| SessionError::Unavailable("token mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let mut guard = self
            .tokens
            .lock()
            .map_err(|_| SessionError::Write("token mutex poisoned".to_string()))?;
        *guard = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self
            .tokens
            .lock()
            .map_err(|_| SessionError::Write("token mutex poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[derive(Debug)]
/// Сервис сессии: флаг аутентификации и точки его изменения.
pub struct SessionService<S> {
    store: S,
    authenticated: bool,
}

impl<S: TokenStore> SessionService<S> {
    /// Поднимает сессию из сохранённых токенов.
    ///
    /// Пользователь считается вошедшим, если в хранилище есть непустой
    /// access token. Нечитаемое хранилище означает анонимную сессию.
    pub fn init(store: S) -> Self {
        let authenticated = match store.load() {
            Ok(tokens) => tokens.is_some_and(|pair| !pair.access.trim().is_empty()),
            Err(err) => {
                debug!(error = %err, "token store is not readable, starting anonymous session");
                false
            }
        };

        Self {
            store,
            authenticated,
        }
    }

    /// Сохраняет токены после подтверждения сервером и отмечает вход.
    ///
    /// Если записать токены не удалось, сессия остаётся прежней.
    pub fn login(&mut self, tokens: &TokenPair) -> Result<(), SessionError> {
        self.store.save(tokens)?;
        self.authenticated = true;
        debug!("session authenticated");
        Ok(())
    }

    /// Удаляет оба токена и сбрасывает флаг.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        // флаг сбрасывается даже при ошибке хранилища, иначе выйти нельзя
        self.authenticated = false;
        self.store.clear()?;
        debug!("session cleared");
        Ok(())
    }

    /// Текущее состояние сессии.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Access token из хранилища. Читается при каждом вызове.
    pub fn access_token(&self) -> Option<String> {
        self.store
            .load()
            .ok()
            .flatten()
            .map(|pair| pair.access.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Хранилище, с которым работает сессия.
    pub fn store(&self) -> &S {
        &self.store
    }
}
