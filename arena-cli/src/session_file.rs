use std::fs;
use std::io;
use std::path::PathBuf;

use arena_client::arena_core::models::TokenPair;
use arena_client::arena_core::{SessionError, TokenStore};

/// Хранилище токенов в JSON-файле рядом с рабочим каталогом.
#[derive(Debug, Clone)]
pub(crate) struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn parse_session_content(raw: &str) -> Result<Option<TokenPair>, SessionError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let tokens: TokenPair =
        serde_json::from_str(raw).map_err(|err| SessionError::Corrupted(err.to_string()))?;
    if tokens.access.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(tokens))
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_session_content(&raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SessionError::Unavailable(err.to_string())),
        }
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let raw =
            serde_json::to_string(tokens).map_err(|err| SessionError::Write(err.to_string()))?;
        fs::write(&self.path, raw).map_err(|err| SessionError::Write(err.to_string()))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionError::Write(err.to_string())),
        }
    }
}
