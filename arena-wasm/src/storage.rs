use arena_core::models::TokenPair;
use arena_core::{SessionError, TokenStore};

const ACCESS_KEY: &str = "access_token";
const REFRESH_KEY: &str = "refresh_token";

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn local_storage() -> Result<web_sys::Storage, SessionError> {
    let window = web_sys::window()
        .ok_or_else(|| SessionError::Unavailable("window is not available".to_string()))?;
    window
        .local_storage()
        .map_err(|_| SessionError::Unavailable("failed to access localStorage".to_string()))?
        .ok_or_else(|| SessionError::Unavailable("localStorage is not available".to_string()))
}

/// Токены в `localStorage` браузера.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionError> {
        let storage = local_storage()?;
        let access = storage.get_item(ACCESS_KEY).ok().flatten();
        let Some(access) = access.as_deref().and_then(parse_token) else {
            return Ok(None);
        };
        let refresh = storage
            .get_item(REFRESH_KEY)
            .ok()
            .flatten()
            .and_then(|raw| parse_token(&raw))
            .unwrap_or_default();

        Ok(Some(TokenPair { access, refresh }))
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let storage = local_storage()?;
        storage
            .set_item(ACCESS_KEY, &tokens.access)
            .map_err(|_| SessionError::Write("failed to save access token".to_string()))?;
        storage
            .set_item(REFRESH_KEY, &tokens.refresh)
            .map_err(|_| SessionError::Write("failed to save refresh token".to_string()))
    }

    fn clear(&self) -> Result<(), SessionError> {
        let storage = local_storage()?;
        for key in [ACCESS_KEY, REFRESH_KEY] {
            storage
                .remove_item(key)
                .map_err(|_| SessionError::Write(format!("failed to clear {key}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_token_trims_and_returns_value() {
        let token = parse_token("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_rejects_blank() {
        assert!(parse_token("   ").is_none());
    }
}
