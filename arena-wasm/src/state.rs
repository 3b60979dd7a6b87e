use arena_core::models::TokenPair;
use arena_core::{Route, SessionError, SessionService, guard};
use leptos::prelude::*;

use crate::storage::LocalStorageTokenStore;

fn session() -> SessionService<LocalStorageTokenStore> {
    SessionService::init(LocalStorageTokenStore)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) authenticated: RwSignal<bool>,
    pub(crate) route: RwSignal<Route>,
    pub(crate) error: RwSignal<Option<String>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        let authenticated = session().is_authenticated();
        Self {
            authenticated: RwSignal::new(authenticated),
            route: RwSignal::new(guard(Route::Dashboard, authenticated)),
            error: RwSignal::new(None),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    /// Токен читается из localStorage при каждом вызове.
    pub(crate) fn access_token(&self) -> Option<String> {
        session().access_token()
    }

    pub(crate) fn login(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let mut session = session();
        let result = session.login(tokens);
        self.authenticated.set(session.is_authenticated());
        result
    }

    pub(crate) fn logout(&self) {
        let mut session = session();
        if let Err(err) = session.logout() {
            web_sys::console::warn_1(&err.to_string().into());
        }
        self.authenticated.set(false);
        self.route.set(Route::Login);
    }

    pub(crate) fn navigate(&self, route: Route) {
        self.clear_error();
        self.route.set(guard(route, self.authenticated.get_untracked()));
    }

    /// Маршрут, который реально рендерится.
    pub(crate) fn current_route(&self) -> Route {
        guard(self.route.get(), self.authenticated.get())
    }

    /// Ответ, пришедший после ухода с экрана, не применяется.
    pub(crate) fn is_current(&self, route: Route) -> bool {
        guard(
            self.route.get_untracked(),
            self.authenticated.get_untracked(),
        ) == route
    }
}
