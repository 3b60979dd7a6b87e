//! Экраны приложения и защита закрытых экранов.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Экран приложения.
pub enum Route {
    /// Вход.
    Login,
    /// Регистрация.
    Register,
    /// Главная панель пользователя.
    Dashboard,
    /// Список задач.
    Challenges,
    /// Задача с редактором и комментариями.
    ChallengeDetail(i64),
    /// Таблица лидеров.
    Leaderboard,
}

impl Route {
    /// Экран доступен только после входа.
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

/// Возвращает экран, который нужно показать вместо запрошенного.
///
/// Закрытые экраны без сессии перенаправляются на вход.
pub fn guard(route: Route, authenticated: bool) -> Route {
    if route.is_protected() && !authenticated {
        return Route::Login;
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_routes_redirect_to_login_without_session() {
        for route in [
            Route::Dashboard,
            Route::Challenges,
            Route::ChallengeDetail(7),
            Route::Leaderboard,
        ] {
            assert_eq!(guard(route, false), Route::Login);
            assert_eq!(guard(route, true), route);
        }
    }

    #[test]
    fn public_routes_are_always_reachable() {
        assert_eq!(guard(Route::Login, false), Route::Login);
        assert_eq!(guard(Route::Register, false), Route::Register);
        assert_eq!(guard(Route::Register, true), Route::Register);
    }
}
