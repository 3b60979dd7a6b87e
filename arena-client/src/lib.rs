//! Клиентская библиотека для REST API платформы задач.
//!
//! `ArenaClient` объединяет HTTP-транспорт (`reqwest`) и сессию из
//! `arena-core`. Токены после `login`/`register` записываются в переданное
//! хранилище, и каждый защищённый запрос читает access token оттуда.
//! Без токена защищённый запрос не отправляется и возвращает
//! [`ArenaClientError::Unauthorized`].
#![warn(missing_docs)]

mod error;
mod http_client;

pub use arena_core;
pub use error::{ArenaClientError, ArenaClientResult};
pub use http_client::ClientConfig;

use arena_core::models::{
    ActionKind, ActionSnapshot, Challenge, Comment, ExecutionResult, FilterOptions, Page,
    TestReport, TokenPair, TopUser,
};
use arena_core::{FetchTarget, MemoryTokenStore, RegistrationForm, SessionService, TokenStore};
use http_client::HttpClient;
use tracing::info;

#[derive(Debug)]
/// Клиент платформы задач с сессией поверх хранилища токенов `S`.
pub struct ArenaClient<S = MemoryTokenStore> {
    http: HttpClient,
    session: SessionService<S>,
}

impl<S: TokenStore> ArenaClient<S> {
    /// Создаёт клиент и поднимает сессию из хранилища.
    pub fn new(config: ClientConfig, store: S) -> ArenaClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(&config)?,
            session: SessionService::init(store),
        })
    }

    /// Сессия клиента.
    pub fn session(&self) -> &SessionService<S> {
        &self.session
    }

    /// Есть ли сохранённый вход.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Выполняет вход и сохраняет оба токена.
    ///
    /// При ошибке сессия не меняется.
    pub async fn login(&mut self, username: &str, password: &str) -> ArenaClientResult<TokenPair> {
        let tokens = self.http.login(username, password).await?;
        self.session.login(&tokens)?;
        info!(%username, "logged in");
        Ok(tokens)
    }

    /// Регистрирует пользователя, получает токены и открывает сессию.
    ///
    /// Форма проверяется до отправки: при несовпадении паролей сеть не
    /// используется.
    pub async fn register(&mut self, form: &RegistrationForm) -> ArenaClientResult<TokenPair> {
        form.check()?;
        self.http
            .register(&form.username, &form.email, &form.password)
            .await?;
        let tokens = self.http.obtain_token(&form.username, &form.password).await?;
        self.session.login(&tokens)?;
        info!(username = %form.username, "registered");
        Ok(tokens)
    }

    /// Удаляет токены из хранилища.
    pub fn logout(&mut self) -> ArenaClientResult<()> {
        self.session.logout()?;
        Ok(())
    }

    /// Загружает страницу списка задач.
    ///
    /// `FetchTarget::Cursor` отправляется по URL сервера как есть, фильтры
    /// клиента к нему не добавляются.
    pub async fn list_challenges(&self, target: &FetchTarget) -> ArenaClientResult<Page<Challenge>> {
        let token = self.require_token()?;
        match target {
            FetchTarget::Filtered(filters) => {
                self.http
                    .list_challenges(&token, &filters.query_pairs())
                    .await
            }
            FetchTarget::Cursor(url) => self.http.list_challenges_at(&token, url).await,
        }
    }

    /// Возвращает задачу по идентификатору.
    pub async fn get_challenge(&self, id: i64) -> ArenaClientResult<Challenge> {
        let token = self.require_token()?;
        self.http.get_challenge(&token, id).await
    }

    /// Лайк, дизлайк или избранное. Возвращает снимок счётчиков сервера.
    pub async fn challenge_action(
        &self,
        id: i64,
        action: ActionKind,
    ) -> ArenaClientResult<ActionSnapshot> {
        let token = self.require_token()?;
        self.http.challenge_action(&token, id, action).await
    }

    /// Сохраняет решение задачи.
    pub async fn save_solution(&self, id: i64, solution: &str) -> ArenaClientResult<()> {
        let token = self.require_token()?;
        self.http.save_solution(&token, id, solution).await
    }

    /// Запускает код на сервере.
    pub async fn execute(&self, language: &str, code: &str) -> ArenaClientResult<ExecutionResult> {
        let token = self.require_token()?;
        self.http.execute_code(&token, language, code).await
    }

    /// Прогоняет тесты задачи на решении.
    pub async fn run_tests(&self, challenge_id: i64, solution: &str) -> ArenaClientResult<TestReport> {
        let token = self.require_token()?;
        self.http.run_tests(&token, challenge_id, solution).await
    }

    /// Значения для меню фильтров.
    pub async fn filter_options(&self) -> ArenaClientResult<FilterOptions> {
        let token = self.require_token()?;
        self.http.filter_options(&token).await
    }

    /// Страница комментариев по номеру.
    pub async fn comments_page(&self, challenge_id: i64, page: u32) -> ArenaClientResult<Page<Comment>> {
        let token = self.require_token()?;
        self.http.comments_page(&token, challenge_id, page.max(1)).await
    }

    /// Страница комментариев по URL из курсора.
    pub async fn comments_at(&self, cursor_url: &str) -> ArenaClientResult<Page<Comment>> {
        let token = self.require_token()?;
        self.http.comments_at(&token, cursor_url).await
    }

    /// Добавляет комментарий и возвращает его в том виде, как сохранил сервер.
    pub async fn add_comment(&self, challenge_id: i64, content: &str) -> ArenaClientResult<Comment> {
        let token = self.require_token()?;
        self.http.add_comment(&token, challenge_id, content).await
    }

    /// Таблица лидеров.
    pub async fn top_users(&self) -> ArenaClientResult<Vec<TopUser>> {
        let token = self.require_token()?;
        self.http.top_users(&token).await
    }

    fn require_token(&self) -> ArenaClientResult<String> {
        self.session
            .access_token()
            .ok_or(ArenaClientError::Unauthorized)
    }
}
