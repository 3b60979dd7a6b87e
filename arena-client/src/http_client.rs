use std::time::Duration;

use arena_core::models::{
    ActionKind, ActionSnapshot, Challenge, Comment, ExecutionResult, FilterOptions, Page,
    TestReport, TokenPair, TopUser,
};
use arena_core::wire::{
    ActionSnapshotDto, ChallengeDto, CodeTestRequestDto, ExecuteRequestDto, FilterOptionsDto,
    LoginRequestDto, NewCommentRequestDto, PageDto, RegisterRequestDto, SaveSolutionRequestDto,
    TokenResponseDto,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{ArenaClientError, ArenaClientResult};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    detail: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
/// Параметры HTTP-клиента.
pub struct ClientConfig {
    /// Базовый URL API, например `http://127.0.0.1:8000/beta`.
    pub base_url: String,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут всего запроса.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Настройки по умолчанию для указанного сервера.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API платформы задач.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(config: &ClientConfig) -> ArenaClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> ArenaClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .detail
                .or(body.error)
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        warn!(%status, %message, "request failed");
        ArenaClientError::from_http_status(status, Some(message))
    }

    fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        debug!(%method, %url, authenticated = token.is_some(), "sending request");
        let request = self.client.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(request: RequestBuilder) -> ArenaClientResult<reqwest::Response> {
        let response = request.send().await.map_err(ArenaClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn fetch<TRes>(request: RequestBuilder) -> ArenaClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        Self::execute(request)
            .await?
            .json::<TRes>()
            .await
            .map_err(ArenaClientError::from_reqwest)
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> ArenaClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);
        Self::fetch(self.request(method, &url, token).json(body)).await
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ArenaClientResult<()> {
        let payload = RegisterRequestDto {
            username,
            email,
            password,
        };
        let url = self.endpoint("/access/register/");
        Self::execute(self.request(Method::POST, &url, None).json(&payload)).await?;
        Ok(())
    }

    /// Выдача пары токенов после регистрации.
    pub(crate) async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> ArenaClientResult<TokenPair> {
        let payload = LoginRequestDto { username, password };
        let dto: TokenResponseDto = self
            .send_json(Method::POST, "/token/", &payload, None)
            .await?;
        Ok(dto.into())
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> ArenaClientResult<TokenPair> {
        let payload = LoginRequestDto { username, password };
        let dto: TokenResponseDto = self
            .send_json(Method::POST, "/access/login/", &payload, None)
            .await?;
        Ok(dto.into())
    }

    /// Первая страница списка с фильтрами в query.
    pub(crate) async fn list_challenges(
        &self,
        token: &str,
        query: &[(&'static str, String)],
    ) -> ArenaClientResult<Page<Challenge>> {
        let url = self.endpoint("/challenges/challenges/");
        let dto: PageDto<ChallengeDto> =
            Self::fetch(self.request(Method::GET, &url, Some(token)).query(query)).await?;
        Ok(dto.into())
    }

    /// Страница по URL из курсора, без изменений.
    pub(crate) async fn list_challenges_at(
        &self,
        token: &str,
        cursor_url: &str,
    ) -> ArenaClientResult<Page<Challenge>> {
        let dto: PageDto<ChallengeDto> =
            Self::fetch(self.request(Method::GET, cursor_url, Some(token))).await?;
        Ok(dto.into())
    }

    pub(crate) async fn get_challenge(&self, token: &str, id: i64) -> ArenaClientResult<Challenge> {
        let url = self.endpoint(&format!("/challenges/challenges/{id}/"));
        let dto: ChallengeDto = Self::fetch(self.request(Method::GET, &url, Some(token))).await?;
        Ok(dto.into())
    }

    pub(crate) async fn challenge_action(
        &self,
        token: &str,
        id: i64,
        action: ActionKind,
    ) -> ArenaClientResult<ActionSnapshot> {
        let path = format!("/challenges/challenges/{id}/action/{}/", action.as_path());
        let dto: ActionSnapshotDto = self
            .send_json(Method::POST, &path, &serde_json::json!({}), Some(token))
            .await?;
        Ok(dto.into())
    }

    pub(crate) async fn save_solution(
        &self,
        token: &str,
        id: i64,
        solution: &str,
    ) -> ArenaClientResult<()> {
        let payload = SaveSolutionRequestDto { solution };
        let url = self.endpoint(&format!("/challenges/challenges/{id}/save-solution/"));
        Self::execute(self.request(Method::POST, &url, Some(token)).json(&payload)).await?;
        Ok(())
    }

    pub(crate) async fn execute_code(
        &self,
        token: &str,
        language: &str,
        code: &str,
    ) -> ArenaClientResult<ExecutionResult> {
        let payload = ExecuteRequestDto { language, code };
        self.send_json(Method::POST, "/challenges/execute/", &payload, Some(token))
            .await
    }

    pub(crate) async fn run_tests(
        &self,
        token: &str,
        challenge_id: i64,
        solution: &str,
    ) -> ArenaClientResult<TestReport> {
        let payload = CodeTestRequestDto {
            challenge_id,
            solution,
        };
        self.send_json(Method::POST, "/challenges/code-test/", &payload, Some(token))
            .await
    }

    pub(crate) async fn filter_options(&self, token: &str) -> ArenaClientResult<FilterOptions> {
        let url = self.endpoint("/challenges/filters/");
        let dto: FilterOptionsDto = Self::fetch(self.request(Method::GET, &url, Some(token))).await?;
        Ok(dto.into())
    }

    pub(crate) async fn comments_page(
        &self,
        token: &str,
        challenge_id: i64,
        page: u32,
    ) -> ArenaClientResult<Page<Comment>> {
        let url = self.endpoint(&format!("/challenges/challenges/{challenge_id}/comments/"));
        let dto: PageDto<Comment> = Self::fetch(
            self.request(Method::GET, &url, Some(token))
                .query(&[("page", page)]),
        )
        .await?;
        Ok(dto.into())
    }

    pub(crate) async fn comments_at(
        &self,
        token: &str,
        cursor_url: &str,
    ) -> ArenaClientResult<Page<Comment>> {
        let dto: PageDto<Comment> =
            Self::fetch(self.request(Method::GET, cursor_url, Some(token))).await?;
        Ok(dto.into())
    }

    pub(crate) async fn add_comment(
        &self,
        token: &str,
        challenge_id: i64,
        content: &str,
    ) -> ArenaClientResult<Comment> {
        let payload = NewCommentRequestDto { content };
        self.send_json(
            Method::POST,
            &format!("/challenges/challenges/{challenge_id}/comments/add"),
            &payload,
            Some(token),
        )
        .await
    }

    pub(crate) async fn top_users(&self, token: &str) -> ArenaClientResult<Vec<TopUser>> {
        let url = self.endpoint("/access/top-users/");
        Self::fetch(self.request(Method::GET, &url, Some(token))).await
    }
}
