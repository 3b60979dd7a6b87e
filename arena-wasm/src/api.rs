use arena_core::models::{
    ActionKind, ActionSnapshot, Challenge, Comment, ExecutionResult, FilterOptions, Page,
    TestReport, TokenPair, TopUser,
};
use arena_core::wire::{
    ActionSnapshotDto, ChallengeDto, CodeTestRequestDto, ExecuteRequestDto, FilterOptionsDto,
    LoginRequestDto, NewCommentRequestDto, PageDto, RegisterRequestDto, SaveSolutionRequestDto,
    TokenResponseDto,
};
use arena_core::{FetchTarget, RegistrationForm};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = match option_env!("ARENA_WASM_API_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8000/beta",
};

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {token}"))
}

fn json_request<T: serde::Serialize>(builder: RequestBuilder, body: &T) -> Result<Request, ApiError> {
    builder
        .json(body)
        .map_err(|err| ApiError::Network(err.to_string()))
}

async fn parse_error_body(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = if text.trim().is_empty() {
        format!("http status {status}")
    } else {
        text
    };

    web_sys::console::warn_1(&format!("request failed with {status}: {message}").into());
    ApiError::Http { status, message }
}

async fn expect_ok(response: Result<Response, gloo_net::Error>) -> Result<Response, ApiError> {
    let response = response.map_err(|err| ApiError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(parse_error_body(response).await);
    }
    Ok(response)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

pub(crate) async fn register(form: &RegistrationForm) -> Result<(), ApiError> {
    let payload = RegisterRequestDto {
        username: &form.username,
        email: &form.email,
        password: &form.password,
    };
    let request = json_request(Request::post(&endpoint("/access/register/")), &payload)?;
    expect_ok(request.send().await).await?;
    Ok(())
}

pub(crate) async fn obtain_token(username: &str, password: &str) -> Result<TokenPair, ApiError> {
    let payload = LoginRequestDto { username, password };
    let request = json_request(Request::post(&endpoint("/token/")), &payload)?;
    let response = expect_ok(request.send().await).await?;
    let dto: TokenResponseDto = parse_json(response).await?;
    Ok(dto.into())
}

pub(crate) async fn login(username: &str, password: &str) -> Result<TokenPair, ApiError> {
    let payload = LoginRequestDto { username, password };
    let request = json_request(Request::post(&endpoint("/access/login/")), &payload)?;
    let response = expect_ok(request.send().await).await?;
    let dto: TokenResponseDto = parse_json(response).await?;
    Ok(dto.into())
}

/// Страница задач: по фильтрам или по готовому URL из ответа сервера.
pub(crate) async fn list_challenges(
    token: &str,
    target: &FetchTarget,
) -> Result<Page<Challenge>, ApiError> {
    let builder = match target {
        FetchTarget::Filtered(filters) => {
            let pairs = filters.query_pairs();
            Request::get(&endpoint("/challenges/challenges/"))
                .query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
        }
        FetchTarget::Cursor(url) => Request::get(url),
    };

    let response = expect_ok(authorized(builder, token).send().await).await?;
    let dto: PageDto<ChallengeDto> = parse_json(response).await?;
    Ok(dto.into())
}

pub(crate) async fn get_challenge(token: &str, id: i64) -> Result<Challenge, ApiError> {
    let builder = Request::get(&endpoint(&format!("/challenges/challenges/{id}/")));
    let response = expect_ok(authorized(builder, token).send().await).await?;
    let dto: ChallengeDto = parse_json(response).await?;
    Ok(dto.into())
}

pub(crate) async fn challenge_action(
    token: &str,
    id: i64,
    action: ActionKind,
) -> Result<ActionSnapshot, ApiError> {
    let path = format!("/challenges/challenges/{id}/action/{}/", action.as_path());
    let builder = authorized(Request::post(&endpoint(&path)), token);
    let request = json_request(builder, &serde_json::json!({}))?;
    let response = expect_ok(request.send().await).await?;
    let dto: ActionSnapshotDto = parse_json(response).await?;
    Ok(dto.into())
}

pub(crate) async fn save_solution(token: &str, id: i64, solution: &str) -> Result<(), ApiError> {
    let path = format!("/challenges/challenges/{id}/save-solution/");
    let builder = authorized(Request::post(&endpoint(&path)), token);
    let request = json_request(builder, &SaveSolutionRequestDto { solution })?;
    expect_ok(request.send().await).await?;
    Ok(())
}

pub(crate) async fn execute_code(
    token: &str,
    language: &str,
    code: &str,
) -> Result<ExecutionResult, ApiError> {
    let builder = authorized(Request::post(&endpoint("/challenges/execute/")), token);
    let request = json_request(builder, &ExecuteRequestDto { language, code })?;
    let response = expect_ok(request.send().await).await?;
    parse_json(response).await
}

pub(crate) async fn run_tests(
    token: &str,
    challenge_id: i64,
    solution: &str,
) -> Result<TestReport, ApiError> {
    let builder = authorized(Request::post(&endpoint("/challenges/code-test/")), token);
    let payload = CodeTestRequestDto {
        challenge_id,
        solution,
    };
    let request = json_request(builder, &payload)?;
    let response = expect_ok(request.send().await).await?;
    parse_json(response).await
}

pub(crate) async fn filter_options(token: &str) -> Result<FilterOptions, ApiError> {
    let builder = Request::get(&endpoint("/challenges/filters/"));
    let response = expect_ok(authorized(builder, token).send().await).await?;
    let dto: FilterOptionsDto = parse_json(response).await?;
    Ok(dto.into())
}

pub(crate) async fn comments_page(
    token: &str,
    challenge_id: i64,
    page: u32,
) -> Result<Page<Comment>, ApiError> {
    let page = page.max(1).to_string();
    let builder = Request::get(&endpoint(&format!(
        "/challenges/challenges/{challenge_id}/comments/"
    )))
    .query([("page", page.as_str())]);
    let response = expect_ok(authorized(builder, token).send().await).await?;
    let dto: PageDto<Comment> = parse_json(response).await?;
    Ok(dto.into())
}

pub(crate) async fn comments_at(token: &str, url: &str) -> Result<Page<Comment>, ApiError> {
    let response = expect_ok(authorized(Request::get(url), token).send().await).await?;
    let dto: PageDto<Comment> = parse_json(response).await?;
    Ok(dto.into())
}

pub(crate) async fn add_comment(
    token: &str,
    challenge_id: i64,
    content: &str,
) -> Result<Comment, ApiError> {
    let path = format!("/challenges/challenges/{challenge_id}/comments/add");
    let builder = authorized(Request::post(&endpoint(&path)), token);
    let request = json_request(builder, &NewCommentRequestDto { content })?;
    let response = expect_ok(request.send().await).await?;
    parse_json(response).await
}

pub(crate) async fn top_users(token: &str) -> Result<Vec<TopUser>, ApiError> {
    let builder = Request::get(&endpoint("/access/top-users/"));
    let response = expect_ok(authorized(builder, token).send().await).await?;
    parse_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let url = endpoint("/challenges/filters/");
        assert!(url.ends_with("/challenges/filters/"));
        assert!(!url.contains("beta//"));
    }

    #[test]
    fn api_error_display_keeps_status() {
        let err = ApiError::Http {
            status: 401,
            message: "no".to_string(),
        };
        assert_eq!(err.to_string(), "http error 401: no");
    }
}
