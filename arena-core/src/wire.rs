//! DTO ответов сервера и их нормализация в модели ядра.
//!
//! Сервер может опускать поля или присылать `null`; все такие значения
//! сворачиваются в безопасные значения по умолчанию здесь, а не на экранах.

use serde::{Deserialize, Serialize};

use crate::models::{
    ActionSnapshot, Category, Challenge, Comment, FilterOptions, Page, PageCursor, TokenPair,
};

#[derive(Debug, Deserialize)]
/// Ответ выдачи токенов (`/token/`, `/access/login/`).
pub struct TokenResponseDto {
    /// Access token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

impl From<TokenResponseDto> for TokenPair {
    fn from(value: TokenResponseDto) -> Self {
        Self {
            access: value.access,
            refresh: value.refresh,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// Задача в том виде, в каком её присылает сервер.
pub struct ChallengeDto {
    /// Идентификатор.
    pub id: i64,
    /// Заголовок.
    #[serde(default)]
    pub title: Option<String>,
    /// Описание.
    #[serde(default)]
    pub description: Option<String>,
    /// Сложность.
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Язык.
    #[serde(default)]
    pub language: Option<String>,
    /// Категории.
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    /// Лайки.
    #[serde(default)]
    pub likes_count: Option<u64>,
    /// Дизлайки.
    #[serde(default)]
    pub dislikes_count: Option<u64>,
    /// Лайк пользователя.
    #[serde(default)]
    pub user_liked: Option<bool>,
    /// Дизлайк пользователя.
    #[serde(default)]
    pub user_disliked: Option<bool>,
    /// Избранное пользователя.
    #[serde(default)]
    pub user_favorited: Option<bool>,
    /// Сохранённое решение.
    #[serde(default)]
    pub solution: Option<String>,
    /// Исходник тестов.
    #[serde(default)]
    pub test: Option<String>,
}

impl From<ChallengeDto> for Challenge {
    fn from(value: ChallengeDto) -> Self {
        Self {
            id: value.id,
            title: value.title.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            difficulty: value.difficulty.unwrap_or_default(),
            language: value.language.unwrap_or_default(),
            categories: value.categories.unwrap_or_default(),
            likes_count: value.likes_count.unwrap_or(0),
            dislikes_count: value.dislikes_count.unwrap_or(0),
            user_liked: value.user_liked.unwrap_or(false),
            user_disliked: value.user_disliked.unwrap_or(false),
            user_favorited: value.user_favorited.unwrap_or(false),
            solution: value.solution,
            test: value.test,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Страница ответа `{results, next, previous}`.
pub struct PageDto<T> {
    /// Элементы страницы.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// URL следующей страницы.
    #[serde(default)]
    pub next: Option<String>,
    /// URL предыдущей страницы.
    #[serde(default)]
    pub previous: Option<String>,
}

fn page_cursor(next: Option<String>, previous: Option<String>) -> PageCursor {
    // пустая строка означает отсутствие ссылки так же, как null
    PageCursor {
        next: next.filter(|url| !url.trim().is_empty()),
        previous: previous.filter(|url| !url.trim().is_empty()),
    }
}

impl From<PageDto<ChallengeDto>> for Page<Challenge> {
    fn from(value: PageDto<ChallengeDto>) -> Self {
        Self {
            results: value.results.into_iter().map(Challenge::from).collect(),
            cursor: page_cursor(value.next, value.previous),
        }
    }
}

impl From<PageDto<Comment>> for Page<Comment> {
    fn from(value: PageDto<Comment>) -> Self {
        Self {
            results: value.results,
            cursor: page_cursor(value.next, value.previous),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Ответ на лайк/дизлайк/избранное.
pub struct ActionSnapshotDto {
    /// Лайк пользователя.
    #[serde(default)]
    pub user_liked: Option<bool>,
    /// Дизлайк пользователя.
    #[serde(default)]
    pub user_disliked: Option<bool>,
    /// Избранное пользователя.
    #[serde(default)]
    pub user_favorited: Option<bool>,
    /// Лайки.
    #[serde(default)]
    pub likes_count: Option<u64>,
    /// Дизлайки.
    #[serde(default)]
    pub dislikes_count: Option<u64>,
}

impl From<ActionSnapshotDto> for ActionSnapshot {
    fn from(value: ActionSnapshotDto) -> Self {
        Self {
            user_liked: value.user_liked.unwrap_or(false),
            user_disliked: value.user_disliked.unwrap_or(false),
            user_favorited: value.user_favorited.unwrap_or(false),
            likes_count: value.likes_count.unwrap_or(0),
            dislikes_count: value.dislikes_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NamedDto {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DifficultyDto {
    #[serde(default)]
    grado: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FilterGroupsDto {
    #[serde(default)]
    categories: Option<Vec<NamedDto>>,
    #[serde(default)]
    languages: Option<Vec<NamedDto>>,
    #[serde(default)]
    difficulties: Option<Vec<DifficultyDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Ответ `/challenges/filters/`.
pub struct FilterOptionsDto {
    #[serde(default)]
    filters: Option<FilterGroupsDto>,
}

impl From<FilterOptionsDto> for FilterOptions {
    fn from(value: FilterOptionsDto) -> Self {
        let groups = value.filters.unwrap_or_default();
        Self {
            categories: collect_names(groups.categories, |dto| dto.name),
            languages: collect_names(groups.languages, |dto| dto.name),
            difficulties: collect_names(groups.difficulties, |dto| dto.grado),
        }
    }
}

fn collect_names<T>(items: Option<Vec<T>>, name: impl Fn(T) -> Option<String>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .filter_map(name)
        .filter(|value| !value.trim().is_empty())
        .collect()
}

#[derive(Debug, Serialize)]
/// Тело регистрации.
pub struct RegisterRequestDto<'a> {
    /// Логин.
    pub username: &'a str,
    /// Email.
    pub email: &'a str,
    /// Пароль.
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
/// Тело входа и выдачи токенов.
pub struct LoginRequestDto<'a> {
    /// Логин.
    pub username: &'a str,
    /// Пароль.
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
/// Тело запуска кода.
pub struct ExecuteRequestDto<'a> {
    /// Язык.
    pub language: &'a str,
    /// Исходный код.
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
/// Тело прогона тестов.
pub struct CodeTestRequestDto<'a> {
    /// Идентификатор задачи.
    pub challenge_id: i64,
    /// Решение.
    pub solution: &'a str,
}

#[derive(Debug, Serialize)]
/// Тело сохранения решения.
pub struct SaveSolutionRequestDto<'a> {
    /// Решение.
    pub solution: &'a str,
}

#[derive(Debug, Serialize)]
/// Тело нового комментария.
pub struct NewCommentRequestDto<'a> {
    /// Текст.
    pub content: &'a str,
}
