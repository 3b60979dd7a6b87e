use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пара bearer-токенов, выданная сервером при входе.
pub struct TokenPair {
    /// Access token для заголовка `Authorization`.
    pub access: String,
    /// Refresh token. Клиент только хранит его.
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Категория задачи.
pub struct Category {
    /// Название категории.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Задача платформы в нормализованном виде.
///
/// Счётчики и флаги пользователя всегда присутствуют: отсутствующие или
/// `null` значения сервера превращаются в `0` и `false` при разборе
/// (см. [`crate::wire::ChallengeDto`]).
pub struct Challenge {
    /// Идентификатор задачи.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Описание условия.
    pub description: String,
    /// Сложность.
    pub difficulty: String,
    /// Язык решения.
    pub language: String,
    /// Категории задачи.
    pub categories: Vec<Category>,
    /// Количество лайков.
    pub likes_count: u64,
    /// Количество дизлайков.
    pub dislikes_count: u64,
    /// Текущий пользователь поставил лайк.
    pub user_liked: bool,
    /// Текущий пользователь поставил дизлайк.
    pub user_disliked: bool,
    /// Задача в избранном у текущего пользователя.
    pub user_favorited: bool,
    /// Сохранённое решение пользователя.
    pub solution: Option<String>,
    /// Исходник тестов, если сервер его отдаёт.
    pub test: Option<String>,
}

impl Challenge {
    /// Применяет снимок счётчиков и флагов, полученный от сервера.
    pub fn apply_snapshot(&mut self, snapshot: &ActionSnapshot) {
        self.user_liked = snapshot.user_liked;
        self.user_disliked = snapshot.user_disliked;
        self.user_favorited = snapshot.user_favorited;
        self.likes_count = snapshot.likes_count;
        self.dislikes_count = snapshot.dislikes_count;
    }

    /// Названия категорий через запятую.
    pub fn category_names(&self) -> String {
        self.categories
            .iter()
            .map(|category| category.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Действие пользователя над задачей.
pub enum ActionKind {
    /// Лайк.
    Like,
    /// Дизлайк.
    Dislike,
    /// Избранное.
    Favorite,
}

impl ActionKind {
    /// Сегмент пути в `/challenges/challenges/{id}/action/{segment}/`.
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Favorite => "favorite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Ответ сервера на действие: итоговые флаги и счётчики задачи.
pub struct ActionSnapshot {
    /// Лайк текущего пользователя.
    pub user_liked: bool,
    /// Дизлайк текущего пользователя.
    pub user_disliked: bool,
    /// Избранное у текущего пользователя.
    pub user_favorited: bool,
    /// Количество лайков.
    pub likes_count: u64,
    /// Количество дизлайков.
    pub dislikes_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Непрозрачный курсор пагинации.
///
/// URL хранятся и отправляются как есть, клиент их не разбирает.
pub struct PageCursor {
    /// URL следующей страницы.
    pub next: Option<String>,
    /// URL предыдущей страницы.
    pub previous: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Страница результатов с курсором.
pub struct Page<T> {
    /// Элементы страницы.
    pub results: Vec<T>,
    /// Ссылки на соседние страницы.
    pub cursor: PageCursor,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Значения для меню фильтров.
pub struct FilterOptions {
    /// Категории.
    pub categories: Vec<String>,
    /// Языки.
    pub languages: Vec<String>,
    /// Уровни сложности.
    pub difficulties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Комментарий к задаче.
pub struct Comment {
    /// Автор.
    #[serde(default)]
    pub user: String,
    /// Текст.
    #[serde(default)]
    pub content: String,
    /// Время публикации в формате сервера.
    #[serde(default)]
    pub timestamp: String,
    /// Лайки комментария.
    #[serde(default)]
    pub likes: Option<u64>,
    /// Дизлайки комментария.
    #[serde(default)]
    pub dislikes: Option<u64>,
}

impl Comment {
    /// Время публикации, если сервер прислал его в RFC 3339.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Время для отображения: `YYYY-MM-DD HH:MM` или исходная строка.
    pub fn display_timestamp(&self) -> String {
        match self.posted_at() {
            Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
/// Ответ на запуск кода.
pub struct ExecutionResult {
    /// Результат выполнения.
    #[serde(default)]
    pub run: RunOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
/// Вывод запущенной программы.
pub struct RunOutput {
    /// Стандартный вывод.
    #[serde(default)]
    pub stdout: Option<String>,
}

impl ExecutionResult {
    /// Текст для панели вывода. Пустой вывод заменяется заглушкой.
    pub fn display_output(&self) -> String {
        match self.run.stdout.as_deref() {
            Some(stdout) if !stdout.is_empty() => stdout.to_string(),
            _ => messages::NO_OUTPUT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Результат прогона тестов решения.
pub struct TestReport {
    /// Итоговое сообщение сервера.
    #[serde(default)]
    pub message: String,
    /// Результаты отдельных тестов.
    #[serde(default)]
    pub test_results: Vec<TestCaseResult>,
    /// Начисленные баллы.
    #[serde(default)]
    pub points_awarded: Option<i64>,
}

impl TestReport {
    /// Отчёт-заглушка для неудачного запроса.
    pub fn failed() -> Self {
        Self {
            message: messages::TESTS_FAILED.to_string(),
            test_results: Vec::new(),
            points_awarded: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Результат одного теста.
pub struct TestCaseResult {
    /// Имя теста.
    #[serde(default)]
    pub test_name: String,
    /// Статус (`passed` для успешного).
    #[serde(default)]
    pub status: String,
    /// Захваченный вывод.
    #[serde(default)]
    pub output: String,
}

impl TestCaseResult {
    /// Тест пройден.
    pub fn passed(&self) -> bool {
        self.status.eq_ignore_ascii_case("passed")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Строка таблицы лидеров.
pub struct TopUser {
    /// Логин.
    pub username: String,
    /// Баллы.
    #[serde(default)]
    pub points: i64,
}
