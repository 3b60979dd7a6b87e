//! Лента комментариев и форма нового комментария.
//!
//! Форма и лента работают с одним [`CommentFeed`], которым владеет экран
//! задачи: новый комментарий попадает в ленту без повторной загрузки.

use tracing::trace;

use crate::messages;
use crate::models::{Comment, Page};

/// Остаток прокрутки в пикселях, при котором подгружается следующая страница.
pub const SCROLL_THRESHOLD_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Геометрия прокручиваемого контейнера.
pub struct ScrollMetrics {
    /// Текущая позиция прокрутки.
    pub scroll_top: f64,
    /// Полная высота содержимого.
    pub scroll_height: f64,
    /// Видимая высота контейнера.
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Сколько пикселей осталось до конца.
    pub fn remaining(&self) -> f64 {
        self.scroll_height - (self.scroll_top + self.client_height)
    }

    /// Остаток меньше порога.
    pub fn near_bottom(&self) -> bool {
        self.remaining() <= SCROLL_THRESHOLD_PX
    }
}

#[derive(Debug, Clone, Default)]
/// Загруженные комментарии и курсор следующей страницы.
pub struct CommentFeed {
    comments: Vec<Comment>,
    next: Option<String>,
    loading: bool,
}

impl CommentFeed {
    /// Пустая лента.
    pub fn new() -> Self {
        Self::default()
    }

    /// Заменяет ленту первой страницей.
    pub fn reset(&mut self, page: Page<Comment>) {
        self.comments = page.results;
        self.next = page.cursor.next;
        self.loading = false;
    }

    /// Нужно ли подгружать страницу при такой прокрутке.
    pub fn scroll_should_load(&self, metrics: ScrollMetrics) -> bool {
        metrics.near_bottom() && self.next.is_some() && !self.loading
    }

    /// Начинает подгрузку: возвращает курсор и ставит флаг загрузки.
    ///
    /// `None`, если страниц больше нет или подгрузка уже идёт.
    pub fn begin_load_more(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        let cursor = self.next.clone()?;
        self.loading = true;
        trace!(%cursor, "loading more comments");
        Some(cursor)
    }

    /// Добавляет страницу в конец и сдвигает курсор.
    pub fn finish_load_more(&mut self, page: Page<Comment>) {
        self.comments.extend(page.results);
        self.next = page.cursor.next;
        self.loading = false;
    }

    /// Подгрузка не удалась: лента и курсор прежние.
    pub fn fail_load_more(&mut self) {
        self.loading = false;
    }

    /// Вставляет комментарий в начало ленты.
    pub fn prepend(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    /// Комментарии.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Курсор следующей страницы.
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Идёт подгрузка.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Показывать заглушку «комментариев нет».
    pub fn is_exhausted_and_empty(&self) -> bool {
        self.comments.is_empty() && self.next.is_none() && !self.loading
    }
}

#[derive(Debug, Clone, Default)]
/// Форма нового комментария.
pub struct CommentDraft {
    content: String,
    submitting: bool,
    error: Option<String>,
    success: Option<String>,
}

impl CommentDraft {
    /// Пустая форма.
    pub fn new() -> Self {
        Self::default()
    }

    /// Текст в поле ввода.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Заменяет текст поля.
    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Начинает отправку. `None` для пустого текста или повторной отправки.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.submitting || self.content.trim().is_empty() {
            return None;
        }
        self.submitting = true;
        self.error = None;
        self.success = None;
        Some(self.content.clone())
    }

    /// Отправка прошла: поле очищается.
    pub fn submit_succeeded(&mut self) {
        self.content.clear();
        self.submitting = false;
        self.success = Some(messages::COMMENT_ADDED.to_string());
    }

    /// Отправка не удалась: текст остаётся в поле.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
        self.error = Some(messages::COMMENT_FAILED.to_string());
    }

    /// Идёт отправка.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Ошибка отправки.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Сообщение об успехе.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }
}
