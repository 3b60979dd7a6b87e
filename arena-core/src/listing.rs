//! Состояние экрана списка задач.
//!
//! Каждая загрузка получает [`FetchTicket`]. Применяется только ответ на
//! последний выданный билет: если пользователь успел сменить фильтр или
//! перейти на другую страницу, старый ответ отбрасывается.

use tracing::{debug, trace};

use crate::filters::FilterSet;
use crate::messages;
use crate::models::{ActionSnapshot, Challenge, Page, PageCursor};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Откуда брать следующую страницу.
pub enum FetchTarget {
    /// Первая страница с текущими фильтрами.
    Filtered(FilterSet),
    /// URL из курсора, отправляется как есть, без фильтров клиента.
    Cursor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Билет загрузки.
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Default)]
/// Список задач с курсором и ошибкой страницы.
pub struct ChallengeList {
    items: Vec<Challenge>,
    cursor: PageCursor,
    error: Option<String>,
    loading: bool,
    generation: u64,
}

impl ChallengeList {
    /// Пустой список.
    pub fn new() -> Self {
        Self::default()
    }

    /// Начинает загрузку и делает все предыдущие билеты устаревшими.
    pub fn begin_fetch(&mut self, target: &FetchTarget) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        trace!(generation = self.generation, ?target, "challenge list fetch started");
        FetchTicket(self.generation)
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Заменяет список целиком. Возвращает `false` для устаревшего билета.
    pub fn apply_page(&mut self, ticket: FetchTicket, page: Page<Challenge>) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, current = self.generation, "stale challenge page dropped");
            return false;
        }
        self.items = page.results;
        self.cursor = page.cursor;
        self.error = None;
        self.loading = false;
        true
    }

    /// Отмечает неудачную загрузку: список пуст, показывается ошибка страницы.
    pub fn apply_error(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.items.clear();
        self.cursor = PageCursor::default();
        self.error = Some(messages::CHALLENGES_LOAD_FAILED.to_string());
        self.loading = false;
        true
    }

    /// Обновляет одну задачу снимком сервера. Остальные элементы не меняются.
    pub fn apply_action(&mut self, id: i64, snapshot: &ActionSnapshot) -> bool {
        match self.items.iter_mut().find(|challenge| challenge.id == id) {
            Some(challenge) => {
                challenge.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Ошибка действия: элементы не трогаются, показывается сообщение.
    pub fn action_failed(&mut self) {
        self.error = Some(messages::ACTION_FAILED.to_string());
    }

    /// Сбрасывает сообщение об ошибке.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Задачи текущей страницы.
    pub fn items(&self) -> &[Challenge] {
        &self.items
    }

    /// Курсор последнего ответа.
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Текущая ошибка.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Идёт загрузка.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Кнопка «следующая страница» активна.
    pub fn has_next(&self) -> bool {
        self.cursor.next.is_some()
    }

    /// Кнопка «предыдущая страница» активна.
    pub fn has_previous(&self) -> bool {
        self.cursor.previous.is_some()
    }

    /// Цель для перехода вперёд.
    pub fn next_target(&self) -> Option<FetchTarget> {
        self.cursor.next.clone().map(FetchTarget::Cursor)
    }

    /// Цель для перехода назад.
    pub fn previous_target(&self) -> Option<FetchTarget> {
        self.cursor.previous.clone().map(FetchTarget::Cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn challenge(id: i64, likes: u64) -> Challenge {
        Challenge {
            id,
            title: format!("challenge {id}"),
            description: String::new(),
            difficulty: "fácil".to_string(),
            language: "python".to_string(),
            categories: vec![Category {
                name: "arrays".to_string(),
            }],
            likes_count: likes,
            dislikes_count: 0,
            user_liked: false,
            user_disliked: false,
            user_favorited: false,
            solution: None,
            test: None,
        }
    }

    fn page(items: Vec<Challenge>, next: Option<&str>, previous: Option<&str>) -> Page<Challenge> {
        Page {
            results: items,
            cursor: PageCursor {
                next: next.map(str::to_string),
                previous: previous.map(str::to_string),
            },
        }
    }

    #[test]
    fn page_replaces_items_and_drives_pagination_controls() {
        let mut list = ChallengeList::new();
        let ticket = list.begin_fetch(&FetchTarget::Filtered(FilterSet::default()));
        assert!(list.is_loading());

        assert!(list.apply_page(ticket, page(vec![challenge(1, 0)], Some("U2"), None)));
        assert!(!list.is_loading());
        assert!(list.has_next());
        assert!(!list.has_previous());
        assert_eq!(list.next_target(), Some(FetchTarget::Cursor("U2".to_string())));
        assert_eq!(list.previous_target(), None);

        let ticket = list.begin_fetch(&FetchTarget::Cursor("U2".to_string()));
        assert!(list.apply_page(ticket, page(vec![challenge(2, 0)], None, Some("U1"))));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].id, 2);
        assert!(!list.has_next());
        assert!(list.has_previous());
    }

    #[test]
    fn stale_page_is_discarded() {
        let mut list = ChallengeList::new();
        let old = list.begin_fetch(&FetchTarget::Filtered(FilterSet::default()));
        let current = list.begin_fetch(&FetchTarget::Cursor("U2".to_string()));

        assert!(list.apply_page(current, page(vec![challenge(2, 0)], None, None)));
        assert!(!list.apply_page(old, page(vec![challenge(1, 0)], None, None)));
        assert_eq!(list.items()[0].id, 2);
        assert!(!list.apply_error(old));
        assert!(list.error().is_none());
    }

    #[test]
    fn action_patches_only_matching_entry() {
        let mut list = ChallengeList::new();
        let ticket = list.begin_fetch(&FetchTarget::Filtered(FilterSet::default()));
        list.apply_page(
            ticket,
            page(vec![challenge(3, 1), challenge(7, 4), challenge(9, 2)], None, None),
        );

        let snapshot = ActionSnapshot {
            user_liked: true,
            user_disliked: false,
            user_favorited: false,
            likes_count: 5,
            dislikes_count: 0,
        };
        assert!(list.apply_action(7, &snapshot));

        let items = list.items();
        assert_eq!(items[0].likes_count, 1);
        assert!(!items[0].user_liked);
        assert_eq!(items[1].likes_count, 5);
        assert!(items[1].user_liked);
        assert_eq!(items[2].likes_count, 2);
    }

    #[test]
    fn action_for_unknown_id_changes_nothing() {
        let mut list = ChallengeList::new();
        let ticket = list.begin_fetch(&FetchTarget::Filtered(FilterSet::default()));
        list.apply_page(ticket, page(vec![challenge(1, 1)], None, None));

        assert!(!list.apply_action(42, &ActionSnapshot::default()));
        assert_eq!(list.items()[0].likes_count, 1);
    }

    #[test]
    fn failed_action_keeps_entries() {
        let mut list = ChallengeList::new();
        let ticket = list.begin_fetch(&FetchTarget::Filtered(FilterSet::default()));
        list.apply_page(ticket, page(vec![challenge(1, 3)], None, None));

        list.action_failed();
        assert_eq!(list.error(), Some(messages::ACTION_FAILED));
        assert_eq!(list.items()[0].likes_count, 3);
    }

    #[test]
    fn fetch_error_empties_list() {
        let mut list = ChallengeList::new();
        let ticket = list.begin_fetch(&FetchTarget::Filtered(FilterSet::default()));
        list.apply_page(ticket, page(vec![challenge(1, 0)], Some("U2"), None));

        let ticket = list.begin_fetch(&FetchTarget::Filtered(FilterSet::default()));
        assert!(list.apply_error(ticket));
        assert!(list.items().is_empty());
        assert!(!list.has_next());
        assert_eq!(list.error(), Some(messages::CHALLENGES_LOAD_FAILED));
    }
}
