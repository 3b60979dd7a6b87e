//! Общее ядро клиента платформы задач: модели API и состояние экранов.
//!
//! Крейт не выполняет ввода-вывода. Транспорт (`arena-client` на `reqwest`,
//! `arena-wasm` на `gloo-net`) получает данные от сервера, а ядро решает,
//! как они меняют состояние:
//! - сессия и два bearer-токена (`session`), защита экранов (`guard`);
//! - фильтры, список задач и курсор пагинации (`filters`, `listing`);
//! - редактор решения с тремя независимыми действиями (`workbench`);
//! - лента комментариев с подгрузкой при прокрутке (`comments`).
#![warn(missing_docs)]

pub mod comments;
pub mod filters;
pub mod guard;
pub mod listing;
pub mod messages;
pub mod models;
pub mod session;
pub mod validation;
pub mod wire;
pub mod workbench;

pub use comments::{CommentDraft, CommentFeed, ScrollMetrics, SCROLL_THRESHOLD_PX};
pub use filters::{FilterField, FilterSet};
pub use guard::{Route, guard};
pub use listing::{ChallengeList, FetchTarget, FetchTicket};
pub use models::{
    ActionKind, ActionSnapshot, Category, Challenge, Comment, ExecutionResult, FilterOptions, Page,
    PageCursor, RunOutput, TestCaseResult, TestReport, TokenPair, TopUser,
};
pub use session::{MemoryTokenStore, SessionError, SessionService, TokenStore};
pub use validation::{FormError, LoginForm, RegistrationForm};
pub use workbench::{ActionSlot, Workbench, tests_available};
