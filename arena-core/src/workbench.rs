//! Экран задачи: текст решения и три независимых действия.
//!
//! Запуск, тесты и сохранение имеют собственные [`ActionSlot`]. Занятый
//! слот блокирует только свою кнопку. Повторный запуск того же действия
//! отклоняется, а не отменяет текущий запрос.

use tracing::trace;

use crate::messages;
use crate::models::{Challenge, ExecutionResult, TestReport};

const TESTABLE_LANGUAGES: [&str; 2] = ["python", "javascript"];
const DEFAULT_LANGUAGE: &str = "python";

/// Для языка задачи есть прогон тестов.
pub fn tests_available(language: &str) -> bool {
    let language = language.trim();
    TESTABLE_LANGUAGES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(language))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Слот асинхронного действия: `idle -> in_flight -> idle`.
pub struct ActionSlot {
    in_flight: bool,
}

impl ActionSlot {
    /// Занимает слот. `false`, если действие уже выполняется.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Освобождает слот после успеха или ошибки.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Запрос в полёте, кнопка должна быть выключена.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

#[derive(Debug, Clone)]
/// Состояние редактора задачи.
pub struct Workbench {
    challenge: Challenge,
    solution: String,
    test_source: String,
    output: String,
    report: Option<TestReport>,
    notice: Option<String>,
    /// Запуск кода.
    pub compile: ActionSlot,
    /// Прогон тестов.
    pub test: ActionSlot,
    /// Сохранение решения.
    pub save: ActionSlot,
}

impl Workbench {
    /// Редактор с текстом из сохранённого решения задачи.
    pub fn new(challenge: Challenge) -> Self {
        let solution = challenge.solution.clone().unwrap_or_default();
        let test_source = challenge.test.clone().unwrap_or_default();
        Self {
            challenge,
            solution,
            test_source,
            output: String::new(),
            report: None,
            notice: None,
            compile: ActionSlot::default(),
            test: ActionSlot::default(),
            save: ActionSlot::default(),
        }
    }

    /// Задача.
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    /// Текущий текст решения.
    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Текущий текст тестов.
    pub fn test_source(&self) -> &str {
        &self.test_source
    }

    /// Заменяет текст решения.
    pub fn edit_solution(&mut self, code: impl Into<String>) {
        self.solution = code.into();
    }

    /// Заменяет текст тестов.
    pub fn edit_test(&mut self, code: impl Into<String>) {
        self.test_source = code.into();
    }

    /// Язык для запуска: язык задачи или `python`.
    pub fn run_language(&self) -> &str {
        let language = self.challenge.language.trim();
        if language.is_empty() {
            DEFAULT_LANGUAGE
        } else {
            language
        }
    }

    /// Показывать ли кнопку тестов.
    pub fn tests_available(&self) -> bool {
        tests_available(&self.challenge.language)
    }

    /// Начинает запуск: очищает вывод и возвращает код для отправки.
    pub fn begin_compile(&mut self) -> Option<String> {
        if !self.compile.try_begin() {
            return None;
        }
        self.output.clear();
        trace!(challenge_id = self.challenge.id, "compile started");
        Some(self.solution.clone())
    }

    /// Завершает запуск. Вывод всегда заменяется целиком.
    pub fn finish_compile<E>(&mut self, result: Result<ExecutionResult, E>) {
        self.output = match result {
            Ok(execution) => execution.display_output(),
            Err(_) => messages::EXECUTION_FAILED.to_string(),
        };
        self.compile.finish();
    }

    /// Начинает прогон тестов. `None`, если тесты недоступны или уже идут.
    pub fn begin_test(&mut self) -> Option<String> {
        if !self.tests_available() || !self.test.try_begin() {
            return None;
        }
        self.report = None;
        trace!(challenge_id = self.challenge.id, "tests started");
        Some(self.solution.clone())
    }

    /// Завершает прогон тестов.
    pub fn finish_test<E>(&mut self, result: Result<TestReport, E>) {
        self.report = Some(result.unwrap_or_else(|_| TestReport::failed()));
        self.test.finish();
    }

    /// Начинает сохранение решения.
    pub fn begin_save(&mut self) -> Option<String> {
        if !self.save.try_begin() {
            return None;
        }
        self.notice = None;
        Some(self.solution.clone())
    }

    /// Завершает сохранение и ставит одноразовое уведомление.
    pub fn finish_save<T, E>(&mut self, result: Result<T, E>) {
        let message = if result.is_ok() {
            messages::SOLUTION_SAVED
        } else {
            messages::SOLUTION_SAVE_FAILED
        };
        self.notice = Some(message.to_string());
        self.save.finish();
    }

    /// Вывод последнего запуска.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Отчёт последнего прогона тестов.
    pub fn report(&self) -> Option<&TestReport> {
        self.report.as_ref()
    }

    /// Забирает уведомление о сохранении. Второй вызов вернёт `None`.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunOutput, TestCaseResult};

    fn challenge(language: &str, solution: Option<&str>) -> Challenge {
        Challenge {
            id: 4,
            title: "Suma".to_string(),
            description: "Suma dos números".to_string(),
            difficulty: "fácil".to_string(),
            language: language.to_string(),
            categories: Vec::new(),
            likes_count: 0,
            dislikes_count: 0,
            user_liked: false,
            user_disliked: false,
            user_favorited: false,
            solution: solution.map(str::to_string),
            test: None,
        }
    }

    #[test]
    fn allow_list_is_case_insensitive_and_exact() {
        assert!(tests_available("python"));
        assert!(tests_available("JavaScript"));
        assert!(tests_available(" PYTHON "));
        assert!(!tests_available("rust"));
        assert!(!tests_available("typescript"));
        assert!(!tests_available(""));
    }

    #[test]
    fn solution_is_seeded_from_challenge() {
        let bench = Workbench::new(challenge("python", Some("print(1)")));
        assert_eq!(bench.solution(), "print(1)");

        let bench = Workbench::new(challenge("python", None));
        assert_eq!(bench.solution(), "");
        assert_eq!(bench.test_source(), "");
    }

    #[test]
    fn run_language_defaults_to_python() {
        let bench = Workbench::new(challenge("", None));
        assert_eq!(bench.run_language(), "python");
    }

    #[test]
    fn rust_challenge_has_no_test_action() {
        let mut bench = Workbench::new(challenge("rust", None));
        assert!(!bench.tests_available());
        assert!(bench.begin_test().is_none());
        assert!(!bench.test.is_in_flight());
    }

    #[test]
    fn test_slot_blocks_until_response() {
        let mut bench = Workbench::new(challenge("python", Some("x = 1")));
        assert_eq!(bench.begin_test().as_deref(), Some("x = 1"));
        assert!(bench.test.is_in_flight());
        assert!(bench.begin_test().is_none());

        // другие действия не блокируются
        assert!(bench.begin_compile().is_some());

        let report = TestReport {
            message: "ok".to_string(),
            test_results: vec![TestCaseResult {
                test_name: "test_sum".to_string(),
                status: "passed".to_string(),
                output: String::new(),
            }],
            points_awarded: Some(10),
        };
        bench.finish_test::<()>(Ok(report));
        assert!(!bench.test.is_in_flight());
        assert_eq!(bench.report().map(|r| r.points_awarded), Some(Some(10)));
    }

    #[test]
    fn failed_test_run_produces_error_report() {
        let mut bench = Workbench::new(challenge("javascript", None));
        bench.begin_test();
        bench.finish_test(Err("boom"));
        let report = bench.report().expect("report present");
        assert_eq!(report.message, messages::TESTS_FAILED);
        assert!(report.test_results.is_empty());
    }

    #[test]
    fn compile_output_is_replaced_not_appended() {
        let mut bench = Workbench::new(challenge("python", None));
        bench.begin_compile();
        bench.finish_compile::<()>(Ok(ExecutionResult {
            run: RunOutput {
                stdout: Some("first".to_string()),
            },
        }));
        assert_eq!(bench.output(), "first");

        bench.begin_compile();
        assert_eq!(bench.output(), "");
        bench.finish_compile(Err("network"));
        assert_eq!(bench.output(), messages::EXECUTION_FAILED);
        assert!(!bench.compile.is_in_flight());
    }

    #[test]
    fn save_notice_is_one_shot() {
        let mut bench = Workbench::new(challenge("python", None));
        bench.edit_solution("print(2)");
        assert_eq!(bench.begin_save().as_deref(), Some("print(2)"));
        assert!(bench.begin_save().is_none());
        bench.finish_save::<(), ()>(Ok(()));

        assert_eq!(bench.take_notice().as_deref(), Some(messages::SOLUTION_SAVED));
        assert!(bench.take_notice().is_none());

        bench.begin_save();
        bench.finish_save::<(), &str>(Err("500"));
        assert_eq!(
            bench.take_notice().as_deref(),
            Some(messages::SOLUTION_SAVE_FAILED)
        );
    }
}
