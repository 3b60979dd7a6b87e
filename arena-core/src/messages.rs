//! Фиксированные сообщения для пользователя.
//!
//! Ошибки не различаются по коду ответа: любой сбой в своей категории
//! показывается одной и той же строкой.

/// Пароль и подтверждение не совпадают.
pub const PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";
/// Не заполнены обязательные поля формы.
pub const FIELDS_REQUIRED: &str = "Completa todos los campos";
/// Некорректный email при регистрации.
pub const INVALID_EMAIL: &str = "Correo electrónico inválido";
/// Неверный логин или пароль.
pub const BAD_CREDENTIALS: &str = "Credenciales incorrectas";
/// Регистрация не удалась.
pub const REGISTRATION_FAILED: &str = "Error al registrar el usuario";

/// Не удалось загрузить список задач.
pub const CHALLENGES_LOAD_FAILED: &str = "No se pudieron cargar los desafíos. Inicia sesión.";
/// Не удалось выполнить лайк/дизлайк/избранное.
pub const ACTION_FAILED: &str = "No se pudo realizar la acción.";
/// Не удалось загрузить значения фильтров.
pub const FILTERS_LOAD_FAILED: &str = "Error al cargar las opciones de filtro";

/// Не удалось загрузить задачу.
pub const CHALLENGE_LOAD_FAILED: &str = "Error al cargar el desafío.";
/// Программа ничего не вывела.
pub const NO_OUTPUT: &str = "No se generó salida.";
/// Запуск кода завершился ошибкой.
pub const EXECUTION_FAILED: &str = "Error al ejecutar el código.";
/// Прогон тестов завершился ошибкой.
pub const TESTS_FAILED: &str = "Error al ejecutar los tests.";
/// Тесты недоступны для языка задачи.
pub const TESTS_UNAVAILABLE: &str = "Tests no disponibles para este lenguaje.";
/// Решение сохранено.
pub const SOLUTION_SAVED: &str = "Solución guardada";
/// Решение не сохранено.
pub const SOLUTION_SAVE_FAILED: &str = "Error al guardar la solución";

/// Комментарий добавлен.
pub const COMMENT_ADDED: &str = "Comentario agregado con éxito";
/// Комментарий не добавлен.
pub const COMMENT_FAILED: &str = "Ocurrió un error al agregar el comentario.";
/// Не удалось загрузить комментарии.
pub const COMMENTS_LOAD_FAILED: &str = "Error al cargar los comentarios.";
/// Комментариев нет.
pub const NO_COMMENTS: &str = "No hay comentarios disponibles.";

/// Не удалось загрузить таблицу лидеров.
pub const LEADERBOARD_FAILED: &str = "Error al cargar los datos o no autorizado";
