//! Проверка форм входа и регистрации до отправки запроса.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::messages;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Ошибка заполнения формы. `Display` даёт готовое сообщение для экрана.
pub enum FormError {
    /// Пароль и подтверждение различаются.
    #[error("{}", messages::PASSWORD_MISMATCH)]
    PasswordMismatch,

    /// Пустое обязательное поле.
    #[error("{}", messages::FIELDS_REQUIRED)]
    FieldsRequired,

    /// Некорректный email.
    #[error("{}", messages::INVALID_EMAIL)]
    InvalidEmail,
}

#[derive(Debug, Clone, Default, Validate)]
/// Поля формы регистрации.
pub struct RegistrationForm {
    /// Логин.
    #[validate(length(min = 1))]
    pub username: String,
    /// Email.
    #[validate(email)]
    pub email: String,
    /// Пароль.
    #[validate(length(min = 1))]
    pub password: String,
    /// Подтверждение пароля.
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Проверяет форму. Несовпадение паролей важнее остальных ошибок.
    pub fn check(&self) -> Result<(), FormError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        if has_field(&errors, "confirm_password") {
            return Err(FormError::PasswordMismatch);
        }
        if has_field(&errors, "username")
            || has_field(&errors, "password")
            || self.email.trim().is_empty()
        {
            return Err(FormError::FieldsRequired);
        }
        Err(FormError::InvalidEmail)
    }
}

#[derive(Debug, Clone, Default, Validate)]
/// Поля формы входа.
pub struct LoginForm {
    /// Логин.
    #[validate(length(min = 1))]
    pub username: String,
    /// Пароль.
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Проверяет, что оба поля заполнены.
    pub fn check(&self) -> Result<(), FormError> {
        self.validate().map_err(|_| FormError::FieldsRequired)
    }
}

fn has_field(errors: &ValidationErrors, field: &str) -> bool {
    errors.field_errors().contains_key(field)
}
