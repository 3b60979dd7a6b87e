//! Набор фильтров списка задач.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Строковый фильтр, который выставляется кликом по тегу или выбором в меню.
pub enum FilterField {
    /// Категория.
    Category,
    /// Сложность.
    Difficulty,
    /// Язык.
    Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Клиентские параметры запроса списка. Поля независимы друг от друга.
pub struct FilterSet {
    /// Категория, пустая строка означает «все».
    pub category: String,
    /// Сложность.
    pub difficulty: String,
    /// Язык.
    pub language: String,
    /// Только избранные.
    pub favorites: bool,
    /// Сортировка по лайкам.
    pub sort_by_likes: bool,
}

impl FilterSet {
    /// Выставляет одно поле, остальные не трогает.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into().trim().to_string();
        match field {
            FilterField::Category => self.category = value,
            FilterField::Difficulty => self.difficulty = value,
            FilterField::Language => self.language = value,
        }
    }

    /// Копия набора с изменённым полем.
    pub fn with(&self, field: FilterField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set(field, value);
        next
    }

    /// Переключает «только избранные».
    pub fn toggle_favorites(&mut self) {
        self.favorites = !self.favorites;
    }

    /// Переключает сортировку по лайкам.
    pub fn toggle_sort_by_likes(&mut self) {
        self.sort_by_likes = !self.sort_by_likes;
    }

    /// Сбрасывает все фильтры.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Фильтры не выставлены.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Параметры запроса: только активные фильтры, флаги как `"true"`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("category", &self.category),
            ("difficulty", &self.difficulty),
            ("language", &self.language),
        ] {
            if !value.is_empty() {
                pairs.push((key, value.clone()));
            }
        }
        if self.favorites {
            pairs.push(("favorites", "true".to_string()));
        }
        if self.sort_by_likes {
            pairs.push(("sort_by_likes", "true".to_string()));
        }
        pairs
    }
}
