use arena_core::models::FilterOptions;
use arena_core::{FilterField, FilterSet, messages};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;

fn option_list(values: Vec<String>) -> impl IntoView {
    values
        .into_iter()
        .map(|value| view! { <option value=value.clone()>{value}</option> })
        .collect_view()
}

/// Меню фильтров. Каждое изменение сразу перезапрашивает список.
#[component]
pub(crate) fn FiltersMenu(
    state: AppState,
    filters: RwSignal<FilterSet>,
    on_change: Callback<()>,
) -> impl IntoView {
    let options = RwSignal::new(FilterOptions::default());
    let load_error = RwSignal::new(None::<String>);

    if let Some(token) = state.access_token() {
        spawn_local(async move {
            match api::filter_options(&token).await {
                Ok(loaded) => options.set(loaded),
                Err(err) => {
                    web_sys::console::warn_1(&err.to_string().into());
                    load_error.set(Some(messages::FILTERS_LOAD_FAILED.to_string()));
                }
            }
        });
    } else {
        load_error.set(Some(messages::FILTERS_LOAD_FAILED.to_string()));
    }

    let select = move |field: FilterField, label: &'static str| {
        let current = move || {
            filters.with(|f| match field {
                FilterField::Category => f.category.clone(),
                FilterField::Difficulty => f.difficulty.clone(),
                FilterField::Language => f.language.clone(),
            })
        };
        let values = move || {
            options.with(|o| match field {
                FilterField::Category => o.categories.clone(),
                FilterField::Difficulty => o.difficulties.clone(),
                FilterField::Language => o.languages.clone(),
            })
        };
        view! {
            <label>
                {label}
                <select
                    prop:value=current
                    on:change=move |ev| {
                        filters.update(|f| f.set(field, event_target_value(&ev)));
                        on_change.run(());
                    }
                >
                    <option value="">"Todos"</option>
                    {move || option_list(values())}
                </select>
            </label>
        }
    };

    view! {
        <div class="filters-menu">
            {select(FilterField::Category, "Categoría ")}
            {select(FilterField::Difficulty, "Dificultad ")}
            {select(FilterField::Language, "Lenguaje ")}

            <button
                class:active=move || filters.with(|f| f.favorites)
                on:click=move |_| {
                    filters.update(FilterSet::toggle_favorites);
                    on_change.run(());
                }
            >
                "Favoritos"
            </button>
            <button
                class:active=move || filters.with(|f| f.sort_by_likes)
                on:click=move |_| {
                    filters.update(FilterSet::toggle_sort_by_likes);
                    on_change.run(());
                }
            >
                "Más gustados"
            </button>
            <button
                disabled=move || filters.with(FilterSet::is_empty)
                on:click=move |_| {
                    filters.update(FilterSet::reset);
                    on_change.run(());
                }
            >
                "Limpiar filtros"
            </button>

            <Show when=move || load_error.get().is_some()>
                <p class="error">{move || load_error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
