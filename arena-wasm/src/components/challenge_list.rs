use arena_core::models::{ActionKind, Challenge};
use arena_core::{ChallengeList, FetchTarget, FilterField, FilterSet, Route};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::filters_menu::FiltersMenu;
use crate::state::AppState;

/// Ключ строки: меняется вместе со счётчиками, чтобы `For` перерисовал карточку.
fn card_key(challenge: &Challenge) -> (i64, u64, u64, bool, bool, bool) {
    (
        challenge.id,
        challenge.likes_count,
        challenge.dislikes_count,
        challenge.user_liked,
        challenge.user_disliked,
        challenge.user_favorited,
    )
}

fn fetch(state: AppState, list: RwSignal<ChallengeList>, target: FetchTarget) {
    let Some(ticket) = list.try_update(|l| l.begin_fetch(&target)) else {
        return;
    };

    spawn_local(async move {
        let Some(token) = state.access_token() else {
            list.try_update(|l| l.apply_error(ticket));
            return;
        };
        match api::list_challenges(&token, &target).await {
            Ok(page) => {
                list.try_update(|l| l.apply_page(ticket, page));
            }
            Err(err) => {
                web_sys::console::warn_1(&err.to_string().into());
                list.try_update(|l| l.apply_error(ticket));
            }
        }
    });
}

fn run_action(state: AppState, list: RwSignal<ChallengeList>, id: i64, action: ActionKind) {
    let Some(token) = state.access_token() else {
        list.update(ChallengeList::action_failed);
        return;
    };
    list.update(ChallengeList::clear_error);

    spawn_local(async move {
        match api::challenge_action(&token, id, action).await {
            Ok(snapshot) => {
                list.try_update(|l| l.apply_action(id, &snapshot));
            }
            Err(err) => {
                web_sys::console::warn_1(&err.to_string().into());
                list.try_update(ChallengeList::action_failed);
            }
        }
    });
}

#[component]
fn ChallengeCard(
    challenge: Challenge,
    on_action: Callback<(i64, ActionKind)>,
    on_tag: Callback<(FilterField, String)>,
    on_open: Callback<i64>,
) -> impl IntoView {
    let id = challenge.id;
    let difficulty = challenge.difficulty.clone();
    let language = challenge.language.clone();
    let favorite_label = if challenge.user_favorited {
        "★ Favorito"
    } else {
        "☆ Favorito"
    };

    let category_tags = challenge
        .categories
        .iter()
        .map(|category| {
            let name = category.name.clone();
            let label = name.clone();
            view! {
                <button
                    class="tag"
                    on:click=move |_| on_tag.run((FilterField::Category, name.clone()))
                >
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <li class="challenge-card">
            <h3>
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    on_open.run(id);
                }>
                    {challenge.title.clone()}
                </a>
            </h3>
            <p>{challenge.description.clone()}</p>
            <div class="tags">
                <button
                    class="tag"
                    on:click={
                        let difficulty = difficulty.clone();
                        move |_| on_tag.run((FilterField::Difficulty, difficulty.clone()))
                    }
                >
                    {difficulty.clone()}
                </button>
                <button
                    class="tag"
                    on:click={
                        let language = language.clone();
                        move |_| on_tag.run((FilterField::Language, language.clone()))
                    }
                >
                    {language.clone()}
                </button>
                {category_tags}
            </div>
            <div class="actions">
                <button
                    class:active=challenge.user_liked
                    on:click=move |_| on_action.run((id, ActionKind::Like))
                >
                    {format!("👍 {}", challenge.likes_count)}
                </button>
                <button
                    class:active=challenge.user_disliked
                    on:click=move |_| on_action.run((id, ActionKind::Dislike))
                >
                    {format!("👎 {}", challenge.dislikes_count)}
                </button>
                <button on:click=move |_| on_action.run((id, ActionKind::Favorite))>
                    {favorite_label}
                </button>
            </div>
        </li>
    }
}

#[component]
pub(crate) fn ChallengeListPanel(state: AppState) -> impl IntoView {
    let list = RwSignal::new(ChallengeList::new());
    let filters = RwSignal::new(FilterSet::default());

    fetch(state, list, FetchTarget::Filtered(FilterSet::default()));

    let on_filters_change = Callback::new(move |_| {
        fetch(state, list, FetchTarget::Filtered(filters.get_untracked()));
    });

    let on_tag = Callback::new(move |(field, value): (FilterField, String)| {
        filters.update(|f| f.set(field, value));
        fetch(state, list, FetchTarget::Filtered(filters.get_untracked()));
    });

    let on_action = Callback::new(move |(id, action): (i64, ActionKind)| {
        run_action(state, list, id, action);
    });

    let on_open = Callback::new(move |id: i64| state.navigate(Route::ChallengeDetail(id)));

    let on_next = move |_| {
        if let Some(target) = list.with_untracked(ChallengeList::next_target) {
            fetch(state, list, target);
        }
    };
    let on_previous = move |_| {
        if let Some(target) = list.with_untracked(ChallengeList::previous_target) {
            fetch(state, list, target);
        }
    };

    view! {
        <h2>"Desafíos"</h2>
        <FiltersMenu state=state filters=filters on_change=on_filters_change />

        <Show when=move || list.with(|l| l.error().is_some())>
            <p class="error">{move || list.with(|l| l.error().unwrap_or_default().to_string())}</p>
        </Show>
        <Show when=move || list.with(ChallengeList::is_loading)>
            <p>"Cargando..."</p>
        </Show>

        <ul class="challenge-list">
            <For
                each=move || list.with(|l| l.items().to_vec())
                key=card_key
                children=move |challenge| {
                    view! {
                        <ChallengeCard
                            challenge=challenge
                            on_action=on_action
                            on_tag=on_tag
                            on_open=on_open
                        />
                    }
                }
            />
        </ul>

        <div class="pagination">
            <button on:click=on_previous disabled=move || !list.with(ChallengeList::has_previous)>
                "Anterior"
            </button>
            <button on:click=on_next disabled=move || !list.with(ChallengeList::has_next)>
                "Siguiente"
            </button>
        </div>
    }
}
