use arena_core::models::Comment;
use arena_core::{CommentDraft, CommentFeed, Route, ScrollMetrics, messages};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;

fn metrics_of(element: &web_sys::Element) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: f64::from(element.scroll_top()),
        scroll_height: f64::from(element.scroll_height()),
        client_height: f64::from(element.client_height()),
    }
}

fn load_more(state: AppState, feed: RwSignal<CommentFeed>) {
    // при уже идущей загрузке курсор не выдаётся
    let Some(cursor) = feed.try_update(CommentFeed::begin_load_more).flatten() else {
        return;
    };

    spawn_local(async move {
        let result = match state.access_token() {
            Some(token) => api::comments_at(&token, &cursor).await,
            None => Err(api::ApiError::Network("no session".to_string())),
        };
        match result {
            Ok(page) => {
                feed.try_update(|f| f.finish_load_more(page));
            }
            Err(err) => {
                web_sys::console::warn_1(&err.to_string().into());
                feed.try_update(CommentFeed::fail_load_more);
            }
        }
    });
}

fn comment_view(comment: Comment) -> impl IntoView {
    view! {
        <li class="comment">
            <strong>{comment.user.clone()}</strong>
            " "
            <small>{comment.display_timestamp()}</small>
            <p>{comment.content.clone()}</p>
        </li>
    }
}

#[component]
fn AddComment(state: AppState, challenge_id: i64, feed: RwSignal<CommentFeed>) -> impl IntoView {
    let draft = RwSignal::new(CommentDraft::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(content) = draft.try_update(CommentDraft::begin_submit).flatten() else {
            return;
        };

        spawn_local(async move {
            let result = match state.access_token() {
                Some(token) => api::add_comment(&token, challenge_id, &content).await,
                None => Err(api::ApiError::Network("no session".to_string())),
            };
            match result {
                Ok(comment) => {
                    draft.try_update(CommentDraft::submit_succeeded);
                    feed.try_update(|f| f.prepend(comment));
                }
                Err(err) => {
                    web_sys::console::warn_1(&err.to_string().into());
                    draft.try_update(CommentDraft::submit_failed);
                }
            }
        });
    };

    view! {
        <form class="add-comment" on:submit=on_submit>
            <textarea
                placeholder="Escribe un comentario"
                prop:value=move || draft.with(|d| d.content().to_string())
                on:input=move |ev| draft.update(|d| d.edit(event_target_value(&ev)))
            ></textarea>
            <button type="submit" disabled=move || draft.with(CommentDraft::is_submitting)>
                "Comentar"
            </button>
            <Show when=move || draft.with(|d| d.error().is_some())>
                <p class="error">{move || draft.with(|d| d.error().unwrap_or_default().to_string())}</p>
            </Show>
            <Show when=move || draft.with(|d| d.success().is_some())>
                <p class="notice">{move || draft.with(|d| d.success().unwrap_or_default().to_string())}</p>
            </Show>
        </form>
    }
}

/// Список комментариев с подгрузкой при прокрутке.
///
/// Форма и список работают с одним `CommentFeed`.
#[component]
pub(crate) fn CommentsPanel(state: AppState, challenge_id: i64) -> impl IntoView {
    let feed = RwSignal::new(CommentFeed::new());
    let load_error = RwSignal::new(None::<String>);

    spawn_local(async move {
        let result = match state.access_token() {
            Some(token) => api::comments_page(&token, challenge_id, 1).await,
            None => Err(api::ApiError::Network("no session".to_string())),
        };
        if !state.is_current(Route::ChallengeDetail(challenge_id)) {
            return;
        }
        match result {
            Ok(page) => {
                feed.try_update(|f| f.reset(page));
            }
            Err(err) => {
                web_sys::console::warn_1(&err.to_string().into());
                load_error.try_set(Some(messages::COMMENTS_LOAD_FAILED.to_string()));
            }
        }
    });

    let on_scroll = move |ev: web_sys::Event| {
        let element = event_target::<web_sys::Element>(&ev);
        if feed.with_untracked(|f| f.scroll_should_load(metrics_of(&element))) {
            load_more(state, feed);
        }
    };

    view! {
        <h3>"Comentarios"</h3>
        <AddComment state=state challenge_id=challenge_id feed=feed />

        <Show when=move || load_error.get().is_some()>
            <p class="error">{move || load_error.get().unwrap_or_default()}</p>
        </Show>

        <div class="comments-scroll" style="max-height: 24rem; overflow-y: auto;" on:scroll=on_scroll>
            <Show
                when=move || !feed.with(CommentFeed::is_exhausted_and_empty)
                fallback=|| view! { <p>{messages::NO_COMMENTS}</p> }
            >
                <ul>
                    {move || feed.with(|f| f.comments().to_vec()).into_iter().map(comment_view).collect_view()}
                </ul>
            </Show>
            <Show when=move || feed.with(CommentFeed::is_loading)>
                <p>"Cargando..."</p>
            </Show>
        </div>
    }
}
