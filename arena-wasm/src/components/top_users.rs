use arena_core::messages;
use arena_core::models::TopUser;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;

#[component]
pub(crate) fn TopUsers(state: AppState) -> impl IntoView {
    let users = RwSignal::new(Vec::<TopUser>::new());
    let load_error = RwSignal::new(None::<String>);

    // без токена запрос не отправляется
    match state.access_token() {
        Some(token) => spawn_local(async move {
            match api::top_users(&token).await {
                Ok(loaded) => {
                    users.try_set(loaded);
                }
                Err(err) => {
                    web_sys::console::warn_1(&err.to_string().into());
                    load_error.try_set(Some(messages::LEADERBOARD_FAILED.to_string()));
                }
            }
        }),
        None => load_error.set(Some(messages::LEADERBOARD_FAILED.to_string())),
    }

    view! {
        <h2>"Top usuarios"</h2>
        <Show when=move || load_error.get().is_some()>
            <p class="error">{move || load_error.get().unwrap_or_default()}</p>
        </Show>
        <ol class="leaderboard">
            <For
                each=move || users.get()
                key=|user| user.username.clone()
                children=|user| view! {
                    <li>
                        <strong>{user.username}</strong>
                        {format!(": {} puntos", user.points)}
                    </li>
                }
            />
        </ol>
    }
}
