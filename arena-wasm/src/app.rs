use arena_core::Route;
use leptos::prelude::*;

use crate::components::auth_panel::{LoginPanel, RegisterPanel};
use crate::components::challenge_detail::ChallengeDetail;
use crate::components::challenge_list::ChallengeListPanel;
use crate::components::top_users::TopUsers;
use crate::state::AppState;

#[component]
fn Dashboard(state: AppState) -> impl IntoView {
    view! {
        <h2>"Panel"</h2>
        <p>"Elige una sección para continuar."</p>
        <div class="dashboard-links">
            <button on:click=move |_| state.navigate(Route::Challenges)>"Desafíos"</button>
            <button on:click=move |_| state.navigate(Route::Leaderboard)>"Top usuarios"</button>
        </div>
    }
}

#[component]
fn NavBar(state: AppState) -> impl IntoView {
    view! {
        <nav class="navbar">
            <Show
                when=move || state.authenticated.get()
                fallback=move || view! {
                    <button on:click=move |_| state.navigate(Route::Login)>"Iniciar sesión"</button>
                    <button on:click=move |_| state.navigate(Route::Register)>"Registrarse"</button>
                }
            >
                <button on:click=move |_| state.navigate(Route::Dashboard)>"Inicio"</button>
                <button on:click=move |_| state.navigate(Route::Challenges)>"Desafíos"</button>
                <button on:click=move |_| state.navigate(Route::Leaderboard)>"Top"</button>
                <button on:click=move |_| state.logout()>"Cerrar sesión"</button>
            </Show>
        </nav>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    let error_text = move || state.error.get().unwrap_or_default();

    let screen = move || match state.current_route() {
        Route::Login => view! { <LoginPanel state=state /> }.into_any(),
        Route::Register => view! { <RegisterPanel state=state /> }.into_any(),
        Route::Dashboard => view! { <Dashboard state=state /> }.into_any(),
        Route::Challenges => view! { <ChallengeListPanel state=state /> }.into_any(),
        Route::ChallengeDetail(id) => view! { <ChallengeDetail state=state id=id /> }.into_any(),
        Route::Leaderboard => view! { <TopUsers state=state /> }.into_any(),
    };

    view! {
        <main class="page">
            <section class="container">
                <h1>"Arena de desafíos"</h1>
                <NavBar state=state />

                <Show when=move || !state.error.get().unwrap_or_default().is_empty()>
                    <div class="error-banner">{error_text}</div>
                </Show>

                {screen}
            </section>
        </main>
    }
}
