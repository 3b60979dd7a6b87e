use arena_core::{LoginForm, RegistrationForm, Route, messages};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;

#[component]
pub(crate) fn LoginPanel(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();

        let form = LoginForm {
            username: username.get().trim().to_string(),
            password: password.get(),
        };
        if let Err(err) = form.check() {
            state.set_error(err.to_string());
            return;
        }

        loading.set(true);
        spawn_local(async move {
            let stored = match api::login(&form.username, &form.password).await {
                Ok(tokens) => state.login(&tokens).is_ok(),
                Err(err) => {
                    web_sys::console::warn_1(&err.to_string().into());
                    false
                }
            };
            if stored {
                state.navigate(Route::Dashboard);
            } else {
                state.set_error(messages::BAD_CREDENTIALS);
            }
            loading.set(false);
        });
    };

    view! {
        <h2>"Iniciar sesión"</h2>
        <form on:submit=on_login>
            <input
                placeholder="usuario"
                on:input=move |ev| username.set(event_target_value(&ev))
            />
            <input
                placeholder="contraseña"
                type="password"
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || loading.get()>"Entrar"</button>
        </form>
        <p>
            "¿No tienes cuenta? "
            <button on:click=move |_| state.navigate(Route::Register)>"Regístrate"</button>
        </p>
    }
}

#[component]
pub(crate) fn RegisterPanel(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);

    let on_register = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();

        let form = RegistrationForm {
            username: username.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
            confirm_password: confirm_password.get(),
        };
        // несовпадение паролей ловится до запроса
        if let Err(err) = form.check() {
            state.set_error(err.to_string());
            return;
        }

        loading.set(true);
        spawn_local(async move {
            let result = match api::register(&form).await {
                Ok(()) => api::obtain_token(&form.username, &form.password).await,
                Err(err) => Err(err),
            };
            let stored = match result {
                Ok(tokens) => state.login(&tokens).is_ok(),
                Err(err) => {
                    web_sys::console::warn_1(&err.to_string().into());
                    false
                }
            };
            if stored {
                state.navigate(Route::Dashboard);
            } else {
                state.set_error(messages::REGISTRATION_FAILED);
            }
            loading.set(false);
        });
    };

    view! {
        <h2>"Registro"</h2>
        <form on:submit=on_register>
            <input
                placeholder="usuario"
                on:input=move |ev| username.set(event_target_value(&ev))
            />
            <input
                placeholder="correo"
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <input
                placeholder="contraseña"
                type="password"
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <input
                placeholder="confirmar contraseña"
                type="password"
                on:input=move |ev| confirm_password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || loading.get()>"Registrarse"</button>
        </form>
        <p>
            "¿Ya tienes cuenta? "
            <button on:click=move |_| state.navigate(Route::Login)>"Inicia sesión"</button>
        </p>
    }
}
