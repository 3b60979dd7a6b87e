use arena_core::models::TestReport;
use arena_core::{Route, Workbench, messages};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::comments::CommentsPanel;
use crate::state::AppState;

type Bench = RwSignal<Option<Workbench>>;

fn bench_flag(bench: Bench, read: impl Fn(&Workbench) -> bool) -> bool {
    bench.with(|b| b.as_ref().map(&read).unwrap_or(false))
}

fn compile(state: AppState, bench: Bench) {
    let Some((code, language)) = bench
        .try_update(|b| {
            let b = b.as_mut()?;
            let code = b.begin_compile()?;
            Some((code, b.run_language().to_string()))
        })
        .flatten()
    else {
        return;
    };

    spawn_local(async move {
        let result = match state.access_token() {
            Some(token) => api::execute_code(&token, &language, &code).await,
            None => Err(api::ApiError::Network("no session".to_string())),
        };
        bench.try_update(|b| {
            if let Some(b) = b {
                b.finish_compile(result);
            }
        });
    });
}

fn run_tests(state: AppState, bench: Bench, id: i64) {
    let Some(solution) = bench
        .try_update(|b| b.as_mut().and_then(Workbench::begin_test))
        .flatten()
    else {
        return;
    };

    spawn_local(async move {
        let result = match state.access_token() {
            Some(token) => api::run_tests(&token, id, &solution).await,
            None => Err(api::ApiError::Network("no session".to_string())),
        };
        bench.try_update(|b| {
            if let Some(b) = b {
                b.finish_test(result);
            }
        });
    });
}

fn save(state: AppState, bench: Bench, notice: RwSignal<Option<String>>, id: i64) {
    let Some(solution) = bench
        .try_update(|b| b.as_mut().and_then(Workbench::begin_save))
        .flatten()
    else {
        return;
    };
    notice.set(None);

    spawn_local(async move {
        let result = match state.access_token() {
            Some(token) => api::save_solution(&token, id, &solution).await,
            None => Err(api::ApiError::Network("no session".to_string())),
        };
        let message = bench
            .try_update(|b| {
                let b = b.as_mut()?;
                b.finish_save(result);
                b.take_notice()
            })
            .flatten();
        notice.try_set(message);
    });
}

fn report_view(report: TestReport) -> impl IntoView {
    let rows = report
        .test_results
        .into_iter()
        .map(|case| {
            let mark = if case.passed() { "✅" } else { "❌" };
            view! {
                <li>
                    <strong>{case.test_name.clone()}</strong>
                    " "
                    {mark}
                    <pre>{case.output.clone()}</pre>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="test-report">
            <p>{report.message}</p>
            <ul>{rows}</ul>
            {report.points_awarded.map(|points| view! { <p>{format!("Puntos: {points}")}</p> })}
        </div>
    }
}

/// Задача, редактор решения и комментарии.
#[component]
pub(crate) fn ChallengeDetail(state: AppState, id: i64) -> impl IntoView {
    let bench: Bench = RwSignal::new(None);
    let load_error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    spawn_local(async move {
        let result = match state.access_token() {
            Some(token) => api::get_challenge(&token, id).await,
            None => Err(api::ApiError::Network("no session".to_string())),
        };
        if !state.is_current(Route::ChallengeDetail(id)) {
            return;
        }
        match result {
            Ok(challenge) => {
                bench.try_set(Some(Workbench::new(challenge)));
            }
            Err(err) => {
                web_sys::console::warn_1(&err.to_string().into());
                load_error.try_set(Some(messages::CHALLENGE_LOAD_FAILED.to_string()));
            }
        }
    });

    let text = move |read: fn(&Workbench) -> String| {
        move || bench.with(|b| b.as_ref().map(read).unwrap_or_default())
    };

    view! {
        <button on:click=move |_| state.navigate(Route::Challenges)>"← Volver"</button>

        <Show when=move || load_error.get().is_some()>
            <p class="error">{move || load_error.get().unwrap_or_default()}</p>
        </Show>

        <Show when=move || bench.with(Option::is_some)>
            <h2>{text(|b| b.challenge().title.clone())}</h2>
            <p>{text(|b| b.challenge().description.clone())}</p>
            <p>
                <small>
                    {text(|b| {
                        format!(
                            "{} · {} · {}",
                            b.challenge().difficulty,
                            b.challenge().language,
                            b.challenge().category_names()
                        )
                    })}
                </small>
            </p>

            <h3>"Solución"</h3>
            <textarea
                class="code-editor"
                rows="14"
                prop:value=text(|b| b.solution().to_string())
                on:input=move |ev| {
                    let code = event_target_value(&ev);
                    bench.update(|b| {
                        if let Some(b) = b {
                            b.edit_solution(code);
                        }
                    });
                }
            ></textarea>

            <div class="workbench-actions">
                <button
                    on:click=move |_| compile(state, bench)
                    disabled=move || bench_flag(bench, |b| b.compile.is_in_flight())
                >
                    "Compilar"
                </button>
                <Show when=move || bench_flag(bench, Workbench::tests_available)>
                    <button
                        on:click=move |_| run_tests(state, bench, id)
                        disabled=move || bench_flag(bench, |b| b.test.is_in_flight())
                    >
                        "Ejecutar tests"
                    </button>
                </Show>
                <button
                    on:click=move |_| save(state, bench, notice, id)
                    disabled=move || bench_flag(bench, |b| b.save.is_in_flight())
                >
                    "Guardar"
                </button>
            </div>

            <Show when=move || notice.get().is_some()>
                <p class="notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>

            <h3>"Salida"</h3>
            <pre class="output">{text(|b| b.output().to_string())}</pre>

            <Show when=move || bench_flag(bench, Workbench::tests_available)>
                <h3>"Tests"</h3>
                <textarea
                    class="code-editor"
                    rows="8"
                    prop:value=text(|b| b.test_source().to_string())
                    on:input=move |ev| {
                        let code = event_target_value(&ev);
                        bench.update(|b| {
                            if let Some(b) = b {
                                b.edit_test(code);
                            }
                        });
                    }
                ></textarea>
                {move || bench.with(|b| b.as_ref().and_then(|b| b.report().cloned())).map(report_view)}
            </Show>
        </Show>

        <CommentsPanel state=state challenge_id=id />
    }
}
