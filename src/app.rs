use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::DocumentRecord;
use crate::settings::{ClientSettings, StorageMode};
use crate::speech::BrowserSpeech;
use crate::state::{AppState, Command, FormField, Module, StatusLine};
use crate::store;
use crate::voice::{VoiceBridge, VoiceState};

type Voice = RwSignal<VoiceBridge<BrowserSpeech>, LocalStorage>;

/// Apply a transition and carry out whatever it asks for.
fn dispatch(state: RwSignal<AppState>, transition: impl FnOnce(&mut AppState) -> Vec<Command>) {
    let commands = state.try_update(transition).unwrap_or_default();
    run_commands(state, commands);
}

fn run_commands(state: RwSignal<AppState>, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::Login { user, pass } => spawn_local(async move {
                let result = store::login(&user, &pass).await;
                if let Err(e) = &result {
                    warn!("Login request failed: {}", e);
                }
                dispatch(state, move |s| s.login_resolved(result));
            }),
            Command::FetchDocuments => spawn_local(async move {
                let result = store::list_documents().await;
                if let Err(e) = &result {
                    warn!("Loading documents failed: {}", e);
                }
                state.update(move |s| s.documents_loaded(result));
            }),
            Command::Save(payload) => spawn_local(async move {
                let result = store::save_document(&payload).await;
                if let Err(e) = &result {
                    warn!("Saving document {} failed: {}", payload.code, e);
                }
                dispatch(state, move |s| s.save_resolved(result));
            }),
            Command::ClearStatus {
                slot,
                generation,
                after,
            } => set_timeout(
                move || state.update(|s| s.clear_status(slot, generation)),
                after,
            ),
        }
    }
}

fn status_class(line: &StatusLine) -> &'static str {
    if line.is_error {
        "status status-error"
    } else {
        "status"
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (settings, set_settings) = signal(None::<ClientSettings>);

    Effect::new(move |_| {
        spawn_local(async move {
            let loaded = match store::load_settings().await {
                Ok(s) => s,
                Err(e) => {
                    warn!("No shell settings ({}); keeping documents in memory", e);
                    ClientSettings::standalone()
                }
            };
            set_settings.set(Some(loaded));
        });
    });

    view! {
        <main class="app-layout">
            {move || settings.get().map(|s| view! { <Registry settings=s /> })}
        </main>
    }
}

#[component]
fn Registry(settings: ClientSettings) -> impl IntoView {
    let state = RwSignal::new(AppState::new(&settings));
    let voice: Voice = RwSignal::new_local(VoiceBridge::new(BrowserSpeech::detect(
        &settings.speech_lang,
    )));
    if let Some(speech) = voice.with_untracked(|v| v.capability().cloned()) {
        speech.listen(move |event| voice.update(|v| v.handle(event)));
    }

    let logged_in = Memo::new(move |_| state.with(|s| s.session.logged_in));

    view! {
        <Show when=move || logged_in.get() fallback=move || view! { <LoginPanel state=state /> }>
            <Workspace state=state voice=voice />
        </Show>
    }
}

#[component]
fn LoginPanel(state: RwSignal<AppState>) -> impl IntoView {
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        dispatch(state, AppState::login);
    };
    let memory_hint = state.with_untracked(|s| s.storage == StorageMode::Memory);

    view! {
        <form class="login-card" on:submit=on_submit>
            <h1>"Document Registry"</h1>
            <label>"User"</label>
            <input
                type="text"
                autocomplete="username"
                prop:value=move || state.with(|s| s.session.user.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.session.user = value);
                }
            />
            <label>"Password"</label>
            <input
                type="password"
                autocomplete="current-password"
                prop:value=move || state.with(|s| s.session.pass.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.session.pass = value);
                }
            />
            <button type="submit" class="primary">"Log in"</button>
            <p class=move || state.with(|s| status_class(&s.session.status))>
                {move || state.with(|s| s.session.status.text.clone())}
            </p>
            {memory_hint.then(|| view! {
                <p class="hint">"Offline demo: documents are kept in this window only."</p>
            })}
        </form>
    }
}

#[component]
fn Workspace(state: RwSignal<AppState>, voice: Voice) -> impl IntoView {
    let module = Memo::new(move |_| state.with(|s| s.module));

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">"Registry"</div>
            {Module::ALL.into_iter().map(|m| view! {
                <button
                    class=move || if module.get() == m { "nav-item active" } else { "nav-item" }
                    on:click=move |_| state.update(|s| s.module = m)
                >
                    {m.label()}
                </button>
            }).collect_view()}
            <div style="flex: 1;"></div>
            <button class="nav-item logout" on:click=move |_| state.update(AppState::logout)>
                "Log out"
            </button>
        </nav>
        <section class="content">
            {move || match module.get() {
                Module::Register => view! { <RegisterPanel state=state /> }.into_any(),
                Module::Table => view! { <TablePanel state=state /> }.into_any(),
                Module::TextSearch => view! { <TextSearchPanel state=state /> }.into_any(),
                Module::VoiceSearch => view! { <VoiceSearchPanel state=state voice=voice /> }.into_any(),
            }}
        </section>
        <Viewer state=state />
    }
}

#[component]
fn RegisterPanel(state: RwSignal<AppState>) -> impl IntoView {
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        dispatch(state, AppState::submit_registration);
    };

    view! {
        <h2>"Register document"</h2>
        <form class="register-form" on:submit=on_submit>
            {FormField::ALL.into_iter().map(|field| view! {
                <label>{field.label()}</label>
                <input
                    type="text"
                    prop:value=move || state.with(|s| s.form.field(field).to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update(|s| *s.form.field_mut(field) = value);
                    }
                />
            }).collect_view()}
            <button type="submit" class="primary">"Save"</button>
        </form>
        <p class=move || state.with(|s| status_class(&s.registration_status))>
            {move || state.with(|s| s.registration_status.text.clone())}
        </p>
    }
}

#[component]
fn TablePanel(state: RwSignal<AppState>) -> impl IntoView {
    let documents = Memo::new(move |_| state.with(|s| s.cache.all().to_vec()));
    let empty = Memo::new(move |_| state.with(|s| s.empty_state()));

    view! {
        <div class="panel-header">
            <h2>"Registered documents " {move || state.with(|s| format!("({})", s.cache.len()))}</h2>
            <button on:click=move |_| dispatch(state, AppState::reload)>"Reload"</button>
        </div>
        <p class=move || state.with(|s| status_class(&s.table_status))>
            {move || state.with(|s| s.table_status.text.clone())}
        </p>
        {move || match empty.get() {
            Some(message) => view! { <p class="empty">{message}</p> }.into_any(),
            None => view! {
                <table class="doc-table">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Date"</th>
                            <th>"Code"</th>
                            <th>"Title"</th>
                            <th>"Category"</th>
                            <th>"Description"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || documents.get().into_iter().map(|doc| {
                            let id = doc.id;
                            view! {
                                <tr>
                                    <td>{doc.id}</td>
                                    <td>{doc.date}</td>
                                    <td>{doc.code}</td>
                                    <td>{doc.title}</td>
                                    <td>{doc.category}</td>
                                    <td>{doc.description}</td>
                                    <td class="row-actions">
                                        <button on:click=move |_| state.update(|s| s.view(id))>"View"</button>
                                        <button class="danger" on:click=move |_| dispatch(state, move |s| s.delete(id))>
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            }.into_any(),
        }}
    }
}

#[component]
fn ResultList(state: RwSignal<AppState>, results: Memo<Vec<DocumentRecord>>) -> impl IntoView {
    view! {
        <ul class="result-list">
            {move || results.get().into_iter().map(|doc| {
                let id = doc.id;
                view! {
                    <li>
                        <div>
                            <strong>{doc.code}</strong>
                            " · "
                            {doc.title}
                            <div class="muted">{doc.category}</div>
                        </div>
                        <button on:click=move |_| state.update(|s| s.view(id))>"View"</button>
                    </li>
                }
            }).collect_view()}
        </ul>
    }
}

#[component]
fn TextSearchPanel(state: RwSignal<AppState>) -> impl IntoView {
    let results = Memo::new(move |_| state.with(|s| s.text_results.clone()));
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.update(AppState::search_by_text);
    };

    view! {
        <h2>"Search by text"</h2>
        <form class="search-bar" on:submit=on_submit>
            <input
                type="search"
                placeholder="Code, title, description or category"
                prop:value=move || state.with(|s| s.search_text.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.search_text = value);
                }
            />
            <button type="submit" class="primary">"Search"</button>
        </form>
        <ResultList state=state results=results />
    }
}

#[component]
fn VoiceSearchPanel(state: RwSignal<AppState>, voice: Voice) -> impl IntoView {
    let results = Memo::new(move |_| state.with(|s| s.voice_results.clone()));
    let supported = voice.with_untracked(|v| v.is_supported());
    let on_search = move |_: MouseEvent| {
        let transcript = voice.with_untracked(|v| v.transcript().to_string());
        state.update(|s| s.search_by_voice(&transcript));
    };

    view! {
        <h2>"Search by voice"</h2>
        <p class="status">{move || voice.with(|v| v.status().message())}</p>
        <div class="search-bar">
            <button
                class="primary"
                disabled=!supported
                on:click=move |_| voice.update(|v| v.toggle())
            >
                {move || if voice.with(|v| v.state() == VoiceState::Listening) {
                    "Stop dictation"
                } else {
                    "Start dictation"
                }}
            </button>
            <input
                type="text"
                placeholder="Recognized text"
                prop:value=move || voice.with(|v| v.transcript().to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    voice.update(|v| v.set_transcript(value));
                }
            />
            <button on:click=on_search>"Search"</button>
        </div>
        <ResultList state=state results=results />
    }
}

#[component]
fn Viewer(state: RwSignal<AppState>) -> impl IntoView {
    let selection = Memo::new(move |_| state.with(|s| s.viewer.clone()));

    let open_external = move |link: String| {
        spawn_local(async move {
            if let Err(e) = store::open_external(&link).await {
                warn!("Shell could not open link ({}); using a new tab", e);
                let _ = window().open_with_url_and_target(&link, "_blank");
            }
        });
    };

    view! {
        <aside class="viewer">
            {move || match selection.get() {
                None => view! {
                    <div class="viewer-empty">"Select a document to preview it here."</div>
                }.into_any(),
                Some(selected) => {
                    let link = selected.link.clone();
                    view! {
                        <header class="viewer-header">
                            <span class="viewer-title">{selected.title}</span>
                            <button on:click=move |_| open_external(link.clone())>"Open"</button>
                            <button on:click=move |_| state.update(AppState::close_viewer)>"×"</button>
                        </header>
                        <iframe class="viewer-frame" src=selected.url></iframe>
                    }.into_any()
                }
            }}
        </aside>
    }
}
