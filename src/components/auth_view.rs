//! Login & Register View Components
//!
//! Email/password forms in front of the auth provider. A successful login
//! also provisions the user's directory entry before going home.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{sync_profile, Credentials};
use crate::components::TextField;
use crate::context::use_app_context;

#[derive(Clone, Copy, PartialEq)]
enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Register => "Create account",
        }
    }

    fn min_password_len(self) -> usize {
        match self {
            Self::Login => 1,
            Self::Register => Credentials::MIN_SIGN_UP_PASSWORD,
        }
    }
}

#[component]
fn AuthForm(mode: AuthMode) -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (message, set_message) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = Credentials::new(email.get_untracked(), password.get_untracked());
        if let Err(e) = credentials.validate(mode.min_password_len()) {
            set_message.set(Some(e.to_string()));
            return;
        }
        let navigate = navigate.clone();
        set_busy.set(true);
        spawn_local(async move {
            let d = ctx.dashboard();
            let result = match mode {
                AuthMode::Login => d.auth.sign_in(&credentials).await,
                AuthMode::Register => d.auth.sign_up(&credentials).await,
            };
            set_busy.set(false);
            match (mode, result) {
                (AuthMode::Login, Ok(session)) => {
                    if let Err(e) = sync_profile(d.client.as_ref(), &d.config.profile_sync_url(), &session).await {
                        log::error!("[Auth] Profile sync failed: {}", e);
                    }
                    ctx.set_session(Some(session));
                    navigate("/", Default::default());
                }
                (AuthMode::Register, Ok(session)) => {
                    log::info!("[Auth] Registered {}", session.email);
                    set_message.set(Some("Check your email to verify your account".to_string()));
                    navigate("/login", Default::default());
                }
                (_, Err(e)) => {
                    log::error!("[Auth] {} failed: {}", mode.title(), e);
                    set_message.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <section class="auth-view">
            <form class="auth-form" on:submit=submit>
                <h1>{mode.title()}</h1>
                <TextField
                    label="Email"
                    input_type="email"
                    value=email
                    on_input=move |v: String| email.set(v)
                />
                <TextField
                    label="Password"
                    input_type="password"
                    value=password
                    on_input=move |v: String| password.set(v)
                />
                {move || message.get().map(|m| view! { <p class="auth-message">{m}</p> })}
                <button type="submit" prop:disabled=move || busy.get()>{mode.title()}</button>
            </form>
        </section>
    }
}

#[component]
pub fn LoginView() -> impl IntoView {
    view! { <AuthForm mode=AuthMode::Login /> }
}

#[component]
pub fn RegisterView() -> impl IntoView {
    view! { <AuthForm mode=AuthMode::Register /> }
}
