//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::context::use_app_context;

const LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/calendar", "Calendar"),
    ("/charts", "Charts"),
    ("/map", "Map"),
    ("/users", "Users"),
];

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="nav-bar">
            <span class="nav-brand">"Gigboard"</span>
            {LINKS
                .iter()
                .map(|(href, label)| view! { <A href=*href attr:class="nav-link">{*label}</A> })
                .collect_view()}
            <span class="nav-session">
                {move || match ctx.session.get() {
                    Some(session) => view! {
                        <span class="nav-user">{session.email}</span>
                        <button class="nav-logout" on:click=move |_| ctx.set_session(None)>"Log out"</button>
                    }
                    .into_any(),
                    None => view! {
                        <A href="/login" attr:class="nav-link">"Log in"</A>
                        <A href="/register" attr:class="nav-link">"Register"</A>
                    }
                    .into_any(),
                }}
            </span>
        </nav>
    }
}
