//! Gigboard Frontend App
//!
//! Router with the navigation bar and one view per section.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::{
    CalendarView, ChartsView, HomeView, LoginView, MapView, NavBar, RegisterView, UsersView,
};
use crate::config::AppConfig;
use crate::context::AppContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Provide context to all children
    let ctx = AppContext::new(config);
    provide_context(ctx);
    provide_context(ctx.store);

    view! {
        <Router>
            <div class="app-layout">
                <NavBar />
                <main class="main-content">
                    <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                        <Route path=path!("/") view=HomeView />
                        <Route path=path!("/calendar") view=CalendarView />
                        <Route path=path!("/charts") view=ChartsView />
                        <Route path=path!("/map") view=MapView />
                        <Route path=path!("/users") view=UsersView />
                        <Route path=path!("/login") view=LoginView />
                        <Route path=path!("/register") view=RegisterView />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
