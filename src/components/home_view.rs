//! Home View Component
//!
//! Collection counts and load state at a glance.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::store::{store_any_loading, use_dashboard_store, DashboardStateStoreFields};

#[component]
fn SummaryCard(
    #[prop(into)] title: String,
    #[prop(into)] href: String,
    #[prop(into)] count: Signal<usize>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <A href=href attr:class="summary-card">
            <h2>{title}</h2>
            <p class="summary-count">
                {move || if loading.get() { "...".to_string() } else { count.get().to_string() }}
            </p>
        </A>
    }
}

#[component]
pub fn HomeView() -> impl IntoView {
    let store = use_dashboard_store();

    view! {
        <section class="home-view">
            <h1>"Dashboard"</h1>
            <Show when=move || store_any_loading(&store)>
                <p class="loading">"Syncing with the server..."</p>
            </Show>
            <div class="summary-grid">
                <SummaryCard
                    title="Events"
                    href="/calendar"
                    count=Signal::derive(move || store.events().read().len())
                    loading=Signal::derive(move || store.events_loading().get())
                />
                <SummaryCard
                    title="Locations"
                    href="/map"
                    count=Signal::derive(move || store.locations().read().len())
                    loading=Signal::derive(move || store.locations_loading().get())
                />
                <SummaryCard
                    title="Users"
                    href="/users"
                    count=Signal::derive(move || store.users().read().len())
                    loading=Signal::derive(move || store.users_loading().get())
                />
            </div>
        </section>
    }
}
