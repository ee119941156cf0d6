//! Global Application State Store
//!
//! Single reactive home of the collection snapshots, their loading flags and
//! the active map categories, using reactive_stores for fine-grained
//! reactivity. The caches and the filter set write their fields directly;
//! views and projections read them.

use std::collections::BTreeSet;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Event, Location, User};

#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    pub events: Vec<Event>,
    pub locations: Vec<Location>,
    pub users: Vec<User>,
    pub events_loading: bool,
    pub locations_loading: bool,
    pub users_loading: bool,
    /// Categories currently drawn on the map
    pub active_categories: BTreeSet<String>,
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

/// Get the dashboard store from context
pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Whether `category` is currently shown on the map
pub fn store_category_active(store: &DashboardStore, category: &str) -> bool {
    store.active_categories().read().contains(category)
}

/// Whether any collection is still loading
pub fn store_any_loading(store: &DashboardStore) -> bool {
    store.events_loading().get() || store.locations_loading().get() || store.users_loading().get()
}
