//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{AuthProvider, AuthSession, HttpClient, ResourceClient, SupabaseAuth};
use crate::cache::{EventCache, LocationCache, UserCache};
use crate::config::AppConfig;
use crate::filter::FilterSet;
use crate::store::{DashboardState, DashboardStateStoreFields, DashboardStore};

/// Caches and collaborators built once per page session
#[derive(Clone)]
pub struct Dashboard {
    pub config: Rc<AppConfig>,
    pub client: Rc<dyn ResourceClient>,
    pub events: EventCache,
    pub locations: LocationCache,
    pub users: UserCache,
    pub filters: FilterSet,
    pub auth: Rc<dyn AuthProvider>,
}

impl Dashboard {
    /// Caches writing into `store`
    pub fn new(
        config: AppConfig,
        store: DashboardStore,
        client: Rc<dyn ResourceClient>,
        auth: Rc<dyn AuthProvider>,
    ) -> Self {
        Self {
            events: EventCache::new(
                client.clone(),
                config.events_endpoint(),
                config.policies.events,
                store.events(),
                store.events_loading(),
            ),
            locations: LocationCache::new(
                client.clone(),
                config.locations_endpoint(),
                config.policies.locations,
                store.locations(),
                store.locations_loading(),
            ),
            users: UserCache::new(
                client.clone(),
                config.users_endpoint(),
                config.policies.users,
                store.users(),
                store.users_loading(),
            ),
            filters: FilterSet::new(config.filters.categories.iter().cloned(), store.active_categories()),
            client,
            auth,
            config: Rc::new(config),
        }
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    dashboard: StoredValue<Dashboard, LocalStorage>,
    /// Snapshots, loading flags and active categories
    pub store: DashboardStore,
    /// Signed-in user, if any - read
    pub session: ReadSignal<Option<AuthSession>>,
    /// Signed-in user, if any - write
    set_session: WriteSignal<Option<AuthSession>>,
}

impl AppContext {
    /// Wire the caches to the HTTP client and the store, then start the
    /// initial loads
    pub fn new(config: AppConfig) -> Self {
        let auth: Rc<dyn AuthProvider> = Rc::new(SupabaseAuth::new(config.auth.clone()));
        let store = Store::new(DashboardState::default());
        let dashboard = Dashboard::new(config, store, Rc::new(HttpClient::new()), auth);

        spawn_local(dashboard.events.load());
        spawn_local(dashboard.locations.load());
        spawn_local(dashboard.users.load());
        log::info!("[APP] Dashboard ready, api root {}", dashboard.config.api_root);

        let (session, set_session) = signal(None);
        Self {
            dashboard: StoredValue::new_local(dashboard),
            store,
            session,
            set_session,
        }
    }

    /// Shared handles; clones point at the same caches
    pub fn dashboard(&self) -> Dashboard {
        self.dashboard.get_value()
    }

    /// Run a mutation accepted by a form, if any
    pub fn spawn(&self, op: Option<crate::forms::PendingOp>) {
        if let Some(op) = op {
            spawn_local(op);
        }
    }

    pub fn set_session(&self, session: Option<AuthSession>) {
        self.set_session.set(session);
    }
}

/// Get the app context; panics outside the `App` tree
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
