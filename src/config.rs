//! Application Configuration
//!
//! Built-in defaults, overridable at compile time (`GIGBOARD_API_ROOT`) and at
//! runtime through a `window.__GIGBOARD_CONFIG__` JSON object.

use serde::{Deserialize, Serialize};

use crate::api::Endpoint;

pub const DEFAULT_API_ROOT: &str = "http://localhost:3000";

/// Name of the global the hosting page may define to override settings
pub const RUNTIME_CONFIG_GLOBAL: &str = "__GIGBOARD_CONFIG__";

/// How a collection cache reconciles its snapshot after a successful write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationPolicy {
    /// Apply the server's answer to the snapshot directly
    #[default]
    #[serde(rename = "optimistic")]
    OptimisticAppend,
    /// Re-fetch the whole collection
    #[serde(rename = "reload")]
    ReloadAfterWrite,
}

/// Collection paths relative to `api_root`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiPaths {
    pub events: String,
    pub locations: String,
    pub users: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            events: "/events/".to_string(),
            locations: "/locations/".to_string(),
            users: "/users/".to_string(),
        }
    }
}

/// One policy per cache; a cache never mixes strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policies {
    pub events: MutationPolicy,
    pub locations: MutationPolicy,
    pub users: MutationPolicy,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            events: MutationPolicy::OptimisticAppend,
            locations: MutationPolicy::OptimisticAppend,
            users: MutationPolicy::ReloadAfterWrite,
        }
    }
}

/// Map filter categories; all of them start active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub categories: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            categories: vec!["show".to_string(), "rehearsalspace".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub supabase_url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_root: String,
    pub api: ApiPaths,
    pub policies: Policies,
    pub filters: FilterConfig,
    pub auth: AuthConfig,
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_root: option_env!("GIGBOARD_API_ROOT")
                .unwrap_or(DEFAULT_API_ROOT)
                .to_string(),
            api: ApiPaths::default(),
            policies: Policies::default(),
            filters: FilterConfig::default(),
            auth: AuthConfig::default(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON document; missing keys keep defaults
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Defaults merged with the page-provided runtime override, if any
    pub fn load() -> Self {
        runtime_override().unwrap_or_default()
    }

    pub fn events_endpoint(&self) -> Endpoint {
        Endpoint::new(&self.api_root, &self.api.events)
    }

    pub fn locations_endpoint(&self) -> Endpoint {
        Endpoint::new(&self.api_root, &self.api.locations)
    }

    pub fn users_endpoint(&self) -> Endpoint {
        Endpoint::new(&self.api_root, &self.api.users)
    }

    /// Where a signed-in user's profile is provisioned
    pub fn profile_sync_url(&self) -> String {
        format!("{}profile-sync", self.users_endpoint().base())
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_override() -> Option<AppConfig> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &RUNTIME_CONFIG_GLOBAL.into()).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("[Config] Ignoring malformed {}: {}", RUNTIME_CONFIG_GLOBAL, e);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_override() -> Option<AppConfig> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.events, "/events/");
        assert_eq!(config.policies.events, MutationPolicy::OptimisticAppend);
        assert_eq!(config.policies.users, MutationPolicy::ReloadAfterWrite);
        assert_eq!(config.filters.categories, vec!["show", "rehearsalspace"]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(
            r#"{ "api_root": "https://api.example.com", "policies": { "events": "reload" } }"#,
        )
        .unwrap();

        assert_eq!(config.api_root, "https://api.example.com");
        assert_eq!(config.policies.events, MutationPolicy::ReloadAfterWrite);
        assert_eq!(config.policies.locations, MutationPolicy::OptimisticAppend);
        assert_eq!(config.api.users, "/users/");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(AppConfig::from_json(r#"{ "policies": { "users": "sometimes" } }"#).is_err());
    }

    #[test]
    fn test_endpoints_join_root_and_path() {
        let config = AppConfig::from_json(r#"{ "api_root": "http://localhost:3000/" }"#).unwrap();
        assert_eq!(config.events_endpoint().base(), "http://localhost:3000/events/");
        assert_eq!(
            config.profile_sync_url(),
            "http://localhost:3000/users/profile-sync"
        );
    }
}
