//! Auth Provider Boundary
//!
//! Sign-in / sign-up against the hosted auth provider, plus the follow-up call
//! that provisions a directory entry for a freshly signed-in user.

use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ResourceClient;
use crate::config::AuthConfig;
use crate::error::{ApiResult, AuthError};

/// Signed-in user as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(rename = "id")]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
}

/// Email/password pair typed into the login or registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Registration requires at least this many password characters
    pub const MIN_SIGN_UP_PASSWORD: usize = 6;

    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Local validation run before contacting the provider
    pub fn validate(&self, min_password_len: usize) -> Result<(), AuthError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidCredentials("email address is invalid".to_string()));
        }
        if self.password.is_empty() {
            return Err(AuthError::InvalidCredentials("password is required".to_string()));
        }
        if self.password.chars().count() < min_password_len {
            return Err(AuthError::InvalidCredentials(format!(
                "password must be at least {min_password_len} characters"
            )));
        }
        Ok(())
    }
}

pub trait AuthProvider {
    fn sign_in<'a>(
        &'a self,
        credentials: &'a Credentials,
    ) -> LocalBoxFuture<'a, Result<AuthSession, AuthError>>;

    fn sign_up<'a>(
        &'a self,
        credentials: &'a Credentials,
    ) -> LocalBoxFuture<'a, Result<AuthSession, AuthError>>;
}

/// Supabase GoTrue REST endpoints
#[derive(Debug, Clone)]
pub struct SupabaseAuth {
    config: AuthConfig,
}

impl SupabaseAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.supabase_url.trim_end_matches('/'), path)
    }

    async fn request(&self, path: &str, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let url = self.url(path);
        let body = json!({ "email": credentials.email.trim(), "password": credentials.password });

        #[cfg(target_arch = "wasm32")]
        {
            use crate::error::ApiError;

            let response = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .json(&body)
                .map_err(|e| ApiError::Encode(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let ok = response.ok();
            let payload: Value = response
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            if !ok {
                return Err(AuthError::Rejected(rejection_message(&payload)));
            }
            session_from_response(&payload)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (url, body);
            Err(AuthError::Api(crate::error::ApiError::Unsupported))
        }
    }
}

impl AuthProvider for SupabaseAuth {
    fn sign_in<'a>(
        &'a self,
        credentials: &'a Credentials,
    ) -> LocalBoxFuture<'a, Result<AuthSession, AuthError>> {
        self.request("token?grant_type=password", credentials).boxed_local()
    }

    fn sign_up<'a>(
        &'a self,
        credentials: &'a Credentials,
    ) -> LocalBoxFuture<'a, Result<AuthSession, AuthError>> {
        self.request("signup", credentials).boxed_local()
    }
}

/// Extract the user from either `{ user: {...} }` or a bare user object
pub(crate) fn session_from_response(payload: &Value) -> Result<AuthSession, AuthError> {
    let user = payload.get("user").unwrap_or(payload);
    serde_json::from_value(user.clone())
        .map_err(|_| AuthError::Rejected("response carries no user".to_string()))
}

pub(crate) fn rejection_message(payload: &Value) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .unwrap_or("unknown error")
        .to_string()
}

/// Provision (or refresh) the directory entry of a signed-in user
pub async fn sync_profile(
    client: &dyn ResourceClient,
    url: &str,
    session: &AuthSession,
) -> ApiResult<()> {
    client.post(url, json!({ "user": session })).await?;
    log::info!("[Auth] Profile synced for {}", session.user_id);
    Ok(())
}
