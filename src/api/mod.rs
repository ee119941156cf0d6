//! Resource Client
//!
//! Thin HTTP verb wrapper the collection caches talk through. JSON values are
//! the wire type; typed decoding happens in the caches. No caching, no retry.

mod http;
mod auth;

use futures::future::LocalBoxFuture;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use crate::error::ApiResult;

pub use auth::{sync_profile, AuthProvider, AuthSession, Credentials, SupabaseAuth};
pub use http::HttpClient;

/// Characters escaped when an identifier is spliced into a URL path
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?');

/// REST verbs used by the dashboard
///
/// Futures are `!Send`: everything runs on the browser event loop.
pub trait ResourceClient {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, ApiResult<Value>>;
    fn post<'a>(&'a self, url: &'a str, body: Value) -> LocalBoxFuture<'a, ApiResult<Value>>;
    fn patch<'a>(&'a self, url: &'a str, body: Value) -> LocalBoxFuture<'a, ApiResult<Value>>;
    fn delete<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, ApiResult<()>>;
}

/// Base URL of one resource collection, always ending in `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    pub fn new(api_root: &str, path: &str) -> Self {
        let root = api_root.trim_end_matches('/');
        let path = path.trim_matches('/');
        let base = if path.is_empty() {
            format!("{root}/")
        } else {
            format!("{root}/{path}/")
        };
        Self { base }
    }

    /// `GET`/`POST` target
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `PATCH`/`DELETE` target for one item
    pub fn item_url(&self, id: &str) -> String {
        format!("{}{}", self.base, utf8_percent_encode(id, PATH_SEGMENT))
    }
}
