//! Collection Cache
//!
//! Client-side mirror of one remote collection, kept in a field of the
//! dashboard store. The snapshot is only ever written after the remote call
//! settles successfully; failures are logged and leave the previous snapshot
//! in place.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Field;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::{Endpoint, ResourceClient};
use crate::config::MutationPolicy;
use crate::error::{ApiError, CacheError};
use crate::models::{Event, Location, User};

/// A record of a remote collection keyed by a server-assigned identifier
pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Creation payload (no identifier)
    type Draft: Serialize + 'static;
    /// Partial update payload
    type Patch: Serialize + 'static;
    /// Human-readable kind used in logs
    const KIND: &'static str;

    fn id(&self) -> Option<&str>;
}

pub type EventCache = CollectionCache<Event>;
pub type LocationCache = CollectionCache<Location>;
pub type UserCache = CollectionCache<User>;

struct CacheInner<R: 'static> {
    client: Rc<dyn ResourceClient>,
    endpoint: Endpoint,
    policy: MutationPolicy,
    items: Field<Vec<R>>,
    loading: Field<bool>,
    loads_in_flight: Cell<usize>,
}

/// Shared handle to one collection's snapshot; clones point at the same cache
pub struct CollectionCache<R: 'static> {
    inner: Rc<CacheInner<R>>,
}

impl<R: 'static> Clone for CollectionCache<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R: Resource> CollectionCache<R> {
    /// Cache writing its snapshot to `items` and its load state to `loading`.
    /// Call [`load`](Self::load) to populate it.
    pub fn new(
        client: Rc<dyn ResourceClient>,
        endpoint: Endpoint,
        policy: MutationPolicy,
        items: impl Into<Field<Vec<R>>>,
        loading: impl Into<Field<bool>>,
    ) -> Self {
        Self {
            inner: Rc::new(CacheInner {
                client,
                endpoint,
                policy,
                items: items.into(),
                loading: loading.into(),
                loads_in_flight: Cell::new(0),
            }),
        }
    }

    /// Tracked read of the snapshot
    pub fn with_items<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        self.inner.items.with(|items| f(items))
    }

    /// Current snapshot, untracked
    pub fn snapshot(&self) -> Vec<R> {
        self.inner.items.get_untracked()
    }

    /// Whether a full load is in flight, untracked
    pub fn is_loading(&self) -> bool {
        self.inner.loading.get_untracked()
    }

    pub fn policy(&self) -> MutationPolicy {
        self.inner.policy
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    pub fn len(&self) -> usize {
        self.inner.items.with_untracked(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &str) -> Option<R> {
        self.inner
            .items
            .with_untracked(|items| items.iter().find(|item| item.id() == Some(id)).cloned())
    }

    /// Replace the snapshot with the server's full collection. The loading
    /// flag stays set until every overlapping load has settled.
    pub fn load(&self) -> impl Future<Output = ()> + 'static {
        let inner = Rc::clone(&self.inner);
        async move {
            inner.begin_load();
            let result = inner.refresh().await;
            inner.end_load();
            inner.report("load", result);
        }
    }

    /// Create an item from `draft`
    pub fn add(&self, draft: R::Draft) -> impl Future<Output = ()> + 'static {
        let inner = Rc::clone(&self.inner);
        async move {
            let result = inner.try_add(draft).await;
            inner.report("add", result);
        }
    }

    /// Send only the changed fields of the item identified by `id`
    pub fn edit(&self, id: impl Into<String>, patch: R::Patch) -> impl Future<Output = ()> + 'static {
        let inner = Rc::clone(&self.inner);
        let id = id.into();
        async move {
            let result = inner.try_edit(&id, patch).await;
            inner.report("edit", result);
        }
    }

    /// Remove the item identified by `id`; repeating it is harmless
    pub fn delete(&self, id: impl Into<String>) -> impl Future<Output = ()> + 'static {
        let inner = Rc::clone(&self.inner);
        let id = id.into();
        async move {
            let result = inner.try_delete(&id).await;
            inner.report("delete", result);
        }
    }

    #[cfg(test)]
    pub(crate) fn seed(&self, items: Vec<R>) {
        self.inner.items.set(items);
    }
}

impl<R: Resource> CacheInner<R> {
    fn begin_load(&self) {
        let in_flight = self.loads_in_flight.get() + 1;
        self.loads_in_flight.set(in_flight);
        if in_flight == 1 {
            self.loading.set(true);
        }
    }

    fn end_load(&self) {
        let in_flight = self.loads_in_flight.get().saturating_sub(1);
        self.loads_in_flight.set(in_flight);
        if in_flight == 0 {
            self.loading.set(false);
        }
    }

    fn report(&self, op: &str, result: Result<(), CacheError>) {
        match result {
            Ok(()) => log::debug!(
                "[{} cache] {} ok, {} item(s) cached",
                R::KIND,
                op,
                self.items.with_untracked(Vec::len)
            ),
            Err(e) => log::error!("[{} cache] {} failed: {}", R::KIND, op, e),
        }
    }

    /// Fetch the whole collection without touching the loading flag
    async fn refresh(&self) -> Result<(), CacheError> {
        let raw = self.client.get(self.endpoint.base()).await?;
        let fresh: Vec<R> = decode(raw)?;
        self.items.set(fresh);
        Ok(())
    }

    async fn try_add(&self, draft: R::Draft) -> Result<(), CacheError> {
        let body = encode(&draft)?;
        let raw = self.client.post(self.endpoint.base(), body).await?;
        match self.policy {
            MutationPolicy::OptimisticAppend => {
                let created: R = decode(raw)?;
                let Some(id) = created.id().map(str::to_owned) else {
                    return Err(CacheError::Unidentified { resource: R::KIND });
                };
                self.items.update(|items| {
                    match items.iter_mut().find(|item| item.id() == Some(id.as_str())) {
                        Some(existing) => *existing = created,
                        None => items.push(created),
                    }
                });
                Ok(())
            }
            MutationPolicy::ReloadAfterWrite => self.refresh().await,
        }
    }

    async fn try_edit(&self, id: &str, patch: R::Patch) -> Result<(), CacheError> {
        if id.trim().is_empty() {
            return Err(CacheError::MissingId { resource: R::KIND });
        }
        let body = encode(&patch)?;
        let raw = self.client.patch(&self.endpoint.item_url(id), body).await?;
        match self.policy {
            MutationPolicy::OptimisticAppend => {
                let updated: R = decode(raw)?;
                if self.contains(id) {
                    self.items.update(|items| {
                        items
                            .iter_mut()
                            .filter(|item| item.id() == Some(id))
                            .for_each(|item| *item = updated.clone());
                    });
                } else {
                    log::warn!("[{} cache] edited {} is not cached, snapshot unchanged", R::KIND, id);
                }
                Ok(())
            }
            MutationPolicy::ReloadAfterWrite => self.refresh().await,
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.items
            .with_untracked(|items| items.iter().any(|item| item.id() == Some(id)))
    }

    async fn try_delete(&self, id: &str) -> Result<(), CacheError> {
        if id.trim().is_empty() {
            return Err(CacheError::MissingId { resource: R::KIND });
        }
        match self.client.delete(&self.endpoint.item_url(id)).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                log::warn!("[{} cache] {} already gone on the server", R::KIND, id);
            }
            Err(e) => return Err(e.into()),
        }
        match self.policy {
            MutationPolicy::OptimisticAppend => {
                if self.contains(id) {
                    self.items.update(|items| items.retain(|item| item.id() != Some(id)));
                }
                Ok(())
            }
            MutationPolicy::ReloadAfterWrite => self.refresh().await,
        }
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Value, CacheError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()).into())
}

fn decode<T: DeserializeOwned>(raw: Value) -> Result<T, CacheError> {
    serde_json::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()).into())
}

#[cfg(test)]
mod tests;
