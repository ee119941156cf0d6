//! Test Doubles
//!
//! Scripted REST client and recording widget surfaces shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use any_spawner::Executor;
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::prelude::*;
use reactive_stores::{Field, Store};
use serde_json::Value;

use crate::api::ResourceClient;
use crate::error::{ApiError, ApiResult};
use crate::models::Coordinates;
use crate::projection::{CalendarEntry, CalendarSurface, ChartSurface, MapClick, MapSurface, MarkerClickHandler, MarkerSpec};

// ========================
// Reactive runtime
// ========================

/// Owner for the test's signals and effects, with effects driven by a
/// thread-local futures pool
pub fn reactive_owner() -> Owner {
    _ = Executor::init_futures_executor();
    let owner = Owner::new();
    owner.set();
    owner
}

/// Run every effect that is due
pub fn settle() {
    Executor::poll_local();
}

/// Store-backed field outside the dashboard state
pub fn field<T: Send + Sync + 'static>(value: T) -> Field<T> {
    Store::new(value).into()
}

/// Count the runs of an effect that reads through `read`
pub fn count_runs(read: impl Fn() + 'static) -> Rc<Cell<usize>> {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    Effect::new(move |_| {
        read();
        counter.set(counter.get() + 1);
    });
    runs
}

// ========================
// REST client
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub verb: Verb,
    pub url: String,
    pub body: Option<Value>,
}

enum Reply {
    Ready(ApiResult<Value>),
    Deferred(oneshot::Receiver<ApiResult<Value>>),
}

/// Client answering from per-(verb, url) queues and recording every call
#[derive(Default)]
pub struct MockClient {
    replies: RefCell<HashMap<(Verb, String), VecDeque<Reply>>>,
    calls: RefCell<Vec<Call>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an immediate reply
    pub fn respond(&self, verb: Verb, url: &str, reply: ApiResult<Value>) {
        self.queue(verb, url, Reply::Ready(reply));
    }

    /// Queue a reply that settles when the returned sender fires
    pub fn defer(&self, verb: Verb, url: &str) -> oneshot::Sender<ApiResult<Value>> {
        let (tx, rx) = oneshot::channel();
        self.queue(verb, url, Reply::Deferred(rx));
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn queue(&self, verb: Verb, url: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .entry((verb, url.to_string()))
            .or_default()
            .push_back(reply);
    }

    fn dispatch<'a>(&'a self, verb: Verb, url: &'a str, body: Option<Value>) -> LocalBoxFuture<'a, ApiResult<Value>> {
        self.calls.borrow_mut().push(Call {
            verb,
            url: url.to_string(),
            body,
        });
        let reply = self
            .replies
            .borrow_mut()
            .get_mut(&(verb, url.to_string()))
            .and_then(VecDeque::pop_front);
        async move {
            match reply {
                Some(Reply::Ready(result)) => result,
                Some(Reply::Deferred(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Network("request abandoned".to_string()))),
                None => Err(ApiError::Network(format!("no scripted reply for {verb:?} {url}"))),
            }
        }
        .boxed_local()
    }
}

impl ResourceClient for MockClient {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, ApiResult<Value>> {
        self.dispatch(Verb::Get, url, None)
    }

    fn post<'a>(&'a self, url: &'a str, body: Value) -> LocalBoxFuture<'a, ApiResult<Value>> {
        self.dispatch(Verb::Post, url, Some(body))
    }

    fn patch<'a>(&'a self, url: &'a str, body: Value) -> LocalBoxFuture<'a, ApiResult<Value>> {
        self.dispatch(Verb::Patch, url, Some(body))
    }

    fn delete<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, ApiResult<()>> {
        self.dispatch(Verb::Delete, url, None).map(|r| r.map(|_| ())).boxed_local()
    }
}

/// Shared event log used to assert call ordering across fakes
pub type Journal = Rc<RefCell<Vec<String>>>;

// ========================
// Calendar widget
// ========================

#[derive(Default)]
pub struct RecordingCalendar {
    pub events: RefCell<Vec<CalendarEntry>>,
    pub clears: Cell<usize>,
}

impl CalendarSurface for RecordingCalendar {
    fn remove_all_events(&self) {
        self.events.borrow_mut().clear();
        self.clears.set(self.clears.get() + 1);
    }

    fn add_event(&self, entry: &CalendarEntry) {
        self.events.borrow_mut().push(entry.clone());
    }
}

impl RecordingCalendar {
    pub fn ids(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.id.clone()).collect()
    }
}

// ========================
// Map widget
// ========================

#[derive(Default)]
pub struct RecordingMap {
    pub markers: RefCell<Vec<(MarkerSpec, MarkerClickHandler)>>,
    pub clears: Cell<usize>,
}

impl MapSurface for RecordingMap {
    fn clear_markers(&self) {
        self.markers.borrow_mut().clear();
        self.clears.set(self.clears.get() + 1);
    }

    fn add_marker(&self, marker: &MarkerSpec, on_click: MarkerClickHandler) {
        self.markers.borrow_mut().push((marker.clone(), on_click));
    }
}

impl RecordingMap {
    pub fn marker_ids(&self) -> Vec<String> {
        self.markers
            .borrow()
            .iter()
            .filter_map(|(spec, _)| spec.location_id.clone())
            .collect()
    }

    /// Simulate a click on the marker of `location_id`
    pub fn click(&self, location_id: &str, click: &dyn MapClick) -> bool {
        let handler = self
            .markers
            .borrow()
            .iter()
            .find(|(spec, _)| spec.location_id.as_deref() == Some(location_id))
            .map(|(_, handler)| Rc::clone(handler));
        match handler {
            Some(handler) => {
                handler(click);
                true
            }
            None => false,
        }
    }
}

/// Click whose propagation control is written to a journal
pub struct FakeClick {
    pub at: Coordinates,
    pub journal: Journal,
}

impl MapClick for FakeClick {
    fn coordinates(&self) -> Coordinates {
        self.at
    }

    fn stop_propagation(&self) {
        self.journal.borrow_mut().push("stop_propagation".to_string());
    }
}

// ========================
// Chart widget
// ========================

#[derive(Default)]
pub struct RecordingChart {
    pub data: RefCell<Vec<u32>>,
    pub updates: Cell<usize>,
}

impl ChartSurface for RecordingChart {
    fn replace_data(&self, data: &[u32]) {
        *self.data.borrow_mut() = data.to_vec();
    }

    fn update(&self) {
        self.updates.set(self.updates.get() + 1);
    }
}
