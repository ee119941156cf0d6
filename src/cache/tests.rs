//! Collection Cache Tests
//!
//! Scripted REST responses against the events, locations and users caches.

use std::rc::Rc;

use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;
use leptos::prelude::Track;
use serde_json::{json, Value};

use super::*;
use crate::api::Endpoint;
use crate::config::MutationPolicy;
use crate::error::ApiError;
use crate::models::{EventDraft, EventPatch, LocationPatch, UserDraft, UserPatch};
use crate::testing::{count_runs, field, reactive_owner, settle, MockClient, Verb};

const ROOT: &str = "http://localhost:3000";
const EVENTS: &str = "http://localhost:3000/events/";
const USERS: &str = "http://localhost:3000/users/";

fn event(id: &str, title: &str, date: &str) -> Event {
    Event {
        id: Some(id.to_string()),
        title: title.to_string(),
        date: date.to_string(),
        color: "blue".to_string(),
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

fn event_cache(policy: MutationPolicy) -> (Rc<MockClient>, EventCache) {
    let client = Rc::new(MockClient::new());
    let cache = EventCache::new(
        client.clone(),
        Endpoint::new(ROOT, "/events/"),
        policy,
        field(Vec::new()),
        field(false),
    );
    (client, cache)
}

fn user_cache(client: &Rc<MockClient>, loading: Field<bool>) -> UserCache {
    UserCache::new(
        client.clone(),
        Endpoint::new(ROOT, "/users/"),
        MutationPolicy::ReloadAfterWrite,
        field(Vec::new()),
        loading,
    )
}

/// Effect run counter over the cache snapshot
fn snapshot_runs(cache: &EventCache) -> Rc<std::cell::Cell<usize>> {
    let tracked = cache.clone();
    let runs = count_runs(move || tracked.with_items(|_| ()));
    settle();
    runs
}

fn draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        date: "2025-06-01".to_string(),
        color: "red".to_string(),
    }
}

fn logged(fragment: &str) -> bool {
    rolling_logger::recent().iter().any(|e| e.message.contains(fragment))
}

// ========================
// load
// ========================

#[test]
fn test_load_replaces_snapshot() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![event("old", "Stale", "2024-01-01")]);
    let fresh = vec![event("1", "Concert", "2025-06-01")];
    client.respond(Verb::Get, EVENTS, Ok(to_json(&fresh)));

    block_on(cache.load());

    assert_eq!(cache.snapshot(), fresh);
    assert!(!cache.is_loading());
}

#[test]
fn test_loading_flag_spans_the_request() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    let reply = client.defer(Verb::Get, EVENTS);
    let mut pool = LocalPool::new();
    pool.spawner().spawn_local(cache.load()).unwrap();

    assert!(!cache.is_loading());
    pool.run_until_stalled();
    assert!(cache.is_loading());

    reply.send(Ok(json!([]))).unwrap();
    pool.run_until_stalled();
    assert!(!cache.is_loading());
}

#[test]
fn test_failed_load_keeps_snapshot_and_clears_flag() {
    rolling_logger::init_default();
    let client = Rc::new(MockClient::new());
    let cache = EventCache::new(
        client.clone(),
        Endpoint::new("http://load-failure.test", "/events/"),
        MutationPolicy::OptimisticAppend,
        field(Vec::new()),
        field(false),
    );
    let kept = vec![event("1", "Keep", "2025-01-01")];
    cache.seed(kept.clone());
    client.respond(
        Verb::Get,
        "http://load-failure.test/events/",
        Err(ApiError::Status {
            status: 503,
            url: "http://load-failure.test/events/".to_string(),
        }),
    );

    block_on(cache.load());

    assert_eq!(cache.snapshot(), kept);
    assert!(!cache.is_loading());
    assert!(logged("status 503 for http://load-failure.test/events/"));
}

#[test]
fn test_overlapping_loads_keep_flag_until_last_settles() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    let first = client.defer(Verb::Get, EVENTS);
    let second = client.defer(Verb::Get, EVENTS);
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    spawner.spawn_local(cache.load()).unwrap();
    spawner.spawn_local(cache.load()).unwrap();
    pool.run_until_stalled();
    assert!(cache.is_loading());

    first.send(Ok(to_json(&vec![event("1", "A", "2025-01-01")]))).unwrap();
    pool.run_until_stalled();
    assert!(cache.is_loading());
    assert_eq!(cache.len(), 1);

    second.send(Ok(json!([]))).unwrap();
    pool.run_until_stalled();
    assert!(!cache.is_loading());
}

#[test]
fn test_undecodable_load_is_a_no_op() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![event("1", "Keep", "2025-01-01")]);
    client.respond(Verb::Get, EVENTS, Ok(json!({ "unexpected": true })));

    block_on(cache.load());

    assert_eq!(cache.len(), 1);
}

// ========================
// add
// ========================

#[test]
fn test_add_appends_created_item() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    let existing = event("1", "Existing", "2025-01-01");
    cache.seed(vec![existing.clone()]);
    let created = event("2", "New", "2025-06-01");
    client.respond(Verb::Post, EVENTS, Ok(to_json(&created)));

    block_on(cache.add(draft("New")));

    assert_eq!(cache.snapshot(), vec![existing, created]);
    let calls = client.calls();
    assert_eq!(calls[0].url, EVENTS);
    assert_eq!(
        calls[0].body,
        Some(json!({ "title": "New", "date": "2025-06-01", "color": "red" }))
    );
}

#[test]
fn test_sequential_adds_grow_snapshot_with_unique_ids() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    for n in 0..5 {
        let id = format!("id-{n}");
        client.respond(Verb::Post, EVENTS, Ok(to_json(&event(&id, "Gig", "2025-02-02"))));
    }

    for _ in 0..5 {
        block_on(cache.add(draft("Gig")));
    }

    let ids: Vec<_> = cache.snapshot().into_iter().filter_map(|e| e.id).collect();
    let unique: std::collections::BTreeSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), 5);
    assert_eq!(unique.len(), 5);
}

#[test]
fn test_add_never_duplicates_an_identifier() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![event("1", "Before", "2025-01-01")]);
    client.respond(Verb::Post, EVENTS, Ok(to_json(&event("1", "After", "2025-01-01"))));

    block_on(cache.add(draft("After")));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.find("1").unwrap().title, "After");
}

#[test]
fn test_add_rejects_created_item_without_id() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    client.respond(
        Verb::Post,
        EVENTS,
        Ok(json!({ "title": "New", "date": "2025-06-01", "color": "red" })),
    );

    block_on(cache.add(draft("New")));

    assert!(cache.is_empty());
}

#[test]
fn test_failed_add_leaves_snapshot_untouched() {
    let _owner = reactive_owner();
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![event("1", "Keep", "2025-01-01")]);
    let runs = snapshot_runs(&cache);
    client.respond(Verb::Post, EVENTS, Err(ApiError::Network("offline".to_string())));

    block_on(cache.add(draft("Lost")));
    settle();

    assert_eq!(cache.len(), 1);
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_reload_policy_refetches_without_loading_flag() {
    let _owner = reactive_owner();
    let client = Rc::new(MockClient::new());
    let loading = field(false);
    let cache = user_cache(&client, loading);
    let loading_runs = count_runs(move || loading.track());
    settle();
    let server = json!([
        { "_id": "1", "name": "Lleison", "email": "lleisonbeker@mail.com", "location": "Estates" },
        { "_id": "2", "name": "Estif", "email": "estivei@mail.com", "location": "Milwoki" }
    ]);
    client.respond(Verb::Post, USERS, Ok(json!({ "_id": "2" })));
    client.respond(Verb::Get, USERS, Ok(server));

    block_on(cache.add(UserDraft {
        name: "Estif".to_string(),
        email: "estivei@mail.com".to_string(),
        location: "Milwoki".to_string(),
    }));

    assert_eq!(cache.len(), 2);
    settle();
    assert_eq!(loading_runs.get(), 1);
    let verbs: Vec<_> = client.calls().into_iter().map(|c| c.verb).collect();
    assert_eq!(verbs, vec![Verb::Post, Verb::Get]);
}

// ========================
// edit
// ========================

#[test]
fn test_edit_replaces_item_in_place() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![
        event("1", "First", "2025-01-01"),
        event("2", "Second", "2025-02-01"),
        event("3", "Third", "2025-03-01"),
    ]);
    let updated = event("2", "Updated", "2025-02-01");
    client.respond(Verb::Patch, "http://localhost:3000/events/2", Ok(to_json(&updated)));

    block_on(cache.edit(
        "2",
        EventPatch {
            title: Some("Updated".to_string()),
            ..Default::default()
        },
    ));

    let titles: Vec<_> = cache.snapshot().into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["First", "Updated", "Third"]);
    assert_eq!(client.calls()[0].body, Some(json!({ "title": "Updated" })));
}

#[test]
fn test_edit_of_uncached_id_changes_nothing() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    let original = vec![event("1", "First", "2025-01-01")];
    cache.seed(original.clone());
    client.respond(
        Verb::Patch,
        "http://localhost:3000/events/ghost",
        Ok(to_json(&event("ghost", "Ghost", "2025-01-01"))),
    );

    block_on(cache.edit("ghost", EventPatch::default()));

    assert_eq!(cache.snapshot(), original);
}

#[test]
fn test_edit_without_id_is_rejected_locally() {
    rolling_logger::init_default();
    let client = Rc::new(MockClient::new());
    let cache = LocationCache::new(
        client.clone(),
        Endpoint::new(ROOT, "/locations/"),
        MutationPolicy::OptimisticAppend,
        field(Vec::new()),
        field(false),
    );

    block_on(cache.edit(
        "",
        LocationPatch {
            name: Some("No id".to_string()),
            ..Default::default()
        },
    ));

    assert_eq!(client.call_count(), 0);
    assert!(logged("location identifier is missing"));
}

#[test]
fn test_racing_edits_keep_last_response() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![event("1", "Original", "2025-01-01")]);
    let url = "http://localhost:3000/events/1";
    let first = client.defer(Verb::Patch, url);
    let second = client.defer(Verb::Patch, url);
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    spawner.spawn_local(cache.edit("1", EventPatch::default())).unwrap();
    spawner.spawn_local(cache.edit("1", EventPatch::default())).unwrap();
    pool.run_until_stalled();

    second.send(Ok(to_json(&event("1", "Second", "2025-01-01")))).unwrap();
    pool.run_until_stalled();
    first.send(Ok(to_json(&event("1", "First", "2025-01-01")))).unwrap();
    pool.run_until_stalled();

    assert_eq!(cache.find("1").unwrap().title, "First");
}

#[test]
fn test_reload_policy_edit_adopts_server_order() {
    let client = Rc::new(MockClient::new());
    let cache = user_cache(&client, field(false));
    cache.seed(vec![User {
        id: Some("1".to_string()),
        name: "Lleison".to_string(),
        email: "lleisonbeker@mail.com".to_string(),
        location: "Estates".to_string(),
    }]);
    client.respond(Verb::Patch, "http://localhost:3000/users/1", Ok(json!({})));
    client.respond(
        Verb::Get,
        USERS,
        Ok(json!([{ "_id": "1", "name": "Lleison Updated", "email": "lleisonbeker@mail.com", "location": "Sevilla" }])),
    );

    block_on(cache.edit(
        "1",
        UserPatch {
            name: Some("Lleison Updated".to_string()),
            location: Some("Sevilla".to_string()),
            ..Default::default()
        },
    ));

    let user = cache.find("1").unwrap();
    assert_eq!(user.name, "Lleison Updated");
    assert_eq!(user.location, "Sevilla");
}

// ========================
// delete
// ========================

#[test]
fn test_delete_removes_item() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![event("1", "Keep", "2025-01-01")]);
    client.respond(Verb::Delete, "http://localhost:3000/events/1", Ok(Value::Null));

    block_on(cache.delete("1"));

    assert!(cache.snapshot().is_empty());
    assert_eq!(client.calls()[0].url, "http://localhost:3000/events/1");
}

#[test]
fn test_second_delete_is_harmless() {
    let _owner = reactive_owner();
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![
        event("1", "Keep", "2025-01-01"),
        event("2", "Delete me", "2025-06-01"),
    ]);
    let url = "http://localhost:3000/events/2";
    client.respond(Verb::Delete, url, Ok(Value::Null));
    client.respond(
        Verb::Delete,
        url,
        Err(ApiError::Status {
            status: 404,
            url: url.to_string(),
        }),
    );

    block_on(cache.delete("2"));
    let runs = snapshot_runs(&cache);
    block_on(cache.delete("2"));
    settle();

    assert_eq!(cache.snapshot(), vec![event("1", "Keep", "2025-01-01")]);
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_failed_delete_keeps_item() {
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    cache.seed(vec![event("1", "Keep", "2025-01-01")]);
    client.respond(
        Verb::Delete,
        "http://localhost:3000/events/1",
        Err(ApiError::Status {
            status: 500,
            url: "http://localhost:3000/events/1".to_string(),
        }),
    );

    block_on(cache.delete("1"));

    assert_eq!(cache.len(), 1);
}

// ========================
// change notification
// ========================

#[test]
fn test_only_settled_writes_notify_observers() {
    let _owner = reactive_owner();
    let (client, cache) = event_cache(MutationPolicy::OptimisticAppend);
    let runs = snapshot_runs(&cache);
    assert_eq!(runs.get(), 1);

    client.respond(Verb::Post, EVENTS, Err(ApiError::Network("offline".to_string())));
    block_on(cache.add(draft("Lost")));
    settle();
    assert_eq!(runs.get(), 1);

    client.respond(Verb::Post, EVENTS, Ok(to_json(&event("9", "Saved", "2025-06-01"))));
    block_on(cache.add(draft("Saved")));
    settle();
    assert_eq!(runs.get(), 2);
}
