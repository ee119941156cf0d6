//! Form & Selection State
//!
//! Per-view transient state turning widget clicks into cache mutations.
//! Submitting validates locally first. A rejected submit makes no network
//! call and leaves the modal open; an accepted one resets the form, closes
//! its modals and hands back the mutation for the caller to spawn.

mod calendar;
mod location;
mod user;

use futures::future::LocalBoxFuture;

pub use calendar::{CalendarForm, EventClick};
pub use location::LocationForm;
pub use user::UserForm;

/// Mutation accepted by a form, to be driven by the caller's executor
pub type PendingOp = LocalBoxFuture<'static, ()>;

fn filled(field: &str) -> bool {
    !field.trim().is_empty()
}

/// `Some(new)` when it differs from `old`
fn changed<T: PartialEq + Clone>(new: &T, old: &T) -> Option<T> {
    (new != old).then(|| new.clone())
}
