//! Widget Readiness & Projections
//!
//! Glue between the Leptos reactive graph and widgets owned by JavaScript.
//! A [`ReadinessGate`] holds a widget handle once the widget has finished
//! initializing; a [`Projection`] is the effect that keeps such a widget in
//! step with the store. Writes made in the same tick are seen by the effect
//! as one change.

use std::rc::Rc;

use leptos::prelude::*;

/// One-shot slot announcing that a widget finished initializing.
/// Carries the widget handle so projections can reach it once open.
pub struct ReadinessGate<W: ?Sized + 'static> {
    slot: ArcRwSignal<Option<Rc<W>>>,
}

impl<W: ?Sized + 'static> Clone for ReadinessGate<W> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<W: ?Sized + 'static> Default for ReadinessGate<W> {
    fn default() -> Self {
        Self {
            slot: ArcRwSignal::new(None),
        }
    }
}

impl<W: ?Sized + 'static> ReadinessGate<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate with the ready widget. Only the first call counts.
    pub fn open(&self, widget: Rc<W>) -> bool {
        if self.slot.with_untracked(Option::is_some) {
            log::warn!("[ReadinessGate] Already open, ignoring second widget");
            return false;
        }
        self.slot.set(Some(widget));
        true
    }

    /// Tracked: an effect reading this re-runs when the gate opens
    pub fn is_open(&self) -> bool {
        self.slot.with(Option::is_some)
    }

    /// Tracked widget handle, `None` while closed
    pub fn widget(&self) -> Option<Rc<W>> {
        self.slot.with(|widget| widget.clone())
    }
}

/// Running projection effect
#[must_use = "dropping the handle leaves no way to detach the projection"]
#[derive(Clone, Copy)]
pub struct Projection {
    effect: Effect<LocalStorage>,
}

impl Projection {
    /// Run `render` on the next tick and again whenever anything it read changes
    pub fn new(mut render: impl FnMut() + 'static) -> Self {
        Self {
            effect: Effect::new(move |_| render()),
        }
    }

    /// Stop re-rendering and release the effect's subscriptions
    pub fn detach(&self) {
        self.effect.stop();
    }
}
