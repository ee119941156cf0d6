//! Map Category Filter
//!
//! Set of active location categories, kept in the dashboard store. A location
//! is drawn on the map exactly when its category is in the set. The map view
//! is the only writer.

use std::collections::BTreeSet;
use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Field;

#[derive(Clone)]
pub struct FilterSet {
    active: Field<BTreeSet<String>>,
    known: Rc<[String]>,
}

impl FilterSet {
    /// Filter over `categories` backed by `active`; every category starts active
    pub fn new<I, S>(categories: I, active: impl Into<Field<BTreeSet<String>>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known: Vec<String> = categories.into_iter().map(Into::into).collect();
        let active = active.into();
        active.set(known.iter().cloned().collect());
        Self {
            active,
            known: known.into(),
        }
    }

    /// Categories offered as toggles, in configuration order
    pub fn known_categories(&self) -> &[String] {
        &self.known
    }

    /// Add `category` if absent, remove it if present. Returns whether it is now active.
    pub fn toggle(&self, category: &str) -> bool {
        let now_active = self
            .active
            .try_update(|active| {
                if active.remove(category) {
                    false
                } else {
                    active.insert(category.to_string());
                    true
                }
            })
            .unwrap_or(false);
        log::debug!("[FilterSet] {} is now {}", category, if now_active { "shown" } else { "hidden" });
        now_active
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self, category: &str) -> bool {
        self.active.with_untracked(|active| active.contains(category))
    }

    #[cfg(test)]
    pub(crate) fn active(&self) -> BTreeSet<String> {
        self.active.get_untracked()
    }

    /// Tracked read of the active set
    pub fn with_active<T>(&self, f: impl FnOnce(&BTreeSet<String>) -> T) -> T {
        self.active.with(f)
    }
}
