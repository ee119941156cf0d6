//! Location Form
//!
//! Create and edit modals of the map view. Map clicks open the create form,
//! marker clicks the edit form; the two never overlap because the marker
//! handler stops propagation before reaching here.

use futures::FutureExt;

use super::{changed, filled, PendingOp};
use crate::cache::LocationCache;
use crate::models::{Coordinates, Location, LocationDraft, LocationPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationForm {
    pub create_open: bool,
    pub edit_open: bool,
    /// Last clicked point: the new location's position, or a candidate
    /// new position for the selected one
    pub click: Option<Coordinates>,
    pub selected: Option<Location>,
    pub name: String,
    pub description: String,
    pub category: String,
}

impl LocationForm {
    /// Click on empty map space
    pub fn on_map_click(&mut self, at: Coordinates) {
        self.reset();
        self.click = Some(at);
        self.create_open = true;
    }

    /// Click on a marker
    pub fn on_marker_click(&mut self, location: &Location, at: Coordinates) {
        self.reset();
        self.name = location.name.clone();
        self.description = location.description.clone();
        self.category = location.category.clone();
        self.selected = Some(location.clone());
        self.click = Some(at);
        self.edit_open = true;
    }

    pub fn submit_create(&mut self, locations: &LocationCache) -> Option<PendingOp> {
        let Some(at) = self.click else {
            log::warn!("[LocationForm] Create needs a clicked position");
            return None;
        };
        if !filled(&self.name) || !filled(&self.category) {
            log::warn!("[LocationForm] Create needs name and category");
            return None;
        }
        let draft = LocationDraft {
            name: self.name.trim().to_string(),
            lat: at.lat,
            lng: at.lng,
            description: self.description.trim().to_string(),
            category: self.category.clone(),
        };
        self.reset();
        Some(locations.add(draft).boxed_local())
    }

    /// Moves the location to the clicked point when there is one, else keeps
    /// its current position. Only differing fields are sent.
    pub fn submit_edit(&mut self, locations: &LocationCache) -> Option<PendingOp> {
        let Some(current) = self.selected.clone() else {
            log::warn!("[LocationForm] Edit without a selected location");
            return None;
        };
        let at = self.click.unwrap_or_else(|| current.coordinates());
        let patch = LocationPatch {
            name: changed(&self.name.trim().to_string(), &current.name),
            lat: changed(&at.lat, &current.lat),
            lng: changed(&at.lng, &current.lng),
            description: changed(&self.description.trim().to_string(), &current.description),
            category: changed(&self.category, &current.category),
        };
        // an empty id still goes to the cache, which rejects it before any request
        let id = current.id.unwrap_or_default();
        self.reset();
        if patch == LocationPatch::default() {
            log::debug!("[LocationForm] Location {} unchanged", id);
            return None;
        }
        Some(locations.edit(id, patch).boxed_local())
    }

    pub fn submit_delete(&mut self, locations: &LocationCache) -> Option<PendingOp> {
        let Some(current) = self.selected.take() else {
            log::warn!("[LocationForm] Delete without a selected location");
            return None;
        };
        self.reset();
        Some(locations.delete(current.id.unwrap_or_default()).boxed_local())
    }

    pub fn dismiss(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
