//! Frontend Models
//!
//! Data structures matching the REST API payloads. Identifiers are assigned
//! by the remote store and travel as `_id`.

use serde::{Deserialize, Serialize};

use crate::cache::Resource;

// ========================
// Events
// ========================

/// Calendar event (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// `YYYY-MM-DD`, possibly followed by a time part
    pub date: String,
    #[serde(default)]
    pub color: String,
}

/// Payload for creating an event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub color: String,
}

/// Partial update for an event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Resource for Event {
    type Draft = EventDraft;
    type Patch = EventPatch;
    const KIND: &'static str = "event";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

// ========================
// Locations
// ========================

/// Point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geotagged location (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

impl Location {
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Tooltip text shown on the marker
    pub fn marker_label(&self) -> String {
        if self.description.is_empty() {
            format!("{} ({})", self.name, self.category)
        } else {
            format!("{}: {} ({})", self.name, self.description, self.category)
        }
    }
}

/// Payload for creating a location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDraft {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    pub category: String,
}

/// Partial update for a location
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Resource for Location {
    type Draft = LocationDraft;
    type Patch = LocationPatch;
    const KIND: &'static str = "location";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

// ========================
// Users
// ========================

/// Directory entry (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Resource for User {
    type Draft = UserDraft;
    type Patch = UserPatch;
    const KIND: &'static str = "user";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
