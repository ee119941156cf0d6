//! Calendar Projection
//!
//! Mirrors the event cache into the calendar widget's own event list.

use serde::Serialize;

use crate::cache::EventCache;
use crate::models::Event;
use crate::reactive::{Projection, ReadinessGate};

/// Event as handed to the calendar widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub start: String,
    pub color: String,
}

impl From<&Event> for CalendarEntry {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone().unwrap_or_default(),
            title: event.title.clone(),
            start: event.date.clone(),
            color: event.color.clone(),
        }
    }
}

/// Calendar widget operations the projection relies on
pub trait CalendarSurface {
    fn remove_all_events(&self);
    fn add_event(&self, entry: &CalendarEntry);
}

/// Clear the widget and re-add every event. Returns the number added.
fn project_events(surface: &dyn CalendarSurface, events: &[Event]) -> usize {
    surface.remove_all_events();
    for event in events {
        surface.add_event(&CalendarEntry::from(event));
    }
    events.len()
}

/// Keep the calendar widget behind `gate` in step with the event cache
pub fn attach_calendar(events: &EventCache, gate: ReadinessGate<dyn CalendarSurface>) -> Projection {
    let events = events.clone();
    Projection::new(move || {
        let Some(surface) = gate.widget() else {
            return;
        };
        let count = events.with_items(|events| project_events(surface.as_ref(), events));
        log::debug!("[CalendarProjection] Rendered {} event(s)", count);
    })
}
