//! Calendar Form
//!
//! Create and edit modals of the calendar view.

use futures::FutureExt;

use super::{changed, filled, PendingOp};
use crate::cache::EventCache;
use crate::models::{EventDraft, EventPatch};

/// Event as reported by a calendar click
#[derive(Debug, Clone, PartialEq)]
pub struct EventClick {
    pub id: Option<String>,
    pub title: String,
    pub color: Option<String>,
    pub start: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarForm {
    pub create_open: bool,
    pub edit_open: bool,
    pub date: String,
    pub title: String,
    pub color: String,
    /// Identifier of the event being edited
    pub selected: Option<String>,
}

impl CalendarForm {
    /// Click on empty calendar space
    pub fn on_date_click(&mut self, date: &str) {
        self.reset();
        self.date = date.to_string();
        self.create_open = true;
    }

    /// Click on an existing event
    pub fn on_event_click(&mut self, click: EventClick) {
        self.reset();
        self.selected = click.id.filter(|id| filled(id));
        self.title = click.title;
        self.color = click.color.unwrap_or_default();
        self.date = click
            .start
            .split('T')
            .next()
            .unwrap_or_default()
            .to_string();
        self.edit_open = true;
    }

    fn complete(&self) -> bool {
        filled(&self.title) && filled(&self.color) && filled(&self.date)
    }

    pub fn submit_create(&mut self, events: &EventCache) -> Option<PendingOp> {
        if !self.complete() {
            log::warn!("[CalendarForm] Create needs title, color and date");
            return None;
        }
        let draft = EventDraft {
            title: self.title.trim().to_string(),
            date: self.date.clone(),
            color: self.color.clone(),
        };
        self.reset();
        Some(events.add(draft).boxed_local())
    }

    /// Sends the fields that differ from the cached event. With nothing
    /// changed the form just closes and no request is made.
    pub fn submit_edit(&mut self, events: &EventCache) -> Option<PendingOp> {
        let Some(id) = self.selected.clone() else {
            log::warn!("[CalendarForm] Edit without a selected event");
            return None;
        };
        if !self.complete() {
            log::warn!("[CalendarForm] Edit needs title, color and date");
            return None;
        }
        let title = self.title.trim().to_string();
        let patch = match events.find(&id) {
            Some(current) => EventPatch {
                title: changed(&title, &current.title),
                date: changed(&self.date, &current.date),
                color: changed(&self.color, &current.color),
            },
            None => EventPatch {
                title: Some(title),
                date: Some(self.date.clone()),
                color: Some(self.color.clone()),
            },
        };
        self.reset();
        if patch == EventPatch::default() {
            log::debug!("[CalendarForm] Event {} unchanged", id);
            return None;
        }
        Some(events.edit(id, patch).boxed_local())
    }

    pub fn submit_delete(&mut self, events: &EventCache) -> Option<PendingOp> {
        let Some(id) = self.selected.clone() else {
            log::warn!("[CalendarForm] Delete without a selected event");
            return None;
        };
        self.reset();
        Some(events.delete(id).boxed_local())
    }

    /// Cancel: clear every field and close both modals
    pub fn dismiss(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
