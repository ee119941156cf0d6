//! User Form
//!
//! Create and edit modals of the user directory.

use futures::FutureExt;

use super::{changed, filled, PendingOp};
use crate::cache::UserCache;
use crate::models::{User, UserDraft, UserPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub create_open: bool,
    pub edit_open: bool,
    pub selected: Option<User>,
    pub name: String,
    pub email: String,
    pub location: String,
}

impl UserForm {
    pub fn open_create(&mut self) {
        self.reset();
        self.create_open = true;
    }

    pub fn open_edit(&mut self, user: &User) {
        self.reset();
        self.name = user.name.clone();
        self.email = user.email.clone();
        self.location = user.location.clone();
        self.selected = Some(user.clone());
        self.edit_open = true;
    }

    fn complete(&self) -> bool {
        filled(&self.name) && self.email.contains('@')
    }

    pub fn submit_create(&mut self, users: &UserCache) -> Option<PendingOp> {
        if !self.complete() {
            log::warn!("[UserForm] Create needs a name and a valid email");
            return None;
        }
        let draft = UserDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            location: self.location.trim().to_string(),
        };
        self.reset();
        Some(users.add(draft).boxed_local())
    }

    pub fn submit_edit(&mut self, users: &UserCache) -> Option<PendingOp> {
        let Some(current) = self.selected.clone() else {
            log::warn!("[UserForm] Edit without a selected user");
            return None;
        };
        if !self.complete() {
            log::warn!("[UserForm] Edit needs a name and a valid email");
            return None;
        }
        let patch = UserPatch {
            name: changed(&self.name.trim().to_string(), &current.name),
            email: changed(&self.email.trim().to_string(), &current.email),
            location: changed(&self.location.trim().to_string(), &current.location),
        };
        let id = current.id.unwrap_or_default();
        self.reset();
        if patch == UserPatch::default() {
            return None;
        }
        Some(users.edit(id, patch).boxed_local())
    }

    /// Delete `user` from its table row. Closes the edit modal when it was
    /// showing that same user.
    pub fn submit_delete(&mut self, user: &User, users: &UserCache) -> Option<PendingOp> {
        let Some(id) = user.id.clone().filter(|id| filled(id)) else {
            log::warn!("[UserForm] Delete of a user without an id");
            return None;
        };
        if self.selected.as_ref().and_then(|s| s.id.as_deref()) == Some(id.as_str()) {
            self.reset();
        }
        Some(users.delete(id).boxed_local())
    }

    pub fn dismiss(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
