//! Staged editing of a filter model
//!
//! A [`FilterSession`] keeps two models: the committed one used to evaluate
//! records, and a draft the filter UI edits. Opening the UI copies the
//! committed model into the draft, applying copies the draft back. Clearing
//! keeps a backup of the draft so that dismissing the UI without applying
//! restores what the user had before the clear.

use crate::core::error::EditError;
use crate::filter::model::{FilterEdit, FilterModel};
use std::fmt;

/// Lifecycle of the filter UI bound to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Never opened since the committed model was (re)built
    Idle,
    Open,
    Closed,
}

type ApplyListener = Box<dyn FnMut(&FilterModel) + Send>;

/// Draft/commit state machine over a [`FilterModel`]
pub struct FilterSession {
    state: SessionState,
    draft: FilterModel,
    committed: FilterModel,
    backup: Option<FilterModel>,
    was_cleared: bool,
    listener: Option<ApplyListener>,
}

impl fmt::Debug for FilterSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSession")
            .field("state", &self.state)
            .field("draft", &self.draft)
            .field("committed", &self.committed)
            .field("backup", &self.backup)
            .field("was_cleared", &self.was_cleared)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl FilterSession {
    /// Create an idle session over a freshly built model
    pub fn new(committed: FilterModel) -> Self {
        Self {
            state: SessionState::Idle,
            draft: committed.clone(),
            committed,
            backup: None,
            was_cleared: false,
            listener: None,
        }
    }

    /// Register the consumer notified with every applied model
    pub fn with_listener(mut self, listener: impl FnMut(&FilterModel) + Send + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Replace the listener; the draft and session state are kept
    pub fn set_listener(&mut self, listener: impl FnMut(&FilterModel) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn draft(&self) -> &FilterModel {
        &self.draft
    }

    pub fn committed(&self) -> &FilterModel {
        &self.committed
    }

    pub fn was_cleared(&self) -> bool {
        self.was_cleared
    }

    /// Start editing from a copy of the committed model
    pub fn open(&mut self) {
        self.draft = self.committed.clone();
        self.backup = None;
        self.was_cleared = false;
        self.state = SessionState::Open;
        tracing::debug!(active = self.draft.count_active(), "filter session opened");
    }

    /// Replace one column's draft entry with an edited copy
    pub fn mutate(&mut self, column: &str, edit: FilterEdit) -> Result<(), EditError> {
        self.ensure_open()?;
        self.draft = self.draft.edited(column, &edit)?;
        tracing::debug!(column, edit = edit.name(), "filter draft edited");
        Ok(())
    }

    /// Remove every draft constraint, keeping the previous draft as backup
    pub fn clear(&mut self) -> Result<(), EditError> {
        self.ensure_open()?;
        let cleared = self.draft.cleared();
        self.backup = Some(std::mem::replace(&mut self.draft, cleared));
        self.was_cleared = true;
        tracing::debug!("filter draft cleared");
        Ok(())
    }

    /// Commit the draft and notify the listener
    pub fn apply(&mut self) -> Result<FilterModel, EditError> {
        self.ensure_open()?;
        self.committed = self.draft.clone();
        self.was_cleared = false;
        self.backup = None;

        if let Some(listener) = self.listener.as_mut() {
            listener(&self.committed);
        }

        tracing::debug!(active = self.committed.count_active(), "filter model applied");
        Ok(self.committed.clone())
    }

    /// Dismiss the filter UI without applying
    ///
    /// An unapplied clear is rolled back; other draft edits are dropped the
    /// next time the session opens.
    pub fn close(&mut self) {
        if self.state != SessionState::Open {
            return;
        }

        if self.was_cleared {
            if let Some(backup) = self.backup.take() {
                self.draft = backup;
            }
            self.was_cleared = false;
            tracing::debug!("unapplied clear rolled back");
        }

        self.state = SessionState::Closed;
    }

    /// Replace the committed model after a rebuild and return to idle
    pub fn reset(&mut self, committed: FilterModel) {
        self.draft = committed.clone();
        self.committed = committed;
        self.backup = None;
        self.was_cleared = false;
        self.state = SessionState::Idle;
    }

    fn ensure_open(&self) -> Result<(), EditError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(EditError::NotOpen)
        }
    }
}
