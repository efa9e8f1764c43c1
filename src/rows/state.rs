use crate::rows::history::UndoStack;
use crate::rows::models::{Record, find_duplicate_id};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("Duplicate record id '{0}' in seed")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoAvailability {
    CanUndo,
    CannotUndo,
}

/// The visible rows plus the removals that can still be undone.
///
/// A state value is never edited after construction; every processed intent
/// produces a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionState {
    records: Vec<Record>,
    history: UndoStack,
}

impl CollectionState {
    pub fn new(records: Vec<Record>) -> Result<Self, SeedError> {
        if let Some(id) = find_duplicate_id(&records) {
            return Err(SeedError::DuplicateId(id.to_string()));
        }
        Ok(Self {
            records,
            history: UndoStack::new(),
        })
    }

    pub(crate) fn from_parts(records: Vec<Record>, history: UndoStack) -> Self {
        Self { records, history }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_availability(&self) -> UndoAvailability {
        if self.can_undo() {
            UndoAvailability::CanUndo
        } else {
            UndoAvailability::CannotUndo
        }
    }
}
