use crate::rows::history::{HistoryEntry, UndoStack};
use crate::rows::intent::Intent;
use crate::rows::state::CollectionState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReducerError {
    #[error("Unhandled intent type '{tag}'")]
    UnknownIntent { tag: String },
    #[error("Intent '{tag}' is missing field '{field}'")]
    MissingField { tag: String, field: &'static str },
    #[error("Nothing to undo")]
    UndoOnEmptyHistory,
    #[error("Record at index {index} is '{found}', not '{id}'")]
    IndexMismatch {
        id: String,
        index: usize,
        found: String,
    },
    #[error("Index {index} is out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },
}

/// How strictly `Remove` checks the caller's index against the id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovePolicy {
    /// Reject the intent when `records[index].id != id`.
    #[default]
    Strict,
    /// Remove whatever sits at `index`.
    BestEffort,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown remove policy '{0}' (expected 'strict' or 'best-effort')")]
pub struct ParsePolicyError(String);

impl FromStr for RemovePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "best-effort" => Ok(Self::BestEffort),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for RemovePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::BestEffort => write!(f, "best-effort"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reducer {
    pub policy: RemovePolicy,
}

impl Reducer {
    pub fn new(policy: RemovePolicy) -> Self {
        Self { policy }
    }

    /// Computes the state that follows `intent`. The input state is left as
    /// it was, including when an error is returned.
    pub fn apply(&self, state: &CollectionState, intent: Intent) -> Result<CollectionState, ReducerError> {
        match intent {
            Intent::Remove { id, index } => self.remove(state, id, index),
            Intent::Undo => undo(state),
        }
    }

    fn remove(&self, state: &CollectionState, id: String, index: usize) -> Result<CollectionState, ReducerError> {
        let records = state.records();
        let target = records.get(index).ok_or(ReducerError::IndexOutOfRange {
            index,
            len: records.len(),
        })?;

        if self.policy == RemovePolicy::Strict && target.id != id {
            return Err(ReducerError::IndexMismatch {
                id,
                index,
                found: target.id.clone(),
            });
        }

        let mut records = records.to_vec();
        let removed = records.remove(index);
        let mut history = state.history().clone();
        history.push(HistoryEntry::new(removed, index, id));

        Ok(CollectionState::from_parts(records, history))
    }
}

fn undo(state: &CollectionState) -> Result<CollectionState, ReducerError> {
    let mut history: UndoStack = state.history().clone();
    let entry = history.pop().ok_or(ReducerError::UndoOnEmptyHistory)?;

    let mut records = state.records().to_vec();
    // An index at or past the end appends.
    let position = entry.original_index.min(records.len());
    records.insert(position, entry.removed_record);

    Ok(CollectionState::from_parts(records, history))
}

/// Applies `intent` with the default (strict) remove policy.
pub fn apply(state: &CollectionState, intent: Intent) -> Result<CollectionState, ReducerError> {
    Reducer::default().apply(state, intent)
}
