use crate::rows::models::Record;

/// Snapshot of a single removal, enough to put the record back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub removed_record: Record,
    /// Position the record had at the moment it was removed.
    pub original_index: usize,
    pub removed_id: String,
}

impl HistoryEntry {
    pub fn new(removed_record: Record, original_index: usize, removed_id: String) -> Self {
        Self {
            removed_record,
            original_index,
            removed_id,
        }
    }
}

/// LIFO stack of removals. Only push and pop mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    entries: Vec<HistoryEntry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
