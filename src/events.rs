//! Listener registration for table and select notifications.
//!
//! Selection, sort and scroll changes are published as events to every
//! registered listener, in registration order.

use serde::Serialize;

use crate::layout::ScrollInfo;
use crate::types::{Modifiers, Row, SelectionValue, SortState};

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners for events of type `E`.
pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Notifications published by the grid table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableEvent {
    /// A body cell was clicked; `value` is the new selection.
    #[serde(rename_all = "camelCase")]
    RowClick {
        value: SelectionValue,
        row: Row,
        row_index: usize,
        column_key: String,
        modifiers: Modifiers,
    },
    /// A sortable header was clicked.
    SortChange(SortState),
    /// The shared scroll position moved.
    Scroll(ScrollInfo),
}

/// Notifications published by the search select.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SelectEvent {
    /// An option was chosen; carries the new value.
    Change(SelectionValue),
    /// The text input changed (not yet applied as a filter).
    InputChange(String),
    /// The debounced search key was applied.
    SearchChange(String),
}
