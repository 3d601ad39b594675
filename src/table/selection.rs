//! Row selection state machine.

use log::debug;

use crate::types::{Key, Modifiers, MultipleMode, SelectionValue};

/// Selection mode plus the range anchor.
///
/// The anchor is a display-order row index, so it is only meaningful against
/// the current row order; the controller calls [`Self::reset_anchor`]
/// whenever that order is re-derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: MultipleMode,
    anchor: Option<usize>,
}

impl SelectionState {
    pub fn new(mode: MultipleMode) -> Self {
        Self { mode, anchor: None }
    }

    pub fn mode(&self) -> MultipleMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MultipleMode) {
        if self.mode != mode {
            self.mode = mode;
            self.anchor = None;
        }
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn reset_anchor(&mut self) {
        self.anchor = None;
    }

    /// New selection after a click on display row `index` with identity
    /// `key`. `key_at` resolves the identity of any display row, for range
    /// selection.
    pub fn click<F>(
        &mut self,
        current: &SelectionValue,
        index: usize,
        key: Key,
        modifiers: Modifiers,
        key_at: F,
    ) -> SelectionValue
    where
        F: Fn(usize) -> Option<Key>,
    {
        let next = match self.mode {
            MultipleMode::None => SelectionValue::Single(key),
            MultipleMode::Toggle => toggle(current, key),
            MultipleMode::Range => match self.anchor {
                Some(anchor) if modifiers.shift => {
                    let (lo, hi) = (anchor.min(index), anchor.max(index));
                    SelectionValue::Multiple((lo..=hi).filter_map(&key_at).collect())
                }
                _ if modifiers.command() => {
                    self.anchor = Some(index);
                    toggle(current, key)
                }
                _ => {
                    self.anchor = Some(index);
                    SelectionValue::Multiple(vec![key])
                }
            },
        };
        debug!(
            "selection click row {index} ({:?}): {} selected, anchor {:?}",
            self.mode,
            next.keys().len(),
            self.anchor
        );
        next
    }
}

/// Add `key` to the selected list or remove it if present.
fn toggle(current: &SelectionValue, key: Key) -> SelectionValue {
    let mut keys = current.keys().to_vec();
    if let Some(pos) = keys.iter().position(|k| *k == key) {
        keys.remove(pos);
    } else {
        keys.push(key);
    }
    SelectionValue::Multiple(keys)
}
