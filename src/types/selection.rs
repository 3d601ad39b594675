use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Key, Row};

/// How clicks on body rows change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawMultiple")]
pub enum MultipleMode {
    /// Single selection: a click selects that row's identity.
    #[default]
    None,
    /// A click toggles the row in or out of the selected set.
    Toggle,
    /// Click replaces, ctrl/cmd-click toggles, shift-click selects the range
    /// from the anchor row.
    Range,
}

/// Host spelling of the mode: `false`, `true` or `"shift"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMultiple {
    Flag(bool),
    Named(String),
}

impl TryFrom<RawMultiple> for MultipleMode {
    type Error = String;

    fn try_from(raw: RawMultiple) -> Result<Self, Self::Error> {
        match raw {
            RawMultiple::Flag(false) => Ok(Self::None),
            RawMultiple::Flag(true) => Ok(Self::Toggle),
            RawMultiple::Named(name) => match name.as_str() {
                "shift" => Ok(Self::Range),
                "none" | "" => Ok(Self::None),
                other => Err(format!("unknown multiple mode: {other}")),
            },
        }
    }
}

/// Current selection: nothing, one identity, or a list of identities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    #[default]
    None,
    Single(Key),
    Multiple(Vec<Key>),
}

impl SelectionValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Single(_) => false,
            Self::Multiple(keys) => keys.is_empty(),
        }
    }

    /// All selected identities, in stored order.
    pub fn keys(&self) -> &[Key] {
        match self {
            Self::None => &[],
            Self::Single(key) => std::slice::from_ref(key),
            Self::Multiple(keys) => keys,
        }
    }

    /// Membership set for O(1) "is this row selected" checks while rendering.
    pub fn keyed(&self) -> HashSet<Key> {
        self.keys().iter().cloned().collect()
    }
}

/// One selected entry as a host supplies it: a bare identity, or the whole
/// option record carrying its identity in the value field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SelectionEntry {
    Key(Key),
    Record(Row),
}

impl SelectionEntry {
    fn resolve(self, value_key: &str) -> Option<Key> {
        match self {
            Self::Key(key) => Some(key),
            Self::Record(row) => Key::of(&row, value_key),
        }
    }
}

/// A selection as a host supplies it, before records are reduced to their
/// identities.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum SelectionInput {
    #[default]
    None,
    Single(SelectionEntry),
    Multiple(Vec<SelectionEntry>),
}

impl SelectionInput {
    /// Key records by `value_key`. Records without an identity are dropped.
    pub fn resolve(self, value_key: &str) -> SelectionValue {
        match self {
            Self::None => SelectionValue::None,
            Self::Single(entry) => entry
                .resolve(value_key)
                .map_or(SelectionValue::None, SelectionValue::Single),
            Self::Multiple(entries) => SelectionValue::Multiple(
                entries
                    .into_iter()
                    .filter_map(|entry| entry.resolve(value_key))
                    .collect(),
            ),
        }
    }
}

impl From<SelectionValue> for SelectionInput {
    fn from(value: SelectionValue) -> Self {
        match value {
            SelectionValue::None => Self::None,
            SelectionValue::Single(key) => Self::Single(SelectionEntry::Key(key)),
            SelectionValue::Multiple(keys) => {
                Self::Multiple(keys.into_iter().map(SelectionEntry::Key).collect())
            }
        }
    }
}

/// Modifier keys held during a pointer click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl on most platforms, cmd (meta) on macOS.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}
