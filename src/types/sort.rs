use serde::{Deserialize, Serialize};

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Which column the rows are ordered by, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<SortDirection>,
}

impl SortState {
    /// No sort: rows keep their source order.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(sort_by: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            sort_by: Some(sort_by.into()),
            sort_direction: Some(direction),
        }
    }

    /// Direction applied to `key`, if it is the active sort column.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match &self.sort_by {
            Some(current) if current == key => self.sort_direction,
            _ => None,
        }
    }

    /// Next state after a header click on `key`.
    ///
    /// The same column cycles none -> asc -> desc -> none; a different column
    /// starts at asc.
    #[must_use]
    pub fn toggled(&self, key: &str) -> Self {
        match self.direction_for(key) {
            None => Self::new(key, SortDirection::Asc),
            Some(SortDirection::Asc) => Self::new(key, SortDirection::Desc),
            Some(SortDirection::Desc) => Self::none(),
        }
    }
}
