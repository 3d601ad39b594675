//! Cell view model produced for each visible cell.

use serde::Serialize;
use serde_json::Value;

use super::MappedColumn;
use crate::layout::CellRect;
use crate::types::{display_text, Key, Row, SortDirection, SortState};

/// What a cell shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CellContent {
    /// Plain text with a tooltip.
    Text { text: String, title: String },
    /// A composite value from a column's render function, used verbatim.
    Custom { body: Value },
}

impl CellContent {
    pub fn text(text: String) -> Self {
        Self::Text {
            title: text.clone(),
            text,
        }
    }

    /// Text shown for the cell, if it is plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Custom { .. } => None,
        }
    }
}

/// Wrap a render function's result: composites pass through, scalars
/// become text with a tooltip of their string form.
pub fn wrap_rendered(value: Value) -> CellContent {
    match value {
        Value::Object(_) | Value::Array(_) => CellContent::Custom { body: value },
        scalar => CellContent::text(display_text(Some(&scalar))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    Header,
    Body,
}

/// Highlight state of a body row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowState {
    pub hovered: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub kind: CellKind,
    /// Stable render key, `"{row}-{column}"` in grid coordinates.
    pub key: String,
    /// Position within the owning pane.
    pub rect: CellRect,
    pub data_key: String,
    pub content: CellContent,
    pub class_names: Vec<String>,
    /// Data index of a body row (grid row - 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_key: Option<Key>,
    /// Active sort direction on a header cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
}

impl CellView {
    pub fn header(rect: CellRect, column: &MappedColumn, sort: &SortState) -> Self {
        let direction = sort.direction_for(column.data_key());
        let mut class_names = vec!["cell".to_string()];
        if column.def.sort {
            class_names.push("sortBy".to_string());
        }
        match direction {
            Some(SortDirection::Asc) => class_names.push("ascSort".to_string()),
            Some(SortDirection::Desc) => class_names.push("descSort".to_string()),
            None => {}
        }
        Self {
            kind: CellKind::Header,
            key: render_key(&rect),
            rect,
            data_key: column.data_key().to_string(),
            content: CellContent::text(column.def.label.clone()),
            class_names,
            row_index: None,
            row_key: None,
            sort: direction,
        }
    }

    pub fn body(
        rect: CellRect,
        column: &MappedColumn,
        row: &Row,
        row_index: usize,
        row_key: Option<Key>,
        state: RowState,
        extra_class: Option<String>,
    ) -> Self {
        let value = row.get(column.data_key());
        let content = match &column.def.render {
            Some(render) => wrap_rendered(render(value, row, row_index)),
            None => CellContent::text(display_text(value)),
        };

        let mut class_names = vec!["cell".to_string()];
        if state.hovered {
            class_names.push("cellHover".to_string());
        }
        if state.selected {
            class_names.push("cellSelected".to_string());
        }
        class_names.push(column.def.align.class_name().to_string());
        class_names.extend(extra_class.filter(|c| !c.is_empty()));

        Self {
            kind: CellKind::Body,
            key: render_key(&rect),
            rect,
            data_key: column.data_key().to_string(),
            content,
            class_names,
            row_index: Some(row_index),
            row_key,
            sort: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_names.iter().any(|c| c == class)
    }
}

fn render_key(rect: &CellRect) -> String {
    format!("{}-{}", rect.row_index, rect.column_index)
}
