use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

use super::Row;
use crate::error::Result;

/// Column width used when a definition has no usable width.
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// Horizontal alignment of body cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    /// Class name applied to aligned body cells.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// Custom cell body: `(value, row, row_index) -> rendered`.
///
/// Objects and arrays are used verbatim as the cell body; any other value is
/// shown as plain text with a tooltip of its string form.
pub type CellRenderFn = Rc<dyn Fn(Option<&Value>, &Row, usize) -> Value>;

/// A column definition as supplied by the host.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Configured (minimum) width in pixels. `None` falls back to
    /// [`DEFAULT_COLUMN_WIDTH`].
    #[serde(default, deserialize_with = "lenient_width")]
    pub width: Option<f64>,
    #[serde(default)]
    pub label: String,
    pub data_key: String,
    /// Whether clicking the header sorts by this column.
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub align: Align,
    #[serde(skip)]
    pub render: Option<CellRenderFn>,
}

impl ColumnDef {
    pub fn new(data_key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            width: None,
            label: label.into(),
            data_key: data_key.into(),
            sort: false,
            align: Align::Left,
            render: None,
        }
    }

    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn sortable(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &Row, usize) -> Value + 'static,
    {
        self.render = Some(Rc::new(render));
        self
    }

    /// The configured width, or the default when unset or unusable.
    pub fn resolved_width(&self) -> f64 {
        self.width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("width", &self.width)
            .field("label", &self.label)
            .field("data_key", &self.data_key)
            .field("sort", &self.sort)
            .field("align", &self.align)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Accept numbers and numeric strings; anything else means "unset".
fn lenient_width<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Parse a JSON array of column definitions.
///
/// # Errors
/// Returns an error if `json` is not an array of column objects.
pub fn columns_from_json(json: &str) -> Result<Vec<ColumnDef>> {
    Ok(serde_json::from_str(json)?)
}
