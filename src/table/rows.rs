//! Row ordering.
//!
//! Sorting never reorders the source rows; it produces a view of indices into
//! them.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use log::debug;
use serde_json::Value;

use crate::types::{Row, SortDirection};

/// Ascending comparison of two rows on a column key.
pub type Comparator = Rc<dyn Fn(&Row, &Row, &str) -> Ordering>;

/// How rows are ordered for a sort key.
#[derive(Clone, Default)]
pub enum Sorter {
    /// Compare the column's values with [`compare_values`].
    #[default]
    Default,
    /// Never sort; rows keep their source order.
    Disabled,
    /// Caller-supplied ascending comparator. Descending reverses it.
    Custom(Comparator),
}

impl Sorter {
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&Row, &Row, &str) -> Ordering + 'static,
    {
        Self::Custom(Rc::new(compare))
    }
}

impl PartialEq for Sorter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Default, Self::Default) | (Self::Disabled, Self::Disabled) => true,
            (Self::Custom(a), Self::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Disabled => f.write_str("Disabled"),
            Self::Custom(c) => write!(f, "Custom({:p})", Rc::as_ptr(c)),
        }
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_) | Value::Object(_)) => 4,
    }
}

/// Total order over cell values: missing/null, then booleans, numbers and
/// strings. Numbers compare numerically, strings by code point.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ (Value::Array(_) | Value::Object(_))), Some(y @ (Value::Array(_) | Value::Object(_)))) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Display order of `rows` as indices into it.
///
/// Identity order when `sort_by` or `direction` is unset or the sorter is
/// disabled. Otherwise a stable sort: rows that compare equal keep their
/// source order in both directions.
pub fn recompute_rows(
    rows: &[Row],
    sort_by: Option<&str>,
    direction: Option<SortDirection>,
    sorter: &Sorter,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let (Some(key), Some(direction)) = (sort_by.filter(|k| !k.is_empty()), direction) else {
        return order;
    };
    if *sorter == Sorter::Disabled {
        return order;
    }

    let ascending = |a: &Row, b: &Row| -> Ordering {
        match sorter {
            Sorter::Default => compare_values(a.get(key), b.get(key)),
            Sorter::Custom(compare) => compare(a, b, key),
            Sorter::Disabled => Ordering::Equal,
        }
    };

    order.sort_by(|&i, &j| match (rows.get(i), rows.get(j)) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => ascending(a, b),
            SortDirection::Desc => ascending(b, a),
        },
        _ => Ordering::Equal,
    });
    debug!("rows sorted by {key} {direction:?}: {} rows", rows.len());
    order
}
