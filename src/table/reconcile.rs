//! Resize reconciliation.
//!
//! The layout engine caches measured column widths. A few inputs change those
//! widths without the engine seeing them: the container width (percentages
//! scale with it), the fixed column count, and the column set. After each
//! such input is applied, [`ResizeReconciler::check`] compares it with the
//! previous value and reports whether the grid must be re-measured.

use std::rc::Rc;

use crate::memo::Identity;
use crate::types::ColumnDef;

/// Which inputs changed since the previous check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeTriggers {
    pub width: bool,
    pub fixed_column_count: bool,
    pub columns: bool,
}

impl ResizeTriggers {
    pub fn any(self) -> bool {
        self.width || self.fixed_column_count || self.columns
    }
}

#[derive(Debug, Default)]
pub struct ResizeReconciler {
    prev_width: Option<f64>,
    prev_fixed_column_count: Option<usize>,
    prev_columns: Option<Identity<Vec<ColumnDef>>>,
}

impl ResizeReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current inputs and report which of them changed. A second
    /// call with the same inputs reports nothing.
    pub fn check(
        &mut self,
        width: f64,
        fixed_column_count: usize,
        columns: &Rc<Vec<ColumnDef>>,
    ) -> ResizeTriggers {
        let columns = Identity::of(columns);
        let triggers = ResizeTriggers {
            width: self
                .prev_width
                .map_or(true, |prev| prev.to_bits() != width.to_bits()),
            fixed_column_count: self.prev_fixed_column_count != Some(fixed_column_count),
            columns: self.prev_columns.as_ref() != Some(&columns),
        };
        self.prev_width = Some(width);
        self.prev_fixed_column_count = Some(fixed_column_count);
        self.prev_columns = Some(columns);
        triggers
    }
}
