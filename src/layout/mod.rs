//! Layout engine for the virtualized multi-grid.
//!
//! This module handles:
//! - Pre-computing row/column edges from the size functions
//! - Managing the viewport (container size, shared scroll offsets)
//! - Binary search for visible ranges and hit testing
//! - Splitting the grid into four fixed/scrolling panes

mod axis;
mod grid_layout;
mod multigrid;
mod region;
mod viewport;

pub use axis::Axis;
pub use grid_layout::{CellRect, GridLayout, GridMetrics, Rect};
pub use multigrid::{MultiGrid, ScrollInfo, DEFAULT_OVERSCAN};
pub use region::{Region, RegionKind};
pub use viewport::Viewport;
