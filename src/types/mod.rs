//! Data model shared by the grid table and the search select.

mod column;
mod key;
mod selection;
mod sort;

pub use column::*;
pub use key::*;
pub use selection::*;
pub use sort::*;
