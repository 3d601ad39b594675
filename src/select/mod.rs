//! Searchable select over a large option list, rendered through a single
//! windowed menu.

mod controller;
mod debounce;
mod filter;

pub use controller::{
    ListView, MenuView, OptionHeight, OptionRenderFn, OptionView, SelectConfig, SelectController,
    DEFAULT_MAX_HEIGHT, DEFAULT_NO_OPTIONS_MESSAGE, DEFAULT_OPTION_HEIGHT,
};
pub use debounce::{Debouncer, DEFAULT_SEARCH_DELAY_MS};
pub use filter::filter_options;
