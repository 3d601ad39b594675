//! Virtualized search-select controller.
//!
//! Keystrokes update the visible input at once and the search key after the
//! debounce delay. The filtered list, its measured option heights and the
//! keyed selection are cached per input identity, and only the options that
//! intersect the menu viewport are produced.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::debounce::{Debouncer, DEFAULT_SEARCH_DELAY_MS};
use super::filter::filter_options;
use crate::error::{Result, VirtgridError};
use crate::events::{ListenerId, Listeners, SelectEvent};
use crate::layout::{Axis, DEFAULT_OVERSCAN};
use crate::memo::{Identity, Memo};
use crate::table::{wrap_rendered, CellContent};
use crate::types::{display_text, Key, Row, SelectionInput, SelectionValue};

pub const DEFAULT_OPTION_HEIGHT: f64 = 35.0;
pub const DEFAULT_MAX_HEIGHT: f64 = 300.0;
pub const DEFAULT_NO_OPTIONS_MESSAGE: &str = "No Data Found";

const OPTION_CLASS: &str = "VirtualizedSelect__Option";
const SELECTED_CLASS: &str = "VirtualizedSelect__SelectedOption";
const DISABLED_CLASS: &str = "VirtualizedSelect__DisabledOption";

/// Host configuration record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectConfig {
    /// Field holding each option's identity.
    pub value_key: String,
    /// Field shown as the option label and matched by the search.
    pub label_key: String,
    pub is_multi: bool,
    pub option_height: f64,
    pub max_height: f64,
    pub debounce_ms: f64,
    pub no_options_message: String,
    pub overscan_row_count: usize,
    /// Initial value: keys, or option records keyed by `value_key`.
    pub value: SelectionInput,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            value_key: "value".to_string(),
            label_key: "label".to_string(),
            is_multi: false,
            option_height: DEFAULT_OPTION_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
            debounce_ms: DEFAULT_SEARCH_DELAY_MS,
            no_options_message: DEFAULT_NO_OPTIONS_MESSAGE.to_string(),
            overscan_row_count: DEFAULT_OVERSCAN,
            value: SelectionInput::None,
        }
    }
}

impl SelectConfig {
    /// # Errors
    /// Returns an error for malformed JSON or unusable sizes.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`VirtgridError::Config`] if a size or delay is negative or not
    /// finite.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("optionHeight", self.option_height, self.option_height > 0.0),
            ("maxHeight", self.max_height, self.max_height >= 0.0),
            ("debounceMs", self.debounce_ms, self.debounce_ms >= 0.0),
        ];
        for (name, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(VirtgridError::Config(format!("{name} out of range: {value}")));
            }
        }
        Ok(())
    }
}

/// Height of menu options: one value, or a function of
/// `(option, filtered_index)`.
#[derive(Clone)]
pub enum OptionHeight {
    Fixed(f64),
    PerOption(Rc<dyn Fn(&Row, usize) -> f64>),
}

impl OptionHeight {
    pub fn per_option<F>(height: F) -> Self
    where
        F: Fn(&Row, usize) -> f64 + 'static,
    {
        Self::PerOption(Rc::new(height))
    }

    pub fn height(&self, option: &Row, index: usize) -> f64 {
        match self {
            Self::Fixed(h) => *h,
            Self::PerOption(f) => f(option, index),
        }
    }
}

impl fmt::Debug for OptionHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(h) => write!(f, "Fixed({h})"),
            Self::PerOption(_) => f.write_str("PerOption(..)"),
        }
    }
}

/// Custom option body: `(option, filtered_index, selected) -> rendered`.
///
/// Wrapped like a column's render function: composites are used verbatim,
/// scalars become text.
pub type OptionRenderFn = Rc<dyn Fn(&Row, usize, bool) -> Value>;

/// One visible option row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    /// Index within the filtered list.
    pub index: usize,
    pub key: Option<Key>,
    pub label: String,
    pub title: String,
    pub content: CellContent,
    pub top: f64,
    pub height: f64,
    pub selected: bool,
    pub disabled: bool,
    pub class_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    /// Menu viewport height: `min(max_height, total_height)`.
    pub height: f64,
    pub total_height: f64,
    pub scroll_top: f64,
    pub row_count: usize,
    pub rows: Vec<OptionView>,
}

/// The menu body: the windowed list, or the placeholder when nothing matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MenuView {
    NoOptions { message: String },
    List(ListView),
}

impl MenuView {
    /// Windowed rows; empty for the placeholder.
    pub fn rows(&self) -> &[OptionView] {
        match self {
            Self::NoOptions { .. } => &[],
            Self::List(list) => &list.rows,
        }
    }
}

/// Inputs the measured option heights depend on.
#[derive(Debug, Clone, PartialEq)]
struct MeasureInputs {
    options: Identity<Vec<Row>>,
    search_key: String,
    height_version: u64,
}

pub struct SelectController {
    config: SelectConfig,
    options: Rc<Vec<Row>>,
    value: Rc<SelectionValue>,
    option_height: OptionHeight,
    height_version: u64,
    option_renderer: Option<OptionRenderFn>,

    input_value: String,
    search_key: String,
    debouncer: Debouncer<String>,

    filtered: Memo<(Identity<Vec<Row>>, String), Vec<usize>>,
    filter_runs: u64,
    measured: Memo<MeasureInputs, Rc<Axis>>,
    keyed: Memo<Identity<SelectionValue>, HashSet<Key>>,

    menu_open: bool,
    scroll_top: f64,
    /// Scroll the focused option into view on the next menu render.
    focus_pending: bool,
    listeners: Listeners<SelectEvent>,
}

impl fmt::Debug for SelectController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectController")
            .field("options", &self.options.len())
            .field("value", &self.value)
            .field("input_value", &self.input_value)
            .field("search_key", &self.search_key)
            .field("menu_open", &self.menu_open)
            .finish_non_exhaustive()
    }
}

impl SelectController {
    pub fn new(config: SelectConfig) -> Self {
        Self {
            options: Rc::new(Vec::new()),
            value: Rc::new(config.value.clone().resolve(&config.value_key)),
            option_height: OptionHeight::Fixed(config.option_height),
            height_version: 0,
            option_renderer: None,
            input_value: String::new(),
            search_key: String::new(),
            debouncer: Debouncer::new(config.debounce_ms),
            filtered: Memo::new(),
            filter_runs: 0,
            measured: Memo::new(),
            keyed: Memo::new(),
            menu_open: false,
            scroll_top: 0.0,
            focus_pending: true,
            listeners: Listeners::new(),
            config,
        }
    }

    pub fn with_options(config: SelectConfig, options: Vec<Row>) -> Self {
        let mut select = Self::new(config);
        select.set_options(Rc::new(options));
        select
    }

    // ── Inputs ──────────────────────────────────────────────────────────

    pub fn set_options(&mut self, options: Rc<Vec<Row>>) {
        self.options = options;
    }

    /// Replace the value. Option records are reduced to their identities.
    pub fn set_value(&mut self, value: impl Into<SelectionInput>) {
        let value = value.into().resolve(&self.config.value_key);
        if *self.value != value {
            self.value = Rc::new(value);
        }
    }

    pub fn set_option_height(&mut self, height: OptionHeight) {
        self.option_height = height;
        self.height_version += 1;
    }

    /// Replace the default label body of each option.
    pub fn set_option_renderer<F>(&mut self, render: F)
    where
        F: Fn(&Row, usize, bool) -> Value + 'static,
    {
        self.option_renderer = Some(Rc::new(render));
    }

    pub fn set_multi(&mut self, is_multi: bool) {
        self.config.is_multi = is_multi;
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SelectEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ── State ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn options(&self) -> &Rc<Vec<Row>> {
        &self.options
    }

    pub fn value(&self) -> &SelectionValue {
        &self.value
    }

    /// Text shown in the input, updated on every keystroke.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// Text the options are filtered by, updated after the debounce delay.
    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// How many times the filtered list has been derived.
    pub fn filter_count(&self) -> u64 {
        self.filter_runs
    }

    /// When the pending search becomes due, if one is pending.
    pub fn search_deadline(&self) -> Option<f64> {
        self.debouncer.deadline()
    }

    // ── Search ──────────────────────────────────────────────────────────

    /// A keystroke in the input at `now_ms`. The previous pending search, if
    /// any, is dropped.
    pub fn input_change(&mut self, text: &str, now_ms: f64) {
        self.input_value = text.to_string();
        self.debouncer.schedule(text.to_string(), now_ms);
        trace!("input {text:?} at {now_ms:.0}ms");
        self.listeners
            .emit(&SelectEvent::InputChange(text.to_string()));
    }

    /// Apply the pending search if its delay has elapsed. Returns whether the
    /// search key was applied.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.debouncer.poll(now_ms) {
            Some(key) => {
                self.apply_search(key);
                true
            }
            None => false,
        }
    }

    /// Apply the pending search now.
    pub fn flush_search(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(key) => {
                self.apply_search(key);
                true
            }
            None => false,
        }
    }

    fn apply_search(&mut self, key: String) {
        if key != self.search_key {
            self.search_key.clone_from(&key);
            self.scroll_top = 0.0;
            self.focus_pending = true;
        }
        debug!("search key applied: {key:?}");
        self.listeners.emit(&SelectEvent::SearchChange(key));
    }

    /// Indices into the options of those matching the search key.
    pub fn filtered(&mut self) -> &[usize] {
        let options = Rc::clone(&self.options);
        let label_key = &self.config.label_key;
        let runs = &mut self.filter_runs;
        let (view, _) = self.filtered.get_or_derive(
            (Identity::of(&options), self.search_key.clone()),
            |(_, search)| {
                *runs += 1;
                let view = filter_options(&options, label_key, search);
                debug!("options filtered by {search:?}: {}/{}", view.len(), options.len());
                view
            },
        );
        view
    }

    /// Filtered option at `index`.
    pub fn filtered_option(&mut self, index: usize) -> Option<&Row> {
        let source = *self.filtered().get(index)?;
        self.options.get(source)
    }

    /// Initial scroll target: in single mode with a value set, the value's
    /// position in the filtered list; 0 otherwise.
    pub fn focus_index(&mut self) -> usize {
        if self.config.is_multi {
            return 0;
        }
        let SelectionValue::Single(target) = self.value.as_ref().clone() else {
            return 0;
        };
        let options = Rc::clone(&self.options);
        let value_key = self.config.value_key.clone();
        self.filtered()
            .iter()
            .position(|&i| {
                options
                    .get(i)
                    .and_then(|o| Key::of(o, &value_key))
                    .is_some_and(|k| k == target)
            })
            .unwrap_or(0)
    }

    /// Whether `option` is part of the current value.
    pub fn is_selected(&mut self, option: &Row) -> bool {
        let Some(key) = Key::of(option, &self.config.value_key) else {
            return false;
        };
        let value = Rc::clone(&self.value);
        let (keyed, _) = self
            .keyed
            .get_or_derive(Identity::of(&value), |_| value.keyed());
        keyed.contains(&key)
    }

    // ── Menu ────────────────────────────────────────────────────────────

    pub fn open_menu(&mut self) {
        if !self.menu_open {
            self.menu_open = true;
            self.focus_pending = true;
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    fn measure(&mut self) -> Rc<Axis> {
        let options = Rc::clone(&self.options);
        let inputs = MeasureInputs {
            options: Identity::of(&options),
            search_key: self.search_key.clone(),
            height_version: self.height_version,
        };
        // Filter first so the memo below sees the current list.
        self.filtered();
        let filtered = self.filtered.get().map_or(&[][..], Vec::as_slice);
        let height = &self.option_height;
        let (axis, _) = self.measured.get_or_derive(inputs, |_| {
            Rc::new(Axis::measure(filtered.len(), |i| {
                filtered
                    .get(i)
                    .and_then(|&source| options.get(source))
                    .map_or(0.0, |option| height.height(option, i))
            }))
        });
        Rc::clone(axis)
    }

    fn menu_height(&self, total: f64) -> f64 {
        self.config.max_height.min(total)
    }

    /// Menu scroll (wheel or scrollbar). Returns the clamped offset.
    pub fn scroll_menu(&mut self, top: f64) -> f64 {
        let total = self.measure().total();
        let max = (total - self.menu_height(total)).max(0.0);
        self.scroll_top = if top.is_finite() { top.clamp(0.0, max) } else { 0.0 };
        self.scroll_top
    }

    /// The menu body windowed against the current scroll offset.
    pub fn menu(&mut self) -> MenuView {
        let axis = self.measure();
        let count = axis.count();
        if count == 0 {
            return MenuView::NoOptions {
                message: self.config.no_options_message.clone(),
            };
        }

        let total = axis.total();
        let height = self.menu_height(total);
        if self.focus_pending {
            self.focus_pending = false;
            let focus = self.focus_index();
            self.scroll_top = axis.scroll_offset_for(focus, &(0..count), height, self.scroll_top);
        }
        self.scroll_top = self.scroll_top.clamp(0.0, (total - height).max(0.0));

        let visible = axis.visible_range(0..count, self.scroll_top, height, self.config.overscan_row_count);
        let options = Rc::clone(&self.options);
        let rows = visible
            .filter_map(|index| {
                let source = *self.filtered.get()?.get(index)?;
                let option = options.get(source)?;
                Some(self.option_view(option, index, &axis))
            })
            .collect();

        MenuView::List(ListView {
            height,
            total_height: total,
            scroll_top: self.scroll_top,
            row_count: count,
            rows,
        })
    }

    fn option_view(&mut self, option: &Row, index: usize, axis: &Axis) -> OptionView {
        let label = display_text(option.get(&self.config.label_key));
        let selected = !self.value.is_empty() && self.is_selected(option);
        let disabled = is_disabled(option);

        let mut class_names = vec![OPTION_CLASS.to_string()];
        if selected {
            class_names.push(SELECTED_CLASS.to_string());
        }
        if disabled {
            class_names.push(DISABLED_CLASS.to_string());
        }
        if let Some(extra) = option.get("className").and_then(|c| c.as_str()) {
            if !extra.is_empty() {
                class_names.push(extra.to_string());
            }
        }

        let content = match &self.option_renderer {
            Some(render) => wrap_rendered(render(option, index, selected)),
            None => CellContent::text(label.clone()),
        };

        OptionView {
            index,
            key: Key::of(option, &self.config.value_key),
            title: label.clone(),
            label,
            content,
            top: axis.offset(index),
            height: axis.size(index),
            selected,
            disabled,
            class_names,
        }
    }

    /// Filtered index of the option at menu-relative `y`.
    pub fn option_at(&mut self, y: f64) -> Option<usize> {
        let scroll_top = self.scroll_top;
        let axis = self.measure();
        if y < 0.0 || y + scroll_top >= axis.total() {
            return None;
        }
        axis.index_at(y + scroll_top)
    }

    /// Choose the filtered option at `index`. Disabled options are ignored.
    /// In multi mode a selected option is removed again; in single mode the
    /// menu closes and the input is cleared.
    pub fn select_option(&mut self, index: usize) -> Option<SelectionValue> {
        let option = self.filtered_option(index)?.clone();
        if is_disabled(&option) {
            return None;
        }
        let key = Key::of(&option, &self.config.value_key)?;

        let next = if self.config.is_multi {
            let mut keys = self.value.keys().to_vec();
            match keys.iter().position(|k| *k == key) {
                Some(pos) => {
                    keys.remove(pos);
                }
                None => keys.push(key),
            }
            SelectionValue::Multiple(keys)
        } else {
            self.close_menu();
            self.debouncer.cancel();
            self.input_value.clear();
            self.search_key.clear();
            SelectionValue::Single(key)
        };

        debug!("option {index} chosen: {next:?}");
        self.value = Rc::new(next.clone());
        self.listeners.emit(&SelectEvent::Change(next.clone()));
        Some(next)
    }

    /// Cancel the pending search and drop all listeners. Nothing fires after
    /// this.
    pub fn dispose(&mut self) {
        if self.debouncer.cancel() {
            trace!("pending search cancelled on dispose");
        }
        self.listeners.clear();
        self.menu_open = false;
    }
}

fn is_disabled(option: &Row) -> bool {
    option
        .get("disabled")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}
