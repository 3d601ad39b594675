use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{deliver, from_js, from_js_or_default, now_ms, to_js};
use crate::events::SelectEvent;
use crate::select::{SelectConfig, SelectController};
use crate::types::{Row, SelectionInput};

struct SharedState {
    select: SelectController,
    queue: Rc<RefCell<Vec<SelectEvent>>>,
    callback: Option<js_sys::Function>,
    search_timer: Option<i32>,
    search_closure: Option<Closure<dyn FnMut()>>,
}

/// Searchable select with a windowed menu for a JavaScript host.
///
/// Each instance owns its own search timer; a keystroke cancels the pending
/// one before starting the next, and freeing the instance cancels it too.
#[wasm_bindgen]
pub struct SearchSelect {
    state: Rc<RefCell<SharedState>>,
}

#[wasm_bindgen]
impl SearchSelect {
    /// # Errors
    /// Returns an error if `config` is not a valid configuration record.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SearchSelect, JsValue> {
        console_error_panic_hook::set_once();
        let config: SelectConfig = from_js_or_default(config)?;
        config.validate()?;

        let mut select = SelectController::new(config);
        let queue = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&queue);
        select.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Ok(SearchSelect {
            state: Rc::new(RefCell::new(SharedState {
                select,
                queue,
                callback: None,
                search_timer: None,
                search_closure: None,
            })),
        })
    }

    pub fn on_event(&mut self, callback: js_sys::Function) {
        self.state.borrow_mut().callback = Some(callback);
    }

    /// # Errors
    /// Returns an error if `options` is not an array of objects.
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: Vec<Row> = from_js(options)?;
        self.state.borrow_mut().select.set_options(Rc::new(options));
        Ok(())
    }

    /// # Errors
    /// Returns an error if `value` is not null, a key or option record, or a
    /// list of those.
    pub fn set_value(&mut self, value: JsValue) -> Result<(), JsValue> {
        let value: SelectionInput = from_js_or_default(value)?;
        self.state.borrow_mut().select.set_value(value);
        Ok(())
    }

    /// Keystroke in the search input.
    pub fn input_change(&mut self, text: &str) {
        self.state.borrow_mut().select.input_change(text, now_ms());
        Self::schedule_search_timeout(&self.state);
        Self::flush(&self.state);
    }

    pub fn open_menu(&mut self) {
        self.state.borrow_mut().select.open_menu();
    }

    pub fn close_menu(&mut self) {
        self.state.borrow_mut().select.close_menu();
    }

    pub fn is_menu_open(&self) -> bool {
        self.state.borrow().select.is_menu_open()
    }

    /// # Errors
    /// Returns an error if the menu cannot be serialized.
    pub fn menu(&mut self) -> Result<JsValue, JsValue> {
        let menu = self.state.borrow_mut().select.menu();
        to_js(&menu)
    }

    pub fn scroll_menu(&mut self, top: f64) -> f64 {
        self.state.borrow_mut().select.scroll_menu(top)
    }

    /// Click at menu-relative `y`.
    pub fn click(&mut self, y: f64) -> bool {
        let chosen = {
            let mut s = self.state.borrow_mut();
            match s.select.option_at(y) {
                Some(index) => s.select.select_option(index).is_some(),
                None => false,
            }
        };
        if chosen {
            self.cancel_search_timer();
        }
        Self::flush(&self.state);
        chosen
    }

    pub fn select_option(&mut self, index: usize) -> bool {
        let chosen = self.state.borrow_mut().select.select_option(index).is_some();
        if chosen {
            self.cancel_search_timer();
        }
        Self::flush(&self.state);
        chosen
    }

    /// # Errors
    /// Returns an error if the value cannot be serialized.
    pub fn value(&self) -> Result<JsValue, JsValue> {
        to_js(self.state.borrow().select.value())
    }

    fn schedule_search_timeout(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.search_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.search_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    Self::handle_search_timeout(&state);
                }
            }) as Box<dyn FnMut()>);
            s.search_closure = Some(closure);
        }
        let Some(callback) = s.search_closure.as_ref() else {
            return;
        };
        let delay = s.select.config().debounce_ms.round();
        #[allow(clippy::cast_possible_truncation)]
        let delay_ms = delay.clamp(0.0, f64::from(i32::MAX)) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(id) => s.search_timer = Some(id),
            Err(_) => s.search_timer = None,
        }
    }

    fn handle_search_timeout(state: &Rc<RefCell<SharedState>>) {
        {
            let mut s = state.borrow_mut();
            s.search_timer = None;
            s.select.flush_search();
        }
        Self::flush(state);
    }

    fn cancel_search_timer(&self) {
        let timer = self.state.borrow_mut().search_timer.take();
        if let (Some(timer_id), Some(window)) = (timer, web_sys::window()) {
            window.clear_timeout_with_handle(timer_id);
        }
    }

    fn flush(state: &Rc<RefCell<SharedState>>) {
        let (events, callback) = {
            let s = state.borrow();
            let events: Vec<SelectEvent> = s.queue.borrow_mut().drain(..).collect();
            (events, s.callback.clone())
        };
        deliver(callback.as_ref(), events);
    }
}

impl Drop for SearchSelect {
    fn drop(&mut self) {
        self.cancel_search_timer();
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.select.dispose();
            s.callback = None;
        }
    }
}
