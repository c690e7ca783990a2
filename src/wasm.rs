// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Browser binding.
//!
//! Wires [`FormGuard`] to every form of the page:
//!
//! ```javascript
//! import init, { initFormGuard } from './form_guard.js';
//! await init();
//! initFormGuard({ rate_limit: { max_attempts: 5 } });
//! ```
//!
//! Initialisation waits for `DOMContentLoaded` if the document is still
//! loading. One guard (and so one attempt counter) is shared by all forms.

use crate::audit::audit_script_sources;
use crate::clock::Clock;
use crate::config::Config;
use crate::error::{GuardError, Result};
use crate::form::{FormControl, FormSurface};
use crate::guard::FormGuard;
use crate::sanitizer::escape_text;
use crate::storage::Storage;
use crate::validator::{self, FieldKind};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use tracing::{info, warn, Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlFormElement,
    HtmlInputElement, HtmlScriptElement, HtmlTextAreaElement, Window,
};

/// Install the panic hook and the console log subscriber.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::INFO)
        .with_writer(ConsoleMakeWriter)
        .try_init();
}

/// Attach the guard to every form on the page.
///
/// `config` is an optional object with the same shape as [`Config`].
#[wasm_bindgen(js_name = initFormGuard)]
pub fn init_form_guard(config: JsValue) -> std::result::Result<(), JsValue> {
    let config: Config = if config.is_undefined() || config.is_null() {
        Config::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::once(move || {
            if let Err(err) = install(&window, config) {
                warn!(error = %err, "Form guard initialisation failed");
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
        Ok(())
    } else {
        install(&window, config).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Escape a string for display. Non-string values are returned unchanged.
#[wasm_bindgen(js_name = sanitizeInput)]
pub fn sanitize_input(input: JsValue) -> JsValue {
    match input.as_string() {
        Some(text) => JsValue::from_str(&escape_text(&text)),
        None => input,
    }
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    validator::validate_email(email)
}

#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone(phone: &str) -> bool {
    validator::validate_phone(phone)
}

fn install(window: &Window, config: Config) -> Result<()> {
    let document = window
        .document()
        .ok_or_else(|| GuardError::Dom("No document available".to_string()))?;
    let storage = window
        .local_storage()
        .map_err(storage_error)?
        .ok_or_else(|| GuardError::Storage("localStorage unavailable".to_string()))?;

    let guard = Rc::new(RefCell::new(FormGuard::new(
        config,
        LocalStorage(storage),
        BrowserClock,
    )));

    let forms = document.query_selector_all("form").map_err(dom_error)?;
    let mut attached = 0;
    for i in 0..forms.length() {
        let form = match forms.get(i).and_then(|n| n.dyn_into::<HtmlFormElement>().ok()) {
            Some(form) => DomForm(form),
            None => continue,
        };
        attach(&form, &guard, window)?;
        attached += 1;
    }
    info!(forms = attached, "Form guard attached");

    audit_page_scripts(&document);
    Ok(())
}

fn attach<S, C>(form: &DomForm, guard: &Rc<RefCell<FormGuard<S, C>>>, window: &Window) -> Result<()>
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    guard.borrow().prepare_form(form);

    for control in form.text_controls() {
        let guard = Rc::clone(guard);
        let target = control.clone();
        listen(control.element(), "blur", move |_| {
            guard.borrow().on_blur(&target);
        })?;
    }

    let submit_guard = Rc::clone(guard);
    let surface = form.clone();
    let window = window.clone();
    listen(&form.0, "submit", move |event: Event| {
        let outcome = submit_guard.borrow_mut().on_submit(&surface);
        if !outcome.should_submit() {
            event.prevent_default();
        }
        if let Some(message) = outcome.alert() {
            if let Err(err) = window.alert_with_message(message) {
                warn!(error = ?err, "Could not show rate limit alert");
            }
        }
    })?;

    for control in form.controls() {
        let guard = Rc::clone(guard);
        let target = control.clone();
        listen(control.element(), "input", move |_| {
            guard.borrow().on_input(&target);
        })?;
    }

    Ok(())
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    closure.forget();
    Ok(())
}

fn audit_page_scripts(document: &Document) {
    let scripts = match document.query_selector_all("script") {
        Ok(scripts) => scripts,
        Err(err) => {
            warn!(error = ?err, "Could not list page scripts");
            return;
        }
    };
    let sources: Vec<String> = (0..scripts.length())
        .filter_map(|i| scripts.get(i))
        .filter_map(|n| n.dyn_into::<HtmlScriptElement>().ok())
        .map(|s| s.src())
        .collect();
    audit_script_sources(&sources);
}

fn dom_error(err: JsValue) -> GuardError {
    GuardError::Dom(format!("{:?}", err))
}

fn storage_error(err: JsValue) -> GuardError {
    GuardError::Storage(format!("{:?}", err))
}

/// Form element.
#[derive(Clone)]
struct DomForm(HtmlFormElement);

impl DomForm {
    fn select_all(&self, selector: &str) -> Vec<DomControl> {
        let list = match self.0.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!(selector, error = ?err, "Selector query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .filter_map(DomControl::from_element)
            .collect()
    }
}

fn selector(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => r#"input[type="email"]"#,
        FieldKind::Phone => r#"input[type="tel"]"#,
        FieldKind::Name => r#"input[name*="name"]"#,
        FieldKind::Message => "textarea",
    }
}

impl FormSurface for DomForm {
    type Control = DomControl;

    fn first(&self, kind: FieldKind) -> Option<DomControl> {
        self.0
            .query_selector(selector(kind))
            .ok()
            .flatten()
            .and_then(DomControl::from_element)
    }

    fn text_controls(&self) -> Vec<DomControl> {
        self.select_all(r#"input[type="text"], textarea"#)
    }

    fn controls(&self) -> Vec<DomControl> {
        self.select_all("input, textarea")
    }
}

/// Input or textarea element.
#[derive(Clone)]
enum DomControl {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl DomControl {
    fn from_element(element: Element) -> Option<Self> {
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(Self::Input(input)),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .ok()
                .map(Self::TextArea),
        }
    }

    fn element(&self) -> &Element {
        match self {
            Self::Input(e) => e.unchecked_ref(),
            Self::TextArea(e) => e.unchecked_ref(),
        }
    }
}

impl FormControl for DomControl {
    fn value(&self) -> String {
        match self {
            Self::Input(e) => e.value(),
            Self::TextArea(e) => e.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Input(e) => e.set_value(value),
            Self::TextArea(e) => e.set_value(value),
        }
    }

    fn set_custom_validity(&self, message: &str) {
        match self {
            Self::Input(e) => e.set_custom_validity(message),
            Self::TextArea(e) => e.set_custom_validity(message),
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.element().set_attribute(name, value) {
            warn!(attribute = name, error = ?err, "Could not set attribute");
        }
    }
}

/// `window.localStorage`.
struct LocalStorage(web_sys::Storage);

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.0.remove_item(key).map_err(storage_error)
    }
}

/// `Date.now()`.
struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// Routes log lines to the browser console method matching their level.
struct ConsoleMakeWriter;

struct ConsoleWriter {
    level: Level,
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { level: Level::INFO }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let line = JsValue::from_str(text.trim_end());
        if self.level == Level::ERROR {
            web_sys::console::error_1(&line);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&line);
        } else if self.level == Level::INFO {
            web_sys::console::log_1(&line);
        } else {
            web_sys::console::debug_1(&line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
