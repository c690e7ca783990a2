// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! The view of a form that the guard works against.
//!
//! A form is a collaborator owned by the page. The guard only ever asks it
//! for the first control of each category, the plain-text controls and the
//! full list of controls, and only ever touches a control's value, its
//! custom validity message and its attributes. Controls are handles:
//! cloning one yields another handle to the same control, which is how DOM
//! elements behave.
//!
//! [`MemoryForm`] implements the same contract without a browser.

use crate::validator::FieldKind;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A single input or textarea.
pub trait FormControl: Clone {
    /// Current value.
    fn value(&self) -> String;

    /// Replace the current value.
    fn set_value(&self, value: &str);

    /// Set the custom validity message. An empty message marks the control valid.
    fn set_custom_validity(&self, message: &str);

    /// Set an attribute on the control.
    fn set_attribute(&self, name: &str, value: &str);
}

/// A form as seen by the guard.
pub trait FormSurface {
    type Control: FormControl;

    /// First control in document order matching the category.
    fn first(&self, kind: FieldKind) -> Option<Self::Control>;

    /// Text inputs and textareas, in document order.
    fn text_controls(&self) -> Vec<Self::Control>;

    /// Every input and textarea, in document order.
    fn controls(&self) -> Vec<Self::Control>;
}

/// Element kind of an in-memory control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlKind {
    /// `<input type="...">`
    Input,
    /// `<textarea>`
    TextArea,
}

#[derive(Debug, Default)]
struct ControlState {
    value: String,
    validity_message: String,
    attributes: BTreeMap<String, String>,
}

/// In-memory form control.
#[derive(Debug, Clone)]
pub struct MemoryControl {
    kind: ControlKind,
    state: Rc<RefCell<ControlState>>,
}

impl MemoryControl {
    /// An input with the given `type` attribute.
    pub fn input(input_type: &str) -> Self {
        let control = Self {
            kind: ControlKind::Input,
            state: Rc::default(),
        };
        control.set_attribute("type", input_type);
        control
    }

    /// An input without a `type` attribute.
    pub fn untyped_input() -> Self {
        Self {
            kind: ControlKind::Input,
            state: Rc::default(),
        }
    }

    /// A textarea.
    pub fn textarea() -> Self {
        Self {
            kind: ControlKind::TextArea,
            state: Rc::default(),
        }
    }

    /// Builder-style `name` attribute.
    pub fn named(self, name: &str) -> Self {
        self.set_attribute("name", name);
        self
    }

    /// Builder-style initial value.
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    /// Current custom validity message, empty when valid.
    pub fn validation_message(&self) -> String {
        self.state.borrow().validity_message.clone()
    }

    /// Input type, defaulting to `text` like the DOM does.
    fn input_type(&self) -> String {
        self.attribute("type")
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string())
    }

    fn matches(&self, kind: FieldKind) -> bool {
        match (self.kind, kind) {
            (ControlKind::Input, FieldKind::Email) => self.input_type() == "email",
            (ControlKind::Input, FieldKind::Phone) => self.input_type() == "tel",
            (ControlKind::Input, FieldKind::Name) => self
                .attribute("name")
                .map(|n| n.contains("name"))
                .unwrap_or(false),
            (ControlKind::TextArea, FieldKind::Message) => true,
            _ => false,
        }
    }

    /// Matches `input[type="text"]`, which needs the attribute to be present.
    fn is_text_like(&self) -> bool {
        match self.kind {
            ControlKind::TextArea => true,
            ControlKind::Input => self
                .attribute("type")
                .map(|t| t.eq_ignore_ascii_case("text"))
                .unwrap_or(false),
        }
    }
}

impl FormControl for MemoryControl {
    fn value(&self) -> String {
        self.state.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.state.borrow_mut().value = value.to_string();
    }

    fn set_custom_validity(&self, message: &str) {
        self.state.borrow_mut().validity_message = message.to_string();
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }
}

/// In-memory form holding controls in document order.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    controls: Vec<MemoryControl>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a control and return the form.
    pub fn with(mut self, control: MemoryControl) -> Self {
        self.controls.push(control);
        self
    }
}

impl FormSurface for MemoryForm {
    type Control = MemoryControl;

    fn first(&self, kind: FieldKind) -> Option<MemoryControl> {
        self.controls.iter().find(|c| c.matches(kind)).cloned()
    }

    fn text_controls(&self) -> Vec<MemoryControl> {
        self.controls
            .iter()
            .filter(|c| c.is_text_like())
            .cloned()
            .collect()
    }

    fn controls(&self) -> Vec<MemoryControl> {
        self.controls.clone()
    }
}
