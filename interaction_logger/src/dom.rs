//! In-memory host document for the interaction form.
//!
//! Elements are stored by identifier and handed out as cheap clonable handles
//! sharing state with the document, so whoever owns the document sees what
//! the handler writes and vice versa. The handler is given its handles once,
//! when it is attached, and never looks anything up afterwards.

use crate::error::DomError;
use crate::outcome::StatusMessage;
use crate::payload::FormSnapshot;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

pub const FORM_ID: &str = "logInteractionForm";
pub const STATUS_ID: &str = "logMessage";
pub const STUDENT_ID_INPUT: &str = "studentId";
pub const CONTENT_SELECT: &str = "contentSelect";
pub const SCORE_INPUT: &str = "score";
pub const TIME_SPENT_INPUT: &str = "timeSpent";
pub const COMPLETED_CHECKBOX: &str = "completed";

/// Text input or select; only its current value matters here.
#[derive(Debug, Clone, Default)]
pub struct InputElement {
    value: Arc<RwLock<String>>,
}

impl InputElement {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(value.into())),
        }
    }

    pub fn value(&self) -> String {
        self.value
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self
            .value
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = value.into();
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckboxElement {
    checked: Arc<AtomicBool>,
}

impl CheckboxElement {
    pub fn new(checked: bool) -> Self {
        Self {
            checked: Arc::new(AtomicBool::new(checked)),
        }
    }

    pub fn checked(&self) -> bool {
        self.checked.load(Ordering::SeqCst)
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.store(checked, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
struct StatusState {
    text: String,
    color: Option<String>,
}

/// Element showing the result of the last submission.
#[derive(Debug, Clone, Default)]
pub struct StatusElement {
    state: Arc<RwLock<StatusState>>,
}

impl StatusElement {
    pub fn text(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .text
            .clone()
    }

    /// Inline colour, `None` until something has been rendered.
    pub fn color(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .color
            .clone()
    }

    /// Writes text and colour together.
    pub fn render(&self, message: &StatusMessage) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.text = message.text.clone();
        state.color = Some(message.tone.color().to_string());
    }
}

#[derive(Debug, Clone)]
pub enum Element {
    Form,
    Input(InputElement),
    Checkbox(CheckboxElement),
    Status(StatusElement),
}

#[derive(Debug, Clone, Default)]
pub struct HostDocument {
    elements: HashMap<String, Element>,
}

impl HostDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard page: the log form with its inputs and an empty status line.
    pub fn interaction_page(form: &FormSnapshot) -> Self {
        Self::new()
            .with_form(FORM_ID)
            .with_input(STUDENT_ID_INPUT, form.student_id.as_str())
            .with_input(CONTENT_SELECT, form.content_id.as_str())
            .with_input(SCORE_INPUT, form.score.as_str())
            .with_input(TIME_SPENT_INPUT, form.time_spent.as_str())
            .with_checkbox(COMPLETED_CHECKBOX, form.completed)
            .with_status(STATUS_ID)
    }

    pub fn with_form(mut self, id: &str) -> Self {
        self.elements.insert(id.to_string(), Element::Form);
        self
    }

    pub fn with_input(mut self, id: &str, value: &str) -> Self {
        self.elements
            .insert(id.to_string(), Element::Input(InputElement::new(value)));
        self
    }

    pub fn with_checkbox(mut self, id: &str, checked: bool) -> Self {
        self.elements
            .insert(id.to_string(), Element::Checkbox(CheckboxElement::new(checked)));
        self
    }

    pub fn with_status(mut self, id: &str) -> Self {
        self.elements
            .insert(id.to_string(), Element::Status(StatusElement::default()));
        self
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn has_form(&self, id: &str) -> bool {
        matches!(self.elements.get(id), Some(Element::Form))
    }

    fn get(&self, id: &str) -> Result<&Element, DomError> {
        self.elements
            .get(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    pub fn input(&self, id: &str) -> Result<InputElement, DomError> {
        match self.get(id)? {
            Element::Input(input) => Ok(input.clone()),
            _ => Err(DomError::WrongElementKind {
                id: id.to_string(),
                expected: "an input",
            }),
        }
    }

    pub fn checkbox(&self, id: &str) -> Result<CheckboxElement, DomError> {
        match self.get(id)? {
            Element::Checkbox(checkbox) => Ok(checkbox.clone()),
            _ => Err(DomError::WrongElementKind {
                id: id.to_string(),
                expected: "a checkbox",
            }),
        }
    }

    pub fn status(&self, id: &str) -> Result<StatusElement, DomError> {
        match self.get(id)? {
            Element::Status(status) => Ok(status.clone()),
            _ => Err(DomError::WrongElementKind {
                id: id.to_string(),
                expected: "a status element",
            }),
        }
    }
}

/// Handles to the five form fields read on each submission.
#[derive(Debug, Clone)]
pub struct FormBindings {
    pub student_id: InputElement,
    pub content: InputElement,
    pub score: InputElement,
    pub time_spent: InputElement,
    pub completed: CheckboxElement,
}

impl FormBindings {
    pub fn bind(document: &HostDocument) -> Result<Self, DomError> {
        Ok(Self {
            student_id: document.input(STUDENT_ID_INPUT)?,
            content: document.input(CONTENT_SELECT)?,
            score: document.input(SCORE_INPUT)?,
            time_spent: document.input(TIME_SPENT_INPUT)?,
            completed: document.checkbox(COMPLETED_CHECKBOX)?,
        })
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            student_id: self.student_id.value(),
            content_id: self.content.value(),
            score: self.score.value(),
            time_spent: self.time_spent.value(),
            completed: self.completed.checked(),
        }
    }
}

/// A form submit event. Left alone, the host would perform a native
/// navigation; handlers call [`SubmitEvent::prevent_default`] to stop it.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Full refresh of the host page.
pub trait Reload: Send + Sync {
    fn reload(&self);
}

/// Browser window stand-in that only records how often it was reloaded.
#[derive(Debug, Clone, Default)]
pub struct Window {
    reloads: Arc<AtomicUsize>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl Reload for Window {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}
