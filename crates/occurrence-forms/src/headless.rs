// File: occurrence-forms/src/headless.rs
// Purpose: In-memory element handles for running the form without a browser

use crate::config::FormConfig;
use crate::element::{
    Callback, DisplayHandle, FormHandle, InputHandle, Page, RadioHandle, SectionHandle,
};
use crate::error::{FormError, Result};
use occurrence_validation_core::{Field, Slot, Trigger};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Listener list shared by an element and its subscriptions
struct Listeners<F: ?Sized> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, &'static str, Rc<F>)>>,
}

impl<F: ?Sized> Listeners<F> {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        })
    }

    fn add(this: &Rc<Self>, event: &'static str, callback: Rc<F>) -> HeadlessSubscription<F> {
        let id = this.next_id.get();
        this.next_id.set(id + 1);
        this.entries.borrow_mut().push((id, event, callback));
        HeadlessSubscription {
            id,
            listeners: Rc::downgrade(this),
        }
    }

    /// Snapshot so callbacks may subscribe or unsubscribe while dispatching
    fn matching(&self, event: &str) -> Vec<Rc<F>> {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, name, _)| *name == event)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// Detaches its listener on drop
pub struct HeadlessSubscription<F: ?Sized> {
    id: u64,
    listeners: Weak<Listeners<F>>,
}

impl<F: ?Sized> Drop for HeadlessSubscription<F> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.entries.borrow_mut().retain(|(id, _, _)| *id != self.id);
        }
    }
}

pub type EventSubscription = HeadlessSubscription<dyn Fn()>;
pub type SubmitSubscription = HeadlessSubscription<dyn Fn() -> bool>;

// =============================================================================
// Inputs
// =============================================================================

struct InputState {
    id: String,
    value: RefCell<String>,
    required: Cell<bool>,
    listeners: Rc<Listeners<dyn Fn()>>,
}

#[derive(Clone)]
pub struct HeadlessInput(Rc<InputState>);

impl HeadlessInput {
    fn new(id: &str, required: bool) -> Self {
        Self(Rc::new(InputState {
            id: id.to_string(),
            value: RefCell::new(String::new()),
            required: Cell::new(required),
            listeners: Listeners::new(),
        }))
    }

    /// Change the value without dispatching anything
    pub fn set_value(&self, value: &str) {
        *self.0.value.borrow_mut() = value.to_string();
    }

    pub fn fire(&self, trigger: Trigger) {
        for callback in self.0.listeners.matching(trigger.event_name()) {
            callback();
        }
    }

    /// Set the value and dispatch `input`, like a keystroke
    pub fn type_text(&self, value: &str) {
        self.set_value(value);
        self.fire(Trigger::Input);
    }

    /// Set the value and dispatch `blur`, like leaving the control
    pub fn leave_with(&self, value: &str) {
        self.set_value(value);
        self.fire(Trigger::Blur);
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.len()
    }
}

impl InputHandle for HeadlessInput {
    type Subscription = EventSubscription;

    fn id(&self) -> String {
        self.0.id.clone()
    }

    fn value(&self) -> String {
        self.0.value.borrow().clone()
    }

    fn is_required(&self) -> bool {
        self.0.required.get()
    }

    fn set_required(&self, required: bool) {
        self.0.required.set(required);
    }

    fn subscribe(&self, trigger: Trigger, callback: Callback) -> Result<Self::Subscription> {
        Ok(Listeners::add(&self.0.listeners, trigger.event_name(), callback))
    }
}

// =============================================================================
// Displays, sections, radios, forms
// =============================================================================

#[derive(Default)]
struct DisplayState {
    text: RefCell<String>,
    color: RefCell<Option<String>>,
    writes: Cell<usize>,
}

#[derive(Clone, Default)]
pub struct HeadlessDisplay(Rc<DisplayState>);

impl HeadlessDisplay {
    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub fn color(&self) -> Option<String> {
        self.0.color.borrow().clone()
    }

    /// Number of show/clear calls so far
    pub fn writes(&self) -> usize {
        self.0.writes.get()
    }
}

impl DisplayHandle for HeadlessDisplay {
    fn show(&self, message: &str, color: &str) {
        *self.0.text.borrow_mut() = message.to_string();
        *self.0.color.borrow_mut() = Some(color.to_string());
        self.0.writes.set(self.0.writes.get() + 1);
    }

    fn clear(&self) {
        self.0.text.borrow_mut().clear();
        self.0.writes.set(self.0.writes.get() + 1);
    }
}

#[derive(Clone, Default)]
pub struct HeadlessSection(Rc<Cell<Option<bool>>>);

impl HeadlessSection {
    /// `None` until the controller decides
    pub fn visible(&self) -> Option<bool> {
        self.0.get()
    }
}

impl SectionHandle for HeadlessSection {
    fn set_visible(&self, visible: bool) {
        self.0.set(Some(visible));
    }
}

struct RadioState {
    checked: Cell<bool>,
    listeners: Rc<Listeners<dyn Fn()>>,
}

#[derive(Clone)]
pub struct HeadlessRadio(Rc<RadioState>);

impl HeadlessRadio {
    fn new(checked: bool) -> Self {
        Self(Rc::new(RadioState {
            checked: Cell::new(checked),
            listeners: Listeners::new(),
        }))
    }

    fn set_checked(&self, checked: bool) {
        self.0.checked.set(checked);
    }

    fn fire_change(&self) {
        for callback in self.0.listeners.matching("change") {
            callback();
        }
    }
}

impl RadioHandle for HeadlessRadio {
    type Subscription = EventSubscription;

    fn is_checked(&self) -> bool {
        self.0.checked.get()
    }

    fn on_change(&self, callback: Callback) -> Result<Self::Subscription> {
        Ok(Listeners::add(&self.0.listeners, "change", callback))
    }
}

#[derive(Clone)]
pub struct HeadlessForm(Rc<Listeners<dyn Fn() -> bool>>);

impl HeadlessForm {
    /// Dispatch `submit`; returns false when any listener cancels it
    pub fn submit(&self) -> bool {
        self.0
            .matching("submit")
            .into_iter()
            .fold(true, |allowed, callback| callback() && allowed)
    }
}

impl FormHandle for HeadlessForm {
    type Subscription = SubmitSubscription;

    fn on_submit(&self, callback: Rc<dyn Fn() -> bool>) -> Result<Self::Subscription> {
        Ok(Listeners::add(&self.0, "submit", callback))
    }
}

// =============================================================================
// Page
// =============================================================================

#[derive(Clone)]
enum Element {
    Input(HeadlessInput),
    Display(HeadlessDisplay),
    Section(HeadlessSection),
    Radio(HeadlessRadio),
    Form(HeadlessForm),
}

/// A page of in-memory elements addressed by id
#[derive(Clone, Default)]
pub struct HeadlessPage {
    elements: Rc<RefCell<HashMap<String, Element>>>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The markup the occurrence report page renders, with ids taken from `config`
    pub fn occurrence_form(config: &FormConfig, patient_involved: bool) -> Self {
        let page = Self::new();

        for field in Field::ALL {
            // record number and time are optional on the server form
            let required = !matches!(field, Field::Record | Field::OccurrenceTime);
            page.add_input(config.field_id(field), required);
        }
        for slot in Slot::ALL {
            page.add_display(config.slot_id(slot));
        }
        page.add_section(&config.page.section);
        page.add_radio(&config.page.patient_yes, patient_involved);
        page.add_radio(&config.page.patient_no, !patient_involved);
        if !config.page.form.is_empty() {
            page.add_form(&config.page.form);
        }
        page
    }

    pub fn add_input(&self, id: &str, required: bool) -> HeadlessInput {
        let input = HeadlessInput::new(id, required);
        self.insert(id, Element::Input(input.clone()));
        input
    }

    pub fn add_display(&self, id: &str) -> HeadlessDisplay {
        let display = HeadlessDisplay::default();
        self.insert(id, Element::Display(display.clone()));
        display
    }

    pub fn add_section(&self, id: &str) -> HeadlessSection {
        let section = HeadlessSection::default();
        self.insert(id, Element::Section(section.clone()));
        section
    }

    pub fn add_radio(&self, id: &str, checked: bool) -> HeadlessRadio {
        let radio = HeadlessRadio::new(checked);
        self.insert(id, Element::Radio(radio.clone()));
        radio
    }

    pub fn add_form(&self, id: &str) -> HeadlessForm {
        let form = HeadlessForm(Listeners::new());
        self.insert(id, Element::Form(form.clone()));
        form
    }

    pub fn remove(&self, id: &str) {
        self.elements.borrow_mut().remove(id);
    }

    /// Check one radio, uncheck the others, then dispatch `change` on it
    pub fn select_radio(&self, id: &str) -> Result<()> {
        let radio = self.radio(id)?;
        for element in self.elements.borrow().values() {
            if let Element::Radio(other) = element {
                other.set_checked(false);
            }
        }
        radio.set_checked(true);
        radio.fire_change();
        Ok(())
    }

    fn insert(&self, id: &str, element: Element) {
        self.elements.borrow_mut().insert(id.to_string(), element);
    }

    fn lookup(&self, id: &str) -> Result<Element> {
        self.elements
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| FormError::missing(id))
    }
}

fn wrong(id: &str, expected: &'static str) -> FormError {
    FormError::WrongElement {
        id: id.to_string(),
        expected,
    }
}

impl Page for HeadlessPage {
    type Input = HeadlessInput;
    type Display = HeadlessDisplay;
    type Section = HeadlessSection;
    type Radio = HeadlessRadio;
    type Form = HeadlessForm;

    fn input(&self, id: &str) -> Result<HeadlessInput> {
        match self.lookup(id)? {
            Element::Input(input) => Ok(input),
            _ => Err(wrong(id, "input")),
        }
    }

    fn display(&self, id: &str) -> Result<HeadlessDisplay> {
        match self.lookup(id)? {
            Element::Display(display) => Ok(display),
            _ => Err(wrong(id, "error display")),
        }
    }

    fn section(&self, id: &str) -> Result<HeadlessSection> {
        match self.lookup(id)? {
            Element::Section(section) => Ok(section),
            _ => Err(wrong(id, "section")),
        }
    }

    fn radio(&self, id: &str) -> Result<HeadlessRadio> {
        match self.lookup(id)? {
            Element::Radio(radio) => Ok(radio),
            _ => Err(wrong(id, "radio input")),
        }
    }

    fn form(&self, id: &str) -> Result<HeadlessForm> {
        match self.lookup(id)? {
            Element::Form(form) => Ok(form),
            _ => Err(wrong(id, "form")),
        }
    }
}
