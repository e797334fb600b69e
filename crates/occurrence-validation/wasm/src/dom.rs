//! Browser element handles backed by `web-sys`

use occurrence_forms::{
    Callback, DisplayHandle, FormError, FormHandle, InputHandle, Page, RadioHandle, Result,
    SectionHandle,
};
use occurrence_validation_core::Trigger;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
};

/// Removes its listener when dropped
pub struct DomSubscription {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for DomSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn listen(
    id: &str,
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<DomSubscription> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| FormError::Listener {
            id: id.to_string(),
            event,
            reason: format!("{:?}", err),
        })?;

    Ok(DomSubscription {
        target: target.clone(),
        event,
        closure,
    })
}

/// `<input>` or `<textarea>`
#[derive(Clone)]
pub enum DomInput {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl DomInput {
    fn element(&self) -> &Element {
        match self {
            DomInput::Input(input) => input.as_ref(),
            DomInput::TextArea(area) => area.as_ref(),
        }
    }
}

impl InputHandle for DomInput {
    type Subscription = DomSubscription;

    fn id(&self) -> String {
        self.element().id()
    }

    fn value(&self) -> String {
        match self {
            DomInput::Input(input) => input.value(),
            DomInput::TextArea(area) => area.value(),
        }
    }

    fn is_required(&self) -> bool {
        match self {
            DomInput::Input(input) => input.required(),
            DomInput::TextArea(area) => area.required(),
        }
    }

    fn set_required(&self, required: bool) {
        match self {
            DomInput::Input(input) => input.set_required(required),
            DomInput::TextArea(area) => area.set_required(required),
        }
    }

    fn subscribe(&self, trigger: Trigger, callback: Callback) -> Result<DomSubscription> {
        listen(
            &self.id(),
            self.element(),
            trigger.event_name(),
            move |_event: Event| callback(),
        )
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Failed to set {} on #{}: {:?}",
            property,
            element.id(),
            err
        )));
    }
}

#[derive(Clone)]
pub struct DomDisplay(HtmlElement);

impl DisplayHandle for DomDisplay {
    fn show(&self, message: &str, color: &str) {
        self.0.set_text_content(Some(message));
        set_style(&self.0, "color", color);
    }

    fn clear(&self) {
        self.0.set_text_content(Some(""));
    }
}

pub struct DomSection(HtmlElement);

impl SectionHandle for DomSection {
    fn set_visible(&self, visible: bool) {
        let display = if visible { "flex" } else { "none" };
        set_style(&self.0, "display", display);
    }
}

pub struct DomRadio(HtmlInputElement);

impl RadioHandle for DomRadio {
    type Subscription = DomSubscription;

    fn is_checked(&self) -> bool {
        self.0.checked()
    }

    fn on_change(&self, callback: Callback) -> Result<DomSubscription> {
        listen(&self.0.id(), &self.0, "change", move |_event: Event| callback())
    }
}

pub struct DomForm(HtmlFormElement);

impl FormHandle for DomForm {
    type Subscription = DomSubscription;

    fn on_submit(&self, callback: Rc<dyn Fn() -> bool>) -> Result<DomSubscription> {
        listen(&self.0.id(), &self.0, "submit", move |event: Event| {
            if !callback() {
                event.prevent_default();
            }
        })
    }
}

/// The current document
#[derive(Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or(FormError::NoDocument)
    }

    fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| FormError::missing(id))
    }

    fn cast<T: JsCast>(&self, id: &str, expected: &'static str) -> Result<T> {
        self.element(id)?
            .dyn_into::<T>()
            .map_err(|_| FormError::WrongElement {
                id: id.to_string(),
                expected,
            })
    }
}

impl Page for DomPage {
    type Input = DomInput;
    type Display = DomDisplay;
    type Section = DomSection;
    type Radio = DomRadio;
    type Form = DomForm;

    fn input(&self, id: &str) -> Result<DomInput> {
        let element = self.element(id)?;
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Ok(DomInput::Input(input)),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .map(DomInput::TextArea)
                .map_err(|_| FormError::WrongElement {
                    id: id.to_string(),
                    expected: "input or textarea",
                }),
        }
    }

    fn display(&self, id: &str) -> Result<DomDisplay> {
        self.cast(id, "html element").map(DomDisplay)
    }

    fn section(&self, id: &str) -> Result<DomSection> {
        self.cast(id, "html element").map(DomSection)
    }

    fn radio(&self, id: &str) -> Result<DomRadio> {
        let input: HtmlInputElement = self.cast(id, "radio input")?;
        if input.type_() != "radio" {
            return Err(FormError::WrongElement {
                id: id.to_string(),
                expected: "radio input",
            });
        }
        Ok(DomRadio(input))
    }

    fn form(&self, id: &str) -> Result<DomForm> {
        self.cast(id, "form").map(DomForm)
    }
}
