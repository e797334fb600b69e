//! Element handles
//!
//! The form never looks elements up by itself. A [`Page`] resolves ids into
//! handles once, at construction, and everything else works on the handles.
//! The browser implementation lives in the WASM crate; [`crate::headless`]
//! provides an in-memory one.
//!
//! Subscriptions returned by `subscribe`/`on_change`/`on_submit` must detach
//! their listener when dropped.

use crate::error::Result;
use occurrence_validation_core::Trigger;
use std::rc::Rc;

pub type Callback = Rc<dyn Fn()>;

/// `<input>` or `<textarea>`
pub trait InputHandle: Clone + 'static {
    type Subscription: 'static;

    fn id(&self) -> String;
    fn value(&self) -> String;
    fn is_required(&self) -> bool;
    fn set_required(&self, required: bool);
    fn subscribe(&self, trigger: Trigger, callback: Callback) -> Result<Self::Subscription>;
}

/// Inline error text next to a field
pub trait DisplayHandle: Clone + 'static {
    fn show(&self, message: &str, color: &str);
    fn clear(&self);
}

/// Container that can be shown or hidden
pub trait SectionHandle: 'static {
    fn set_visible(&self, visible: bool);
}

pub trait RadioHandle: 'static {
    type Subscription: 'static;

    fn is_checked(&self) -> bool;
    fn on_change(&self, callback: Callback) -> Result<Self::Subscription>;
}

pub trait FormHandle: 'static {
    type Subscription: 'static;

    /// `callback` returns whether submission may proceed
    fn on_submit(&self, callback: Rc<dyn Fn() -> bool>) -> Result<Self::Subscription>;
}

/// Resolves element ids. Every lookup fails with `FormError::MissingElement` when absent.
pub trait Page {
    type Input: InputHandle;
    type Display: DisplayHandle;
    type Section: SectionHandle;
    type Radio: RadioHandle;
    type Form: FormHandle;

    fn input(&self, id: &str) -> Result<Self::Input>;
    fn display(&self, id: &str) -> Result<Self::Display>;
    fn section(&self, id: &str) -> Result<Self::Section>;
    fn radio(&self, id: &str) -> Result<Self::Radio>;
    fn form(&self, id: &str) -> Result<Self::Form>;
}

/// Clears the `required` attribute of every listed input.
///
/// All ids are resolved before any input is touched, so a missing id leaves the page unchanged.
pub fn remove_required<P: Page>(page: &P, ids: &[&str]) -> Result<()> {
    set_required(page, ids, false)
}

pub fn set_required<P: Page>(page: &P, ids: &[&str], required: bool) -> Result<()> {
    let inputs = ids
        .iter()
        .map(|id| page.input(id))
        .collect::<Result<Vec<_>>>()?;

    for input in &inputs {
        input.set_required(required);
    }
    tracing::debug!("Set required={} on {} fields", required, inputs.len());
    Ok(())
}
