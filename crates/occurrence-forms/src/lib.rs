//! Occurrence Forms
//!
//! Binds the occurrence report rules to page elements.
//!
//! - [`ValidatorGroup`] owns the handles for one section and exposes
//!   `mount()`/`unmount()`.
//! - [`FormController`] shows or hides the patient section from the
//!   "patient involved" radios and gates submission.
//! - [`remove_required`] strips the `required` attribute from a list of inputs.
//!
//! Element handles come from a [`Page`]. The browser implementation is in
//! `occurrence-validation-wasm`; [`headless`] keeps everything in memory.

pub mod config;
pub mod controller;
pub mod element;
pub mod error;
pub mod group;
pub mod headless;

pub use config::{FormConfig, PageConfig, ZoneConfig};
pub use controller::{FormController, PatientSection};
pub use element::{
    remove_required, set_required, Callback, DisplayHandle, FormHandle, InputHandle, Page,
    RadioHandle, SectionHandle,
};
pub use error::{FormError, Result};
pub use group::ValidatorGroup;

pub use occurrence_validation_core as rules;
