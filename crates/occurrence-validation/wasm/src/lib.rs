//! Occurrence Validation WASM
//!
//! WebAssembly bindings for the occurrence report form.
//! Replaces the page's validation scripts: the same rules run natively and in the browser.
//!
//! # Example (JavaScript)
//! ```javascript
//! import init, { initOccurrenceForm } from './occurrence_validation_wasm.js';
//!
//! document.addEventListener('DOMContentLoaded', async () => {
//!     await init();
//!     initOccurrenceForm({ page: { form: 'occurrenceForm' } });
//! });
//! ```

pub mod dom;

use dom::DomPage;
use occurrence_forms::{remove_required, FormConfig, FormController, FormError};
use occurrence_validation_core::{self as core, Clock, SystemClock};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

thread_local! {
    static FORM: RefCell<Option<FormController<DomPage>>> = RefCell::new(None);
}

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: FormError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn parse_config(config: JsValue) -> Result<FormConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(FormConfig::default());
    }

    let config: FormConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form config: {}", e)))?;
    config.validate().map_err(to_js)?;
    Ok(config)
}

fn build(config: &FormConfig) -> Result<FormController<DomPage>, FormError> {
    let page = DomPage::from_window()?;
    let clock = config.clock()?;
    FormController::new(&page, config, Rc::new(clock))
}

/// Run `f` against the page controller.
///
/// Before `initOccurrenceForm` has run, the first call builds the controller
/// with the default config. That wires the whole page: the patient section
/// follows the radios and the occurrence validators are mounted.
fn with_controller<R>(
    f: impl FnOnce(&FormController<DomPage>) -> Result<R, FormError>,
) -> Result<R, JsValue> {
    FORM.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(build(&FormConfig::default()).map_err(to_js)?);
        }
        match slot.as_ref() {
            Some(controller) => f(controller).map_err(to_js),
            None => Err(to_js(FormError::NoDocument)),
        }
    })
}

/// Wire the occurrence form: section toggle, validators and optional submit gate.
///
/// `config` is optional; missing keys take their defaults. Throws when the page
/// lacks any configured element. Calling it again replaces the previous wiring.
#[wasm_bindgen(js_name = initOccurrenceForm)]
pub fn init_occurrence_form(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    let controller = build(&config).map_err(|err| {
        web_sys::console::error_1(&JsValue::from_str(&format!("Occurrence form: {}", err)));
        to_js(err)
    })?;

    FORM.with(|cell| {
        // dropping the previous controller detaches its listeners
        *cell.borrow_mut() = Some(controller);
    });
    Ok(())
}

/// Mount the patient validators. Initialises the form with the default config
/// when `initOccurrenceForm` has not been called.
#[wasm_bindgen(js_name = attachPatientValidationHandlers)]
pub fn attach_patient_validation_handlers() -> Result<(), JsValue> {
    with_controller(|controller| controller.attach_patient_validators())
}

/// Unmount the patient validators. Initialises the form like
/// `attachPatientValidationHandlers` on first use.
#[wasm_bindgen(js_name = removePatientValidationHandlers)]
pub fn remove_patient_validation_handlers() -> Result<(), JsValue> {
    with_controller(|controller| {
        controller.detach_patient_validators();
        Ok(())
    })
}

/// Mount the occurrence validators. Initialises the form like
/// `attachPatientValidationHandlers` on first use.
#[wasm_bindgen(js_name = attachOcurrenceValidationHandlers)]
pub fn attach_occurrence_validation_handlers() -> Result<(), JsValue> {
    with_controller(|controller| controller.attach_occurrence_validators())
}

/// Strip `required` from the listed inputs
#[wasm_bindgen(js_name = removeRequired)]
pub fn remove_required_js(ids: Vec<String>) -> Result<(), JsValue> {
    let page = DomPage::from_window().map_err(to_js)?;
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    remove_required(&page, &ids).map_err(to_js)
}

/// Run every active rule, rendering the messages; true when the form may be submitted.
/// Initialises the form with the default config when needed.
#[wasm_bindgen(js_name = validateOccurrenceForm)]
pub fn validate_occurrence_form() -> Result<bool, JsValue> {
    with_controller(|controller| Ok(controller.validate_form()))
}

// =============================================================================
// Quick single-field checks. Return the message, or undefined when valid.
// Dates are compared with today in America/Recife.
// =============================================================================

fn message(result: Result<(), &'static str>) -> Option<String> {
    result.err().map(String::from)
}

#[wasm_bindgen(js_name = validatePatientName)]
pub fn validate_patient_name_js(value: &str) -> Option<String> {
    message(core::validate_patient_name(value))
}

#[wasm_bindgen(js_name = validateAttendance)]
pub fn validate_attendance_js(value: &str) -> Option<String> {
    message(core::validate_attendance(value))
}

#[wasm_bindgen(js_name = validateRecord)]
pub fn validate_record_js(value: &str) -> Option<String> {
    message(core::validate_record(value))
}

#[wasm_bindgen(js_name = validateBirthDate)]
pub fn validate_birth_date_js(value: &str) -> Option<String> {
    let today = SystemClock::recife().now().date_naive();
    message(core::validate_birth_date(value, today))
}

#[wasm_bindgen(js_name = validateInternmentDate)]
pub fn validate_internment_date_js(value: &str) -> Option<String> {
    let today = SystemClock::recife().now().date_naive();
    message(core::validate_internment_date(value, today))
}

#[wasm_bindgen(js_name = validateBirthInternmentDate)]
pub fn validate_birth_internment_date_js(birth: &str, internment: &str) -> Option<String> {
    message(core::validate_birth_internment_date(birth, internment))
}

#[wasm_bindgen(js_name = validateOcurrenceDate)]
pub fn validate_occurrence_date_js(value: &str) -> Option<String> {
    let today = SystemClock::recife().now().date_naive();
    message(core::validate_occurrence_date(value, today))
}

#[wasm_bindgen(js_name = validateOcurrenceTime)]
pub fn validate_occurrence_time_js(date: &str, time: &str) -> Option<String> {
    let now = SystemClock::recife().now().naive_local();
    message(core::validate_occurrence_time(date, time, now))
}
