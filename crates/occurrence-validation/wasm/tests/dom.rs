//! Browser tests: run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use occurrence_forms::{
    DisplayHandle, FormConfig, FormController, FormError, InputHandle, Page, PatientSection,
};
use occurrence_validation_core::{messages, SystemClock};
use occurrence_validation_wasm::dom::DomPage;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"
<form id="occurrenceForm">
  <input type="radio" name="patient_involved" id="patient_yes">
  <input type="radio" name="patient_involved" id="patient_no" checked>
  <div id="showPatient">
    <input id="id_patient_name" required><span id="nameError"></span>
    <input id="id_birth_date" type="date" required><span id="birthDateError"></span>
    <input id="id_attendance" required><span id="attendanceError"></span>
    <input id="id_record"><span id="recordError"></span>
    <input id="id_internment_date" type="date" required><span id="internmentDateError"></span>
    <span id="birthInternmentDateError"></span>
  </div>
  <input id="id_ocurrence_date" type="date" required><span id="ocurrenceDateError"></span>
  <input id="id_ocurrence_time" type="time"><span id="ocurrenceTimeError"></span>
  <textarea id="id_description_ocurrence" required></textarea><span id="descriptionOcurrenceError"></span>
  <textarea id="id_immediate_action" required></textarea><span id="immediateActionError"></span>
</form>
"#;

fn page() -> DomPage {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(MARKUP);
    DomPage::new(document)
}

fn element<T: JsCast>(id: &str) -> T {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<T>()
        .ok()
        .unwrap()
}

fn dispatch(id: &str, event: &str) {
    let target: HtmlElement = element(id);
    target.dispatch_event(&Event::new(event).unwrap()).unwrap();
}

fn text(id: &str) -> String {
    element::<HtmlElement>(id).text_content().unwrap_or_default()
}

#[wasm_bindgen_test]
fn test_patient_toggle_in_browser() {
    let page = page();
    let controller =
        FormController::new(&page, &FormConfig::default(), Rc::new(SystemClock::recife())).unwrap();
    assert_eq!(controller.patient_section(), PatientSection::Hidden);

    let section: HtmlElement = element("showPatient");
    assert_eq!(section.style().get_property_value("display").unwrap(), "none");
    assert!(!page.input("id_patient_name").unwrap().is_required());

    // hidden: no validation
    dispatch("id_patient_name", "input");
    assert_eq!(text("nameError"), "");

    let yes: HtmlInputElement = element("patient_yes");
    yes.set_checked(true);
    dispatch("patient_yes", "change");
    assert_eq!(section.style().get_property_value("display").unwrap(), "flex");

    dispatch("id_patient_name", "input");
    assert_eq!(text("nameError"), messages::PATIENT_NAME_BLANK);

    let attendance: HtmlInputElement = element("id_attendance");
    attendance.set_value("1234");
    dispatch("id_attendance", "input");
    assert_eq!(text("attendanceError"), messages::ATTENDANCE_DIGITS);
}

#[wasm_bindgen_test]
fn test_textarea_is_an_input() {
    let page = page();
    let description = page.input("id_description_ocurrence").unwrap();
    assert!(description.is_required());
    assert_eq!(description.value(), "");
}

#[wasm_bindgen_test]
fn test_missing_element_reported() {
    let page = page();
    element::<HtmlElement>("recordError").remove();
    let err = FormController::new(&page, &FormConfig::default(), Rc::new(SystemClock::recife()))
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "element #recordError not found");
}

#[wasm_bindgen_test]
fn test_radio_must_be_a_radio_input() {
    let page = page();
    element::<HtmlInputElement>("patient_yes").set_type("text");
    let err = page.radio("patient_yes").err().unwrap();
    assert_eq!(
        err,
        FormError::WrongElement {
            id: "patient_yes".into(),
            expected: "radio input"
        }
    );
    assert!(page.radio("patient_no").is_ok());
}

#[wasm_bindgen_test]
fn test_display_writes_message_and_color() {
    let page = page();
    let display = page.display("recordError").unwrap();
    display.show(messages::RECORD_DIGITS, "darkred");

    let span: HtmlElement = element("recordError");
    assert_eq!(text("recordError"), messages::RECORD_DIGITS);
    assert_eq!(span.style().get_property_value("color").unwrap(), "darkred");

    display.clear();
    assert_eq!(text("recordError"), "");
}

#[wasm_bindgen_test]
fn test_handlers_before_init_wire_the_default_form() {
    page();
    occurrence_validation_wasm::attach_patient_validation_handlers().unwrap();

    // the default controller also follows the radios
    let yes: HtmlInputElement = element("patient_yes");
    yes.set_checked(true);
    dispatch("patient_yes", "change");
    let section: HtmlElement = element("showPatient");
    assert_eq!(section.style().get_property_value("display").unwrap(), "flex");

    dispatch("id_description_ocurrence", "input");
    assert_eq!(text("descriptionOcurrenceError"), messages::DESCRIPTION_BLANK);
}
