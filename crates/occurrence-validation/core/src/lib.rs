//! Occurrence Validation Core
//!
//! Pure validation rules for the occurrence report form.
//! Used natively by the form lifecycle and in the browser through the WASM bindings.
//!
//! Every rule returns `Result<(), &'static str>` where the error is the
//! Portuguese message shown next to the field. [`table`] groups the rules
//! into the rows that the form binds to DOM events.

pub mod clock;
pub mod dates;
pub mod field;
pub mod messages;
pub mod result;
pub mod rules;
pub mod table;

pub use clock::{Clock, FixedClock, SystemClock, RECIFE_UTC_OFFSET_MINUTES};
pub use dates::{DateBounds, BIRTH_DATE, INTERNMENT_DATE, OCCURRENCE_DATE};
pub use field::{Field, Slot, Trigger};
pub use result::ValidationResult;
pub use rules::*;
pub use table::{Check, FieldValues, Rule, OCCURRENCE_RULES, PATIENT_RULES};
