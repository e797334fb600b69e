//! Form fields, error slots and the DOM events that trigger validation

use serde::{Deserialize, Serialize};
use std::fmt;

/// An input control of the occurrence form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    PatientName,
    BirthDate,
    Attendance,
    Record,
    InternmentDate,
    OccurrenceDate,
    OccurrenceTime,
    Description,
    ImmediateAction,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::PatientName,
        Field::BirthDate,
        Field::Attendance,
        Field::Record,
        Field::InternmentDate,
        Field::OccurrenceDate,
        Field::OccurrenceTime,
        Field::Description,
        Field::ImmediateAction,
    ];

    /// Fields of the patient sub-form, hidden when no patient is involved
    pub const PATIENT: [Field; 5] = [
        Field::PatientName,
        Field::BirthDate,
        Field::Attendance,
        Field::Record,
        Field::InternmentDate,
    ];

    /// Config key, also used in log output
    pub fn key(self) -> &'static str {
        match self {
            Field::PatientName => "patient_name",
            Field::BirthDate => "birth_date",
            Field::Attendance => "attendance",
            Field::Record => "record",
            Field::InternmentDate => "internment_date",
            Field::OccurrenceDate => "occurrence_date",
            Field::OccurrenceTime => "occurrence_time",
            Field::Description => "description",
            Field::ImmediateAction => "immediate_action",
        }
    }

    /// Element id rendered by the server-side form
    pub fn default_id(self) -> &'static str {
        match self {
            Field::PatientName => "id_patient_name",
            Field::BirthDate => "id_birth_date",
            Field::Attendance => "id_attendance",
            Field::Record => "id_record",
            Field::InternmentDate => "id_internment_date",
            Field::OccurrenceDate => "id_ocurrence_date",
            Field::OccurrenceTime => "id_ocurrence_time",
            Field::Description => "id_description_ocurrence",
            Field::ImmediateAction => "id_immediate_action",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An element that displays the outcome of one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Name,
    BirthDate,
    Attendance,
    Record,
    InternmentDate,
    BirthInternmentDate,
    OccurrenceDate,
    OccurrenceTime,
    Description,
    ImmediateAction,
}

impl Slot {
    pub const ALL: [Slot; 10] = [
        Slot::Name,
        Slot::BirthDate,
        Slot::Attendance,
        Slot::Record,
        Slot::InternmentDate,
        Slot::BirthInternmentDate,
        Slot::OccurrenceDate,
        Slot::OccurrenceTime,
        Slot::Description,
        Slot::ImmediateAction,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Name => "name_error",
            Slot::BirthDate => "birth_date_error",
            Slot::Attendance => "attendance_error",
            Slot::Record => "record_error",
            Slot::InternmentDate => "internment_date_error",
            Slot::BirthInternmentDate => "birth_internment_date_error",
            Slot::OccurrenceDate => "occurrence_date_error",
            Slot::OccurrenceTime => "occurrence_time_error",
            Slot::Description => "description_error",
            Slot::ImmediateAction => "immediate_action_error",
        }
    }

    pub fn default_id(self) -> &'static str {
        match self {
            Slot::Name => "nameError",
            Slot::BirthDate => "birthDateError",
            Slot::Attendance => "attendanceError",
            Slot::Record => "recordError",
            Slot::InternmentDate => "internmentDateError",
            Slot::BirthInternmentDate => "birthInternmentDateError",
            Slot::OccurrenceDate => "ocurrenceDateError",
            Slot::OccurrenceTime => "ocurrenceTimeError",
            Slot::Description => "descriptionOcurrenceError",
            Slot::ImmediateAction => "immediateActionError",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// DOM event that runs a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Every keystroke
    Input,
    /// Focus leaves the control
    Blur,
}

impl Trigger {
    pub fn event_name(self) -> &'static str {
        match self {
            Trigger::Input => "input",
            Trigger::Blur => "blur",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let fields: HashSet<_> = Field::ALL.iter().map(|f| f.default_id()).collect();
        assert_eq!(fields.len(), Field::ALL.len());

        let slots: HashSet<_> = Slot::ALL.iter().map(|s| s.default_id()).collect();
        assert_eq!(slots.len(), Slot::ALL.len());
    }

    #[test]
    fn test_patient_fields_are_subset() {
        for field in Field::PATIENT {
            assert!(Field::ALL.contains(&field));
        }
    }

    #[test]
    fn test_trigger_event_names() {
        assert_eq!(Trigger::Input.event_name(), "input");
        assert_eq!(Trigger::Blur.to_string(), "blur");
    }
}
