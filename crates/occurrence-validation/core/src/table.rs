//! Rule table: which field events run which check, and where the result is shown

use crate::dates::{self, DateBounds};
use crate::field::{Field, Slot, Trigger};
use crate::messages;
use crate::result::ValidationResult;
use crate::rules;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// Source of current control values
pub trait FieldValues {
    fn value(&self, field: Field) -> String;
}

impl FieldValues for HashMap<Field, String> {
    fn value(&self, field: Field) -> String {
        self.get(&field).cloned().unwrap_or_default()
    }
}

/// The check a rule performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    NotBlank(Field, &'static str),
    NumericId(Field, &'static str),
    DateInRange(Field, DateBounds),
    OccurrenceTime,
    InternmentAfterBirth,
}

impl Check {
    /// Fields whose values the check reads
    pub fn reads(&self) -> &'static [Field] {
        match self {
            Check::NotBlank(field, _)
            | Check::NumericId(field, _)
            | Check::DateInRange(field, _) => single(*field),
            Check::OccurrenceTime => &[Field::OccurrenceDate, Field::OccurrenceTime],
            Check::InternmentAfterBirth => &[Field::BirthDate, Field::InternmentDate],
        }
    }

    pub fn evaluate(
        &self,
        values: &dyn FieldValues,
        now: &DateTime<FixedOffset>,
    ) -> Result<(), &'static str> {
        let today = now.date_naive();
        match self {
            Check::NotBlank(field, message) => {
                rules::validate_not_blank(&values.value(*field), *message)
            }
            Check::NumericId(field, message) => {
                rules::validate_numeric_id(&values.value(*field), *message)
            }
            Check::DateInRange(field, bounds) => {
                rules::validate_date_in_range(&values.value(*field), today, bounds)
            }
            Check::OccurrenceTime => rules::validate_occurrence_time(
                &values.value(Field::OccurrenceDate),
                &values.value(Field::OccurrenceTime),
                now.naive_local(),
            ),
            Check::InternmentAfterBirth => rules::validate_birth_internment_date(
                &values.value(Field::BirthDate),
                &values.value(Field::InternmentDate),
            ),
        }
    }
}

fn single(field: Field) -> &'static [Field] {
    match field {
        Field::PatientName => &[Field::PatientName],
        Field::BirthDate => &[Field::BirthDate],
        Field::Attendance => &[Field::Attendance],
        Field::Record => &[Field::Record],
        Field::InternmentDate => &[Field::InternmentDate],
        Field::OccurrenceDate => &[Field::OccurrenceDate],
        Field::OccurrenceTime => &[Field::OccurrenceTime],
        Field::Description => &[Field::Description],
        Field::ImmediateAction => &[Field::ImmediateAction],
    }
}

/// One row: run `check` on any of `triggers`, render into `slot`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub slot: Slot,
    pub triggers: &'static [(Field, Trigger)],
    pub check: Check,
}

impl Rule {
    pub fn evaluate(
        &self,
        values: &dyn FieldValues,
        now: &DateTime<FixedOffset>,
    ) -> ValidationResult {
        self.check.evaluate(values, now).into()
    }

    /// Every field the rule listens on or reads
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.triggers
            .iter()
            .map(|(field, _)| *field)
            .chain(self.check.reads().iter().copied())
    }
}

pub const PATIENT_RULES: &[Rule] = &[
    Rule {
        slot: Slot::Name,
        triggers: &[(Field::PatientName, Trigger::Input)],
        check: Check::NotBlank(Field::PatientName, messages::PATIENT_NAME_BLANK),
    },
    Rule {
        slot: Slot::BirthDate,
        triggers: &[(Field::BirthDate, Trigger::Blur)],
        check: Check::DateInRange(Field::BirthDate, dates::BIRTH_DATE),
    },
    Rule {
        slot: Slot::BirthInternmentDate,
        triggers: &[
            (Field::BirthDate, Trigger::Blur),
            (Field::InternmentDate, Trigger::Blur),
        ],
        check: Check::InternmentAfterBirth,
    },
    Rule {
        slot: Slot::Attendance,
        triggers: &[(Field::Attendance, Trigger::Input)],
        check: Check::NumericId(Field::Attendance, messages::ATTENDANCE_DIGITS),
    },
    Rule {
        slot: Slot::Record,
        triggers: &[(Field::Record, Trigger::Input)],
        check: Check::NumericId(Field::Record, messages::RECORD_DIGITS),
    },
    Rule {
        slot: Slot::InternmentDate,
        triggers: &[(Field::InternmentDate, Trigger::Blur)],
        check: Check::DateInRange(Field::InternmentDate, dates::INTERNMENT_DATE),
    },
];

pub const OCCURRENCE_RULES: &[Rule] = &[
    Rule {
        slot: Slot::OccurrenceDate,
        triggers: &[(Field::OccurrenceDate, Trigger::Blur)],
        check: Check::DateInRange(Field::OccurrenceDate, dates::OCCURRENCE_DATE),
    },
    // Re-checked when the date changes: moving the date to today can make the time invalid
    Rule {
        slot: Slot::OccurrenceTime,
        triggers: &[
            (Field::OccurrenceTime, Trigger::Blur),
            (Field::OccurrenceDate, Trigger::Blur),
        ],
        check: Check::OccurrenceTime,
    },
    Rule {
        slot: Slot::Description,
        triggers: &[(Field::Description, Trigger::Input)],
        check: Check::NotBlank(Field::Description, messages::DESCRIPTION_BLANK),
    },
    Rule {
        slot: Slot::ImmediateAction,
        triggers: &[(Field::ImmediateAction, Trigger::Input)],
        check: Check::NotBlank(Field::ImmediateAction, messages::IMMEDIATE_ACTION_BLANK),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 10, 0, 0)
            .unwrap()
    }

    fn values(pairs: &[(Field, &str)]) -> HashMap<Field, String> {
        pairs.iter().map(|(f, v)| (*f, v.to_string())).collect()
    }

    #[test]
    fn test_each_slot_has_one_rule() {
        let slots: Vec<_> = PATIENT_RULES
            .iter()
            .chain(OCCURRENCE_RULES)
            .map(|rule| rule.slot)
            .collect();
        let unique: HashSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), slots.len());
        assert_eq!(slots.len(), Slot::ALL.len());
    }

    #[test]
    fn test_patient_rules_only_touch_patient_fields() {
        for rule in PATIENT_RULES {
            for field in rule.fields() {
                assert!(Field::PATIENT.contains(&field), "{} in {}", field, rule.slot);
            }
        }
        for rule in OCCURRENCE_RULES {
            for field in rule.fields() {
                assert!(!Field::PATIENT.contains(&field), "{} in {}", field, rule.slot);
            }
        }
    }

    #[test]
    fn test_cross_field_rule_reads_both_dates() {
        let values = values(&[
            (Field::BirthDate, "2000-01-01"),
            (Field::InternmentDate, "1999-01-01"),
        ]);
        let rule = PATIENT_RULES
            .iter()
            .find(|rule| rule.slot == Slot::BirthInternmentDate)
            .unwrap();
        assert_eq!(
            rule.evaluate(&values, &now()),
            ValidationResult::fail(messages::INTERNMENT_BEFORE_BIRTH)
        );
    }

    #[test]
    fn test_occurrence_time_uses_zoned_wall_clock() {
        let rule = OCCURRENCE_RULES
            .iter()
            .find(|rule| rule.slot == Slot::OccurrenceTime)
            .unwrap();

        let late = values(&[
            (Field::OccurrenceDate, "2024-06-15"),
            (Field::OccurrenceTime, "23:59"),
        ]);
        assert!(!rule.evaluate(&late, &now()).is_valid());

        let yesterday = values(&[
            (Field::OccurrenceDate, "2024-06-14"),
            (Field::OccurrenceTime, "23:59"),
        ]);
        assert!(rule.evaluate(&yesterday, &now()).is_valid());
    }

    #[test]
    fn test_missing_values_read_as_blank() {
        let rule = &PATIENT_RULES[3];
        assert_eq!(rule.slot, Slot::Attendance);
        assert_eq!(
            rule.evaluate(&HashMap::new(), &now()).message,
            Some(messages::ATTENDANCE_DIGITS)
        );
    }
}
