// File: occurrence-forms/src/group.rs
// Purpose: A set of rule rows bound to element handles, with a mount/unmount lifecycle

use crate::config::FormConfig;
use crate::element::{Callback, DisplayHandle, InputHandle, Page};
use crate::error::{FormError, Result};
use occurrence_validation_core::{Clock, Field, FieldValues, Rule, Slot, ValidationResult};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Validators for one section of the form.
///
/// `mount()` subscribes one listener per rule trigger and keeps the
/// subscriptions; `unmount()` drops them, which detaches every listener.
/// Both are idempotent.
pub struct ValidatorGroup<I: InputHandle, D: DisplayHandle> {
    name: &'static str,
    inner: Rc<GroupInner<I, D>>,
    subscriptions: Option<Vec<I::Subscription>>,
}

struct GroupInner<I, D> {
    rules: &'static [Rule],
    inputs: BTreeMap<Field, I>,
    displays: BTreeMap<Slot, D>,
    clock: Rc<dyn Clock>,
    error_color: String,
}

impl<I: InputHandle, D: DisplayHandle> GroupInner<I, D> {
    fn run(&self, rule: &Rule) -> ValidationResult {
        let now = self.clock.now();
        let result = rule.evaluate(self, &now);

        if let Some(display) = self.displays.get(&rule.slot) {
            match result.message {
                Some(message) => display.show(message, &self.error_color),
                None => display.clear(),
            }
        }
        result
    }
}

impl<I: InputHandle, D> FieldValues for GroupInner<I, D> {
    fn value(&self, field: Field) -> String {
        self.inputs
            .get(&field)
            .map(|input| input.value())
            .unwrap_or_default()
    }
}

impl<I: InputHandle, D: DisplayHandle> ValidatorGroup<I, D> {
    /// Build a group from explicit handles. Every field and slot the rules use must be present.
    pub fn new(
        name: &'static str,
        rules: &'static [Rule],
        inputs: BTreeMap<Field, I>,
        displays: BTreeMap<Slot, D>,
        clock: Rc<dyn Clock>,
        error_color: impl Into<String>,
    ) -> Result<Self> {
        for rule in rules {
            if let Some(field) = rule.fields().find(|field| !inputs.contains_key(field)) {
                return Err(FormError::missing(field.key()));
            }
            if !displays.contains_key(&rule.slot) {
                return Err(FormError::missing(rule.slot.key()));
            }
        }

        Ok(Self {
            name,
            inner: Rc::new(GroupInner {
                rules,
                inputs,
                displays,
                clock,
                error_color: error_color.into(),
            }),
            subscriptions: None,
        })
    }

    /// Resolve every handle the rules need from `page`, using the ids in `config`
    pub fn resolve<P>(
        name: &'static str,
        page: &P,
        config: &FormConfig,
        rules: &'static [Rule],
        clock: Rc<dyn Clock>,
    ) -> Result<Self>
    where
        P: Page<Input = I, Display = D>,
    {
        let mut inputs = BTreeMap::new();
        let mut displays = BTreeMap::new();

        for rule in rules {
            for field in rule.fields() {
                if !inputs.contains_key(&field) {
                    inputs.insert(field, page.input(config.field_id(field))?);
                }
            }
            if !displays.contains_key(&rule.slot) {
                displays.insert(rule.slot, page.display(config.slot_id(rule.slot))?);
            }
        }

        Self::new(name, rules, inputs, displays, clock, config.page.error_color.clone())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_mounted(&self) -> bool {
        self.subscriptions.is_some()
    }

    pub fn mount(&mut self) -> Result<()> {
        if self.is_mounted() {
            tracing::debug!("Validator group {} already mounted", self.name);
            return Ok(());
        }

        let mut subscriptions = Vec::new();
        for rule in self.inner.rules {
            for &(field, trigger) in rule.triggers {
                let input = self
                    .inner
                    .inputs
                    .get(&field)
                    .ok_or_else(|| FormError::missing(field.key()))?;

                let inner = Rc::downgrade(&self.inner);
                let callback: Callback = Rc::new(move || {
                    if let Some(inner) = inner.upgrade() {
                        inner.run(rule);
                    }
                });
                // an early return drops what was subscribed so far
                subscriptions.push(input.subscribe(trigger, callback)?);
            }
        }

        tracing::debug!(
            "Mounted validator group {} ({} listeners)",
            self.name,
            subscriptions.len()
        );
        self.subscriptions = Some(subscriptions);
        Ok(())
    }

    pub fn unmount(&mut self) {
        if let Some(subscriptions) = self.subscriptions.take() {
            tracing::debug!(
                "Unmounted validator group {} ({} listeners)",
                self.name,
                subscriptions.len()
            );
        }
    }

    /// Run the rule rendering into `slot`, if the group owns it
    pub fn validate(&self, slot: Slot) -> Option<ValidationResult> {
        self.inner
            .rules
            .iter()
            .find(|rule| rule.slot == slot)
            .map(|rule| self.inner.run(rule))
    }

    /// Run and render every rule; true when all pass
    pub fn validate_all(&self) -> bool {
        self.inner
            .rules
            .iter()
            .map(|rule| self.inner.run(rule))
            .fold(true, |all, result| all && result.is_valid())
    }

    /// Inputs the group reads, in field order
    pub fn inputs(&self) -> impl Iterator<Item = (Field, &I)> {
        self.inner.inputs.iter().map(|(field, input)| (*field, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessDisplay, HeadlessInput, HeadlessPage};
    use chrono::{FixedOffset, TimeZone};
    use occurrence_validation_core::{
        messages, FixedClock, Trigger, OCCURRENCE_RULES, PATIENT_RULES,
    };
    use pretty_assertions::assert_eq;

    fn clock() -> Rc<dyn Clock> {
        let now = FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 10, 0, 0)
            .unwrap();
        Rc::new(FixedClock(now))
    }

    fn patient_group(page: &HeadlessPage) -> ValidatorGroup<HeadlessInput, HeadlessDisplay> {
        ValidatorGroup::resolve("patient", page, &FormConfig::default(), PATIENT_RULES, clock())
            .unwrap()
    }

    #[test]
    fn test_mount_is_idempotent() {
        let page = HeadlessPage::occurrence_form(&FormConfig::default(), true);
        let mut group = patient_group(&page);

        group.mount().unwrap();
        group.mount().unwrap();

        let birth = page.input("id_birth_date").unwrap();
        // range rule + cross-field rule
        assert_eq!(birth.listener_count(), 2);

        page.input("id_attendance").unwrap().type_text("1234");
        let display = page.display("attendanceError").unwrap();
        assert_eq!(display.writes(), 1);
        assert_eq!(display.text(), messages::ATTENDANCE_DIGITS);
    }

    #[test]
    fn test_unmount_detaches_everything() {
        let page = HeadlessPage::occurrence_form(&FormConfig::default(), true);
        let mut group = patient_group(&page);
        group.mount().unwrap();
        group.unmount();
        group.unmount();

        assert!(!group.is_mounted());
        for (_, input) in group.inputs() {
            assert_eq!(input.listener_count(), 0);
        }

        page.input("id_patient_name").unwrap().type_text("   ");
        assert_eq!(page.display("nameError").unwrap().writes(), 0);
    }

    #[test]
    fn test_display_cleared_when_valid() {
        let page = HeadlessPage::occurrence_form(&FormConfig::default(), true);
        let mut group = patient_group(&page);
        group.mount().unwrap();

        let record = page.input("id_record").unwrap();
        record.type_text("12");
        let display = page.display("recordError").unwrap();
        assert_eq!(display.text(), messages::RECORD_DIGITS);
        assert_eq!(display.color().as_deref(), Some("red"));

        record.type_text("123456");
        assert_eq!(display.text(), "");
    }

    #[test]
    fn test_validate_all_renders_every_slot() {
        let page = HeadlessPage::occurrence_form(&FormConfig::default(), true);
        let group = ValidatorGroup::resolve(
            "occurrence",
            &page,
            &FormConfig::default(),
            OCCURRENCE_RULES,
            clock(),
        )
        .unwrap();

        assert!(!group.validate_all());
        assert_eq!(
            page.display("descriptionOcurrenceError").unwrap().text(),
            messages::DESCRIPTION_BLANK
        );
        assert_eq!(
            page.display("immediateActionError").unwrap().text(),
            messages::IMMEDIATE_ACTION_BLANK
        );

        page.input("id_description_ocurrence").unwrap().set_value("Queda do leito");
        page.input("id_immediate_action").unwrap().set_value("Avaliação médica");
        assert!(group.validate_all());
        assert_eq!(group.validate(Slot::Name), None);
    }

    #[test]
    fn test_new_rejects_incomplete_handles() {
        let err = ValidatorGroup::<HeadlessInput, HeadlessDisplay>::new(
            "patient",
            PATIENT_RULES,
            BTreeMap::new(),
            BTreeMap::new(),
            clock(),
            "red",
        )
        .err()
        .unwrap();
        assert_eq!(err, FormError::missing(Field::PatientName.key()));
    }

    #[test]
    fn test_blur_runs_cross_field_rule() {
        let page = HeadlessPage::occurrence_form(&FormConfig::default(), true);
        let mut group = patient_group(&page);
        group.mount().unwrap();

        page.input("id_birth_date").unwrap().set_value("2010-05-05");
        let internment = page.input("id_internment_date").unwrap();
        internment.set_value("2005-01-01");
        internment.fire(Trigger::Blur);

        assert_eq!(
            page.display("birthInternmentDateError").unwrap().text(),
            messages::INTERNMENT_BEFORE_BIRTH
        );
        assert_eq!(page.display("internmentDateError").unwrap().text(), "");
    }
}
