// File: occurrence-forms/src/controller.rs
// Purpose: Patient section visibility driven by the "patient involved" radios

use crate::config::FormConfig;
use crate::element::{FormHandle, InputHandle, Page, RadioHandle, SectionHandle};
use crate::error::Result;
use crate::group::ValidatorGroup;
use occurrence_validation_core::{Clock, Field, OCCURRENCE_RULES, PATIENT_RULES};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Whether the patient sub-form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientSection {
    Visible,
    Hidden,
}

impl fmt::Display for PatientSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientSection::Visible => write!(f, "visible"),
            PatientSection::Hidden => write!(f, "hidden"),
        }
    }
}

type Group<P> = ValidatorGroup<<P as Page>::Input, <P as Page>::Display>;

struct FormState<P: Page> {
    section: P::Section,
    patient: Group<P>,
    occurrence: Group<P>,
    /// Patient inputs that carried `required` in the markup
    required_patient_inputs: Vec<P::Input>,
    visibility: PatientSection,
}

impl<P: Page> FormState<P> {
    fn show_patient(&mut self) -> Result<()> {
        self.section.set_visible(true);
        for input in &self.required_patient_inputs {
            input.set_required(true);
        }
        self.patient.mount()?;
        self.transition(PatientSection::Visible);
        Ok(())
    }

    fn hide_patient(&mut self) {
        self.section.set_visible(false);
        self.patient.unmount();
        // hidden mandatory inputs would block submission
        for input in &self.required_patient_inputs {
            input.set_required(false);
        }
        self.transition(PatientSection::Hidden);
    }

    fn transition(&mut self, to: PatientSection) {
        if self.visibility != to {
            tracing::debug!("Patient section {} -> {}", self.visibility, to);
        }
        self.visibility = to;
    }

    fn validate_form(&self) -> bool {
        let occurrence = self.occurrence.validate_all();
        let patient = match self.visibility {
            PatientSection::Visible => self.patient.validate_all(),
            PatientSection::Hidden => true,
        };
        occurrence && patient
    }
}

/// Load-time wiring of the occurrence report page.
///
/// Construction resolves every element up front and fails with
/// `FormError::MissingElement` when the markup is incomplete. The initial
/// section state follows the pre-checked radio; afterwards only radio
/// `change` events move it. Occurrence validators stay mounted for the
/// controller's lifetime.
pub struct FormController<P: Page> {
    state: Rc<RefCell<FormState<P>>>,
    _radio_subscriptions: Vec<<P::Radio as RadioHandle>::Subscription>,
    _submit_subscription: Option<<P::Form as FormHandle>::Subscription>,
}

impl<P: Page + 'static> FormController<P> {
    pub fn new(page: &P, config: &FormConfig, clock: Rc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let section = page.section(&config.page.section)?;
        let yes = page.radio(&config.page.patient_yes)?;
        let no = page.radio(&config.page.patient_no)?;
        let form = if config.page.form.is_empty() {
            None
        } else {
            Some(page.form(&config.page.form)?)
        };

        let patient =
            ValidatorGroup::resolve("patient", page, config, PATIENT_RULES, Rc::clone(&clock))?;
        let occurrence =
            ValidatorGroup::resolve("occurrence", page, config, OCCURRENCE_RULES, clock)?;

        let required_patient_inputs = Field::PATIENT
            .iter()
            .map(|field| page.input(config.field_id(*field)))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .filter(|input| input.is_required())
            .collect();

        let state = Rc::new(RefCell::new(FormState {
            section,
            patient,
            occurrence,
            required_patient_inputs,
            visibility: PatientSection::Hidden,
        }));

        {
            let mut state = state.borrow_mut();
            if yes.is_checked() {
                state.show_patient()?;
            } else {
                state.hide_patient();
            }
            state.occurrence.mount()?;
        }

        let radio_subscriptions = vec![
            yes.on_change(section_callback(&state, PatientSection::Visible))?,
            no.on_change(section_callback(&state, PatientSection::Hidden))?,
        ];

        let submit_subscription = match form {
            Some(form) => {
                let weak = Rc::downgrade(&state);
                Some(form.on_submit(Rc::new(move || match weak.upgrade() {
                    Some(state) => {
                        let allowed = state.borrow().validate_form();
                        if !allowed {
                            tracing::debug!("Submission blocked by invalid fields");
                        }
                        allowed
                    }
                    None => true,
                }))?)
            }
            None => None,
        };

        tracing::debug!(
            "Occurrence form ready (zone {}, patient section {})",
            config.zone.name,
            state.borrow().visibility
        );

        Ok(Self {
            state,
            _radio_subscriptions: radio_subscriptions,
            _submit_subscription: submit_subscription,
        })
    }

    pub fn patient_section(&self) -> PatientSection {
        self.state.borrow().visibility
    }

    /// Reveal the patient sub-form and validate it
    pub fn show_patient(&self) -> Result<()> {
        self.state.borrow_mut().show_patient()
    }

    /// Hide the patient sub-form and stop validating it
    pub fn hide_patient(&self) {
        self.state.borrow_mut().hide_patient()
    }

    /// Mount the patient validators without touching visibility
    pub fn attach_patient_validators(&self) -> Result<()> {
        self.state.borrow_mut().patient.mount()
    }

    pub fn detach_patient_validators(&self) {
        self.state.borrow_mut().patient.unmount()
    }

    pub fn attach_occurrence_validators(&self) -> Result<()> {
        self.state.borrow_mut().occurrence.mount()
    }

    pub fn patient_validators_mounted(&self) -> bool {
        self.state.borrow().patient.is_mounted()
    }

    pub fn occurrence_validators_mounted(&self) -> bool {
        self.state.borrow().occurrence.is_mounted()
    }

    /// Run every active rule and render the results; true when the form may be submitted
    pub fn validate_form(&self) -> bool {
        self.state.borrow().validate_form()
    }
}

fn section_callback<P: Page + 'static>(
    state: &Rc<RefCell<FormState<P>>>,
    to: PatientSection,
) -> Rc<dyn Fn()> {
    let weak: Weak<RefCell<FormState<P>>> = Rc::downgrade(state);
    Rc::new(move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        match to {
            PatientSection::Visible => {
                if let Err(err) = state.show_patient() {
                    tracing::warn!("Failed to show patient section: {}", err);
                }
            }
            PatientSection::Hidden => state.hide_patient(),
        }
    })
}
