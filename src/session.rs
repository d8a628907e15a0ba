//! Search form orchestration.
//!
//! [`SearchForm`] owns one [`CriteriaState`] and at most one active field
//! error, and runs the criteria components in response to form events. Every
//! event returns a [`FormPlan`] describing what the form should look like
//! next; rendering it is the caller's job.

use criteria::{
    AgePreferenceComputer, AgePreferenceSpec, CompatibilityGateResolver, CriteriaConfig,
    CriteriaError, CriteriaState, CriteriaValidator, Field, FieldError, FieldPlan, Gender,
    ModeVisibilityController, RasiGate, SearchMode, StructuralError, ValidatedCriteria, parse_age,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Everything the form needs to render after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormPlan {
    /// `None` until a mode has been selected.
    pub fields: Option<FieldPlan>,
    pub rasi: RasiGate,
    pub age_preference: AgePreferenceSpec,
    /// The error on display, if any; its field holds focus.
    pub error: Option<FieldError>,
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted(ValidatedCriteria),
    /// The first failing rule; `field` should receive focus.
    Rejected { field: Field, message: String },
    Aborted(StructuralError),
}

/// An edit the form refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is not shown in the current search mode")]
    Hidden(Field),
    #[error("{0} is disabled")]
    Disabled(Field),
    #[error("'{value}' is not a valid value for {field}")]
    InvalidValue { field: Field, value: String },
}

/// A live search form.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    state: CriteriaState,
    error: Option<FieldError>,
    visibility: ModeVisibilityController,
    gate: CompatibilityGateResolver,
    ages: AgePreferenceComputer,
    validator: CriteriaValidator,
}

impl SearchForm {
    pub fn new(config: CriteriaConfig) -> Self {
        Self {
            state: CriteriaState::new(),
            error: None,
            visibility: ModeVisibilityController::new(),
            gate: CompatibilityGateResolver::new(),
            ages: AgePreferenceComputer::new(config.age_policy),
            validator: CriteriaValidator::new(config),
        }
    }

    /// Resume a form from previously submitted state.
    pub fn with_state(config: CriteriaConfig, state: CriteriaState) -> Self {
        Self {
            state,
            ..Self::new(config)
        }
    }

    pub fn state(&self) -> &CriteriaState {
        &self.state
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Field that should hold input focus.
    pub fn focus(&self) -> Option<Field> {
        self.error.as_ref().map(|err| err.field)
    }

    /// Current plan without changing anything.
    pub fn plan(&self) -> FormPlan {
        FormPlan {
            fields: self.state.mode.map(|mode| self.visibility.apply(mode)),
            rasi: self
                .gate
                .resolve(self.state.mode, self.state.enable_rasi_compatibility),
            age_preference: self.ages.compute(self.state.gender, &self.state.seeker_age),
            error: self.error.clone(),
        }
    }

    pub fn select_mode(&mut self, mode: SearchMode) -> FormPlan {
        let switch = self.visibility.switch_mode(&mut self.state, mode);
        if switch.plan.clear_error {
            self.error = None;
        }
        FormPlan {
            fields: Some(switch.plan),
            ..self.plan()
        }
    }

    /// Edit one input from its raw text. Blank text empties the field.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<FormPlan, InputError> {
        self.check_editable(field)?;
        let invalid = || InputError::InvalidValue {
            field,
            value: value.to_string(),
        };
        let blank = value.trim().is_empty();

        match field {
            Field::SerialNo => self.state.serial_no = value.to_string(),
            Field::NakshatraId => {
                self.state.nakshatra_id = (!blank).then(|| value.trim().to_string())
            }
            Field::Gender => {
                self.state.gender = if blank {
                    None
                } else {
                    Some(value.trim().parse::<Gender>().map_err(|_| invalid())?)
                }
            }
            Field::SeekerAge => self.state.seeker_age = value.to_string(),
            Field::Gothram => self.state.gothram = value.to_string(),
            Field::EnableRasiCompatibility => {
                self.state.enable_rasi_compatibility = match value.trim() {
                    "true" | "on" | "1" => true,
                    "false" | "off" | "0" | "" => false,
                    _ => return Err(invalid()),
                }
            }
            Field::Rasi => self.state.rasi = value.to_string(),
            Field::AgePreference => {
                self.state.age_preference = if blank {
                    None
                } else {
                    Some(parse_age(value).ok_or_else(invalid)?)
                }
            }
        }

        self.edited(field);
        Ok(self.plan())
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) -> Result<FormPlan, InputError> {
        self.check_editable(Field::Gender)?;
        self.state.gender = gender;
        self.edited(Field::Gender);
        Ok(self.plan())
    }

    /// Toggle the rasi compatibility opt-in. The rasi value is kept when the
    /// gate closes.
    pub fn set_rasi_compatibility(&mut self, enabled: bool) -> Result<FormPlan, InputError> {
        self.check_editable(Field::EnableRasiCompatibility)?;
        self.state.enable_rasi_compatibility = enabled;
        self.edited(Field::EnableRasiCompatibility);
        Ok(self.plan())
    }

    pub fn submit(&mut self) -> Submission {
        match self.validator.validate(&self.state) {
            Ok(criteria) => {
                self.error = None;
                Submission::Accepted(criteria)
            }
            Err(CriteriaError::Field(err)) => {
                let submission = Submission::Rejected {
                    field: err.field,
                    message: err.message.clone(),
                };
                self.error = Some(err);
                submission
            }
            Err(CriteriaError::Structural(err)) => {
                self.error = None;
                Submission::Aborted(err)
            }
        }
    }

    fn check_editable(&self, field: Field) -> Result<(), InputError> {
        let visible = match self.state.mode {
            Some(mode) => self.visibility.apply(mode).disposition(field).is_visible(),
            None => field.owner().is_none(),
        };
        if !visible {
            return Err(InputError::Hidden(field));
        }
        if field == Field::Rasi {
            let gate = self
                .gate
                .resolve(self.state.mode, self.state.enable_rasi_compatibility);
            if !gate.interactable {
                return Err(InputError::Disabled(field));
            }
        }
        Ok(())
    }

    fn edited(&mut self, field: Field) {
        if self.focus() == Some(field) {
            debug!(field = %field, "form.error_cleared");
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use criteria::FieldDisposition;
    use criteria::messages::{MSG_GOTHRAM_REQUIRED, MSG_SERIAL_REQUIRED};

    fn form() -> SearchForm {
        SearchForm::default()
    }

    #[test]
    fn fresh_form_has_no_field_plan() {
        let plan = form().plan();
        assert!(plan.fields.is_none());
        assert!(!plan.rasi.active);
        assert!(plan.age_preference.is_neutral());
        assert!(plan.error.is_none());
    }

    #[test]
    fn submit_without_mode_aborts() {
        let mut form = form();
        assert_eq!(
            form.submit(),
            Submission::Aborted(StructuralError::NoModeSelected)
        );
        assert!(form.error().is_none());
    }

    #[test]
    fn hidden_fields_reject_edits() {
        let mut form = form();
        form.select_mode(SearchMode::Serial);
        assert_eq!(
            form.set_field(Field::Gothram, "Atreya"),
            Err(InputError::Hidden(Field::Gothram))
        );
        assert_eq!(
            form.set_field(Field::Rasi, "Mesha"),
            Err(InputError::Hidden(Field::Rasi))
        );
    }

    #[test]
    fn rasi_is_disabled_until_compatibility_is_on() {
        let mut form = form();
        form.select_mode(SearchMode::Nakshatra);
        assert_eq!(
            form.set_field(Field::Rasi, "Mesha"),
            Err(InputError::Disabled(Field::Rasi))
        );

        let plan = form.set_rasi_compatibility(true).unwrap();
        assert!(plan.rasi.required);
        form.set_field(Field::Rasi, "Mesha").unwrap();

        // Closing the gate keeps the value.
        let plan = form.set_rasi_compatibility(false).unwrap();
        assert!(!plan.rasi.active);
        assert_eq!(form.state().rasi, "Mesha");
    }

    #[test]
    fn rejection_sets_error_and_focus() {
        let mut form = form();
        form.select_mode(SearchMode::Serial);
        assert_eq!(
            form.submit(),
            Submission::Rejected {
                field: Field::SerialNo,
                message: MSG_SERIAL_REQUIRED.to_string(),
            }
        );
        assert_eq!(form.focus(), Some(Field::SerialNo));
        assert_eq!(
            form.plan().error.map(|e| e.field),
            Some(Field::SerialNo)
        );
    }

    #[test]
    fn editing_the_errored_field_clears_error() {
        let mut form = form();
        form.select_mode(SearchMode::Serial);
        form.submit();

        form.set_field(Field::AgePreference, "30").unwrap();
        assert_eq!(form.focus(), Some(Field::SerialNo));

        let plan = form.set_field(Field::SerialNo, "VM-001").unwrap();
        assert!(plan.error.is_none());
        assert!(matches!(form.submit(), Submission::Accepted(_)));
    }

    #[test]
    fn mode_change_clears_error_and_other_mode_fields() {
        let mut form = form();
        form.select_mode(SearchMode::Nakshatra);
        form.set_field(Field::NakshatraId, "4").unwrap();
        form.set_gender(Some(Gender::Male)).unwrap();
        form.set_field(Field::SeekerAge, "30").unwrap();
        assert_eq!(
            form.submit(),
            Submission::Rejected {
                field: Field::Gothram,
                message: MSG_GOTHRAM_REQUIRED.to_string(),
            }
        );

        let plan = form.select_mode(SearchMode::Serial);
        assert!(plan.error.is_none());
        let fields = plan.fields.unwrap();
        assert_eq!(
            fields.disposition(Field::NakshatraId),
            FieldDisposition::HiddenCleared
        );
        assert_eq!(form.state().nakshatra_id, None);
        assert!(form.state().seeker_age.is_empty());
    }

    #[test]
    fn reselecting_active_mode_keeps_error() {
        let mut form = form();
        form.select_mode(SearchMode::Serial);
        form.submit();
        form.select_mode(SearchMode::Serial);
        assert_eq!(form.focus(), Some(Field::SerialNo));
    }

    #[test]
    fn age_preference_follows_gender_and_age() {
        let mut form = form();
        form.select_mode(SearchMode::Nakshatra);
        form.set_field(Field::SeekerAge, "30").unwrap();
        assert!(form.plan().age_preference.is_neutral());

        let plan = form.set_field(Field::Gender, "Female").unwrap();
        assert_eq!(plan.age_preference.label, "Maximum Partner Age");
        assert_eq!(
            plan.age_preference.bounds,
            criteria::AgeBounds::new(30, 75)
        );
    }

    #[test]
    fn invalid_raw_values_are_refused() {
        let mut form = form();
        form.select_mode(SearchMode::Nakshatra);
        assert!(matches!(
            form.set_field(Field::Gender, "male"),
            Err(InputError::InvalidValue { .. })
        ));
        assert!(matches!(
            form.set_field(Field::AgePreference, "thirty"),
            Err(InputError::InvalidValue { .. })
        ));
        assert!(form.state().gender.is_none());
    }
}
