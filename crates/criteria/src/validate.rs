//! Fail-fast validation of a submitted [`CriteriaState`].
//!
//! Rules run in a fixed order and the first failure is returned. Nakshatra
//! mode order:
//!
//! 1. nakshatra selected
//! 2. gender selected
//! 3. seeker age present
//! 4. seeker age is an integer within the policy range
//! 5. gothram present (only when the gothram field is rendered)
//! 6. rasi present (only when rasi compatibility is switched on)
//! 7. age preference, if given, within the computed bounds
use tracing::{debug, warn};

use crate::age::AgePreferenceComputer;
use crate::config::CriteriaConfig;
use crate::error::{CriteriaError, FieldError, StructuralError};
use crate::gate::CompatibilityGateResolver;
use crate::types::{parse_age, CriteriaState, Field, SearchMode, ValidatedCriteria};

pub const MSG_SERIAL_REQUIRED: &str = "Please enter a Serial No.";
pub const MSG_NAKSHATRA_REQUIRED: &str = "Please select a Nakshatra.";
pub const MSG_GENDER_REQUIRED: &str = "Please select a gender.";
pub const MSG_AGE_REQUIRED: &str = "Please enter your age.";
pub const MSG_GOTHRAM_REQUIRED: &str = "Please enter your Gothram.";
pub const MSG_RASI_REQUIRED: &str = "Please select a Rasi / Lagnam for compatibility matching.";

/// Validates a criteria state against mode-specific rules.
#[derive(Debug, Clone, Default)]
pub struct CriteriaValidator {
    config: CriteriaConfig,
}

impl CriteriaValidator {
    pub fn new(config: CriteriaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CriteriaConfig {
        &self.config
    }

    pub fn validate(&self, state: &CriteriaState) -> Result<ValidatedCriteria, CriteriaError> {
        let result = match state.mode {
            None => Err(CriteriaError::Structural(StructuralError::NoModeSelected)),
            Some(SearchMode::Serial) => self.validate_serial(state),
            Some(SearchMode::Nakshatra) => self.validate_nakshatra(state),
        };

        match &result {
            Ok(criteria) => debug!(mode = %criteria.mode(), "criteria.accepted"),
            Err(CriteriaError::Field(err)) => {
                debug!(field = %err.field, message = %err.message, "criteria.rejected")
            }
            Err(err @ CriteriaError::Structural(_)) => warn!(error = %err, "criteria.aborted"),
        }
        result
    }

    fn validate_serial(&self, state: &CriteriaState) -> Result<ValidatedCriteria, CriteriaError> {
        let serial_no = required_text(&state.serial_no, Field::SerialNo, MSG_SERIAL_REQUIRED)?;
        Ok(ValidatedCriteria::Serial {
            serial_no,
            age_preference: state.age_preference,
        })
    }

    fn validate_nakshatra(
        &self,
        state: &CriteriaState,
    ) -> Result<ValidatedCriteria, CriteriaError> {
        let policy = &self.config.age_policy;

        let nakshatra_id = state
            .nakshatra_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| FieldError::new(Field::NakshatraId, MSG_NAKSHATRA_REQUIRED))?
            .to_string();

        let gender = state
            .gender
            .ok_or_else(|| FieldError::new(Field::Gender, MSG_GENDER_REQUIRED))?;

        if state.seeker_age.trim().is_empty() {
            return Err(FieldError::new(Field::SeekerAge, MSG_AGE_REQUIRED).into());
        }
        let seeker_age = parse_age(&state.seeker_age)
            .filter(|age| policy.accepts_seeker_age(*age))
            .ok_or_else(|| {
                FieldError::new(
                    Field::SeekerAge,
                    format!(
                        "Please enter a valid age between {} and {}.",
                        policy.min_seeker_age, policy.max_seeker_age
                    ),
                )
            })?;

        let gothram = if self.config.gothram_field {
            Some(required_text(
                &state.gothram,
                Field::Gothram,
                MSG_GOTHRAM_REQUIRED,
            )?)
        } else {
            non_blank(&state.gothram)
        };

        let gate = CompatibilityGateResolver::new()
            .resolve(state.mode, state.enable_rasi_compatibility);
        let rasi = if gate.required {
            Some(required_text(&state.rasi, Field::Rasi, MSG_RASI_REQUIRED)?)
        } else {
            None
        };

        let spec = AgePreferenceComputer::new(*policy).compute(Some(gender), &state.seeker_age);
        let age_preference = match (state.age_preference, spec.bounds) {
            (Some(preference), Some(bounds)) if !bounds.contains(preference) => {
                return Err(FieldError::new(
                    Field::AgePreference,
                    format!(
                        "Age preference must be between {} and {}.",
                        bounds.min, bounds.max
                    ),
                )
                .into());
            }
            (Some(preference), Some(_)) => Some(preference),
            (Some(preference), None) => {
                debug!(preference, seeker_age, "criteria.age_preference_dropped");
                None
            }
            (None, _) => None,
        };

        Ok(ValidatedCriteria::Nakshatra {
            nakshatra_id,
            gender,
            seeker_age,
            gothram,
            rasi,
            age_preference,
        })
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required_text(raw: &str, field: Field, message: &str) -> Result<String, FieldError> {
    non_blank(raw).ok_or_else(|| FieldError::new(field, message))
}
