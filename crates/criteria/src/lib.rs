//! Search criteria for profile matching.
//!
//! This crate holds the decision logic behind the two-mode search form. Every
//! component is a pure function over [`CriteriaState`] that returns a
//! describable result; applying that result (showing fields, focusing an
//! input, sending a request) is the caller's job.
//!
//! ## Components
//!
//! - [`ModeVisibilityController`] - mode to [`FieldPlan`], plus selective
//!   clearing on a mode switch
//! - [`CompatibilityGateResolver`] - whether the rasi input is active
//! - [`AgePreferenceComputer`] - label, bounds and help text for the age
//!   preference
//! - [`CriteriaValidator`] - fail-fast validation into [`ValidatedCriteria`]
//!
//! ## Example
//!
//! ```
//! use criteria::{
//!     CriteriaState, CriteriaValidator, Field, Gender, ModeVisibilityController, SearchMode,
//! };
//!
//! let mut state = CriteriaState::new();
//! let switch = ModeVisibilityController::new().switch_mode(&mut state, SearchMode::Nakshatra);
//! assert!(switch.plan.disposition(Field::Gothram).is_required());
//!
//! state.nakshatra_id = Some("4".into());
//! state.gender = Some(Gender::Male);
//! state.seeker_age = "17".into();
//! state.gothram = "Atreya".into();
//!
//! let err = CriteriaValidator::default().validate(&state).unwrap_err();
//! assert_eq!(err.field(), Some(Field::SeekerAge));
//! ```
mod age;
mod config;
mod error;
mod gate;
mod plan;
mod types;
mod validate;

pub use crate::age::{AgePreferenceComputer, AgePreferenceSpec, PreferenceDirection};
pub use crate::config::{AgeBounds, AgePolicy, ConfigError, CriteriaConfig};
pub use crate::error::{CriteriaError, FieldError, StructuralError};
pub use crate::gate::{CompatibilityGateResolver, RasiGate, RASI_LABEL, RASI_LABEL_REQUIRED};
pub use crate::plan::{
    FieldDisposition, FieldEntry, FieldPlan, ModeSwitch, ModeVisibilityController, Section,
    SectionPlan,
};
pub use crate::types::{
    parse_age, CriteriaState, Field, Gender, SearchMode, UnknownToken, ValidatedCriteria,
};
pub use crate::validate::CriteriaValidator;

/// User-facing validation messages.
pub mod messages {
    pub use crate::validate::{
        MSG_AGE_REQUIRED, MSG_GENDER_REQUIRED, MSG_GOTHRAM_REQUIRED, MSG_NAKSHATRA_REQUIRED,
        MSG_RASI_REQUIRED, MSG_SERIAL_REQUIRED,
    };
}
