//! Age-preference field metadata.
//!
//! The preference is one end of a partner age window whose other end is the
//! seeker's own age. Which end the seeker picks depends on gender, so the
//! label, help text and input bounds all change with gender and age. This
//! module only describes the input; [`AgePolicy::partner_window`] turns a
//! chosen preference into the window used for matching.
use serde::{Deserialize, Serialize};

use crate::config::{AgeBounds, AgePolicy};
use crate::types::{parse_age, Gender};

pub const NEUTRAL_LABEL: &str = "Age Preference";
pub const NEUTRAL_HELP: &str = "Select your gender and enter your age to set an age preference.";

/// Which end of the window the preference sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceDirection {
    /// Youngest acceptable partner age.
    Minimum,
    /// Oldest acceptable partner age.
    Maximum,
}

/// Presentation and constraint metadata for the age-preference input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgePreferenceSpec {
    pub label: String,
    pub bounds: Option<AgeBounds>,
    pub help_text: String,
    pub direction: Option<PreferenceDirection>,
}

impl AgePreferenceSpec {
    /// State before gender and age are both known.
    pub fn neutral() -> Self {
        Self {
            label: NEUTRAL_LABEL.to_string(),
            bounds: None,
            help_text: NEUTRAL_HELP.to_string(),
            direction: None,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.bounds.is_none()
    }
}

impl Default for AgePreferenceSpec {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Derives [`AgePreferenceSpec`] from gender and the raw seeker age.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgePreferenceComputer {
    policy: AgePolicy,
}

impl AgePreferenceComputer {
    pub fn new(policy: AgePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AgePolicy {
        &self.policy
    }

    /// Falls back to [`AgePreferenceSpec::neutral`] when gender is missing,
    /// the age does not parse, or the resulting range would be empty.
    pub fn compute(&self, gender: Option<Gender>, seeker_age: &str) -> AgePreferenceSpec {
        let (Some(gender), Some(age)) = (gender, parse_age(seeker_age)) else {
            return AgePreferenceSpec::neutral();
        };
        let Some(bounds) = self.policy.preference_bounds(gender, age) else {
            return AgePreferenceSpec::neutral();
        };

        match gender {
            Gender::Male => AgePreferenceSpec {
                label: "Minimum Partner Age".to_string(),
                help_text: format!(
                    "Results range from the age you choose ({}-{}) up to your age ({age}).",
                    bounds.min, bounds.max
                ),
                bounds: Some(bounds),
                direction: Some(PreferenceDirection::Minimum),
            },
            Gender::Female => AgePreferenceSpec {
                label: "Maximum Partner Age".to_string(),
                help_text: format!(
                    "Results range from your age ({age}) up to the age you choose ({}-{}).",
                    bounds.min, bounds.max
                ),
                bounds: Some(bounds),
                direction: Some(PreferenceDirection::Maximum),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer() -> AgePreferenceComputer {
        AgePreferenceComputer::default()
    }

    #[test]
    fn male_sets_minimum_up_to_own_age() {
        let spec = computer().compute(Some(Gender::Male), "30");
        assert_eq!(spec.bounds, AgeBounds::new(18, 30));
        assert_eq!(spec.direction, Some(PreferenceDirection::Minimum));
        assert!(spec.label.contains("Minimum"));
        assert!(spec.help_text.contains("up to your age (30)"));
    }

    #[test]
    fn female_sets_maximum_from_own_age() {
        let spec = computer().compute(Some(Gender::Female), "30");
        assert_eq!(spec.bounds, AgeBounds::new(30, 75));
        assert_eq!(spec.direction, Some(PreferenceDirection::Maximum));
        assert!(spec.help_text.contains("from your age (30)"));
    }

    #[test]
    fn missing_inputs_give_neutral_preference() {
        assert_eq!(computer().compute(None, ""), AgePreferenceSpec::neutral());
        assert_eq!(computer().compute(Some(Gender::Male), ""), AgePreferenceSpec::neutral());
        assert_eq!(computer().compute(None, "30"), AgePreferenceSpec::neutral());
        assert!(computer().compute(Some(Gender::Female), "thirty").is_neutral());
    }

    #[test]
    fn whitespace_around_age_is_tolerated() {
        let spec = computer().compute(Some(Gender::Male), " 25 ");
        assert_eq!(spec.bounds, AgeBounds::new(18, 25));
    }

    #[test]
    fn empty_range_falls_back_to_neutral() {
        assert!(computer().compute(Some(Gender::Male), "16").is_neutral());
        assert!(computer().compute(Some(Gender::Female), "80").is_neutral());
    }
}
