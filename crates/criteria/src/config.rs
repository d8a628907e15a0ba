//! Configuration for criteria evaluation.
//!
//! [`CriteriaConfig`] carries the age policy and form layout switches used by
//! the age computer and the validator. Defaults reproduce the production
//! rules: seekers aged 18..=100, partner ages floored at 18 and capped at 75,
//! and a rendered gothram field.
//!
//! ```rust
//! use criteria::CriteriaConfig;
//!
//! let config = CriteriaConfig::default();
//! config.validate().expect("default config is valid");
//! assert_eq!(config.age_policy.max_partner_age, 75);
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Gender;

/// Age limits shared by the age-preference computer and the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgePolicy {
    /// Youngest accepted seeker age.
    pub min_seeker_age: u32,
    /// Oldest accepted seeker age.
    pub max_seeker_age: u32,
    /// Floor of any partner age window.
    pub min_partner_age: u32,
    /// Ceiling of any partner age window.
    pub max_partner_age: u32,
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self {
            min_seeker_age: 18,
            max_seeker_age: 100,
            min_partner_age: 18,
            max_partner_age: 75,
        }
    }
}

/// Inclusive partner age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBounds {
    pub min: u32,
    pub max: u32,
}

impl AgeBounds {
    /// `None` when `min > max`.
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn contains(&self, age: u32) -> bool {
        (self.min..=self.max).contains(&age)
    }

    pub fn clamp(&self, age: u32) -> u32 {
        age.clamp(self.min, self.max)
    }
}

impl AgePolicy {
    pub fn accepts_seeker_age(&self, age: u32) -> bool {
        (self.min_seeker_age..=self.max_seeker_age).contains(&age)
    }

    /// Range the age-preference input may take for this seeker.
    ///
    /// Men choose the youngest acceptable partner age, so the range runs from
    /// the floor up to their own age. Women choose the oldest acceptable age,
    /// from their own age up to the ceiling.
    pub fn preference_bounds(&self, gender: Gender, seeker_age: u32) -> Option<AgeBounds> {
        match gender {
            Gender::Male => AgeBounds::new(self.min_partner_age, seeker_age),
            Gender::Female => AgeBounds::new(seeker_age, self.max_partner_age),
        }
    }

    /// Closed window of candidate ages for a seeker.
    ///
    /// The preference is the open end of the window; the other end is the
    /// seeker's own age. A missing preference leaves the open end at the
    /// policy floor or ceiling, and an out-of-range preference is clamped.
    pub fn partner_window(
        &self,
        gender: Gender,
        seeker_age: u32,
        preference: Option<u32>,
    ) -> Option<AgeBounds> {
        let bounds = self.preference_bounds(gender, seeker_age)?;
        match gender {
            Gender::Male => {
                let min = preference.map_or(bounds.min, |p| bounds.clamp(p));
                AgeBounds::new(min, seeker_age)
            }
            Gender::Female => {
                let max = preference.map_or(bounds.max, |p| bounds.clamp(p));
                AgeBounds::new(seeker_age, max)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_seeker_age > self.max_seeker_age {
            return Err(ConfigError::InvalidAgeRange {
                name: "seeker",
                min: self.min_seeker_age,
                max: self.max_seeker_age,
            });
        }
        if self.min_partner_age > self.max_partner_age {
            return Err(ConfigError::InvalidAgeRange {
                name: "partner",
                min: self.min_partner_age,
                max: self.max_partner_age,
            });
        }
        Ok(())
    }
}

/// Runtime configuration for criteria planning and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Age limits.
    pub age_policy: AgePolicy,
    /// Whether the gothram input is rendered in nakshatra mode. When it is
    /// not, the validator skips the gothram rule.
    pub gothram_field: bool,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            version: 1,
            age_policy: AgePolicy::default(),
            gothram_field: true,
        }
    }
}

impl CriteriaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion(self.version));
        }
        self.age_policy.validate()
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config version must be >= 1, got {0}")]
    InvalidVersion(u32),
    #[error("{name} age range is empty: min {min} > max {max}")]
    InvalidAgeRange {
        name: &'static str,
        min: u32,
        max: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CriteriaConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_partner_range() {
        let config = CriteriaConfig {
            age_policy: AgePolicy {
                min_partner_age: 80,
                ..AgePolicy::default()
            },
            ..CriteriaConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidAgeRange {
                name: "partner",
                min: 80,
                max: 75
            })
        );
    }

    #[test]
    fn partner_window_defaults_to_open_end() {
        let policy = AgePolicy::default();
        assert_eq!(
            policy.partner_window(Gender::Male, 30, None),
            AgeBounds::new(18, 30)
        );
        assert_eq!(
            policy.partner_window(Gender::Female, 30, None),
            AgeBounds::new(30, 75)
        );
    }

    #[test]
    fn partner_window_clamps_preference() {
        let policy = AgePolicy::default();
        assert_eq!(
            policy.partner_window(Gender::Male, 30, Some(25)),
            AgeBounds::new(25, 30)
        );
        assert_eq!(
            policy.partner_window(Gender::Male, 30, Some(40)),
            AgeBounds::new(30, 30)
        );
        assert_eq!(
            policy.partner_window(Gender::Female, 30, Some(90)),
            AgeBounds::new(30, 75)
        );
    }

    #[test]
    fn no_window_when_bounds_are_empty() {
        let policy = AgePolicy::default();
        assert_eq!(policy.partner_window(Gender::Male, 16, None), None);
        assert_eq!(policy.partner_window(Gender::Female, 80, None), None);
    }

    #[test]
    fn parses_partial_yaml_like_json() {
        let config: CriteriaConfig =
            serde_json::from_str(r#"{"gothram_field": false}"#).unwrap();
        assert!(!config.gothram_field);
        assert_eq!(config.age_policy, AgePolicy::default());
    }
}
