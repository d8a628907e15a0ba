use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use store::Profile;
use thiserror::Error;

use crate::normalize::fold;

/// Sparse query for the open profile lookup.
///
/// Field names double as the HTTP query parameter names. A field counts as
/// supplied when it is present and not blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCriteria {
    pub serial_no: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub contact_no: Option<String>,
}

impl RawCriteria {
    /// `true` when no field is supplied.
    pub fn is_empty(&self) -> bool {
        [
            &self.serial_no,
            &self.name,
            &self.gender,
            &self.birth_date,
            &self.contact_no,
        ]
        .iter()
        .all(|value| supplied(value).is_none())
    }
}

/// Trimmed value of a supplied field.
pub(crate) fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// How the gender predicate compares against stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderMatch {
    /// Stored values are trimmed, stripped of invisible characters and
    /// case-folded before comparison.
    #[default]
    Normalized,
    /// Byte-for-byte equality with the canonical token.
    Exact,
}

/// Configuration for the open lookup filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub gender_match: GenderMatch,
    /// `chrono` format a birth date query must parse with.
    pub date_format: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            gender_match: GenderMatch::Normalized,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.date_format.trim().is_empty() {
            return Err(MatchError::InvalidConfig(
                "date_format must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Compatibility lookups for nakshatra and rasi.
///
/// Each key lists the values a seeker with that key is compatible with.
/// Keys and values are compared trimmed and case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityChart {
    pub nakshatra: BTreeMap<String, Vec<String>>,
    pub rasi: BTreeMap<String, Vec<String>>,
}

impl CompatibilityChart {
    pub fn compatible_nakshatras(&self, nakshatra_id: &str) -> Option<&[String]> {
        lookup(&self.nakshatra, nakshatra_id)
    }

    pub fn compatible_rasis(&self, rasi: &str) -> Option<&[String]> {
        lookup(&self.rasi, rasi)
    }
}

fn lookup<'a>(table: &'a BTreeMap<String, Vec<String>>, key: &str) -> Option<&'a [String]> {
    let key = fold(key);
    table
        .iter()
        .find(|(candidate, _)| fold(candidate) == key)
        .map(|(_, values)| values.as_slice())
}

/// Predicates of the open lookup, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    SerialNo,
    Name,
    Gender,
    BirthDate,
    ContactNo,
}

impl PredicateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateKind::SerialNo => "serial_no",
            PredicateKind::Name => "name",
            PredicateKind::Gender => "gender",
            PredicateKind::BirthDate => "birth_date",
            PredicateKind::ContactNo => "contact_no",
        }
    }
}

/// A predicate that was supplied but could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPredicate {
    pub predicate: PredicateKind,
    pub value: String,
    pub reason: String,
}

/// Profiles left after a predicate ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredicateCount {
    pub predicate: PredicateKind,
    pub remaining: usize,
}

/// Diagnostics for one lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub total: usize,
    pub applied: Vec<PredicateCount>,
    pub skipped: Vec<SkippedPredicate>,
}

/// Result of a lookup: matches in store order, plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub matches: Vec<Profile>,
    pub report: FilterReport,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("no profile with serial number '{serial_no}'")]
    SeekerNotFound { serial_no: String },
    #[error("profile '{serial_no}' cannot be used as a seeker: {reason}")]
    IncompleteSeekerProfile { serial_no: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_not_supplied() {
        let criteria = RawCriteria {
            name: Some("   ".into()),
            contact_no: Some(String::new()),
            ..RawCriteria::default()
        };
        assert!(criteria.is_empty());

        let criteria = RawCriteria {
            gender: Some("male".into()),
            ..RawCriteria::default()
        };
        assert!(!criteria.is_empty());
    }

    #[test]
    fn chart_lookup_ignores_case_and_padding() {
        let mut chart = CompatibilityChart::default();
        chart
            .rasi
            .insert("Mesha".into(), vec!["Simha".into(), "Dhanu".into()]);
        assert_eq!(
            chart.compatible_rasis(" mesha "),
            Some(&["Simha".to_string(), "Dhanu".to_string()][..])
        );
        assert_eq!(chart.compatible_rasis("Vrishabha"), None);
    }

    #[test]
    fn filter_config_deserializes_with_defaults() {
        let config: FilterConfig = serde_json::from_str(r#"{"gender_match":"exact"}"#).unwrap();
        assert_eq!(config.gender_match, GenderMatch::Exact);
        assert_eq!(config.date_format, "%Y-%m-%d");
    }

    #[test]
    fn filter_config_rejects_empty_date_format() {
        let config = FilterConfig {
            date_format: " ".into(),
            ..FilterConfig::default()
        };
        assert!(matches!(config.validate(), Err(MatchError::InvalidConfig(_))));
    }
}
