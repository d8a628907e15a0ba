use std::time::Instant;

use chrono::NaiveDate;
use criteria::Gender;
use store::Profile;
use tracing::{debug, info, warn};

use crate::metrics::{self, FilterKind, FilterSample};
use crate::normalize::{digits_only, fold, stored_gender};
use crate::types::{
    supplied, FilterConfig, FilterOutcome, FilterReport, GenderMatch, PredicateCount,
    PredicateKind, RawCriteria, SkippedPredicate,
};


/// A supplied criterion, prepared for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    /// Folded needle.
    SerialNo(String),
    /// Folded needle.
    Name(String),
    Gender(Gender),
    /// Query as given, trimmed; compared verbatim.
    BirthDate(String),
    /// Digits of the query.
    ContactNo(String),
}

impl Predicate {
    fn kind(&self) -> PredicateKind {
        match self {
            Predicate::SerialNo(_) => PredicateKind::SerialNo,
            Predicate::Name(_) => PredicateKind::Name,
            Predicate::Gender(_) => PredicateKind::Gender,
            Predicate::BirthDate(_) => PredicateKind::BirthDate,
            Predicate::ContactNo(_) => PredicateKind::ContactNo,
        }
    }

    fn matches(&self, profile: &Profile, gender_match: GenderMatch) -> bool {
        match self {
            Predicate::SerialNo(needle) => fold(&profile.serial_no).contains(needle.as_str()),
            Predicate::Name(needle) => fold(&profile.name).contains(needle.as_str()),
            Predicate::Gender(gender) => match gender_match {
                GenderMatch::Exact => profile.gender == gender.as_str(),
                GenderMatch::Normalized => stored_gender(&profile.gender) == Some(*gender),
            },
            Predicate::BirthDate(date) => profile.birth_date == *date,
            Predicate::ContactNo(digits) => {
                digits_only(&profile.contact_no).contains(digits.as_str())
            }
        }
    }
}

/// Filters a profile snapshot against an open [`RawCriteria`] lookup.
///
/// Supplied criteria are AND-ed in a fixed order: serial number, name,
/// gender, birth date, contact number. A criterion that cannot be applied
/// (unknown gender token, unparseable date, contact without digits) is
/// skipped with a warning and the rest still narrow the result.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilterEngine {
    config: FilterConfig,
}

impl CandidateFilterEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Matching profiles only.
    pub fn filter_profiles(&self, profiles: &[Profile], criteria: &RawCriteria) -> Vec<Profile> {
        self.filter(profiles, criteria).matches
    }

    /// Matching profiles in snapshot order, with per-predicate counts.
    pub fn filter(&self, profiles: &[Profile], criteria: &RawCriteria) -> FilterOutcome {
        let start = Instant::now();
        let span = tracing::info_span!("matcher.lookup", total = profiles.len());
        let _guard = span.enter();

        if criteria.is_empty() {
            debug!("no lookup criteria supplied; returning full collection");
            let outcome = FilterOutcome {
                matches: profiles.to_vec(),
                report: FilterReport {
                    total: profiles.len(),
                    ..FilterReport::default()
                },
            };
            self.finish(&outcome, start);
            return outcome;
        }

        let (predicates, skipped) = self.compile(criteria);
        for skip in &skipped {
            warn!(
                predicate = skip.predicate.as_str(),
                value = %skip.value,
                reason = %skip.reason,
                "lookup.predicate_skipped"
            );
        }

        let mut remaining: Vec<&Profile> = profiles.iter().collect();
        let mut applied = Vec::with_capacity(predicates.len());
        for predicate in &predicates {
            remaining.retain(|profile| predicate.matches(profile, self.config.gender_match));
            applied.push(PredicateCount {
                predicate: predicate.kind(),
                remaining: remaining.len(),
            });
        }

        let outcome = FilterOutcome {
            matches: remaining.into_iter().cloned().collect(),
            report: FilterReport {
                total: profiles.len(),
                applied,
                skipped,
            },
        };
        self.finish(&outcome, start);
        outcome
    }

    fn compile(&self, criteria: &RawCriteria) -> (Vec<Predicate>, Vec<SkippedPredicate>) {
        let mut predicates = Vec::new();
        let mut skipped = Vec::new();
        let mut skip = |predicate, value: &str, reason: &str| {
            skipped.push(SkippedPredicate {
                predicate,
                value: value.to_string(),
                reason: reason.to_string(),
            })
        };

        if let Some(serial_no) = supplied(&criteria.serial_no) {
            predicates.push(Predicate::SerialNo(fold(serial_no)));
        }

        if let Some(name) = supplied(&criteria.name) {
            predicates.push(Predicate::Name(fold(name)));
        }

        // Blank means not supplied; otherwise the raw token must be canonical.
        if let Some(token) = criteria.gender.as_deref().filter(|raw| !raw.trim().is_empty()) {
            match Gender::from_canonical(token) {
                Some(gender) => predicates.push(Predicate::Gender(gender)),
                None => skip(
                    PredicateKind::Gender,
                    token,
                    "expected 'Male' or 'Female'",
                ),
            }
        }

        if let Some(date) = supplied(&criteria.birth_date) {
            match NaiveDate::parse_from_str(date, &self.config.date_format) {
                Ok(_) => predicates.push(Predicate::BirthDate(date.to_string())),
                Err(err) => skip(
                    PredicateKind::BirthDate,
                    date,
                    &format!("not a valid date: {err}"),
                ),
            }
        }

        if let Some(contact) = supplied(&criteria.contact_no) {
            let digits = digits_only(contact);
            if digits.is_empty() {
                skip(PredicateKind::ContactNo, contact, "contains no digits");
            } else {
                predicates.push(Predicate::ContactNo(digits));
            }
        }

        (predicates, skipped)
    }

    fn finish(&self, outcome: &FilterOutcome, start: Instant) {
        let latency = start.elapsed();
        info!(
            total = outcome.report.total,
            hits = outcome.matches.len(),
            applied = outcome.report.applied.len(),
            skipped = outcome.report.skipped.len(),
            elapsed_micros = latency.as_micros(),
            "lookup_complete"
        );
        metrics::record(FilterSample {
            kind: FilterKind::Lookup,
            latency,
            candidates: outcome.report.total,
            hits: outcome.matches.len(),
            skipped: outcome.report.skipped.len(),
        });
    }
}
