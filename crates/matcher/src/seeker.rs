//! Seeker-side matching for validated search criteria.
//!
//! Where the lookup engine answers "which profiles look like this query", the
//! seeker matcher answers "which profiles are suitable partners for this
//! seeker". The seeker is either resolved from the store by serial number or
//! described directly by nakshatra criteria.
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use criteria::{AgeBounds, AgePolicy, Gender, ValidatedCriteria};
use serde::Serialize;
use store::Profile;
use tracing::{debug, info, warn};

use crate::metrics::{self, FilterKind, FilterSample};
use crate::normalize::{fold, stored_gender};
use crate::types::{CompatibilityChart, FilterConfig, GenderMatch, MatchError};

/// The person a search is run on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeekerProfile {
    /// Stored profile id when resolved by serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<String>,
    pub gender: Gender,
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gothram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rasi: Option<String>,
}

/// Constraints that could not be applied for a seeker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkippedConstraint {
    /// The seeker's nakshatra is unknown or missing from the chart.
    Nakshatra,
    /// The submitted rasi is missing from the chart.
    Rasi,
}

/// Result of a seeker search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeekerOutcome {
    pub seeker: SeekerProfile,
    /// Partner age window; `None` when no window exists for the seeker.
    pub window: Option<AgeBounds>,
    pub matches: Vec<Profile>,
    pub skipped: Vec<SkippedConstraint>,
}

/// Finds partner candidates for a seeker.
#[derive(Debug, Clone, Default)]
pub struct SeekerMatcher {
    policy: AgePolicy,
    chart: CompatibilityChart,
    filter: FilterConfig,
}

impl SeekerMatcher {
    pub fn new(policy: AgePolicy, chart: CompatibilityChart) -> Self {
        Self {
            policy,
            chart,
            filter: FilterConfig::default(),
        }
    }

    /// Share gender comparison and date format with the lookup engine.
    pub fn with_filter_config(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn chart(&self) -> &CompatibilityChart {
        &self.chart
    }

    /// Candidates from `profiles` for the seeker described by `criteria`,
    /// with ages computed as of `today`. Matches keep snapshot order.
    pub fn candidates(
        &self,
        profiles: &[Profile],
        criteria: &ValidatedCriteria,
        today: NaiveDate,
    ) -> Result<SeekerOutcome, MatchError> {
        let start = Instant::now();
        let span = tracing::info_span!(
            "matcher.seeker",
            mode = criteria.mode().as_str(),
            total = profiles.len()
        );
        let _guard = span.enter();

        let seeker = self.resolve_seeker(profiles, criteria, today)?;
        let mut skipped = Vec::new();

        let nakshatras = seeker
            .nakshatra_id
            .as_deref()
            .and_then(|id| self.chart.compatible_nakshatras(id));
        if nakshatras.is_none() {
            warn!(
                nakshatra_id = seeker.nakshatra_id.as_deref().unwrap_or(""),
                "seeker.nakshatra_constraint_skipped"
            );
            skipped.push(SkippedConstraint::Nakshatra);
        }

        // Rasi only constrains when it was submitted with the criteria.
        let submitted_rasi = match criteria {
            ValidatedCriteria::Nakshatra { rasi, .. } => rasi.as_deref(),
            ValidatedCriteria::Serial { .. } => None,
        };
        let rasis = match submitted_rasi {
            Some(rasi) => {
                let compatible = self.chart.compatible_rasis(rasi);
                if compatible.is_none() {
                    warn!(rasi, "seeker.rasi_constraint_skipped");
                    skipped.push(SkippedConstraint::Rasi);
                }
                compatible
            }
            None => None,
        };

        let window =
            self.policy
                .partner_window(seeker.gender, seeker.age, criteria.age_preference());

        let matches = match window {
            Some(window) => profiles
                .iter()
                .filter(|candidate| {
                    self.is_candidate(candidate, &seeker, window, nakshatras, rasis, today)
                })
                .cloned()
                .collect(),
            None => {
                warn!(
                    gender = seeker.gender.as_str(),
                    age = seeker.age,
                    "seeker.no_partner_window"
                );
                Vec::new()
            }
        };

        let latency = start.elapsed();
        info!(
            total = profiles.len(),
            hits = matches.len(),
            skipped = skipped.len(),
            elapsed_micros = latency.as_micros(),
            "seeker_search_complete"
        );
        metrics::record(FilterSample {
            kind: FilterKind::Seeker,
            latency,
            candidates: profiles.len(),
            hits: matches.len(),
            skipped: skipped.len(),
        });

        Ok(SeekerOutcome {
            seeker,
            window,
            matches,
            skipped,
        })
    }

    fn resolve_seeker(
        &self,
        profiles: &[Profile],
        criteria: &ValidatedCriteria,
        today: NaiveDate,
    ) -> Result<SeekerProfile, MatchError> {
        match criteria {
            ValidatedCriteria::Nakshatra {
                nakshatra_id,
                gender,
                seeker_age,
                gothram,
                rasi,
                ..
            } => Ok(SeekerProfile {
                profile_id: None,
                serial_no: None,
                gender: *gender,
                age: *seeker_age,
                nakshatra_id: Some(nakshatra_id.clone()),
                gothram: gothram.clone(),
                rasi: rasi.clone(),
            }),
            ValidatedCriteria::Serial { serial_no, .. } => {
                let key = fold(serial_no);
                let profile = profiles
                    .iter()
                    .find(|p| fold(&p.serial_no) == key)
                    .ok_or_else(|| MatchError::SeekerNotFound {
                        serial_no: serial_no.clone(),
                    })?;
                let incomplete = |reason: &str| MatchError::IncompleteSeekerProfile {
                    serial_no: profile.serial_no.clone(),
                    reason: reason.to_string(),
                };

                let gender = stored_gender(&profile.gender)
                    .ok_or_else(|| incomplete("gender is missing or unrecognised"))?;
                let age = self
                    .age_of(profile, today)
                    .ok_or_else(|| incomplete("birth date is missing or invalid"))?;
                debug!(profile_id = %profile.id, age, "seeker.resolved");

                Ok(SeekerProfile {
                    profile_id: Some(profile.id.clone()),
                    serial_no: Some(profile.serial_no.clone()),
                    gender,
                    age,
                    nakshatra_id: non_blank(&profile.nakshatra_id),
                    gothram: non_blank(&profile.gothram),
                    rasi: non_blank(&profile.rasi),
                })
            }
        }
    }

    fn is_candidate(
        &self,
        candidate: &Profile,
        seeker: &SeekerProfile,
        window: AgeBounds,
        nakshatras: Option<&[String]>,
        rasis: Option<&[String]>,
        today: NaiveDate,
    ) -> bool {
        if seeker.profile_id.as_deref() == Some(candidate.id.as_str()) {
            return false;
        }

        let wanted = seeker.gender.opposite();
        let gender_ok = match self.filter.gender_match {
            GenderMatch::Exact => candidate.gender == wanted.as_str(),
            GenderMatch::Normalized => stored_gender(&candidate.gender) == Some(wanted),
        };
        if !gender_ok {
            return false;
        }

        if let (Some(own), Some(theirs)) = (&seeker.gothram, &candidate.gothram) {
            if fold(own) == fold(theirs) {
                return false;
            }
        }

        if let Some(allowed) = nakshatras {
            if !listed(allowed, candidate.nakshatra_id.as_deref()) {
                return false;
            }
        }

        if let Some(allowed) = rasis {
            if !listed(allowed, candidate.rasi.as_deref()) {
                return false;
            }
        }

        self.age_of(candidate, today)
            .is_some_and(|age| window.contains(age))
    }

    fn age_of(&self, profile: &Profile, today: NaiveDate) -> Option<u32> {
        let birth =
            NaiveDate::parse_from_str(profile.birth_date.trim(), &self.filter.date_format).ok()?;
        age_on(birth, today)
    }
}

/// Completed years between `birth` and `today`; `None` for future dates.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn listed(allowed: &[String], value: Option<&str>) -> bool {
    match value {
        Some(value) => {
            let value = fold(value);
            allowed.iter().any(|a| fold(a) == value)
        }
        None => false,
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
