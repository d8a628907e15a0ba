//! # Profile Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` turns search input into a filtered list of stored profiles. It
//! reads snapshots produced by the `store` crate and criteria produced by the
//! `criteria` crate; it never mutates either.
//!
//! Two paths are provided:
//! - [`CandidateFilterEngine`] - the open lookup. Sparse [`RawCriteria`]
//!   (serial number, name, gender, birth date, contact number) are AND-ed in
//!   a fixed order. Criteria that cannot be applied are skipped with a
//!   warning instead of failing the call.
//! - [`SeekerMatcher`] - partner search for a seeker described by
//!   [`criteria::ValidatedCriteria`]: opposite gender, different gothram,
//!   nakshatra and rasi compatibility via a [`CompatibilityChart`], and the
//!   partner age window from [`criteria::AgePolicy`].
//!
//! ## Core Types
//!
//! - [`FilterConfig`]: gender comparison strictness ([`GenderMatch`]) and the
//!   accepted birth date format.
//! - [`FilterOutcome`] / [`FilterReport`]: matches plus per-predicate counts
//!   and skipped predicates.
//! - [`SeekerOutcome`]: resolved [`SeekerProfile`], age window and matches.
//! - [`MatchError`]: configuration and seeker-resolution failures.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{CandidateFilterEngine, RawCriteria};
//! use store::Profile;
//!
//! let profiles = vec![
//!     Profile::new("1", "VM-001", "Lakshmi", "Female", "1996-04-12")
//!         .with_contact("+91 98765 43210"),
//!     Profile::new("2", "VM-002", "Arjun", "Male", "1992-11-02"),
//! ];
//!
//! let query = RawCriteria {
//!     contact_no: Some("987-654".into()),
//!     ..RawCriteria::default()
//! };
//! let hits = CandidateFilterEngine::default().filter_profiles(&profiles, &query);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].serial_no, "VM-001");
//! ```
//!
//! ## Metrics
//!
//! Install a [`FilterMetrics`] implementation with [`set_filter_metrics`] to
//! observe latency and hit counts for every lookup and seeker search.
mod engine;
mod metrics;
pub mod normalize;
mod seeker;
mod types;

pub use crate::engine::CandidateFilterEngine;
pub use crate::metrics::{set_filter_metrics, FilterKind, FilterMetrics, FilterSample};
pub use crate::seeker::{age_on, SeekerMatcher, SeekerOutcome, SeekerProfile, SkippedConstraint};
pub use crate::types::{
    CompatibilityChart, FilterConfig, FilterOutcome, FilterReport, GenderMatch, MatchError,
    PredicateCount, PredicateKind, RawCriteria, SkippedPredicate,
};
