//! End-to-end search over a profile store.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use criteria::{
    CriteriaConfig, CriteriaError, CriteriaState, CriteriaValidator, ValidatedCriteria,
};
use matcher::{CandidateFilterEngine, FilterOutcome, RawCriteria, SeekerMatcher, SeekerOutcome};
use store::ProfileStore;
use tracing::{info, warn};

use crate::SearchError;
use crate::config::VivahaConfig;
use crate::session::SearchForm;

/// Ties a [`ProfileStore`] to the lookup engine, the validator and the
/// seeker matcher. Each call takes a fresh snapshot of the store.
#[derive(Clone)]
pub struct SearchPipeline {
    store: Arc<dyn ProfileStore>,
    criteria: CriteriaConfig,
    validator: CriteriaValidator,
    engine: CandidateFilterEngine,
    seeker: SeekerMatcher,
}

impl SearchPipeline {
    pub fn new(store: Arc<dyn ProfileStore>, config: &VivahaConfig) -> Self {
        Self {
            store,
            criteria: config.criteria.clone(),
            validator: CriteriaValidator::new(config.criteria.clone()),
            engine: CandidateFilterEngine::new(config.filter.clone()),
            seeker: SeekerMatcher::new(
                config.criteria.age_policy,
                config.compatibility.clone(),
            )
            .with_filter_config(config.filter.clone()),
        }
    }

    /// Validate `config` and build the configured store backend.
    pub fn from_config(config: &VivahaConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let store: Arc<dyn ProfileStore> = Arc::from(config.store.build()?);
        Ok(Self::new(store, config))
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// A new form sharing this pipeline's criteria rules.
    pub fn form(&self) -> SearchForm {
        SearchForm::new(self.criteria.clone())
    }

    /// A form resumed from `state`.
    pub fn resume_form(&self, state: CriteriaState) -> SearchForm {
        SearchForm::with_state(self.criteria.clone(), state)
    }

    pub fn validate(&self, state: &CriteriaState) -> Result<ValidatedCriteria, CriteriaError> {
        self.validator.validate(state)
    }

    /// Open lookup over the whole collection.
    pub fn lookup(&self, criteria: &RawCriteria) -> Result<FilterOutcome, SearchError> {
        let profiles = self.store.list_all().inspect_err(|err| {
            warn!(error = %err, "pipeline.snapshot_failed");
        })?;
        Ok(self.engine.filter(&profiles, criteria))
    }

    /// Validate `state`, then find candidates for the seeker as of `today`.
    pub fn search(
        &self,
        state: &CriteriaState,
        today: NaiveDate,
    ) -> Result<SeekerOutcome, SearchError> {
        let criteria = self.validate(state)?;
        self.search_validated(&criteria, today)
    }

    pub fn search_validated(
        &self,
        criteria: &ValidatedCriteria,
        today: NaiveDate,
    ) -> Result<SeekerOutcome, SearchError> {
        let start = Instant::now();
        let profiles = self.store.list_all().inspect_err(|err| {
            warn!(error = %err, "pipeline.snapshot_failed");
        })?;
        let outcome = self.seeker.candidates(&profiles, criteria, today)?;
        info!(
            mode = %criteria.mode(),
            hits = outcome.matches.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "search_complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use criteria::{Gender, SearchMode};
    use store::{InMemoryStore, Profile};

    fn pipeline() -> SearchPipeline {
        let store = InMemoryStore::with_profiles(vec![
            Profile::new("1", "VM-001", "Lakshmi", "Female", "1996-04-12").with_gothram("Kashyapa"),
            Profile::new("2", "VM-002", "Arjun", "Male", "1992-11-02").with_gothram("Atreya"),
        ]);
        SearchPipeline::new(Arc::new(store), &VivahaConfig::default())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn lookup_reads_current_snapshot() {
        let outcome = pipeline()
            .lookup(&RawCriteria {
                name: Some("arjun".into()),
                ..RawCriteria::default()
            })
            .unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.report.total, 2);
    }

    #[test]
    fn search_validates_before_matching() {
        let state = CriteriaState::with_mode(SearchMode::Nakshatra);
        let err = pipeline().search(&state, today()).unwrap_err();
        assert!(matches!(err, SearchError::Criteria(_)));
    }

    #[test]
    fn serial_search_finds_partner() {
        let mut state = CriteriaState::with_mode(SearchMode::Serial);
        state.serial_no = "VM-002".into();
        let outcome = pipeline().search(&state, today()).unwrap();
        assert_eq!(outcome.seeker.gender, Gender::Male);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].serial_no, "VM-001");
    }

    #[test]
    fn from_config_builds_in_memory_store() {
        let pipeline = SearchPipeline::from_config(&VivahaConfig::default()).unwrap();
        assert!(pipeline.store().list_all().unwrap().is_empty());
    }
}
