use crate::config::ServerConfig;
use crate::error::ServerResult;
use chrono::NaiveDate;
use std::sync::Arc;
use vivaha::SearchPipeline;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Search pipeline (shared across requests)
    pub pipeline: Arc<SearchPipeline>,

    /// Date ages are computed against; today's local date when unset
    pub reference_date: Option<NaiveDate>,
}

impl ServerState {
    /// Create new server state, building the configured profile store
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let search = config
            .search()
            .map_err(|e| crate::error::ServerError::Config(e.to_string()))?;
        let pipeline = SearchPipeline::from_config(&search)?;
        tracing::info!(
            config = search.name.as_deref().unwrap_or("default"),
            "search pipeline ready"
        );

        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create state around an already built pipeline
    pub fn with_pipeline(config: ServerConfig, pipeline: SearchPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            reference_date: None,
        }
    }

    /// Pin the date used for age calculations
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
