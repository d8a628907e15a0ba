//! Vivaha Server - HTTP REST API for profile search
//!
//! This crate exposes the search pipeline over HTTP:
//!
//! - **Profile lookup**: open filtering on serial number, name, gender,
//!   birth date and contact number
//! - **Criteria**: form plans (field visibility, rasi gate, age preference)
//!   and fail-fast validation
//! - **Search**: validated seeker search over the profile store
//! - **Health**: liveness and readiness probes
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (profile store readable)
//! - `GET /api/v1/profiles/search` - Open profile lookup
//! - `POST /api/v1/criteria/plan` - Form plan for a criteria state
//! - `POST /api/v1/criteria/validate` - Validate a criteria state
//! - `POST /api/v1/search` - Seeker search
//!
//! Errors use one body shape:
//! `{"error": {"code": "...", "message": "...", "field": "..."}}`, where
//! `field` is present only for validation errors.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
