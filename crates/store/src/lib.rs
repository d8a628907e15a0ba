//! Profile collection access.
//!
//! Search only ever needs one operation from persistence: read every profile
//! as an ordered snapshot. [`ProfileStore`] captures that, and
//! [`StoreConfig`] builds one of the bundled backends:
//!
//! - [`InMemoryStore`] - a `RwLock<Vec<Profile>>`, seeded by the caller
//! - [`JsonFileStore`] - a JSON array on disk, re-read on every call
//!
//! ```
//! use store::{InMemoryStore, Profile, ProfileStore};
//!
//! let store = InMemoryStore::with_profiles(vec![
//!     Profile::new("1", "VM-001", "Lakshmi", "Female", "1996-04-12"),
//! ]);
//! assert_eq!(store.list_all().unwrap().len(), 1);
//! ```
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

mod profile;

pub use crate::profile::Profile;

/// Errors surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read profiles from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode profiles from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}

/// Read-only access to the full profile collection.
pub trait ProfileStore: Send + Sync {
    /// Every profile, in storage order. The returned vector is a snapshot;
    /// later writes to the backend do not affect it.
    fn list_all(&self) -> Result<Vec<Profile>, StoreError>;
}

/// Configuration for selecting and building a backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Empty in-memory store; callers seed it through [`InMemoryStore`].
    #[default]
    InMemory,
    /// JSON array of profiles at `path`.
    JsonFile { path: PathBuf },
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    pub fn json_file<P: Into<PathBuf>>(path: P) -> Self {
        StoreConfig::JsonFile { path: path.into() }
    }

    /// Build the configured backend. The JSON backend is checked for
    /// readability up front so misconfiguration fails at startup.
    pub fn build(&self) -> Result<Box<dyn ProfileStore>, StoreError> {
        match self {
            StoreConfig::InMemory => Ok(Box::new(InMemoryStore::new())),
            StoreConfig::JsonFile { path } => {
                let store = JsonFileStore::new(path);
                store.list_all()?;
                Ok(Box::new(store))
            }
        }
    }
}

/// An in-memory store using a `RwLock` around a `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: RwLock<Vec<Profile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    /// Replace the whole collection.
    pub fn replace_all(&self, profiles: Vec<Profile>) -> Result<(), StoreError> {
        *self
            .profiles
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))? = profiles;
        Ok(())
    }

    pub fn push(&self, profile: Profile) -> Result<(), StoreError> {
        self.profiles
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .push(profile);
        Ok(())
    }
}

impl ProfileStore for InMemoryStore {
    fn list_all(&self) -> Result<Vec<Profile>, StoreError> {
        let guard = self
            .profiles
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.clone())
    }
}

/// Profiles held as a JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileStore {
    fn list_all(&self) -> Result<Vec<Profile>, StoreError> {
        let raw = fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let profiles: Vec<Profile> =
            serde_json::from_slice(&raw).map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = profiles.len(), "store.snapshot");
        Ok(profiles)
    }
}
