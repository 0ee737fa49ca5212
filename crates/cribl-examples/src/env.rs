//! Environment access and `.env` loading.

use anyhow::Context;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of named string settings.
pub trait EnvSource {
    /// Return the value of `name`, or `None` when it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for StaticEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Load a `.env` file into the process environment.
///
/// With an explicit path the file must exist. Without one, `.env` is searched
/// for in the current directory and its parents and silently skipped when
/// absent. Variables already present in the environment are never overridden.
///
/// # Errors
///
/// Returns an error if an explicit file is missing or any file is malformed.
pub fn load_dotenv(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load environment file {}", path.display()))?;
        debug!(path = %path.display(), "loaded environment file");
        return Ok(Some(path.to_path_buf()));
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment file");
            Ok(Some(path))
        }
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err).context("failed to parse .env file"),
    }
}
