//! Credential loading and placeholder detection.
//!
//! Every variable has a documented default. Defaults for secrets and
//! identifiers start with [`PLACEHOLDER_PREFIX`] so an unconfigured run is
//! caught before any request is sent.

use crate::env::EnvSource;
use std::fmt;
use thiserror::Error;

/// Prefix marking a value as "not configured yet".
pub const PLACEHOLDER_PREFIX: &str = "your-";

/// A named environment variable and its documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvVar {
    /// Variable name.
    pub name: &'static str,
    /// Value substituted when the variable is unset or empty.
    pub default: &'static str,
    /// Whether a missing or placeholder value blocks the run.
    pub required: bool,
}

impl EnvVar {
    /// A variable that must be configured.
    #[must_use]
    pub const fn required(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default,
            required: true,
        }
    }

    /// A variable whose default is usable as-is.
    #[must_use]
    pub const fn optional(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default,
            required: false,
        }
    }
}

/// Whether a resolved value still needs to be configured.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    value.trim().is_empty() || value.starts_with(PLACEHOLDER_PREFIX)
}

/// Required variables were unset or still hold their placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing credentials: {}", .missing.join(", "))]
pub struct MissingCredentials {
    /// Variables that failed validation.
    pub missing: Vec<&'static str>,
    /// Every variable the run requires, in documented order.
    pub required: Vec<&'static str>,
}

/// Resolved values for a fixed set of variables.
#[derive(Clone)]
pub struct Credentials {
    values: Vec<(EnvVar, String)>,
}

impl Credentials {
    /// Resolve each variable, substituting its default when unset or empty.
    #[must_use]
    pub fn load(vars: &[EnvVar], env: &dyn EnvSource) -> Self {
        let values = vars
            .iter()
            .map(|var| {
                let value = env
                    .var(var.name)
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| var.default.to_string());
                (*var, value)
            })
            .collect();

        Self { values }
    }

    /// Resolved value of `name`; empty when `name` was not part of the load.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(var, _)| var.name == name)
            .map_or("", |(_, value)| value.as_str())
    }

    /// Check every required value against [`is_placeholder`].
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentials`] naming each offending variable.
    pub fn validate(&self) -> Result<(), MissingCredentials> {
        let missing: Vec<&'static str> = self
            .values
            .iter()
            .filter(|(var, value)| var.required && is_placeholder(value))
            .map(|(var, _)| var.name)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(MissingCredentials {
            missing,
            required: self.required_names(),
        })
    }

    fn required_names(&self) -> Vec<&'static str> {
        self.values
            .iter()
            .filter(|(var, _)| var.required)
            .map(|(var, _)| var.name)
            .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(|(var, _)| var.name))
            .finish()
    }
}
