//! # cribl-core
//!
//! Core types and utilities shared by the Cribl control-plane and
//! management-plane clients.
//!
//! ## Modules
//!
//! - [`error`] - Error type and HTTP status code mapping
//! - [`config`] - Validated client configuration
//! - [`security`] - Authentication schemes (OAuth client credentials, bearer token)
//! - [`client`] - Shared HTTP client and builder used by every API crate
//! - [`types`] - Open-shaped response records and list envelopes

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod security;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use security::{SchemeClientOauth, Security};
pub use types::{CriblApi, Entity, ListResponse};
