//! # cribl-examples
//!
//! Example flows that list Cribl worker groups and workspaces.
//!
//! Three variants are provided:
//!
//! - cloud worker groups, authenticated with OAuth client credentials
//! - on-premise worker groups, authenticated by exchanging a username and
//!   password for a bearer token
//! - management-plane workspaces, authenticated with OAuth client credentials
//!
//! Every flow reads its settings from the environment, refuses to send a
//! request while a required value still holds its placeholder, lists exactly
//! one page and prints a plain-text report.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod credentials;
pub mod env;
pub mod factory;
pub mod lister;
pub mod report;
pub mod runner;
pub mod session;
pub mod settings;

pub use credentials::{Credentials, EnvVar, MissingCredentials};
pub use env::{EnvSource, ProcessEnv, StaticEnv};
pub use report::ReportStyle;
pub use runner::RunOutcome;
pub use session::{AuthenticatedSession, UnauthenticatedSession};
