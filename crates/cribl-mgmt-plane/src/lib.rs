//! Management-plane client for Cribl.Cloud organizations.
//!
//! The management plane is served from `https://gateway.{domain}` and is
//! authenticated with OAuth client credentials issued for the organization.

#![deny(missing_docs)]

pub mod client;

pub use client::{MgmtPlaneClient, MgmtPlaneClientBuilder};

/// Convenient result alias that reuses the shared Cribl error type.
pub type Result<T> = cribl_core::Result<T>;
