//! Control-plane client for a Cribl leader.
//!
//! Covers the two operations needed to enumerate worker groups: exchanging a
//! username and password for a bearer token, and listing the groups of a
//! product. The same client works against Cribl.Cloud workspaces
//! (`https://{workspace}-{org}.cribl.cloud/api/v1`) and on-premise leaders.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ControlPlaneClient, ControlPlaneClientBuilder};
pub use models::{AuthToken, LoginInfo, Product};

/// Convenient result alias that reuses the shared Cribl error type.
pub type Result<T> = cribl_core::Result<T>;
