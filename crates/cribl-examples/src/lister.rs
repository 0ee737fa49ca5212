//! Listing seams used by the runner.
//!
//! Each variant lists through a trait so the runner can be exercised without a
//! network. The unauthenticated on-premise session deliberately has no
//! implementation.

use crate::session::AuthenticatedSession;
use async_trait::async_trait;
use cribl_control_plane::{ControlPlaneClient, Product};
use cribl_core::{Entity, ListResponse, Result};
use cribl_mgmt_plane::MgmtPlaneClient;

/// Something that can list worker groups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkerGroupSource: Send + Sync {
    /// List worker groups of a product (first page only).
    async fn list_worker_groups(&self, product: Product) -> Result<ListResponse<Entity>>;
}

#[async_trait]
impl WorkerGroupSource for ControlPlaneClient {
    async fn list_worker_groups(&self, product: Product) -> Result<ListResponse<Entity>> {
        self.groups_list(product).await
    }
}

#[async_trait]
impl WorkerGroupSource for AuthenticatedSession {
    async fn list_worker_groups(&self, product: Product) -> Result<ListResponse<Entity>> {
        self.client().groups_list(product).await
    }
}

/// Something that can list the workspaces of an organization.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceSource: Send + Sync {
    /// List workspaces (first page only).
    async fn list_workspaces(&self, organization_id: &str) -> Result<ListResponse<Entity>>;
}

#[async_trait]
impl WorkspaceSource for MgmtPlaneClient {
    async fn list_workspaces(&self, organization_id: &str) -> Result<ListResponse<Entity>> {
        self.workspaces_list(organization_id).await
    }
}

/// Run one worker-group listing and normalize an absent collection to empty.
///
/// # Errors
///
/// Propagates the source's error unchanged.
pub async fn fetch_worker_groups<S>(source: &S, product: Product) -> Result<Vec<Entity>>
where
    S: WorkerGroupSource + ?Sized,
{
    Ok(source.list_worker_groups(product).await?.into_items())
}

/// Run one workspace listing and normalize an absent collection to empty.
///
/// # Errors
///
/// Propagates the source's error unchanged.
pub async fn fetch_workspaces<S>(source: &S, organization_id: &str) -> Result<Vec<Entity>>
where
    S: WorkspaceSource + ?Sized,
{
    Ok(source.list_workspaces(organization_id).await?.into_items())
}
