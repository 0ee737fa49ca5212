//! Client construction for each variant.

use crate::session::UnauthenticatedSession;
use crate::settings::{CloudSettings, MgmtSettings, OnPremSettings};
use cribl_control_plane::ControlPlaneClient;
use cribl_core::{Result, Security};
use cribl_mgmt_plane::MgmtPlaneClient;
use tracing::debug;

/// Control-plane client for a cloud workspace leader, authenticated with
/// OAuth client credentials.
///
/// # Errors
///
/// Returns an error if the derived base URL is invalid or the HTTP client
/// cannot be built.
pub fn connect_cloud(settings: &CloudSettings) -> Result<ControlPlaneClient> {
    let base_url = settings.base_url();
    debug!(%base_url, "building cloud control-plane client");

    ControlPlaneClient::builder(&base_url)?
        .with_security(Security::ClientOauth(settings.oauth_scheme()))
        .build()
}

/// Management-plane client authenticated with OAuth client credentials.
///
/// # Errors
///
/// Returns an error if the gateway URL is invalid or the HTTP client cannot
/// be built.
pub fn connect_mgmt(settings: &MgmtSettings) -> Result<MgmtPlaneClient> {
    let server_url = settings.server_url();
    debug!(%server_url, "building management-plane client");

    MgmtPlaneClient::builder(&server_url)?
        .with_security(Security::ClientOauth(settings.oauth_scheme()))
        .build()
}

/// Unauthenticated client for an on-premise leader. Certificate checks are
/// only relaxed when [`OnPremSettings::accepts_invalid_certs`] holds.
///
/// # Errors
///
/// Returns an error if the server URL is invalid or the HTTP client cannot be
/// built.
pub fn connect_onprem(settings: &OnPremSettings) -> Result<UnauthenticatedSession> {
    UnauthenticatedSession::connect(settings.base_url(), !settings.accepts_invalid_certs())
}
