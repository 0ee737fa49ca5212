//! The three example flows.
//!
//! Each flow is linear: load settings, build a client, list once, print. A
//! configuration problem ends the run with guidance before any client is
//! built. Any other failure is printed once and ends the run.

use crate::credentials::MissingCredentials;
use crate::env::EnvSource;
use crate::factory::connect_onprem;
use crate::lister::{fetch_worker_groups, fetch_workspaces, WorkerGroupSource, WorkspaceSource};
use crate::report::{write_report, write_title, ReportStyle};
use crate::settings::{CloudSettings, MgmtSettings, OnPremSettings, CRIBL_INSECURE_TLS};
use cribl_control_plane::{LoginInfo, Product};
use cribl_core::{Entity, Error};
use secrecy::ExposeSecret;
use std::borrow::Cow;
use std::io::{self, Write};
use tracing::debug;

const MISSING_CREDENTIALS: &str = "Missing credentials! Set these environment variables:";
const INVALID_SERVER_URL: &str = "Invalid server URL! Set this environment variable:";
const ENV_FILE_HINT: &str = "\nCopy .env.example to .env and fill in your values";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The listing succeeded with this many entities.
    Listed(usize),
    /// Settings were missing; guidance was printed and nothing was sent.
    NotConfigured,
    /// A request or client construction failed; the error was printed.
    Failed,
}

impl RunOutcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Listed(_) | Self::NotConfigured => 0,
            Self::Failed => 1,
        }
    }
}

/// List the worker groups of a cloud workspace leader.
///
/// `connect` is only invoked once the credentials are valid.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
pub async fn cloud_worker_groups<S, F, W>(
    env: &dyn EnvSource,
    connect: F,
    out: &mut W,
) -> io::Result<RunOutcome>
where
    S: WorkerGroupSource,
    F: FnOnce(&CloudSettings) -> cribl_core::Result<S>,
    W: Write,
{
    write_title(out, "Listing Cribl Worker Groups", 40)?;

    let settings = match CloudSettings::from_env(env) {
        Ok(settings) => settings,
        Err(missing) => return not_configured(out, MISSING_CREDENTIALS, &missing),
    };

    let client = match connect(&settings) {
        Ok(client) => client,
        Err(err) => return failed(out, "Error", &err),
    };

    writeln!(out, "Fetching worker groups...")?;
    let listed = fetch_worker_groups(&client, Product::Stream).await;
    finish(out, &ReportStyle::WORKER_GROUPS, listed)
}

/// List the workspaces of a cloud organization.
///
/// `connect` is only invoked once the credentials are valid.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
pub async fn workspaces<S, F, W>(
    env: &dyn EnvSource,
    connect: F,
    out: &mut W,
) -> io::Result<RunOutcome>
where
    S: WorkspaceSource,
    F: FnOnce(&MgmtSettings) -> cribl_core::Result<S>,
    W: Write,
{
    write_title(out, "Listing Cribl Workspaces", 40)?;

    let settings = match MgmtSettings::from_env(env) {
        Ok(settings) => settings,
        Err(missing) => return not_configured(out, MISSING_CREDENTIALS, &missing),
    };

    let client = match connect(&settings) {
        Ok(client) => client,
        Err(err) => return failed(out, "Error", &err),
    };

    writeln!(out, "Fetching workspaces...")?;
    let listed = fetch_workspaces(&client, &settings.org_id).await;
    finish(out, &ReportStyle::WORKSPACES, listed)
}

/// Log in to an on-premise leader, then list its worker groups.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
pub async fn onprem_worker_groups<W: Write>(
    env: &dyn EnvSource,
    out: &mut W,
) -> io::Result<RunOutcome> {
    write_title(out, "Listing On-Premise Cribl Worker Groups", 45)?;

    let settings = match OnPremSettings::from_env(env) {
        Ok(settings) => settings,
        Err(missing) => return not_configured(out, INVALID_SERVER_URL, &missing),
    };

    writeln!(out, "Connecting to: {}", settings.base_url())?;
    if settings.accepts_invalid_certs() {
        writeln!(out, "⚠️  Accepting self-signed certificates (insecure mode)")?;
    }

    let session = match connect_onprem(&settings) {
        Ok(session) => session,
        Err(err) => return failed(out, "Error", &err),
    };

    writeln!(out, "Authenticating with username/password...")?;
    let login = LoginInfo::new(settings.username.clone(), settings.password.expose_secret());
    let session = match session.authenticate(&login).await {
        Ok(session) => session,
        Err(err) => {
            let outcome = failed(out, "Authentication failed", &err)?;
            if looks_like_certificate_error(&err.to_string()) {
                write_tls_tip(out)?;
            }
            return Ok(outcome);
        }
    };
    writeln!(out, "Authenticated with on-prem server")?;
    writeln!(out, "Cribl SDK client created for on-prem server")?;

    writeln!(out, "Fetching worker groups...")?;
    let listed = fetch_worker_groups(&session, Product::Stream).await;
    finish(out, &ReportStyle::WORKER_GROUPS, listed)
}

/// Whether an error message points at certificate validation.
///
/// The request URL that reqwest embeds in transport errors is ignored, so a
/// host name alone never matches.
#[must_use]
pub fn looks_like_certificate_error(message: &str) -> bool {
    let message = without_request_url(message);
    ["certificate", "x509", "TLS"]
        .iter()
        .any(|needle| message.contains(needle))
}

fn without_request_url(message: &str) -> Cow<'_, str> {
    let Some(start) = message.find("for url (") else {
        return Cow::Borrowed(message);
    };
    match message[start..].find(')') {
        Some(len) => Cow::Owned(format!("{}{}", &message[..start], &message[start + len + 1..])),
        None => Cow::Borrowed(&message[..start]),
    }
}

fn finish<W: Write>(
    out: &mut W,
    style: &ReportStyle,
    listed: cribl_core::Result<Vec<Entity>>,
) -> io::Result<RunOutcome> {
    match listed {
        Ok(items) => {
            write_report(out, style, &items)?;
            Ok(RunOutcome::Listed(items.len()))
        }
        Err(err) => failed(out, "Error", &err),
    }
}

fn not_configured<W: Write>(
    out: &mut W,
    headline: &str,
    missing: &MissingCredentials,
) -> io::Result<RunOutcome> {
    debug!(missing = ?missing.missing, "settings not configured");

    writeln!(out, "{headline}")?;
    for name in &missing.required {
        writeln!(out, "   {name}")?;
    }
    writeln!(out, "{ENV_FILE_HINT}")?;
    Ok(RunOutcome::NotConfigured)
}

fn failed<W: Write>(out: &mut W, label: &str, err: &Error) -> io::Result<RunOutcome> {
    debug!(code = err.error_code(), %err, "run failed");

    writeln!(out, "{label}: {err}")?;
    Ok(RunOutcome::Failed)
}

fn write_tls_tip<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nTip: If you're using a self-signed certificate, set:")?;
    writeln!(out, "   {CRIBL_INSECURE_TLS}=true")?;
    writeln!(out, "   (Only use this in development/testing environments!)")
}
