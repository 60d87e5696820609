pub mod auth;
pub mod config;
pub mod habit;
pub mod journal;
pub mod profile;
pub mod session;
pub mod shortcut;

use fitflow_core::auth::AuthStore;
use fitflow_core::storage::{Config, Database};
use fitflow_core::{AuthState, BackendClient};

pub(crate) type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Current-thread runtime for the commands that talk to the backend.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Backend client plus auth state, restored from the local store.
pub(crate) fn signed_client(
    db: &Database,
) -> Result<(BackendClient, AuthState), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let session = AuthStore::new(db).load()?;
    let auth = session
        .as_ref()
        .map(|s| s.state())
        .unwrap_or(AuthState::LoggedOut);
    let mut client = BackendClient::from_config(&config)?;
    if let Some(session) = &session {
        client = client.with_access_token(&session.access_token);
    }
    Ok((client, auth))
}

/// Local calendar day, matching what the user sees.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
