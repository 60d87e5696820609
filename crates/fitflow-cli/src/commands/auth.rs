use clap::Subcommand;
use serde_json::json;

use fitflow_core::auth::AuthStore;
use fitflow_core::storage::Database;

use super::{print_json, runtime, signed_client, CliResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the current auth state
    Status,
}

pub fn run(action: AuthAction) -> CliResult {
    let db = Database::open()?;
    let store = AuthStore::new(&db);

    match action {
        AuthAction::Signup { email, password } => {
            let (client, _) = signed_client(&db)?;
            let rt = runtime()?;
            let session = rt.block_on(client.sign_up(&email, &password))?;
            if session.access_token.is_empty() {
                println!("Account created. Check your email for the confirmation link.");
            } else {
                store.save(&session)?;
                rt.block_on(ensure_profile_for(&db, &session.user_id, &session.email))?;
                println!("Signed up and logged in as {}", session.email);
            }
        }
        AuthAction::Login { email, password } => {
            let (client, _) = signed_client(&db)?;
            let rt = runtime()?;
            let session = rt.block_on(client.sign_in(&email, &password))?;
            store.save(&session)?;
            // First login creates the profile row.
            rt.block_on(ensure_profile_for(&db, &session.user_id, &session.email))?;
            println!("Logged in as {}", session.email);
        }
        AuthAction::Logout => {
            let (client, auth) = signed_client(&db)?;
            if auth.is_logged_in() {
                // Best effort: the local session is cleared either way.
                let rt = runtime()?;
                if let Err(e) = rt.block_on(client.sign_out()) {
                    eprintln!("warning: server-side sign-out failed: {e}");
                }
            }
            store.clear()?;
            println!("Logged out");
        }
        AuthAction::Status => {
            let state = store.state()?;
            print_json(&json!({ "auth": state }))?;
        }
    }
    Ok(())
}

async fn ensure_profile_for(
    db: &Database,
    user_id: &str,
    email: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (client, _) = signed_client(db)?;
    client.ensure_profile(user_id, Some(email)).await?;
    Ok(())
}
