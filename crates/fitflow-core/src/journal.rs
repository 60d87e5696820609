//! Quick journal: free-text note plus a mood symbol, append-only.

use crate::auth::AuthState;
use crate::backend::BackendClient;
use crate::error::{Result, ValidationError};
use crate::model::{JournalEntry, Mood};

/// Append a journal entry.
///
/// Empty or whitespace-only content is rejected; a logged-out caller is a
/// no-op (`Ok(None)`).
pub async fn save_entry(
    client: &BackendClient,
    auth: &AuthState,
    content: &str,
    mood: Mood,
) -> Result<Option<JournalEntry>> {
    if content.trim().is_empty() {
        return Err(ValidationError::Empty("journal entry content".into()).into());
    }
    let Some(user_id) = auth.user_id() else {
        return Ok(None);
    };
    let entry = client
        .create_journal_entry(user_id, content, mood)
        .await?;
    Ok(Some(entry))
}

/// Newest entries first.
pub async fn recent(
    client: &BackendClient,
    auth: &AuthState,
    limit: u32,
) -> Result<Vec<JournalEntry>> {
    let Some(user_id) = auth.user_id() else {
        return Ok(Vec::new());
    };
    Ok(client.recent_journal_entries(user_id, limit).await?)
}
