//! REST client for the hosted data service.
//!
//! The surface is the standard PostgREST shape: equality-filtered reads via
//! query parameters, inserts and updates returning the affected record
//! (`Prefer: return=representation`), deletes by primary key. Every request
//! carries the public `apikey` header; writes additionally carry the
//! signed-in user's bearer token.

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use url::Url;

use crate::error::BackendError;
use crate::model::{Habit, HabitLog, JournalEntry, Mood, NewHabit, Profile};
use crate::storage::Config;

const PROFILES: &str = "profiles";
const HABITS: &str = "habits";
const HABIT_LOGS: &str = "habit_logs";
const JOURNAL_ENTRIES: &str = "journal_entries";

/// Dependency-injected backend client.
pub struct BackendClient {
    http: Client,
    base_url: Url,
    api_key: String,
    access_token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url).map_err(|e| BackendError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            http: Client::new(),
            base_url,
            api_key: api_key.to_string(),
            access_token: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        Self::new(&config.backend.url, &config.backend.anon_key)
    }

    /// Attach a signed-in user's token; subsequent requests use it as the
    /// bearer credential instead of the anon key.
    pub fn with_access_token(mut self, token: &str) -> Self {
        if !token.is_empty() {
            self.access_token = Some(token.to_string());
        }
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(super) fn http(&self) -> &Client {
        &self.http
    }

    // ── Wire plumbing ────────────────────────────────────────────────

    pub(super) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    fn table_url(&self, table: &str) -> Url {
        self.endpoint(&format!("/rest/v1/{table}"))
    }

    pub(super) fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        req.header("apikey", &self.api_key).bearer_auth(bearer)
    }

    pub(super) async fn expect_json<T: DeserializeOwned>(
        resp: Response,
    ) -> Result<T, BackendError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json::<T>().await?)
    }

    async fn expect_ok(resp: Response) -> Result<(), BackendError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    /// Equality-filtered read: `GET /rest/v1/{table}?col=eq.val&...`.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        extra: &[(&str, &str)],
    ) -> Result<Vec<T>, BackendError> {
        let mut url = self.table_url(table);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            for (col, val) in filters {
                pairs.append_pair(col, &format!("eq.{val}"));
            }
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        let resp = self.authed(self.http.get(url)).send().await?;
        Self::expect_json(resp).await
    }

    /// Insert returning the created record.
    async fn insert<T: DeserializeOwned>(
        &self,
        table: &str,
        record: &impl Serialize,
    ) -> Result<T, BackendError> {
        let resp = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;
        let mut rows: Vec<T> = Self::expect_json(resp).await?;
        rows.pop().ok_or_else(|| BackendError::EmptyReply {
            table: table.to_string(),
        })
    }

    /// Update by primary key, returning the updated record.
    async fn update<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
        patch: &impl Serialize,
    ) -> Result<T, BackendError> {
        let mut url = self.table_url(table);
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let resp = self
            .authed(self.http.patch(url))
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        let mut rows: Vec<T> = Self::expect_json(resp).await?;
        rows.pop().ok_or_else(|| BackendError::EmptyReply {
            table: table.to_string(),
        })
    }

    /// Delete by primary key.
    async fn delete(&self, table: &str, id: &str) -> Result<(), BackendError> {
        let mut url = self.table_url(table);
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let resp = self.authed(self.http.delete(url)).send().await?;
        Self::expect_ok(resp).await
    }

    // ── Profiles ─────────────────────────────────────────────────────

    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, BackendError> {
        let mut rows: Vec<Profile> = self
            .select(PROFILES, &[("id", user_id.to_string())], &[])
            .await?;
        Ok(rows.pop())
    }

    /// Fetch the profile, creating it on first sight (first login).
    pub async fn ensure_profile(
        &self,
        user_id: &str,
        email: Option<&str>,
    ) -> Result<Profile, BackendError> {
        if let Some(profile) = self.fetch_profile(user_id).await? {
            return Ok(profile);
        }
        self.insert(PROFILES, &json!([{ "id": user_id, "email": email }]))
            .await
    }

    /// Patch the profile row, returning the fresh copy. The cached profile
    /// is replaced wholesale with the reply.
    pub async fn update_profile(
        &self,
        user_id: &str,
        patch: &serde_json::Value,
    ) -> Result<Profile, BackendError> {
        self.update(PROFILES, user_id, patch).await
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub async fn list_habits(&self, user_id: &str) -> Result<Vec<Habit>, BackendError> {
        self.select(HABITS, &[("user_id", user_id.to_string())], &[])
            .await
    }

    pub async fn create_habit(
        &self,
        user_id: &str,
        habit: &NewHabit,
    ) -> Result<Habit, BackendError> {
        self.insert(
            HABITS,
            &json!([{
                "user_id": user_id,
                "title": habit.title,
                "icon": habit.icon,
                "target_count": habit.target_count,
            }]),
        )
        .await
    }

    // ── Habit logs ───────────────────────────────────────────────────

    pub async fn logs_for_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<HabitLog>, BackendError> {
        self.select(
            HABIT_LOGS,
            &[
                ("user_id", user_id.to_string()),
                ("date_logged", date.to_string()),
            ],
            &[],
        )
        .await
    }

    pub async fn create_habit_log(
        &self,
        user_id: &str,
        habit_id: &str,
        date: NaiveDate,
    ) -> Result<HabitLog, BackendError> {
        self.insert(
            HABIT_LOGS,
            &json!([{
                "habit_id": habit_id,
                "user_id": user_id,
                "date_logged": date.to_string(),
            }]),
        )
        .await
    }

    pub async fn delete_habit_log(&self, log_id: &str) -> Result<(), BackendError> {
        self.delete(HABIT_LOGS, log_id).await
    }

    // ── Journal ──────────────────────────────────────────────────────

    pub async fn create_journal_entry(
        &self,
        user_id: &str,
        content: &str,
        mood: Mood,
    ) -> Result<JournalEntry, BackendError> {
        self.insert(
            JOURNAL_ENTRIES,
            &json!([{
                "user_id": user_id,
                "content": content,
                "mood": mood.symbol(),
                "tags": [],
            }]),
        )
        .await
    }

    pub async fn recent_journal_entries(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<JournalEntry>, BackendError> {
        self.select(
            JOURNAL_ENTRIES,
            &[("user_id", user_id.to_string())],
            &[
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ],
        )
        .await
    }
}
