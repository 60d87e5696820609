//! Email/password auth endpoints.
//!
//! Sign-up and sign-in return an [`AuthSession`] the caller persists; the
//! core never inspects the token beyond forwarding it as a bearer
//! credential.

use serde::Deserialize;
use serde_json::json;

use super::client::BackendClient;
use crate::auth::AuthSession;
use crate::error::BackendError;

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthReply {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
}

impl AuthReply {
    fn into_session(self, fallback_email: &str) -> Result<AuthSession, BackendError> {
        let user = self
            .user
            .ok_or_else(|| BackendError::Auth("no user in auth reply".into()))?;
        Ok(AuthSession {
            user_id: user.id,
            email: user.email.unwrap_or_else(|| fallback_email.to_string()),
            access_token: self.access_token.unwrap_or_default(),
        })
    }
}

impl BackendClient {
    /// Create an account. Depending on backend settings the reply may carry
    /// no token yet (email confirmation pending); the session is still
    /// returned so the caller can show who signed up.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let resp = self
            .authed(self.http().post(self.endpoint("/auth/v1/signup")))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let reply: AuthReply = Self::expect_json(resp).await?;
        reply.into_session(email)
    }

    /// Password grant sign-in.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let mut url = self.endpoint("/auth/v1/token");
        url.query_pairs_mut().append_pair("grant_type", "password");
        let resp = self
            .authed(self.http().post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let reply: AuthReply = Self::expect_json(resp).await?;
        if reply.access_token.is_none() {
            return Err(BackendError::Auth("sign-in returned no access token".into()));
        }
        reply.into_session(email)
    }

    /// Invalidate the current token server-side. A failure here is not
    /// fatal to logging out locally.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let resp = self
            .authed(self.http().post(self.endpoint("/auth/v1/logout")))
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, message });
        }
        Ok(())
    }
}
