#[cfg(test)]
#[path = "session_manager_test.rs"]
mod tests;

use chrono::Utc;

use crate::domain::models::token;
use crate::domain::models::AuthError;
use crate::domain::models::CredentialServiceBox;
use crate::domain::models::Session;
use crate::domain::models::StoreArc;
use crate::domain::models::TokenInfo;
use crate::domain::models::TOKEN_KEY;

/// Owns the authenticated-user lifecycle. The credential service is picked
/// once at construction; mock vs remote is a startup decision, never a
/// per-call one.
pub struct SessionManager {
    store: StoreArc,
    credentials: CredentialServiceBox,
    session: Option<Session>,
    last_error: Option<String>,
    loading: bool,
}

impl SessionManager {
    pub fn new(store: StoreArc, credentials: CredentialServiceBox) -> SessionManager {
        return SessionManager {
            store,
            credentials,
            session: None,
            last_error: None,
            loading: false,
        };
    }

    /// Called once at startup. A missing token leaves the session empty; a
    /// structurally invalid or expired token is deleted without surfacing
    /// an error.
    pub fn hydrate(&mut self) {
        let stored = match self.store.get(TOKEN_KEY) {
            Some(stored) => stored,
            None => return,
        };

        let claims = match token::decode_claims(&stored) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::warn!(err = ?err, "Invalid token in storage, removing");
                self.store.remove(TOKEN_KEY);
                return;
            }
        };

        if claims.exp <= Utc::now().timestamp() {
            tracing::warn!("Token expired, removing from storage");
            self.store.remove(TOKEN_KEY);
            return;
        }

        self.session = Some(Session::from_claims(claims));
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        if self.loading {
            return Err(AuthError::LoginInProgress);
        }

        self.loading = true;
        let res = self.do_login(email, password).await;
        self.loading = false;

        match res {
            Ok(session) => {
                self.last_error = None;
                return Ok(session);
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        }
    }

    async fn do_login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let outcome = self.credentials.login(email, password).await?;

        let claims = token::decode_claims(&outcome.token).map_err(|err| {
            tracing::error!(err = ?err, "Credential service returned a malformed token");
            return AuthError::InvalidToken;
        })?;

        self.store.set(TOKEN_KEY, &outcome.token);

        // Profile fields from the service win over token claims.
        let mut session = Session::from_claims(claims);
        if !outcome.profile.id.is_empty() {
            session.user_id = outcome.profile.id;
        }
        if !outcome.profile.name.is_empty() {
            session.display_name = outcome.profile.name;
        }
        if !outcome.profile.email.is_empty() {
            session.email = outcome.profile.email;
        }

        self.session = Some(session.clone());
        return Ok(session);
    }

    /// Creates an account without establishing a session. The caller must
    /// login separately afterward; this asymmetry is a contract.
    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let res = self.credentials.signup(name, email, password).await;

        match res {
            Ok(()) => {
                self.last_error = None;
                return Ok(());
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        }
    }

    /// Clears the persisted token and all in-memory state. Callers are
    /// expected to tear down and rebuild every session-dependent component
    /// afterward so nothing stale survives.
    pub fn logout(&mut self) {
        self.store.remove(TOKEN_KEY);
        self.session = None;
        self.last_error = None;
    }

    pub fn current_user(&self) -> Option<&Session> {
        return self.session.as_ref();
    }

    pub fn last_error(&self) -> Option<&str> {
        return self.last_error.as_deref();
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_loading(&self) -> bool {
        return self.loading;
    }

    /// Re-reads and re-decodes the stored token on every call, independent
    /// of the in-memory session, so expiry countdowns stay accurate.
    pub fn token_info(&self) -> Option<TokenInfo> {
        let stored = self.store.get(TOKEN_KEY)?;
        return token::inspect(&stored, Utc::now().timestamp());
    }
}
