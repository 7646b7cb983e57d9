#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::token;
use crate::domain::models::AuthError;
use crate::domain::models::AuthServiceName;
use crate::domain::models::CredentialService;
use crate::domain::models::LoginOutcome;
use crate::domain::models::StoreArc;
use crate::domain::models::UserProfile;
use crate::domain::models::MOCK_USERS_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockUser {
    pub name: String,
    pub email: String,
    // Plain-text comparison, preserved from the original demo. Not an
    // authentication model to build on.
    pub password: String,
}

/// Simulates a credential backend against a local record table, with an
/// artificial delay standing in for network latency.
pub struct MockCredentials {
    store: StoreArc,
}

impl MockCredentials {
    pub fn new(store: StoreArc) -> MockCredentials {
        return MockCredentials { store };
    }

    fn latency(&self) -> Duration {
        let millis = Config::get(ConfigKey::MockLatencyMs)
            .parse::<u64>()
            .unwrap_or(1000);
        return Duration::from_millis(millis);
    }

    fn load_users(&self) -> HashMap<String, MockUser> {
        return self
            .store
            .get(MOCK_USERS_KEY)
            .and_then(|raw| return serde_json::from_str(&raw).ok())
            .unwrap_or_default();
    }

    fn save_users(&self, users: &HashMap<String, MockUser>) {
        match serde_json::to_string(users) {
            Ok(raw) => self.store.set(MOCK_USERS_KEY, &raw),
            Err(err) => tracing::warn!(err = ?err, "Failed to serialize mock user table"),
        }
    }
}

#[async_trait]
impl CredentialService for MockCredentials {
    fn name(&self) -> AuthServiceName {
        return AuthServiceName::Mock;
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        time::sleep(self.latency()).await;

        let users = self.load_users();
        let user = match users.get(email) {
            Some(user) => user,
            None => return Err(AuthError::NoSuchAccount),
        };

        if user.password != password {
            return Err(AuthError::WrongPassword);
        }

        // The email doubles as the user id in mock mode.
        let generated = token::generate_mock(email, &user.name, &user.email, Utc::now().timestamp())
            .map_err(|err| {
                tracing::error!(err = ?err, "Failed to generate mock token");
                return AuthError::Unknown;
            })?;

        return Ok(LoginOutcome {
            token: generated,
            profile: UserProfile {
                id: email.to_string(),
                name: user.name.clone(),
                email: user.email.clone(),
            },
        });
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        time::sleep(self.latency()).await;

        let mut users = self.load_users();
        if users.contains_key(email) {
            return Err(AuthError::AccountExists);
        }

        users.insert(
            email.to_string(),
            MockUser {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
        );
        self.save_users(&users);

        return Ok(());
    }
}
