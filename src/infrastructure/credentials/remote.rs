#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthError;
use crate::domain::models::AuthServiceName;
use crate::domain::models::CredentialService;
use crate::domain::models::LoginOutcome;
use crate::domain::models::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SignupRequest {
    name: String,
    email: String,
    password: String,
}

// The remote API's field naming is not fixed; the tolerated shapes are
// normalized here at the boundary and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ProfileResponse {
    #[serde(alias = "userId")]
    id: String,
    #[serde(alias = "username")]
    name: String,
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
    user: ProfileResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    message: String,
}

pub struct RemoteCredentials {
    url: String,
}

impl Default for RemoteCredentials {
    fn default() -> RemoteCredentials {
        return RemoteCredentials {
            url: Config::get(ConfigKey::AuthURL),
        };
    }
}

fn server_message(body: &str) -> Option<String> {
    return serde_json::from_str::<ErrorResponse>(body).ok().map(|e| return e.message);
}

fn map_login_status(status: u16, body: &str) -> AuthError {
    match status {
        401 => return AuthError::Unauthorized,
        404 => return AuthError::NoSuchAccount,
        422 => {
            let message =
                server_message(body).unwrap_or_else(|| return "invalid request".to_string());
            return AuthError::Validation(message);
        }
        500..=599 => return AuthError::ServerError,
        _ => return AuthError::Unknown,
    }
}

fn map_signup_status(status: u16, body: &str) -> AuthError {
    match status {
        401 => return AuthError::Unauthorized,
        409 | 422 => return AuthError::AccountExists,
        500..=599 => return AuthError::ServerError,
        _ => {
            tracing::error!(status = status, body = body, "Unexpected signup failure");
            return AuthError::Unknown;
        }
    }
}

#[async_trait]
impl CredentialService for RemoteCredentials {
    fn name(&self) -> AuthServiceName {
        return AuthServiceName::Remote;
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/auth/login", url = self.url))
            .json(&req)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(err = ?err, "Login request failed to send");
                return AuthError::NetworkError;
            })?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(|err| {
            tracing::error!(err = ?err, "Login response body unreadable");
            return AuthError::NetworkError;
        })?;

        if !(200..300).contains(&status) {
            return Err(map_login_status(status, &body));
        }

        let parsed: LoginResponse = serde_json::from_str(&body).map_err(|err| {
            tracing::error!(err = ?err, "Login response did not match any accepted shape");
            return AuthError::InvalidResponse;
        })?;

        return Ok(LoginOutcome {
            token: parsed.token,
            profile: UserProfile {
                id: parsed.user.id,
                name: parsed.user.name,
                email: parsed.user.email,
            },
        });
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let req = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/auth/signup", url = self.url))
            .json(&req)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(err = ?err, "Signup request failed to send");
                return AuthError::NetworkError;
            })?;

        let status = res.status().as_u16();
        if !(200..300).contains(&status) {
            let body = res.text().await.unwrap_or_default();
            return Err(map_signup_status(status, &body));
        }

        return Ok(());
    }
}
