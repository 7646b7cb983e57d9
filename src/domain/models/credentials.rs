use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Stable, user-facing authentication failures. Messages must not change
/// between releases as the UI layer renders them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("No account found with this email. Please check your email or sign up for a new account.")]
    NoSuchAccount,
    #[error("Incorrect password. Please check your password and try again.")]
    WrongPassword,
    #[error("An account with this email already exists. Please login instead or use a different email.")]
    AccountExists,
    #[error("Invalid token received from server")]
    InvalidToken,
    #[error("The server returned a response in an unrecognized shape.")]
    InvalidResponse,
    #[error("Invalid credentials.")]
    Unauthorized,
    #[error("The server rejected the request: {0}")]
    Validation(String),
    #[error("The server hit an internal error. Please try again later.")]
    ServerError,
    #[error("Could not reach the authentication service.")]
    NetworkError,
    #[error("A login attempt is already in progress.")]
    LoginInProgress,
    #[error("Something went wrong. Please try again.")]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AuthServiceName {
    Mock,
    Remote,
}

impl AuthServiceName {
    pub fn parse(text: String) -> Option<AuthServiceName> {
        return AuthServiceName::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub profile: UserProfile,
}

/// The credential store seam. The mock implementation fabricates tokens
/// against a local record table; the remote one fronts an HTTP API.
/// Selected once at startup, never per call.
#[async_trait]
pub trait CredentialService {
    fn name(&self) -> AuthServiceName;

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError>;

    /// Creates an account. Never establishes a session; callers must login
    /// separately afterward.
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError>;
}

pub type CredentialServiceBox = Box<dyn CredentialService + Send + Sync>;
