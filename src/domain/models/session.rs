use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::TokenClaims;

/// The currently authenticated principal. Exists if and only if a
/// structurally valid, unexpired token is persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub issued_at: i64,
    pub expires_at: i64,
    pub issuer: Option<String>,
    pub audience: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
}

impl Session {
    /// Builds a session from decoded token claims, falling back through
    /// the claim aliases the way the original clients did.
    pub fn from_claims(claims: TokenClaims) -> Session {
        let user_id = claims
            .user_id
            .or(claims.sub)
            .unwrap_or_else(|| return "unknown".to_string());

        return Session {
            user_id,
            display_name: claims.name.unwrap_or_else(|| return "User".to_string()),
            email: claims
                .email
                .unwrap_or_else(|| return "user@example.com".to_string()),
            issued_at: claims.iat,
            expires_at: claims.exp,
            issuer: claims.iss,
            audience: claims.aud.map(|aud| return aud.into_vec()),
            roles: claims.roles.map(|roles| return roles.into_vec()),
        };
    }
}
