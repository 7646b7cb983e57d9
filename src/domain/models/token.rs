#[cfg(test)]
#[path = "token_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Tokens within this many seconds of expiry are flagged for the UI.
pub const EXPIRY_WARNING_WINDOW_SECS: i64 = 300;

const MOCK_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims that tolerate both single values and lists, such as `aud` and
/// `roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => return vec![value],
            OneOrMany::Many(values) => return values,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<OneOrMany>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<OneOrMany>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Diagnostic view over a stored token, computed fresh on every read so
/// expiry countdowns stay accurate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub iat: i64,
    pub exp: i64,
    pub sub: Option<String>,
    pub iss: Option<String>,
    pub aud: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
    pub is_valid: bool,
    pub is_expiring_soon: bool,
}

// Accepts both the URL-safe and standard alphabets, with or without
// padding. Mock tokens use the standard alphabet, real services tend to
// use URL-safe.
fn decode_segment(segment: &str) -> Result<Vec<u8>> {
    let mut normalized = segment.replace('-', "+").replace('_', "/");
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    return Ok(STANDARD.decode(normalized)?);
}

/// Structural validation only: three dot-separated, non-empty,
/// base64-decodable segments. Signatures are never verified.
pub fn validate_structure(token: &str) -> bool {
    let segments = token.split('.').collect::<Vec<&str>>();
    if segments.len() != 3 {
        return false;
    }

    return segments
        .iter()
        .all(|segment| return !segment.trim().is_empty() && decode_segment(segment).is_ok());
}

pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    if !validate_structure(token) {
        bail!("Token does not have a valid structure");
    }

    let segments = token.split('.').collect::<Vec<&str>>();
    let payload = decode_segment(segments[1])?;
    let claims: TokenClaims = serde_json::from_slice(&payload)?;

    return Ok(claims);
}

/// Builds a locally-signed-looking token for mock logins. The signature
/// segment is a constant and carries no cryptographic meaning.
pub fn generate_mock(user_id: &str, name: &str, email: &str, now: i64) -> Result<String> {
    let header = STANDARD.encode(serde_json::to_string(&serde_json::json!({
        "alg": "HS256",
        "typ": "JWT",
    }))?);

    let claims = TokenClaims {
        iat: now,
        exp: now + MOCK_TOKEN_TTL_SECS,
        user_id: Some(user_id.to_string()),
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        ..TokenClaims::default()
    };
    let payload = STANDARD.encode(serde_json::to_string(&claims)?);
    let signature = STANDARD.encode("mock-signature");

    return Ok(format!("{header}.{payload}.{signature}"));
}

pub fn inspect(token: &str, now: i64) -> Option<TokenInfo> {
    let claims = match decode_claims(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(err = ?err, "Token failed inspection");
            return None;
        }
    };

    return Some(TokenInfo {
        iat: claims.iat,
        exp: claims.exp,
        sub: claims.sub,
        iss: claims.iss,
        aud: claims.aud.map(|aud| return aud.into_vec()),
        roles: claims.roles.map(|roles| return roles.into_vec()),
        is_valid: claims.exp > now,
        is_expiring_soon: claims.exp - now < EXPIRY_WARNING_WINDOW_SECS,
    });
}
