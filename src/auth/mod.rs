use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config;
use crate::database::models::User;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn access(user: &User) -> Self {
        let minutes = config::config().security.access_token_expiry_minutes;
        Self::new(user, TOKEN_TYPE_ACCESS, Duration::minutes(minutes as i64))
    }

    pub fn refresh(user: &User) -> Self {
        let days = config::config().security.refresh_token_expiry_days;
        Self::new(user, TOKEN_TYPE_REFRESH, Duration::days(days as i64))
    }

    fn new(user: &User, token_type: &str, validity: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id,
            username: user.username.clone(),
            token_type: token_type.to_string(),
            exp: (now + validity).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_jwt(token: &str) -> Result<Claims, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

/// Salted SHA-256 digest stored as `salt$hex`. The salt is a fresh random
/// uuid per account.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest_with_salt(&salt, password);
    format!("{}${}", salt, digest)
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    digest_with_salt(salt, password) == digest
}

fn digest_with_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Username rules enforced at registration: 3-50 chars, alphanumeric plus
/// underscore and hyphen, leading character alphanumeric.
pub fn validate_username_format(username: &str) -> Result<(), String> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }

    if username.len() > 50 {
        return Err("Username must be less than 50 characters".to_string());
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscore, and hyphen".to_string());
    }

    if !username.chars().next().is_some_and(|c| c.is_alphanumeric()) {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "grower".to_string(),
            password_hash: hash_password("hunter2"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let stored = hash_password("correct horse");
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("wrong horse", &stored));
        assert!(!verify_password("correct horse", "garbage-without-salt"));
    }

    #[test]
    fn salts_differ_between_accounts() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn jwt_round_trip_preserves_claims() {
        let user = test_user();
        let token = generate_jwt(&Claims::access(&user)).unwrap();
        let claims = decode_jwt(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.username);
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_tokens_are_marked_as_such() {
        let user = test_user();
        let token = generate_jwt(&Claims::refresh(&user)).unwrap();
        let claims = decode_jwt(&token).unwrap();
        assert_eq!(claims.token_type, TOKEN_TYPE_REFRESH);
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let user = test_user();
        let token = generate_jwt(&Claims::access(&user)).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(decode_jwt(&tampered).is_err());
    }

    #[test]
    fn username_format_rules() {
        assert!(validate_username_format("grower-1").is_ok());
        assert!(validate_username_format("ab").is_err());
        assert!(validate_username_format("-leading").is_err());
        assert!(validate_username_format("has space").is_err());
        assert!(validate_username_format(&"x".repeat(51)).is_err());
    }
}
