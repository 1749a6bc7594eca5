use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::Role;

/// Token lifetime. Verification rejects anything past this window regardless
/// of signature validity.
pub const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Clone)]
pub struct JwtKeys {
    secret: String,
}

impl JwtKeys {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn generate_token(
        &self,
        user_id: Uuid,
        email: &str,
        role: Role,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now as usize,
            exp: (now + TOKEN_TTL_SECS) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn two_hashes_of_the_same_password_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_round_trips_its_claims() {
        let keys = JwtKeys::new("test-secret".into());
        let id = Uuid::new_v4();
        let token = keys.generate_token(id, "a@x.com", Role::Admin).unwrap();

        let claims = keys.verify_token(&token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS as usize);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = JwtKeys::new("test-secret".into());
        let token = keys
            .generate_token(Uuid::new_v4(), "a@x.com", Role::User)
            .unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        assert!(keys.verify_token(&tampered).is_err());
        assert!(keys.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let keys = JwtKeys::new("test-secret".into());
        let other = JwtKeys::new("other-secret".into());
        let token = other
            .generate_token(Uuid::new_v4(), "a@x.com", Role::User)
            .unwrap();
        assert!(keys.verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new("test-secret".into());
        let past = chrono::Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "a@x.com".into(),
            role: Role::User,
            iat: past as usize,
            exp: (past + TOKEN_TTL_SECS) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();
        assert!(keys.verify_token(&token).is_err());
    }
}
