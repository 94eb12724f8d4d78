//! Local HS256 token signing and verification
//!
//! Sessions are issued by this backend (not a remote identity provider),
//! so signing and verification share one secret from configuration.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::{Claims, Role};

#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Sign a session token for an account
    pub fn sign(&self, account_id: i64, email: Option<&str>, role: Role) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: account_id,
            email: email.map(|e| e.to_string()),
            role,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    /// Verify a token and return its claims (expiry is enforced)
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::default();
        let data =
            decode::<Claims>(token, &self.decoding, &validation).context("Invalid token")?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let signer = TokenSigner::new("test-secret", 3600);
        let token = signer.sign(42, Some("admin@example.com"), Role::Admin).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email.as_deref(), Some("admin@example.com"));
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let signer = TokenSigner::new("secret-a", 3600);
        let other = TokenSigner::new("secret-b", 3600);
        let token = signer.sign(1, None, Role::Owner).unwrap();

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        // jsonwebtoken's default leeway is 60s, so expire well past it
        let signer = TokenSigner::new("test-secret", -120);
        let token = signer.sign(1, None, Role::Customer).unwrap();

        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let signer = TokenSigner::new("test-secret", 3600);
        assert!(signer.verify("not-a-token").is_err());
    }
}
