/**
 * Bearer Token Verification
 *
 * The server never mints tokens itself; clients authenticate against the
 * hosted auth provider and present the provider's HS256 JWT on every
 * request. This module verifies those tokens with the shared signing
 * secret (`AUTH_JWT_SECRET`) so protected routes and the relay socket can
 * check them without a round trip to the provider.
 */
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by the provider's access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the provider's user id
    pub sub: String,
    /// Email, when the provider includes it
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry as a Unix timestamp
    pub exp: usize,
}

/// Verify a bearer token and return its claims
///
/// Checks the HS256 signature against the shared secret and rejects
/// expired tokens.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}
