//! Service-account authentication (OAuth 2.0 JWT bearer grant).
//!
//! A short-lived RS256 assertion signed with the account's private key is
//! exchanged at the token endpoint for a bearer access token.

use super::error::VisionError;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime of the signed assertion. The token endpoint rejects anything over an hour.
const ASSERTION_LIFETIME_MINUTES: i64 = 60;

/// Non-human identity the front-end calls the annotation service as.
#[derive(Clone)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: Secret<String>,
}

/// Claims of the JWT assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer (service account email)
    pub iss: String,
    /// Space-separated OAuth scopes
    pub scope: String,
    /// Audience (the token endpoint)
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl ServiceAccount {
    /// Sign an assertion for `scopes`, addressed to `token_url`.
    pub fn sign_assertion(&self, scopes: &[String], token_url: &str) -> Result<String, VisionError> {
        if self.client_email.is_empty() {
            return Err(VisionError::Auth(
                "service account email is not configured".to_string(),
            ));
        }
        if self.private_key.expose_secret().trim().is_empty() {
            return Err(VisionError::Auth(
                "service account private key is not configured".to_string(),
            ));
        }

        let pem = normalize_pem(self.private_key.expose_secret());
        let encoding_key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| VisionError::Auth(format!("Failed to parse private key: {}", e)))?;

        let now = Utc::now();
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: scopes.join(" "),
            aud: token_url.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ASSERTION_LIFETIME_MINUTES)).timestamp(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| VisionError::Auth(format!("Failed to sign assertion: {}", e)))
    }
}

/// Keys pasted into environment variables usually arrive with literal `\n`.
fn normalize_pem(raw: &str) -> String {
    raw.trim().replace("\\n", "\n")
}
