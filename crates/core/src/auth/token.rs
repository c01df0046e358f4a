//! Signed, time-limited bearer tokens.
//!
//! Access tokens are HMAC-signed JWTs carrying a [`Claims`] payload. They are
//! stateless: nothing is stored server-side, so a token is valid exactly when
//! its signature verifies against the configured key and the current time is
//! before its `exp` claim. There is no revocation.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

pub use jsonwebtoken::Algorithm;

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 10;

/// Token type reported alongside every issued token.
pub const TOKEN_TYPE: &str = "bearer";

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the username the token was issued to.
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Why a presented token was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("invalid token configuration: {0}")]
    Config(String),
}

/// Configuration for token issuance and verification.
#[derive(Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Signing algorithm; must be one of the HMAC family.
    pub algorithm: Algorithm,
    /// Lifetime applied by [`TokenIssuer::issue`].
    pub default_ttl: Duration,
}

impl TokenConfig {
    /// HS256 with the default ten-minute lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::minutes(DEFAULT_ACCESS_EXPIRY_MINS),
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// Parse a signing algorithm name, accepting only symmetric HMAC variants.
pub fn parse_algorithm(name: &str) -> Result<Algorithm, TokenError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(TokenError::Config(format!(
            "unsupported signing algorithm '{other}' (expected HS256, HS384 or HS512)"
        ))),
    }
}

/// A freshly issued token as handed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
    /// Lifetime in seconds at the moment of issue.
    pub expires_in: i64,
    #[serde(skip)]
    pub expires_at: Timestamp,
}

/// Issues and verifies access tokens with a single process-wide key.
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer from configuration.
    ///
    /// Rejects an empty secret and any non-HMAC algorithm.
    pub fn new(config: &TokenConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::Config("signing secret must not be empty".into()));
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::Config(format!(
                "{:?} is not a symmetric signing algorithm",
                config.algorithm
            )));
        }

        // Expiry is checked by hand so that `now == exp` already counts as
        // expired and no leeway applies. `exp` is left out of the required
        // claims because the library reads it as unsigned; `Claims` still
        // refuses to deserialize without it.
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            algorithm: config.algorithm,
            default_ttl: config.default_ttl,
        })
    }

    /// Lifetime used by [`issue`](Self::issue).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `subject` with the default lifetime.
    pub fn issue(&self, subject: &str) -> Result<AccessToken, TokenError> {
        self.issue_with_ttl(subject, self.default_ttl)
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<AccessToken, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// A zero or negative `ttl` produces a token that is already expired.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: Timestamp,
    ) -> Result<AccessToken, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Config(format!("token lifetime {ttl} is out of range")))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let access_token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(AccessToken {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: ttl.num_seconds(),
            expires_at,
        })
    }

    /// Verify a token against the current time, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// The signature is checked before expiry, so a tampered token is always
    /// reported as [`TokenError::InvalidSignature`].
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify_decode_error)?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// Map a `jsonwebtoken` failure onto the three refusal kinds.
fn classify_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    /// Helper to build a test issuer with a known secret.
    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(&TokenConfig::new(TEST_SECRET))
            .expect("config should be valid")
    }

    /// Replace one character of the signature segment with a different one.
    fn tamper_signature(token: &str) -> String {
        let (head, signature) = token.rsplit_once('.').expect("token has three segments");
        let mut chars: Vec<char> = signature.chars().collect();
        let mid = chars.len() / 2;
        chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
        format!("{head}.{}", chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let issuer = test_issuer();
        let token = issuer.issue("jfalcon").expect("issue should succeed");

        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, DEFAULT_ACCESS_EXPIRY_MINS * 60);

        let claims = issuer.verify(&token.access_token).expect("verify should succeed");
        assert_eq!(claims.sub, "jfalcon");
        assert_eq!(claims.exp - claims.iat, DEFAULT_ACCESS_EXPIRY_MINS * 60);
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let issuer = test_issuer();
        let issued_at = Utc::now();
        let token = issuer
            .issue_at("jfalcon", Duration::seconds(30), issued_at)
            .expect("issue should succeed");

        let just_before = issued_at + Duration::seconds(29);
        assert!(issuer.verify_at(&token.access_token, just_before).is_ok());

        let at_expiry = issued_at + Duration::seconds(30);
        assert_matches!(
            issuer.verify_at(&token.access_token, at_expiry),
            Err(TokenError::Expired)
        );

        let long_after = issued_at + Duration::hours(1);
        assert_matches!(
            issuer.verify_at(&token.access_token, long_after),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let issuer = test_issuer();
        let token = issuer
            .issue_with_ttl("jfalcon", Duration::zero())
            .expect("issue should succeed");

        assert_matches!(issuer.verify(&token.access_token), Err(TokenError::Expired));
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let issuer = test_issuer();
        let token = issuer
            .issue_with_ttl("jfalcon", Duration::minutes(-5))
            .expect("issue should succeed");

        assert_matches!(issuer.verify(&token.access_token), Err(TokenError::Expired));
    }

    #[test]
    fn test_expiry_before_epoch_is_expired() {
        let issuer = test_issuer();
        let token = issuer
            .issue_with_ttl("jfalcon", Duration::days(-21_000))
            .expect("issue should succeed");

        assert_matches!(issuer.verify(&token.access_token), Err(TokenError::Expired));
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        #[derive(Serialize)]
        struct NoExpiry<'a> {
            sub: &'a str,
            iat: i64,
        }

        let issuer = test_issuer();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry { sub: "jfalcon", iat: 0 },
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert_matches!(issuer.verify(&token), Err(TokenError::Malformed(_)));
    }

    #[test]
    fn test_out_of_range_ttl_is_a_config_error() {
        let issuer = test_issuer();

        assert_matches!(
            issuer.issue_with_ttl("jfalcon", Duration::minutes(10_000_000_000_000)),
            Err(TokenError::Config(_))
        );
    }

    #[test]
    fn test_altered_signature_is_rejected() {
        let issuer = test_issuer();
        let token = issuer.issue("jfalcon").expect("issue should succeed");

        let tampered = tamper_signature(&token.access_token);
        assert_ne!(tampered, token.access_token);
        assert_matches!(issuer.verify(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_expired_token_reports_signature() {
        let issuer = test_issuer();
        let token = issuer
            .issue_with_ttl("jfalcon", Duration::zero())
            .expect("issue should succeed");

        let tampered = tamper_signature(&token.access_token);
        assert_matches!(issuer.verify(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_different_secrets_fail() {
        let issuer_a = TokenIssuer::new(&TokenConfig::new("secret-alpha")).unwrap();
        let issuer_b = TokenIssuer::new(&TokenConfig::new("secret-bravo")).unwrap();

        let token = issuer_a.issue("jfalcon").expect("issue should succeed");
        assert_matches!(
            issuer_b.verify(&token.access_token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_algorithm_mismatch_is_rejected() {
        let hs256 = test_issuer();
        let mut config = TokenConfig::new("test-secret-that-is-long-enough-for-hmac");
        config.algorithm = Algorithm::HS512;
        let hs512 = TokenIssuer::new(&config).unwrap();

        let token = hs512.issue("jfalcon").expect("issue should succeed");
        assert_matches!(
            hs256.verify(&token.access_token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let issuer = test_issuer();

        assert_matches!(issuer.verify(""), Err(TokenError::Malformed(_)));
        assert_matches!(issuer.verify("not-a-token"), Err(TokenError::Malformed(_)));
        assert_matches!(issuer.verify("a.b"), Err(TokenError::Malformed(_)));
        assert_matches!(issuer.verify("%%%.%%%.%%%"), Err(TokenError::Malformed(_)));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert_matches!(
            TokenIssuer::new(&TokenConfig::new("")),
            Err(TokenError::Config(_))
        );
    }

    #[test]
    fn test_asymmetric_algorithm_is_rejected() {
        let mut config = TokenConfig::new("secret");
        config.algorithm = Algorithm::RS256;
        assert_matches!(TokenIssuer::new(&config), Err(TokenError::Config(_)));
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(parse_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_algorithm(" hs512 ").unwrap(), Algorithm::HS512);
        assert_matches!(parse_algorithm("RS256"), Err(TokenError::Config(_)));
        assert_matches!(parse_algorithm("none"), Err(TokenError::Config(_)));
    }

    #[test]
    fn test_debug_output_hides_secret() {
        let config = TokenConfig::new("super-secret-value");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-value"));
    }
}
