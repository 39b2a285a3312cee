use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{SessionClaims, TokenConfig};
use crate::identity::IdentityRecord;
use crate::AuthError;

/// A freshly minted session token together with its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed, encoded token.
    pub token: String,
    /// Absolute expiry; always issuance time plus the configured duration.
    pub expires_at: DateTime<Utc>,
}

/// Encodes and decodes session tokens.
#[derive(Clone)]
pub struct TokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Creates a new codec with the given configuration.
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.expose_secret().as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a signed session token for an identity record.
    ///
    /// The expiry claim is `now + configured duration`; it is never
    /// refreshed in place afterwards.
    pub fn issue(&self, identity: &IdentityRecord) -> Result<IssuedToken, AuthError> {
        let expires_at = Utc::now() + self.config.expiry;

        let claims = SessionClaims {
            name: identity.name.clone(),
            email: identity.email.clone(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenInvalid)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies a session token and returns its claims.
    ///
    /// Signature failure and expiry both surface as `TokenInvalid`;
    /// the concrete reason is only logged, never returned, so callers
    /// cannot tell which check rejected the token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => {
                log::debug!(
                    target: "gatehouse::token",
                    "msg=\"session token rejected\" reason=\"{err}\""
                );
                Err(AuthError::TokenInvalid)
            }
        }
    }

    /// Returns the configured token expiry duration.
    pub fn expiry(&self) -> Duration {
        self.config.expiry()
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Header;

    use super::*;
    use crate::secret::SecretString;

    fn codec_with_secret(secret: &str) -> TokenCodec {
        let config =
            TokenConfig::new(SecretString::new(secret), Duration::hours(2)).unwrap();
        TokenCodec::new(config)
    }

    fn identity() -> IdentityRecord {
        IdentityRecord {
            name: "Ada Lovelace".to_owned(),
            given_name: "Ada".to_owned(),
            family_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
        }
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let codec = codec_with_secret("test-secret-32-bytes-long-key-01");

        let issued = codec.issue(&identity()).unwrap();
        let claims = codec.verify(&issued.token).unwrap();

        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert!(claims.expires_later_than_now());
    }

    #[test]
    fn test_expiry_is_now_plus_configured_duration() {
        let codec = codec_with_secret("test-secret-32-bytes-long-key-02");

        let before = Utc::now() + Duration::hours(2);
        let issued = codec.issue(&identity()).unwrap();
        let after = Utc::now() + Duration::hours(2);

        assert!(issued.expires_at >= before - Duration::seconds(1));
        assert!(issued.expires_at <= after + Duration::seconds(1));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = codec_with_secret("test-secret-32-bytes-long-key-03");

        let issued = codec.issue(&identity()).unwrap();
        let (message, signature) = issued.token.rsplit_once('.').unwrap();
        let flipped: String = signature
            .chars()
            .map(|c| if c == 'A' { 'B' } else { 'A' })
            .collect();
        let tampered = format!("{message}.{flipped}");

        assert_eq!(codec.verify(&tampered), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec1 = codec_with_secret("test-secret-32-bytes-long-key-04");
        let codec2 = codec_with_secret("test-secret-32-bytes-long-key-05");

        let issued = codec1.issue(&identity()).unwrap();
        assert_eq!(codec2.verify(&issued.token), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_expired_token_rejected_indistinguishably() {
        let secret = "test-secret-32-bytes-long-key-06";
        let codec = codec_with_secret(secret);

        let claims = SessionClaims {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            exp: Utc::now().timestamp() - 3600,
        };
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let token = jsonwebtoken::encode(&Header::default(), &claims, &encoding_key).unwrap();

        // Same error as a signature failure.
        assert_eq!(codec.verify(&token), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let codec = codec_with_secret("test-secret-32-bytes-long-key-07");
        assert_eq!(codec.verify("not-a-token"), Err(AuthError::TokenInvalid));
    }
}
