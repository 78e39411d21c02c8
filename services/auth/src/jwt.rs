//! JWT service for token generation and validation
//!
//! Tokens are signed with a shared secret using one of the HMAC algorithms
//! (HS256, HS384, HS512). The `sub` claim carries the account email.

use anyhow::Result;
pub use jsonwebtoken::Algorithm;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret used to sign and verify tokens
    pub secret: String,
    /// Signing algorithm
    pub algorithm: Algorithm,
    /// Token lifetime in seconds when none is requested (default: 15 minutes)
    pub access_token_expiry: u64,
    /// Token lifetime in seconds for interactive login (default: 30 minutes)
    pub login_token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required)
    /// - `JWT_ALGORITHM`: One of HS256, HS384, HS512 (default: HS256)
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Default token expiry in seconds (default: 900)
    /// - `JWT_LOGIN_TOKEN_EXPIRY`: Login token expiry in seconds (default: 1800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        if secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let algorithm: Algorithm = std::env::var("JWT_ALGORITHM")
            .unwrap_or_else(|_| "HS256".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid JWT_ALGORITHM: {}", e))?;

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);

        let login_token_expiry = std::env::var("JWT_LOGIN_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "1800".to_string())
            .parse()
            .unwrap_or(1800);

        Ok(JwtConfig {
            secret,
            algorithm,
            access_token_expiry,
            login_token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AuthError::Configuration(format!(
                "{:?} is not a shared-secret algorithm",
                config.algorithm
            )));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Generate a token for `subject`, valid for `expires_in` seconds or the
    /// configured default
    pub fn generate_token(&self, subject: &str, expires_in: Option<u64>) -> AuthResult<String> {
        let now = now_secs()?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + expires_in.unwrap_or(self.config.access_token_expiry),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Generate the token handed out by interactive login
    pub fn generate_login_token(&self, subject: &str) -> AuthResult<String> {
        self.generate_token(subject, Some(self.config.login_token_expiry))
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AuthError::InvalidToken(e)
            })?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(AuthError::MissingClaim);
        }

        Ok(token_data.claims)
    }
}

fn now_secs() -> AuthResult<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry: 900,
            login_token_expiry: 1800,
        }
    }

    fn service() -> JwtService {
        JwtService::new(config()).unwrap()
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", "s3cr3t");
            std::env::remove_var("JWT_ALGORITHM");
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
            std::env::remove_var("JWT_LOGIN_TOKEN_EXPIRY");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.login_token_expiry, 1800);

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_jwt_config_custom_algorithm() {
        unsafe {
            std::env::set_var("JWT_SECRET", "s3cr3t");
            std::env::set_var("JWT_ALGORITHM", "HS512");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.algorithm, Algorithm::HS512);

        unsafe {
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("JWT_ALGORITHM");
        }
    }

    #[test]
    #[serial]
    fn test_jwt_config_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }

        assert!(JwtConfig::from_env().is_err());
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let config = JwtConfig {
            algorithm: Algorithm::RS256,
            ..config()
        };

        assert!(matches!(
            JwtService::new(config),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn test_token_round_trip_recovers_subject() {
        let service = service();
        let token = service.generate_login_token("rickstar@fake.com").unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "rickstar@fake.com");
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_default_expiry_is_fifteen_minutes() {
        let service = service();
        let token = service.generate_token("rickstar@fake.com", None).unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service();
        let now = now_secs().unwrap();
        let claims = Claims {
            sub: "rickstar@fake.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &service.encoding_key).unwrap();

        let err = service.validate_token(&token).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = JwtService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..config()
        })
        .unwrap();
        let token = other.generate_token("rickstar@fake.com", None).unwrap();

        assert!(matches!(
            service().validate_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_without_subject_is_rejected() {
        let service = service();
        let exp = now_secs().unwrap() + 600;
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "exp": exp }),
            &service.encoding_key,
        )
        .unwrap();

        assert!(service.validate_token(&token).unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_token_with_empty_subject_is_rejected() {
        let service = service();
        let token = service.generate_token("", None).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::MissingClaim)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(service().validate_token("not.a.token").is_err());
    }
}
