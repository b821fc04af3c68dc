use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::core::config::AuthConfig;
use crate::core::error::AppError;

/// Claims carried by the gateway-minted access token.
/// Issuance and refresh live outside this service; we only read the subject.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: String,
    #[serde(rename = "exp")]
    _exp: u64,
}

/// Decodes access tokens with the shared HMAC secret.
pub struct TokenDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode the token and return the user id it was minted for.
    pub fn subject(&self, token: &str) -> Result<i64, AppError> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}
