//! Unverified decoding of the token payload segment.

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine, alphabet};

use backoffice_core::error::AppError;

use super::claims::TokenClaims;

/// Reasons a token payload could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// No token was stored.
    #[error("No access token present")]
    Missing,

    /// The token does not have a payload segment.
    #[error("Token is not in header.payload.signature form")]
    InvalidFormat,

    /// The payload segment is not valid base64.
    #[error("Token payload is not valid base64")]
    InvalidEncoding,

    /// The payload is not a JSON object with the expected claims.
    #[error("Token payload is not valid JSON claims: {0}")]
    InvalidClaims(String),
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Missing => AppError::authentication("Authentication required"),
            other => AppError::authentication(format!("Invalid access token: {other}")),
        }
    }
}

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// base64url, the alphabet JWTs are issued in.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Standard alphabet, for tokens re-encoded by other clients.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Decode the claims of a JWT-shaped token without checking its signature.
///
/// Accepts both base64url and standard alphabets, padded or not.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Missing);
    }

    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::InvalidFormat)?;

    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .map_err(|_| TokenError::InvalidEncoding)?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::InvalidClaims(e.to_string()))
}
