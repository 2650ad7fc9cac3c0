//! Access token encoding, signing and verification.
//!
//! A token is two base64url segments joined by a dot: the compact JSON payload, then the
//! HMAC-SHA256 of exactly those JSON bytes. Verification also accepts the standard
//! alphabet, padded or not.

use std::fmt;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use hmac::{Hmac, Mac};
use jiff::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::tokens::{SigningError, TokenTtl, VerificationError};

type HmacSha256 = Hmac<Sha256>;

const SEGMENT_SEPARATOR: char = '.';

/// Number of leading characters shown when a token is previewed.
pub const TOKEN_PREVIEW_CHARS: usize = 15;

/// Encodes without padding, decodes with or without it.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Standard alphabet, decode only.
const BASE64_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Unsigned token contents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Expiry as milliseconds since the Unix epoch.
    pub exp: i64,

    /// Collision breaker. Not a security property.
    #[serde(default)]
    pub rnd: f64,
}

impl TokenPayload {
    /// Build a payload expiring `ttl` after `now` with a fresh nonce.
    #[must_use]
    pub fn expiring(now: Timestamp, ttl: TokenTtl) -> Self {
        Self {
            exp: now.as_millisecond().saturating_add(ttl.as_millis()),
            rnd: rand::thread_rng().r#gen::<f64>(),
        }
    }

    /// Expiry as a timestamp, if representable.
    pub fn expires_at(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.exp).ok()
    }

    /// Whether the payload has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_millisecond() > self.exp
    }
}

/// Encoded access token.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string without validating it.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw token string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Leading characters of the token, safe to show in listings.
    #[must_use]
    pub fn preview(&self) -> String {
        let mut preview: String = self.0.chars().take(TOKEN_PREVIEW_CHARS).collect();

        if self.0.chars().count() > TOKEN_PREVIEW_CHARS {
            preview.push_str("...");
        }

        preview
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({})", self.preview())
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Shared HMAC key used to sign and verify tokens.
#[derive(Clone)]
pub struct TokenSecret {
    bytes: Vec<u8>,
}

impl TokenSecret {
    /// Create a secret from raw key material.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Borrow the key material.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn mac(&self) -> Result<HmacSha256, hmac::digest::InvalidLength> {
        HmacSha256::new_from_slice(&self.bytes)
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl From<String> for TokenSecret {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

/// Token together with the payload it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedToken {
    /// Encoded token.
    pub token: AccessToken,

    /// Signed payload.
    pub payload: TokenPayload,
}

/// Issue a new token valid for `ttl` from `now`.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized or the key is rejected.
pub fn issue(
    secret: &TokenSecret,
    ttl: TokenTtl,
    now: Timestamp,
) -> Result<SignedToken, SigningError> {
    let payload = TokenPayload::expiring(now, ttl);
    let token = sign(&payload, secret)?;

    Ok(SignedToken { token, payload })
}

/// Sign a payload. Deterministic for a fixed payload and secret.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized or the key is rejected.
pub fn sign(payload: &TokenPayload, secret: &TokenSecret) -> Result<AccessToken, SigningError> {
    let json = serde_json::to_vec(payload).map_err(SigningError::Payload)?;

    let mut mac = secret.mac().map_err(SigningError::Key)?;
    mac.update(&json);

    let signature = mac.finalize().into_bytes();

    Ok(AccessToken(format!(
        "{}{SEGMENT_SEPARATOR}{}",
        BASE64URL.encode(&json),
        BASE64URL.encode(signature)
    )))
}

/// Verify a token and return its payload.
///
/// Checks run in order: shape, payload decoding, expiry, then signature. The signature
/// comparison is constant time.
///
/// # Errors
///
/// Returns the first check that failed.
pub fn verify(
    token: &str,
    secret: &TokenSecret,
    now: Timestamp,
) -> Result<TokenPayload, VerificationError> {
    let (payload_segment, signature_segment) = split_segments(token)?;

    let json = decode_segment(payload_segment).ok_or(VerificationError::Malformed)?;

    let payload: TokenPayload =
        serde_json::from_slice(&json).map_err(|_json_error| VerificationError::Malformed)?;

    if payload.is_expired_at(now) {
        return Err(VerificationError::Expired);
    }

    let signature = decode_segment(signature_segment).ok_or(VerificationError::BadSignature)?;

    let mut mac = secret
        .mac()
        .map_err(|_key_error| VerificationError::BadSignature)?;
    mac.update(&json);

    mac.verify_slice(&signature)
        .map_err(|_mac_error| VerificationError::BadSignature)?;

    Ok(payload)
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    BASE64URL
        .decode(segment)
        .or_else(|_url_safe_error| BASE64_STANDARD.decode(segment))
        .ok()
}

fn split_segments(token: &str) -> Result<(&str, &str), VerificationError> {
    let mut segments = token.split(SEGMENT_SEPARATOR);

    match (segments.next(), segments.next(), segments.next()) {
        (Some(payload), Some(signature), None) if !payload.is_empty() && !signature.is_empty() => {
            Ok((payload, signature))
        }
        _ => Err(VerificationError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    fn secret() -> TokenSecret {
        TokenSecret::new("correct horse battery staple")
    }

    fn now() -> Timestamp {
        Timestamp::from_millisecond(1_767_225_600_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    fn payload() -> TokenPayload {
        TokenPayload {
            exp: now().as_millisecond() + 3_600_000,
            rnd: 0.123_456_789_012_345_6,
        }
    }

    fn signature_segment(token: &AccessToken) -> Option<&str> {
        token.as_str().split_once('.').map(|(_, signature)| signature)
    }

    #[test]
    fn sign_then_verify_returns_the_same_payload() -> TestResult {
        let token = sign(&payload(), &secret())?;

        assert_eq!(verify(token.as_str(), &secret(), now())?, payload());

        Ok(())
    }

    #[test]
    fn sign_is_deterministic() -> TestResult {
        assert_eq!(sign(&payload(), &secret())?, sign(&payload(), &secret())?);

        Ok(())
    }

    #[test]
    fn issue_sets_expiry_from_ttl() -> TestResult {
        let issued = issue(&secret(), TokenTtl::SixHours, now())?;

        assert_eq!(issued.payload.exp, now().as_millisecond() + 6 * 3_600_000);
        assert_eq!(verify(issued.token.as_str(), &secret(), now())?, issued.payload);

        Ok(())
    }

    #[test]
    fn issued_tokens_are_unpadded_base64url() -> TestResult {
        let issued = issue(&secret(), TokenTtl::OneDay, now())?;

        assert!(
            !issued.token.as_str().contains(['=', '+', '/']),
            "token should only use the url-safe alphabet without padding"
        );

        Ok(())
    }

    #[test]
    fn standard_alphabet_tokens_verify() -> TestResult {
        // Pick a payload whose encoding needs at least one url-safe character.
        let (token, payload) = (0..10_000_u32)
            .map(|step| TokenPayload {
                rnd: f64::from(step) / 10_000.0,
                ..payload()
            })
            .find_map(|payload| {
                let token = sign(&payload, &secret()).ok()?;

                token
                    .as_str()
                    .contains(['-', '_'])
                    .then_some((token, payload))
            })
            .ok_or("no payload produced a url-safe character")?;

        let standard = token.as_str().replace('-', "+").replace('_', "/");
        let (payload_segment, signature) = standard
            .split_once('.')
            .ok_or("token should contain a separator")?;
        let padded = format!(
            "{payload_segment}{}.{signature}=",
            "=".repeat((4 - payload_segment.len() % 4) % 4)
        );

        assert_eq!(verify(&standard, &secret(), now())?, payload);
        assert_eq!(verify(&padded, &secret(), now())?, payload);

        Ok(())
    }

    #[test]
    fn payload_json_uses_exp_and_rnd_keys() -> TestResult {
        let json = serde_json::to_string(&payload())?;

        assert!(json.starts_with("{\"exp\":"), "unexpected payload json {json}");
        assert!(json.contains("\"rnd\":"), "unexpected payload json {json}");

        Ok(())
    }

    #[test]
    fn flipping_any_signature_character_is_a_bad_signature() -> TestResult {
        let token = sign(&payload(), &secret())?;
        let (payload_segment, signature) = token
            .as_str()
            .split_once('.')
            .ok_or("token should contain a separator")?;

        for position in 0..signature.chars().count() {
            let tampered: String = signature
                .chars()
                .enumerate()
                .map(|(index, c)| match (index == position, c) {
                    (true, 'A') => 'B',
                    (true, _) => 'A',
                    (false, c) => c,
                })
                .collect();

            let result = verify(&format!("{payload_segment}.{tampered}"), &secret(), now());

            assert_eq!(
                result,
                Err(VerificationError::BadSignature),
                "flip at position {position} should be rejected"
            );
        }

        Ok(())
    }

    #[test]
    fn re_signed_payload_with_other_expiry_is_a_bad_signature() -> TestResult {
        let token = sign(&payload(), &secret())?;
        let signature = signature_segment(&token).ok_or("token should contain a separator")?;

        let forged = TokenPayload {
            exp: payload().exp + 86_400_000,
            ..payload()
        };
        let forged_json = BASE64URL.encode(serde_json::to_vec(&forged)?);

        assert_eq!(
            verify(&format!("{forged_json}.{signature}"), &secret(), now()),
            Err(VerificationError::BadSignature)
        );

        Ok(())
    }

    #[test]
    fn wrong_secret_is_a_bad_signature() -> TestResult {
        let token = sign(&payload(), &secret())?;

        assert_eq!(
            verify(token.as_str(), &TokenSecret::new("other"), now()),
            Err(VerificationError::BadSignature)
        );

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected_after_ttl() -> TestResult {
        let issued = issue(&secret(), TokenTtl::OneHour, now())?;
        let later = now().checked_add(Duration::from_secs(3_600) + Duration::from_millis(1))?;

        assert_eq!(
            verify(issued.token.as_str(), &secret(), later),
            Err(VerificationError::Expired)
        );

        Ok(())
    }

    #[test]
    fn token_is_still_valid_at_the_exact_expiry_instant() -> TestResult {
        let issued = issue(&secret(), TokenTtl::OneHour, now())?;
        let at_expiry = now().checked_add(Duration::from_secs(3_600))?;

        assert!(verify(issued.token.as_str(), &secret(), at_expiry).is_ok());

        Ok(())
    }

    #[test]
    fn expiry_is_checked_before_the_signature() -> TestResult {
        let token = sign(&payload(), &secret())?;
        let later = now().checked_add(Duration::from_secs(7_200))?;

        assert_eq!(
            verify(token.as_str(), &TokenSecret::new("other"), later),
            Err(VerificationError::Expired)
        );

        Ok(())
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        for token in ["", ".", "abc", "abc.", ".abc", "a.b.c", "!!!.abc"] {
            assert_eq!(
                verify(token, &secret(), now()),
                Err(VerificationError::Malformed),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn payload_without_exp_is_malformed() {
        let json = BASE64URL.encode(b"{\"rnd\":0.5}");

        assert_eq!(
            verify(&format!("{json}.c2lnbmF0dXJl"), &secret(), now()),
            Err(VerificationError::Malformed)
        );
    }

    #[test]
    fn payload_without_rnd_still_verifies() -> TestResult {
        let json = format!("{{\"exp\":{}}}", payload().exp);
        let mut mac = secret().mac().map_err(|error| error.to_string())?;
        mac.update(json.as_bytes());

        let token = format!(
            "{}.{}",
            BASE64URL.encode(json.as_bytes()),
            BASE64URL.encode(mac.finalize().into_bytes())
        );

        let verified = verify(&token, &secret(), now())?;

        assert_eq!(verified.exp, payload().exp);
        assert!(verified.rnd.abs() < f64::EPSILON, "missing rnd should default to zero");

        Ok(())
    }

    #[test]
    fn padded_segments_are_accepted() -> TestResult {
        let token = sign(&payload(), &secret())?;
        let (payload_segment, signature) = token
            .as_str()
            .split_once('.')
            .ok_or("token should contain a separator")?;

        let pad = |segment: &str| {
            let missing = (4 - segment.len() % 4) % 4;
            format!("{segment}{}", "=".repeat(missing))
        };

        let padded = format!("{}.{}", pad(payload_segment), pad(signature));

        assert_eq!(verify(&padded, &secret(), now())?, payload());

        Ok(())
    }

    #[test]
    fn preview_truncates_long_tokens() {
        let token = AccessToken::new("abcdefghijklmnopqrstuvwxyz");

        assert_eq!(token.preview(), "abcdefghijklmno...");
        assert_eq!(format!("{token:?}"), "AccessToken(abcdefghijklmno...)");
    }

    #[test]
    fn secret_debug_is_redacted() {
        assert_eq!(format!("{:?}", secret()), "TokenSecret(**redacted**)");
    }
}
