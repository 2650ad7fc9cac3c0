//! Auth Config

use std::fmt;

use clap::Args;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Secret shared with admins, presented as a bearer token.
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Compare `candidate` against the secret in constant time.
    ///
    /// An empty secret never matches.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }

        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(**redacted**)")
    }
}

impl Drop for AdminSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::str::FromStr for AdminSecret {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(value))
    }
}

/// Token signing and admin settings.
#[derive(Args)]
pub struct AuthConfig {
    /// Secret used to sign and verify access tokens
    #[arg(long, env = "TOKEN_SIGNING_SECRET", hide_env_values = true)]
    pub token_signing_secret: String,

    /// Bearer secret for the admin endpoints
    #[arg(long, env = "ADMIN_SECRET", hide_env_values = true)]
    pub admin_secret: AdminSecret,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_signing_secret", &"**redacted**")
            .field("admin_secret", &self.admin_secret)
            .finish()
    }
}
