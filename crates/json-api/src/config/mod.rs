//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    coaching::CoachingConfig,
    db::DatabaseConfig,
    gemini::GeminiSettings,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod coaching;
pub(crate) mod db;
pub(crate) mod gemini;
pub(crate) mod observability;
pub(crate) mod server;

/// HR Trainer JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "hr-trainer-json", about = "HR Trainer JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Token store database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Token signing and admin secrets.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Gemini API settings.
    #[command(flatten)]
    pub gemini: GeminiSettings,

    /// Session and orchestration tuning.
    #[command(flatten)]
    pub coaching: CoachingConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env file is fine.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
