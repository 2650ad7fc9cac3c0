//! Gemini Config

use clap::Args;
use hr_trainer_app::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiApiKey, GeminiConfig};

/// Gemini API settings.
#[derive(Args)]
pub struct GeminiSettings {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Model used for every request
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Generative Language API root
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,
}

impl GeminiSettings {
    #[must_use]
    pub fn client_config(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.gemini_base_url.clone(),
            model: self.gemini_model.clone(),
            api_key: GeminiApiKey::new(self.gemini_api_key.clone()),
        }
    }
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("gemini_api_key", &"**redacted**")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .finish()
    }
}
