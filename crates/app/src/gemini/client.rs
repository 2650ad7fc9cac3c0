//! Gemini REST client.

use std::fmt;

use async_trait::async_trait;
use hr_trainer::{
    intelligence::{
        AnswerEvaluation, CareerPath, Masterclass, NetworkingIntel, SalaryInsights,
        SimulationReport, decode_bundle, decode_questions,
    },
    questions::InterviewQuestion,
    upstream::{IntelligenceSource, QuestionQuery, QuestionSource, RoleQuery, UpstreamError},
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::gemini::{prompts, schema};

/// Public Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

/// Gemini API key. Wiped from memory on drop.
#[derive(Clone)]
pub struct GeminiApiKey(String);

impl GeminiApiKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GeminiApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GeminiApiKey(**redacted**)")
    }
}

impl Drop for GeminiApiKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, e.g. [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Model name, e.g. [`DEFAULT_MODEL`].
    pub model: String,

    pub api_key: GeminiApiKey,
}

/// Whether a request may use Google Search grounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grounding {
    Search,
    None,
}

/// HTTP client for `models/{model}:generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send one prompt and return the text of the first candidate.
    ///
    /// A response with no text yields an empty string.
    async fn generate(
        &self,
        prompt: String,
        schema: Value,
        grounding: Grounding,
    ) -> Result<String, UpstreamError> {
        debug!(model = %self.config.model, ?grounding, "sending generateContent request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.expose())
            .json(&request_body(prompt, schema, grounding))
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = classify_failure(status, &text);

            warn!(%status, kind = error.kind(), "generateContent request failed");

            return Err(error);
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(transport_failure)?;

        Ok(parsed.into_text())
    }
}

fn request_body(prompt: String, schema: Value, grounding: Grounding) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
            "thinkingConfig": { "thinkingBudget": 0 }
        }
    });

    if grounding == Grounding::Search
        && let Some(fields) = body.as_object_mut()
    {
        fields.insert("tools".to_string(), json!([{ "googleSearch": {} }]));
    }

    body
}

fn classify_failure(status: StatusCode, body: &str) -> UpstreamError {
    if status == StatusCode::TOO_MANY_REQUESTS || body.contains(RESOURCE_EXHAUSTED) {
        return UpstreamError::RateLimited;
    }

    UpstreamError::Failure(format!("generateContent failed with status {status}: {body}"))
}

fn transport_failure(error: reqwest::Error) -> UpstreamError {
    if error.status() == Some(StatusCode::TOO_MANY_REQUESTS) {
        return UpstreamError::RateLimited;
    }

    UpstreamError::Failure(error.to_string())
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuestionSource for GeminiClient {
    async fn search_questions(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<InterviewQuestion>, UpstreamError> {
        let text = self
            .generate(prompts::questions(query), schema::questions(), Grounding::Search)
            .await?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut questions = decode_questions(&text)?;

        questions.truncate(query.batch_size);

        Ok(questions)
    }
}

#[async_trait]
impl IntelligenceSource for GeminiClient {
    async fn career_path(&self, role: &RoleQuery) -> Result<CareerPath, UpstreamError> {
        let text = self
            .generate(prompts::career_path(role), schema::career_path(), Grounding::Search)
            .await?;

        Ok(decode_bundle(&text)?)
    }

    async fn salary(&self, role: &RoleQuery) -> Result<SalaryInsights, UpstreamError> {
        let text = self
            .generate(prompts::salary(role), schema::salary(), Grounding::Search)
            .await?;

        Ok(decode_bundle(&text)?)
    }

    async fn networking(&self, role: &RoleQuery) -> Result<NetworkingIntel, UpstreamError> {
        let text = self
            .generate(prompts::networking(role), schema::networking(), Grounding::Search)
            .await?;

        Ok(decode_bundle(&text)?)
    }

    async fn masterclass(
        &self,
        role: &RoleQuery,
        question: &InterviewQuestion,
    ) -> Result<Masterclass, UpstreamError> {
        let text = self
            .generate(
                prompts::masterclass(role, question),
                schema::masterclass(),
                Grounding::None,
            )
            .await?;

        Ok(decode_bundle(&text)?)
    }

    async fn evaluate_answer(
        &self,
        role: &RoleQuery,
        question: &InterviewQuestion,
        answer: &str,
    ) -> Result<AnswerEvaluation, UpstreamError> {
        let text = self
            .generate(
                prompts::answer_evaluation(role, question, answer),
                schema::answer_evaluation(),
                Grounding::None,
            )
            .await?;

        Ok(decode_bundle(&text)?)
    }

    async fn simulation_report(
        &self,
        role: &RoleQuery,
        transcript: &[String],
    ) -> Result<SimulationReport, UpstreamError> {
        let text = self
            .generate(
                prompts::simulation_report(role, transcript),
                schema::simulation_report(),
                Grounding::None,
            )
            .await?;

        Ok(decode_bundle(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            base_url: base_url.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: GeminiApiKey::new("test-key"),
        })
    }

    #[test]
    fn endpoint_tolerates_a_trailing_slash() {
        assert_eq!(
            client("https://example.test/").endpoint(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let rendered = format!("{:?}", client("https://example.test"));

        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("**redacted**"));
    }

    #[test]
    fn grounded_requests_carry_the_search_tool() {
        let body = request_body("prompt".to_string(), json!({}), Grounding::Search);

        assert_eq!(body.get("tools"), Some(&json!([{ "googleSearch": {} }])));
        assert_eq!(
            body.pointer("/generationConfig/thinkingConfig/thinkingBudget"),
            Some(&json!(0))
        );
    }

    #[test]
    fn ungrounded_requests_have_no_tools() {
        let body = request_body("prompt".to_string(), json!({}), Grounding::None);

        assert_eq!(body.get("tools"), None);
        assert_eq!(
            body.pointer("/contents/0/parts/0/text"),
            Some(&json!("prompt"))
        );
    }

    #[test]
    fn too_many_requests_is_rate_limited() {
        let error = classify_failure(StatusCode::TOO_MANY_REQUESTS, "");

        assert!(matches!(error, UpstreamError::RateLimited));
    }

    #[test]
    fn resource_exhausted_body_is_rate_limited() {
        let error = classify_failure(
            StatusCode::FORBIDDEN,
            r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#,
        );

        assert!(matches!(error, UpstreamError::RateLimited));
    }

    #[test]
    fn other_failures_keep_the_status() {
        let error = classify_failure(StatusCode::BAD_GATEWAY, "upstream down");

        assert!(
            matches!(error, UpstreamError::Failure(ref message) if message.contains("502")),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn text_is_joined_from_the_first_candidate() -> TestResult {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "[{\"id\"" }, { "text": ": 1}]" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))?;

        assert_eq!(response.into_text(), "[{\"id\": 1}]");

        Ok(())
    }

    #[test]
    fn missing_candidates_yield_empty_text() -> TestResult {
        let response: GenerateContentResponse = serde_json::from_value(json!({}))?;

        assert_eq!(response.into_text(), "");

        Ok(())
    }
}
