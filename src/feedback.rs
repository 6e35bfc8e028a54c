//! Answer feedback: provider abstraction over a generative-text API.
//!
//! The scoring core never calls this; the service layer fetches feedback and
//! hands the resulting text (or the fallback message) to the report.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analyze::anon_id;
use crate::config::FeedbackConfig;

/// Text embedded in the report when feedback could not be generated.
pub const FEEDBACK_ERROR_TEXT: &str = "An error occurred while generating feedback.";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

const USER_AGENT: &str = "interview-feedback/0.1";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait object used by handlers and tests.
pub trait FeedbackClient: Send + Sync {
    /// Ask the provider whether `answer` is a correct answer to `question`.
    fn evaluate<'a>(
        &'a self,
        question: &'a str,
        answer: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<String>>;
    /// Provider name for diagnostics and metrics labels.
    fn provider_name(&self) -> &'static str;
}

pub type DynFeedbackClient = Arc<dyn FeedbackClient>;

/// Prompt sent to the provider.
pub fn build_prompt(question: &str, answer: &str) -> String {
    format!("User's answer: {answer}. Is this answer correct for the question \"{question}\"?")
}

/// Factory: build a client according to config and environment variables.
///
/// * If `FEEDBACK_TEST_MODE=mock`, returns a deterministic mock client.
/// * Else if `config.enabled == false`, returns a disabled client.
/// * Else builds the configured provider.
pub fn build_client(config: &FeedbackConfig) -> DynFeedbackClient {
    if std::env::var("FEEDBACK_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(MockClient::default());
    }

    if !config.enabled {
        return Arc::new(DisabledClient);
    }

    let built: anyhow::Result<DynFeedbackClient> = match config.provider.as_str() {
        "openai" => OpenAiClient::new(config).map(|c| Arc::new(c) as DynFeedbackClient),
        _ => GeminiClient::new(config).map(|c| Arc::new(c) as DynFeedbackClient),
    };
    match built {
        Ok(client) => {
            info!(
                target: "feedback",
                provider = client.provider_name(),
                key_len = config.api_key.len(),
                "feedback client ready"
            );
            client
        }
        Err(e) => {
            warn!(target: "feedback", error = %e, "feedback client unavailable, disabling");
            Arc::new(DisabledClient)
        }
    }
}

/// Feedback text, or `FEEDBACK_ERROR_TEXT` when the provider fails.
pub async fn feedback_or_fallback(client: &dyn FeedbackClient, question: &str, answer: &str) -> String {
    match client.evaluate(question, answer).await {
        Ok(text) => {
            metrics::counter!(
                "interview_feedback_requests_total",
                "provider" => client.provider_name(),
                "outcome" => "ok"
            )
            .increment(1);
            text
        }
        Err(e) => {
            metrics::counter!(
                "interview_feedback_requests_total",
                "provider" => client.provider_name(),
                "outcome" => "error"
            )
            .increment(1);
            warn!(
                target: "feedback",
                provider = client.provider_name(),
                id = %anon_id(answer),
                error = %e,
                "feedback generation failed"
            );
            FEEDBACK_ERROR_TEXT.to_string()
        }
    }
}

fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(4))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("build HTTP client")
}

fn model_or(config: &FeedbackConfig, default: &str) -> String {
    if config.model.trim().is_empty() {
        default.to_string()
    } else {
        config.model.trim().to_string()
    }
}

fn non_empty(text: &str) -> anyhow::Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        anyhow::bail!("provider returned empty feedback");
    }
    Ok(trimmed.to_string())
}

// ------------------------------------------------------------
// Gemini (generateContent REST API)
// ------------------------------------------------------------

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &FeedbackConfig) -> anyhow::Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("missing Gemini API key");
        }
        Ok(Self {
            http: http_client(config.timeout_secs)?,
            api_key: config.api_key.clone(),
            model: model_or(config, DEFAULT_GEMINI_MODEL),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        })
    }

    async fn evaluate_impl(&self, question: &str, answer: &str) -> anyhow::Result<String> {
        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }
        #[derive(Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            contents: Vec<Content<'a>>,
        }
        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: RespContent,
        }
        #[derive(Deserialize)]
        struct RespContent {
            #[serde(default)]
            parts: Vec<RespPart>,
        }
        #[derive(Deserialize)]
        struct RespPart {
            #[serde(default)]
            text: String,
        }

        let prompt = build_prompt(question, answer);
        let req = Req {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .await
            .context("gemini request")?
            .error_for_status()
            .context("gemini status")?;

        let body: Resp = resp.json().await.context("gemini response body")?;
        let text = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        non_empty(&text)
    }
}

impl FeedbackClient for GeminiClient {
    fn evaluate<'a>(
        &'a self,
        question: &'a str,
        answer: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<String>> {
        Box::pin(self.evaluate_impl(question, answer))
    }
    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

// ------------------------------------------------------------
// OpenAI (Chat Completions API)
// ------------------------------------------------------------

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &FeedbackConfig) -> anyhow::Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("missing OpenAI API key");
        }
        Ok(Self {
            http: http_client(config.timeout_secs)?,
            api_key: config.api_key.clone(),
            model: model_or(config, DEFAULT_OPENAI_MODEL),
        })
    }

    async fn evaluate_impl(&self, question: &str, answer: &str) -> anyhow::Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let prompt = build_prompt(question, answer);
        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: "You review interview answers. Say whether the answer is correct and how to improve it.",
                },
                Msg {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.3,
        };

        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("openai request")?
            .error_for_status()
            .context("openai status")?;

        let body: Resp = resp.json().await.context("openai response body")?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("");
        non_empty(content)
    }
}

impl FeedbackClient for OpenAiClient {
    fn evaluate<'a>(
        &'a self,
        question: &'a str,
        answer: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<String>> {
        Box::pin(self.evaluate_impl(question, answer))
    }
    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// ------------------------------------------------------------
// Disabled + mock
// ------------------------------------------------------------

/// Always fails; used when feedback is disabled.
pub struct DisabledClient;

impl FeedbackClient for DisabledClient {
    fn evaluate<'a>(
        &'a self,
        _question: &'a str,
        _answer: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<String>> {
        Box::pin(async { Err(anyhow::anyhow!("feedback generation is disabled")) })
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic client for tests and local runs.
#[derive(Clone)]
pub struct MockClient {
    pub fixed: String,
}

impl Default for MockClient {
    fn default() -> Self {
        Self {
            fixed: "The answer is on topic (mock).".to_string(),
        }
    }
}

impl FeedbackClient for MockClient {
    fn evaluate<'a>(
        &'a self,
        _question: &'a str,
        _answer: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<String>> {
        let out = self.fixed.clone();
        Box::pin(async move { Ok(out) })
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
