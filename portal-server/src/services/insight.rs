//! AI executive summary
//!
//! Composes a prompt from the dashboard figures and asks a generative-AI
//! endpoint for prose. The answer is shown verbatim; failures collapse into
//! fixed user-facing strings and are never retried.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::DashboardStats;
use shared::{AppError, AppResult, ErrorCode};
use thiserror::Error;

use crate::core::AiConfig;

pub const NOT_CONFIGURED: &str = "API Key not configured. Please set AI_API_KEY.";
pub const GENERATION_FAILED: &str = "Error generating insights. Please try again later.";
pub const EMPTY_RESPONSE: &str = "No insights generated.";

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("AI API key not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Text generation backend
#[async_trait]
pub trait InsightProvider: Send + Sync + Debug {
    /// Whether a call can be attempted at all
    fn is_configured(&self) -> bool;

    /// Generate text for `prompt`; `Ok("")` when the model returned nothing
    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

// ── Gemini ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

/// Google Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiInsightClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl GeminiInsightClient {
    pub fn new(config: AiConfig) -> Result<Self, InsightError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl InsightProvider for GeminiInsightClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(InsightError::NotConfigured)?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}

// ── Prompt ──────────────────────────────────────────────────────────

/// Analyst prompt over the dashboard figures
pub fn build_prompt(stats: &DashboardStats, club_names: &[String]) -> String {
    let clubs_json = serde_json::to_string(club_names).unwrap_or_else(|_| "[]".into());
    let logs_json = serde_json::to_string(&stats.recent_logs).unwrap_or_else(|_| "[]".into());

    format!(
        "You are an AI analyst for a Membership Management System (Sistem Pengurusan Keahlian).
Analyze the following JSON data and provide an executive summary (in Bahasa Melayu and English).

Data:
- Total Members: {total}
- Active: {active}
- Pending: {pending}
- Total Clubs: {clubs}
- Clubs Data: {clubs_json}
- Recent Usage Activity: {logs_json}

Please provide:
1. A summary of current membership health.
2. Observations on recent activity.
3. Recommendations for the club committee to improve engagement.

Keep it professional and concise.",
        total = stats.total_members,
        active = stats.active_members,
        pending = stats.pending_members,
        clubs = stats.total_clubs,
    )
}

// ── Service ─────────────────────────────────────────────────────────

/// Single-flight wrapper around an [`InsightProvider`]
///
/// While one summary is being generated, further requests fail with
/// [`ErrorCode::InsightInProgress`] instead of calling the endpoint again.
#[derive(Debug, Clone)]
pub struct InsightService {
    provider: Arc<dyn InsightProvider>,
    in_flight: Arc<tokio::sync::Mutex<()>>,
}

impl InsightService {
    pub fn new(provider: Arc<dyn InsightProvider>) -> Self {
        Self {
            provider,
            in_flight: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub async fn executive_summary(
        &self,
        stats: &DashboardStats,
        club_names: &[String],
    ) -> AppResult<String> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| AppError::new(ErrorCode::InsightInProgress))?;

        if !self.provider.is_configured() {
            return Ok(NOT_CONFIGURED.to_string());
        }

        let prompt = build_prompt(stats, club_names);
        match self.provider.generate(&prompt).await {
            Ok(text) if text.trim().is_empty() => Ok(EMPTY_RESPONSE.to_string()),
            Ok(text) => Ok(text),
            Err(InsightError::NotConfigured) => Ok(NOT_CONFIGURED.to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Insight generation failed");
                Ok(GENERATION_FAILED.to_string())
            }
        }
    }
}
