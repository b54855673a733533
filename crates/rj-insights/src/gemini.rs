//! Google Generative Language API client.

use async_trait::async_trait;
use rj_config::InsightsConfig;
use rj_core::entities::{InsightPayload, Task};
use rj_core::responses::DailySummary;
use serde::{Deserialize, Serialize};

use crate::http::check_response;
use crate::prompt::{extract_json, summary_prompt, task_prompt};
use crate::{GenerationError, InsightContext, InsightGenerator, fallback};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
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
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Insight generator backed by a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    http: reqwest::Client,
    api_key: String,
    model: String,
    summary_model: String,
    endpoint: String,
}

impl GeminiGenerator {
    /// Build a client from the `[insights]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Other`] if no API key is configured and
    /// [`GenerationError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &InsightsConfig) -> Result<Self, GenerationError> {
        config
            .require_configured()
            .map_err(|error| GenerationError::Other(error.to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent("rolejuggler/0.1")
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            summary_model: config.summary_model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent?key={}",
            self.endpoint,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let resp = check_response(self.http.post(self.url(model)).json(&body).send().await?).await?;
        let data: GenerateResponse = resp.json().await?;
        data.text().ok_or(GenerationError::EmptyResponse)
    }

    /// End-of-day overview of finished and ongoing work. Never cached.
    ///
    /// Failures resolve to a fixed stand-in summary rather than an error.
    pub async fn daily_summary(
        &self,
        completed: &[Task],
        current: &[Task],
        company: &str,
    ) -> DailySummary {
        let prompt = summary_prompt(completed, current, company);
        match self.generate_text(&self.summary_model, &prompt).await {
            Ok(text) => extract_json(&text).unwrap_or_else(fallback::summary_unparseable),
            Err(error) => {
                tracing::warn!(%error, "daily summary generation failed");
                fallback::summary_failed()
            }
        }
    }
}

#[async_trait]
impl InsightGenerator for GeminiGenerator {
    async fn generate(&self, context: &InsightContext) -> Result<InsightPayload, GenerationError> {
        let prompt = task_prompt(context);
        tracing::debug!(task_id = context.task_id(), model = %self.model, "requesting insight");
        let text = self.generate_text(&self.model, &prompt).await?;
        Ok(extract_json(&text).unwrap_or_else(|| {
            tracing::warn!(task_id = context.task_id(), "insight response had no usable JSON");
            fallback::unparseable(context.task.status)
        }))
    }
}
