//! Outbound plagiarism detection
//!
//! [`WinstonDetector`] talks to the Winston AI plagiarism endpoint and maps
//! its response onto [`DetectionResult`]. Handlers only see the [`Detector`]
//! trait so tests can substitute a fixed result.

use std::time::Duration;

use async_trait::async_trait;
use report_types::{DetectionResult, MatchSpan, Source};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DETECTOR_URL: &str = "https://api.gowinston.ai/v2/plagiarism";

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Detection API key is not configured")]
    MissingApiKey,

    #[error("Detection request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Detection service returned {status}: {body}")]
    Upstream { status: u16, body: String },
}

#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<DetectionResult, DetectError>;
}

/// Connection settings for [`WinstonDetector`]
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub country: String,
    pub timeout: Duration,
}

pub struct WinstonDetector {
    client: reqwest::Client,
    config: DetectorConfig,
}

impl WinstonDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, DetectError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        if config.api_key.is_none() {
            tracing::warn!("No detection API key configured; /check-plagiarism will fail");
        }

        Ok(Self { client, config })
    }
}

#[derive(Serialize)]
struct WinstonRequest<'a> {
    language: &'a str,
    country: &'a str,
    text: &'a str,
}

#[async_trait]
impl Detector for WinstonDetector {
    async fn detect(&self, text: &str) -> Result<DetectionResult, DetectError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(DetectError::MissingApiKey)?;

        let body = WinstonRequest {
            language: &self.config.language,
            country: &self.config.country,
            text,
        };

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DetectError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: WinstonResponse = response.json().await?;
        let result = DetectionResult::from(parsed);
        tracing::debug!(
            "Detection returned {} sources, score {:?}",
            result.sources.len(),
            result.overall_score
        );
        Ok(result)
    }
}

// Wire format. Every field is optional upstream; nulls and omissions both
// map to absent values.

#[derive(Debug, Deserialize)]
struct WinstonResponse {
    #[serde(default)]
    result: Option<WinstonScore>,
    #[serde(default)]
    sources: Option<Vec<WinstonSource>>,
}

#[derive(Debug, Deserialize)]
struct WinstonScore {
    #[serde(default)]
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WinstonSource {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default, rename = "plagiarismFound")]
    plagiarism_found: Option<Vec<WinstonFinding>>,
}

#[derive(Debug, Deserialize)]
struct WinstonFinding {
    #[serde(default)]
    sequence: Option<String>,
}

impl From<WinstonResponse> for DetectionResult {
    fn from(response: WinstonResponse) -> Self {
        let sources = response
            .sources
            .unwrap_or_default()
            .into_iter()
            .map(|source| Source {
                url: source.url,
                score: source.score,
                matches: source
                    .plagiarism_found
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|finding| finding.sequence.map(MatchSpan::new))
                    .collect(),
            })
            .collect();

        DetectionResult {
            overall_score: response.result.and_then(|r| r.score),
            sources,
        }
    }
}
