// Analysis Service client
//
// The service is an external collaborator reached over HTTP: one endpoint,
// POST /analyze, taking a multipart form with a single "file" part holding
// the raw audio bytes. Every failure mode - transport error, non-2xx status,
// malformed body - collapses into one category for the caller; the service's
// error payload carries nothing the UI differentiates on.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Successful response from POST /analyze
///
/// The service also echoes `status` and a `transcription` alias; only the
/// fields the client consumes are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResult {
    pub transcript: String,
    pub num_speakers: u32,
    /// Audio duration in seconds, reported by the service
    #[serde(default)]
    pub duration: Option<f64>,
}

/// HTTP client for the Analysis Service
#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Build a client against the configured service base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Upload one audio file and wait for the analysis response
    ///
    /// Reads the whole file into memory; the service needs the complete
    /// payload anyway and the files are interactive-upload sized. No retry
    /// or backoff - each call is one fresh, independent request.
    pub async fn analyze(&self, path: &Path, file_name: &str) -> Result<AnalysisResult> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/analyze", self.base_url);
        tracing::info!(%url, file = file_name, "Uploading audio for analysis");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Analysis request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Analysis service returned {}", status);
        }

        let result: AnalysisResult = response
            .json()
            .await
            .context("Malformed analysis response")?;

        tracing::info!(
            speakers = result.num_speakers,
            transcript_len = result.transcript.len(),
            "Analysis complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_service_response() {
        // Shape the original service actually returns
        let body = r#"{
            "status": "success",
            "transcription": "hello world",
            "transcript": "hello world",
            "num_speakers": 2,
            "duration": 12.5
        }"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.transcript, "hello world");
        assert_eq!(result.num_speakers, 2);
        assert_eq!(result.duration, Some(12.5));
    }

    #[test]
    fn parses_minimal_response() {
        let body = r#"{"transcript": "hi", "num_speakers": 1}"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.duration, None);
    }

    #[test]
    fn rejects_error_payload() {
        // The service's 4xx/5xx bodies have no transcript field
        let body = r#"{"error": "No file part"}"#;
        assert!(serde_json::from_str::<AnalysisResult>(body).is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client =
            AnalysisClient::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
