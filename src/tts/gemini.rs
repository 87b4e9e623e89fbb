use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde_json::json;

use super::{build_speech_prompt, SpeechEngine, VoiceName};
use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini TTS engine using `generateContent` with the AUDIO response modality.
pub struct GeminiTtsEngine {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

impl GeminiTtsEngine {
    pub fn new(api_key: Option<String>, model: Option<String>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// JSON body for a synthesis request.
    pub fn request_body(text: &str, voice: VoiceName) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [{ "text": build_speech_prompt(text) }]
            }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": voice.as_str() }
                    }
                }
            }
        })
    }

    /// Pull the base64 audio out of the first candidate's first part.
    pub fn extract_audio(json: &serde_json::Value) -> Result<String, AppError> {
        json["candidates"][0]["content"]["parts"][0]["inlineData"]["data"]
            .as_str()
            .filter(|data| !data.is_empty())
            .map(String::from)
            .ok_or(AppError::MissingAudio)
    }

    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        let provider_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(|m| m.trim().to_string()))
            .filter(|m| !m.is_empty());
        provider_message.unwrap_or_else(|| format!("TTS API error ({status}): {body}"))
    }

    fn next_request_id() -> u64 {
        NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
    }

    fn response_request_id(headers: &reqwest::header::HeaderMap) -> String {
        const CANDIDATES: [&str; 4] = ["x-request-id", "request-id", "x-goog-request-id", "trace-id"];
        for key in CANDIDATES {
            if let Some(value) = headers.get(key).and_then(|v| v.to_str().ok()) {
                if !value.trim().is_empty() {
                    return value.to_string();
                }
            }
        }
        "n/a".to_string()
    }
}

impl SpeechEngine for GeminiTtsEngine {
    async fn synthesize(&self, text: &str, voice: VoiceName) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("API Key is not configured correctly.".into()))?;

        let body = Self::request_body(text, voice);
        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        let upstream_request_id = Self::response_request_id(response.headers());
        let body_text = response
            .text()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to read response: {e}")))?;
        crate::app_log!(
            "[tts-http] provider=gemini request_id={} upstream_request_id={} status={} latency_ms={} voice={}",
            Self::next_request_id(),
            upstream_request_id,
            status,
            started.elapsed().as_millis(),
            voice
        );

        if !status.is_success() {
            return Err(AppError::Provider(Self::error_message(status, &body_text)));
        }

        let json: serde_json::Value = serde_json::from_str(&body_text)
            .map_err(|e| AppError::Provider(format!("Failed to parse Gemini response: {e}")))?;

        Self::extract_audio(&json)
    }

    fn provider_name(&self) -> &str {
        "Gemini TTS"
    }
}
