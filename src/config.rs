use std::path::PathBuf;
use std::time::Duration;

use crate::audio::DEFAULT_SAMPLE_RATE;
use crate::error::AppError;
use crate::security::keystore::{KeyStore, GEMINI_PROVIDER};
use crate::tts::VoiceName;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub sample_rate: u32,
    pub voice: VoiceName,
    pub timeout_secs: Option<u64>,
    pub output_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            voice: VoiceName::default(),
            timeout_secs: None,
            output_dir: resolve_output_dir(None, None),
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let voice = match get("BANGLAVOICE_VOICE").map(|v| v.parse::<VoiceName>()) {
            Some(Ok(voice)) => voice,
            Some(Err(e)) => {
                crate::app_log!("[config] ignoring BANGLAVOICE_VOICE: {e}");
                VoiceName::default()
            }
            None => VoiceName::default(),
        };

        Self {
            api_key: get("API_KEY").or_else(|| get("GEMINI_API_KEY")),
            model: get("BANGLAVOICE_MODEL"),
            base_url: get("BANGLAVOICE_BASE_URL").map(|v| v.trim_end_matches('/').to_string()),
            sample_rate: get("BANGLAVOICE_SAMPLE_RATE")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|rate| *rate > 0)
                .unwrap_or(DEFAULT_SAMPLE_RATE),
            voice,
            timeout_secs: get("BANGLAVOICE_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs.clamp(5, 180)),
            output_dir: resolve_output_dir(get("BANGLAVOICE_OUTPUT_DIR"), get("HOME")),
            log_dir: get("BANGLAVOICE_LOG_DIR").map(PathBuf::from),
        }
    }

    /// Fill a missing key from the OS keychain.
    pub fn with_keystore_fallback(mut self, keystore: &KeyStore) -> Result<Self, AppError> {
        if self.api_key.is_none() {
            self.api_key = keystore.get_api_key(GEMINI_PROVIDER)?;
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Explicit dir wins, then ~/Documents/BanglaVoice, then the working directory.
fn resolve_output_dir(custom: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = custom {
        return PathBuf::from(dir);
    }
    match home {
        Some(home) => PathBuf::from(home).join("Documents").join("BanglaVoice"),
        None => PathBuf::from("."),
    }
}
