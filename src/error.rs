use serde::Serialize;

/// Shown when the user submits blank text.
pub const EMPTY_TEXT_MESSAGE: &str = "অনুগ্রহ করে রূপান্তর করার জন্য কিছু টেক্সট লিখুন।";
/// Shown when a failure carries nothing worth passing through.
pub const GENERIC_FAILURE_MESSAGE: &str = "একটি সমস্যা হয়েছে। দয়া করে আবার চেষ্টা করুন।";
/// Fallback for provider failures with an empty message.
pub const PROVIDER_FAILURE_MESSAGE: &str =
    "ভয়েস জেনারেট করতে সমস্যা হয়েছে। দয়া করে আবার চেষ্টা করুন।";

/// Shown when a download is requested before any audio exists.
pub const NO_AUDIO_MESSAGE: &str = "এখনও কোনো অডিও তৈরি হয়নি। আগে ভয়েস জেনারেট করুন।";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Invalid audio payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Could not retrieve audio data from the server.")]
    MissingAudio,

    #[error("{0}")]
    Provider(String),

    #[error("No generated audio is available yet")]
    NoAudio,

    #[error("Security error: {0}")]
    Security(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// The single message surfaced to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => EMPTY_TEXT_MESSAGE.to_string(),
            AppError::Provider(msg) if msg.trim().is_empty() => {
                PROVIDER_FAILURE_MESSAGE.to_string()
            }
            AppError::Provider(msg) | AppError::Configuration(msg) => msg.clone(),
            AppError::Decode(_) | AppError::MissingAudio => GENERIC_FAILURE_MESSAGE.to_string(),
            AppError::NoAudio => NO_AUDIO_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
