use std::sync::Arc;

use serde::Serialize;

use crate::audio::WavAudio;

/// Generation state machine. Audio and error never coexist.
#[derive(Debug, Clone, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading,
    Success(Arc<WavAudio>),
    Failure(String),
}

impl GenerationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, GenerationState::Loading)
    }

    pub fn audio(&self) -> Option<&Arc<WavAudio>> {
        match self {
            GenerationState::Success(audio) => Some(audio),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> GenerationStatus {
        match self {
            GenerationState::Idle => GenerationStatus::Idle,
            GenerationState::Loading => GenerationStatus::Loading,
            GenerationState::Success(audio) => GenerationStatus::Ready {
                bytes: audio.len(),
                duration_secs: audio.duration().as_secs_f32(),
            },
            GenerationState::Failure(message) => GenerationStatus::Error {
                message: message.clone(),
            },
        }
    }
}

/// Serializable snapshot of [`GenerationState`] for status output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationStatus {
    Idle,
    Loading,
    #[serde(rename_all = "camelCase")]
    Ready { bytes: usize, duration_secs: f32 },
    Error { message: String },
}
