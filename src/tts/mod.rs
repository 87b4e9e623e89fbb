pub mod gemini;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Prebuilt provider voices. Names are forwarded verbatim.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VoiceName {
    #[default]
    Kore,
    Puck,
    Zephyr,
    Charon,
    Fenrir,
}

impl VoiceName {
    pub const ALL: [VoiceName; 5] = [
        VoiceName::Kore,
        VoiceName::Puck,
        VoiceName::Zephyr,
        VoiceName::Charon,
        VoiceName::Fenrir,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceName::Kore => "Kore",
            VoiceName::Puck => "Puck",
            VoiceName::Zephyr => "Zephyr",
            VoiceName::Charon => "Charon",
            VoiceName::Fenrir => "Fenrir",
        }
    }
}

impl fmt::Display for VoiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::Validation(format!("Unknown voice: {wanted}")))
    }
}

/// A voice offered in the picker.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoiceOption {
    pub id: VoiceName,
    pub label: &'static str,
    pub description: &'static str,
}

pub const VOICE_OPTIONS: [VoiceOption; 3] = [
    VoiceOption {
        id: VoiceName::Kore,
        label: "Kore (গম্ভীর)",
        description: "পেশাদার এবং গভীর কণ্ঠস্বর।",
    },
    VoiceOption {
        id: VoiceName::Zephyr,
        label: "Zephyr (সাবলীল)",
        description: "পরিষ্কার এবং প্রাণবন্ত উচ্চারণ।",
    },
    VoiceOption {
        id: VoiceName::Puck,
        label: "Puck (বন্ধুসুলভ)",
        description: "কোমল এবং মিষ্টি কণ্ঠস্বর।",
    },
];

/// Trait for hosted engines that turn text into base64-encoded PCM.
#[allow(async_fn_in_trait)]
pub trait SpeechEngine: Send + Sync {
    /// Synthesize `text` with `voice`, returning the provider's base64 audio payload.
    async fn synthesize(&self, text: &str, voice: VoiceName) -> Result<String, AppError>;

    /// Get the provider name for display.
    fn provider_name(&self) -> &str;
}

/// Build the voiceover instruction sent ahead of the user's text.
pub fn build_speech_prompt(text: &str) -> String {
    format!(
        "Role: Professional Voiceover artist from Bangladesh.\n\
         Language: Bengali (বাংলা).\n\
         Instruction: Read the following text with human-like emotions, appropriate pauses, \
         and standard 'Shuddho' pronunciation.\n\
         Tone: Natural, empathetic, and clear. Avoid robotic artifacts or monotonous speed.\n\
         Text: {text}"
    )
}
