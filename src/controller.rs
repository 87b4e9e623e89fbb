use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::audio::{decode_base64, WavAudio, DEFAULT_SAMPLE_RATE};
use crate::error::AppError;
use crate::state::GenerationState;
use crate::tts::{SpeechEngine, VoiceName};

pub const DOWNLOAD_PREFIX: &str = "bangla-voice-pro";

/// Outcome of showing an install prompt to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// A platform "install this app" affordance, delivered from outside the audio pipeline.
pub trait InstallPrompt: Send + Sync {
    fn prompt(&self) -> InstallOutcome;
}

/// Owns the text, voice and generation state, and runs decode → encode on results.
pub struct Controller<E: SpeechEngine> {
    engine: E,
    text: String,
    voice: VoiceName,
    sample_rate: u32,
    timeout: Option<Duration>,
    state: watch::Sender<GenerationState>,
    install_prompt: Option<Box<dyn InstallPrompt>>,
}

impl<E: SpeechEngine> Controller<E> {
    pub fn new(engine: E) -> Self {
        let (state, _) = watch::channel(GenerationState::Idle);
        Self {
            engine,
            text: String::new(),
            voice: VoiceName::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            timeout: None,
            state,
            install_prompt: None,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn voice(&self) -> VoiceName {
        self.voice
    }

    pub fn select_voice(&mut self, voice: VoiceName) {
        self.voice = voice;
    }

    /// Snapshot of the current generation state.
    pub fn state(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    /// Synthesize the current text into a WAV file without touching state.
    pub async fn render(&self) -> Result<WavAudio, AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation("text is empty".into()));
        }

        let request = self.engine.synthesize(&self.text, self.voice);
        let base64_audio = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request).await.map_err(|_| {
                AppError::Provider(format!(
                    "{} timed out after {}s. Check internet and try again.",
                    self.engine.provider_name(),
                    limit.as_secs()
                ))
            })??,
            None => request.await?,
        };

        let pcm = decode_base64(&base64_audio)?;
        Ok(WavAudio::from_pcm(&pcm, self.sample_rate))
    }

    /// Run one generation, publishing Loading and then Success or Failure.
    pub async fn generate(&mut self) -> GenerationState {
        if self.text.trim().is_empty() {
            return self.publish(GenerationState::Failure(
                AppError::Validation("text is empty".into()).user_message(),
            ));
        }

        crate::app_log!(
            "[generate] start provider={} voice={} text_len={}",
            self.engine.provider_name(),
            self.voice,
            self.text.chars().count()
        );
        self.publish(GenerationState::Loading);

        let next = match self.render().await {
            Ok(audio) => {
                crate::app_log!(
                    "[generate] ready bytes={} duration_ms={}",
                    audio.len(),
                    audio.duration().as_millis()
                );
                GenerationState::Success(Arc::new(audio))
            }
            Err(e) => {
                crate::app_log!("[generate] failed: {e}");
                GenerationState::Failure(e.user_message())
            }
        };
        self.publish(next)
    }

    /// Write the current audio into `dir` under a timestamped name.
    pub fn download(&self, dir: &Path) -> Result<PathBuf, AppError> {
        let audio = self.state.borrow().audio().cloned().ok_or(AppError::NoAudio)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(download_file_name(chrono::Utc::now().timestamp_millis()));
        std::fs::write(&path, audio.as_bytes())?;
        crate::app_log!("[download] wrote {} bytes to {}", audio.len(), path.display());
        Ok(path)
    }

    pub fn offer_install_prompt(&mut self, prompt: Box<dyn InstallPrompt>) {
        self.install_prompt = Some(prompt);
    }

    pub fn install_prompt_available(&self) -> bool {
        self.install_prompt.is_some()
    }

    /// Show the pending install prompt once. It is cleared whatever the user picks.
    pub fn handle_install_click(&mut self) -> Option<InstallOutcome> {
        let prompt = self.install_prompt.take()?;
        let outcome = prompt.prompt();
        crate::app_log!("[install] prompt outcome={outcome:?}");
        Some(outcome)
    }

    fn publish(&self, next: GenerationState) -> GenerationState {
        self.state.send_replace(next.clone());
        next
    }
}

pub fn download_file_name(epoch_millis: i64) -> String {
    format!("{DOWNLOAD_PREFIX}-{epoch_millis}.wav")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeEngine {
        reply: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl FakeEngine {
        fn ok(payload: &'static str) -> Self {
            Self { reply: Ok(payload), calls: AtomicUsize::new(0) }
        }

        fn failing(message: &'static str) -> Self {
            Self { reply: Err(message), calls: AtomicUsize::new(0) }
        }
    }

    impl SpeechEngine for FakeEngine {
        async fn synthesize(&self, _text: &str, _voice: VoiceName) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(payload) => Ok(payload.to_string()),
                Err(message) => Err(AppError::Provider(message.to_string())),
            }
        }

        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    struct SlowEngine;

    impl SpeechEngine for SlowEngine {
        async fn synthesize(&self, _text: &str, _voice: VoiceName) -> Result<String, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("AQID".into())
        }

        fn provider_name(&self) -> &str {
            "slow"
        }
    }

    struct ScriptedPrompt(InstallOutcome);

    impl InstallPrompt for ScriptedPrompt {
        fn prompt(&self) -> InstallOutcome {
            self.0
        }
    }

    #[tokio::test]
    async fn test_blank_text_rejected_before_request() {
        let mut controller = Controller::new(FakeEngine::ok("AQID"));
        controller.set_text("   \n");

        let err = controller.render().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let state = controller.generate().await;
        assert_eq!(state.error(), Some(crate::error::EMPTY_TEXT_MESSAGE));
        assert_eq!(controller.engine().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_success_publishes_audio() {
        let mut controller = Controller::new(FakeEngine::ok("AAEC"));
        let mut rx = controller.subscribe();
        controller.set_text("নমস্কার");
        controller.select_voice(VoiceName::Puck);

        let state = controller.generate().await;
        let audio = state.audio().expect("audio");
        assert_eq!(audio.len(), 47);
        assert_eq!(&audio.as_bytes()[44..], &[0x00, 0x01, 0x02]);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().audio().is_some());
        assert_eq!(controller.voice(), VoiceName::Puck);
    }

    #[tokio::test]
    async fn test_failure_releases_previous_audio() {
        let mut controller = Controller::new(FakeEngine::ok("AQID"));
        controller.set_text("এক");
        let audio = controller.generate().await.audio().cloned().expect("audio");
        assert_eq!(Arc::strong_count(&audio), 2);

        controller.set_text("");
        let state = controller.generate().await;
        assert!(state.audio().is_none());
        assert!(controller.state().error().is_some());
        assert_eq!(Arc::strong_count(&audio), 1);
    }

    #[tokio::test]
    async fn test_provider_message_passes_through() {
        let mut controller = Controller::new(FakeEngine::failing("quota exceeded"));
        controller.set_text("দুই");
        let state = controller.generate().await;
        assert_eq!(state.error(), Some("quota exceeded"));
        assert!(state.audio().is_none());
        assert_eq!(controller.engine().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bad_base64_surfaces_generic_message() {
        let mut controller = Controller::new(FakeEngine::ok("!!not base64!!"));
        controller.set_text("তিন");
        let state = controller.generate().await;
        assert_eq!(state.error(), Some(crate::error::GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_provider_error() {
        let controller = {
            let mut c = Controller::new(SlowEngine).with_timeout(Some(Duration::from_secs(5)));
            c.set_text("চার");
            c
        };
        let err = controller.render().await.unwrap_err();
        assert!(matches!(err, AppError::Provider(ref m) if m.contains("timed out")));
    }

    #[tokio::test]
    async fn test_download_writes_wav() {
        let dir = std::env::temp_dir().join(format!("banglavoice-test-{}", std::process::id()));
        let mut controller = Controller::new(FakeEngine::ok("AQID"));
        assert!(matches!(controller.download(&dir), Err(AppError::NoAudio)));

        controller.set_text("পাঁচ");
        controller.generate().await;
        let path = controller.download(&dir).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("bangla-voice-pro-") && name.ends_with(".wav"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[44..], &[1, 2, 3]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_install_prompt_is_shown_once() {
        let mut controller = Controller::new(FakeEngine::ok("AQID"));
        assert_eq!(controller.handle_install_click(), None);

        controller.offer_install_prompt(Box::new(ScriptedPrompt(InstallOutcome::Dismissed)));
        assert!(controller.install_prompt_available());
        assert_eq!(controller.handle_install_click(), Some(InstallOutcome::Dismissed));
        assert!(!controller.install_prompt_available());
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name(1_700_000_000_123), "bangla-voice-pro-1700000000123.wav");
    }
}
