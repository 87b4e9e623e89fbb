pub mod audio;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod security;
pub mod state;
pub mod tts;

use config::AppConfig;
use controller::Controller;
use error::AppError;
use security::keystore::KeyStore;
use tts::gemini::GeminiTtsEngine;

/// Start an interactive session on stdin/stdout.
pub async fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env();
    logger::init_file_logger(config.log_dir.as_deref());

    let keystore = KeyStore::new();
    let config = match config.clone().with_keystore_fallback(&keystore) {
        Ok(resolved) => resolved,
        Err(e) => {
            crate::app_log!("[startup] keychain lookup failed: {e}");
            config
        }
    };
    if config.api_key.is_none() {
        crate::app_log!("[startup] no API key configured; generation will fail until one is set");
    }

    let engine = GeminiTtsEngine::new(config.api_key.clone(), config.model.clone(), config.base_url.clone());
    crate::app_log!(
        "[startup] model={} voice={} sample_rate={} output_dir={}",
        engine.model(),
        config.voice,
        config.sample_rate,
        config.output_dir.display()
    );

    let mut controller = Controller::new(engine)
        .with_sample_rate(config.sample_rate)
        .with_timeout(config.timeout());
    controller.select_voice(config.voice);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    commands::session::run_session(
        &mut controller,
        Some(&keystore),
        &config.output_dir,
        stdin,
        tokio::io::stdout(),
    )
    .await
}
