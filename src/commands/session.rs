use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::{parse_command, Command, HELP};
use crate::controller::Controller;
use crate::error::AppError;
use crate::security::keystore::{KeyStore, GEMINI_PROVIDER};
use crate::state::GenerationState;
use crate::tts::{SpeechEngine, VOICE_OPTIONS};

/// Drive a controller from line input until `:quit` or end of input.
pub async fn run_session<E, R, W>(
    controller: &mut Controller<E>,
    keystore: Option<&KeyStore>,
    output_dir: &Path,
    mut input: R,
    mut output: W,
) -> Result<(), AppError>
where
    E: SpeechEngine,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("voice: {} (:help for commands)\n", controller.voice()).as_bytes())
        .await?;

    let mut raw = Vec::new();
    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        let line = match String::from_utf8(trim_line_ending(&raw).to_vec()) {
            Ok(line) => line,
            Err(_) => {
                output.write_all(b"input is not valid UTF-8; line skipped\n").await?;
                continue;
            }
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                output.write_all(format!("{e}\n").as_bytes()).await?;
                continue;
            }
        };

        let reply = match command {
            Command::Quit => break,
            Command::Speak(text) => {
                controller.set_text(text);
                describe(&controller.generate().await)
            }
            Command::Voice(voice) => {
                controller.select_voice(voice);
                format!("voice: {voice}")
            }
            Command::Voices => VOICE_OPTIONS
                .iter()
                .map(|opt| format!("{:<8} {}  {}", opt.id.as_str(), opt.label, opt.description))
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Save(dir) => {
                let dir = dir.as_deref().unwrap_or(output_dir);
                match controller.download(dir) {
                    Ok(path) => format!("saved {}", path.display()),
                    Err(e) => format!("error: {}", e.user_message()),
                }
            }
            Command::Status => serde_json::to_string(&controller.state().status())?,
            Command::KeySave(key) => with_keystore(keystore, |ks| {
                ks.save_api_key(GEMINI_PROVIDER, &key)
                    .map(|()| "key saved; restart to use it (on Linux it lasts until reboot)".to_string())
            }),
            Command::KeyDelete => with_keystore(keystore, |ks| {
                ks.delete_api_key(GEMINI_PROVIDER).map(|()| "key deleted".to_string())
            }),
            Command::KeyStatus => with_keystore(keystore, |ks| {
                ks.has_api_key(GEMINI_PROVIDER)
                    .map(|has| (if has { "key stored" } else { "no key stored" }).to_string())
            }),
            Command::Help => HELP.to_string(),
        };

        output.write_all(format!("{reply}\n").as_bytes()).await?;
        output.flush().await?;
    }

    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn describe(state: &GenerationState) -> String {
    match state {
        GenerationState::Success(audio) => format!(
            "ready: {} bytes, {:.1}s (:save to download)",
            audio.len(),
            audio.duration().as_secs_f32()
        ),
        GenerationState::Failure(message) => format!("error: {message}"),
        GenerationState::Loading => "loading".to_string(),
        GenerationState::Idle => "idle".to_string(),
    }
}

fn with_keystore<F>(keystore: Option<&KeyStore>, f: F) -> String
where
    F: FnOnce(&KeyStore) -> Result<String, AppError>,
{
    match keystore {
        Some(ks) => f(ks).unwrap_or_else(|e| e.to_string()),
        None => "keychain unavailable".to_string(),
    }
}
