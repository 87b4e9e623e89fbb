pub mod session;

use std::path::PathBuf;

use crate::error::AppError;
use crate::tts::VoiceName;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Speak(String),
    Voice(VoiceName),
    Voices,
    Save(Option<PathBuf>),
    Status,
    KeySave(String),
    KeyDelete,
    KeyStatus,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type Bengali text and press Enter to synthesize it.
  :voice <name>     select a voice (Kore, Puck, Zephyr, Charon, Fenrir)
  :voices           list voice presets
  :save [dir]       save the last audio as a timestamped .wav
  :status           show the generation state
  :key save <key>   store the API key in the OS keychain
                    (Linux kernel keyring: kept until logout or reboot)
  :key delete       remove the stored API key
  :key status       check whether a key is stored
  :help             show this help
  :quit             exit";

/// Parse a line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, AppError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Some(Command::Speak(line.to_string())));
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    let command = match (name, arg) {
        ("voice", Some(voice)) => Command::Voice(voice.parse()?),
        ("voice", None) => {
            return Err(AppError::Validation("usage: :voice <name>".into()));
        }
        ("voices", _) => Command::Voices,
        ("save", dir) => Command::Save(dir.map(PathBuf::from)),
        ("status", _) => Command::Status,
        ("key", Some(sub)) => parse_key_command(sub)?,
        ("help", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        _ => {
            return Err(AppError::Validation(format!("unknown command: :{name}")));
        }
    };
    Ok(Some(command))
}

fn parse_key_command(sub: &str) -> Result<Command, AppError> {
    let mut parts = sub.splitn(2, char::is_whitespace);
    match (parts.next(), parts.next().map(str::trim)) {
        (Some("save"), Some(key)) if !key.is_empty() => Ok(Command::KeySave(key.to_string())),
        (Some("delete"), _) => Ok(Command::KeyDelete),
        (Some("status"), _) => Ok(Command::KeyStatus),
        _ => Err(AppError::Validation(
            "usage: :key save <key> | :key delete | :key status".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_speech() {
        assert_eq!(
            parse_command("  আমি বাংলায় গান গাই  ").unwrap(),
            Some(Command::Speak("আমি বাংলায় গান গাই".into()))
        );
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command(":voice puck").unwrap(), Some(Command::Voice(VoiceName::Puck)));
        assert_eq!(parse_command(":save").unwrap(), Some(Command::Save(None)));
        assert_eq!(
            parse_command(":save /tmp/audio").unwrap(),
            Some(Command::Save(Some(PathBuf::from("/tmp/audio"))))
        );
        assert_eq!(parse_command(":key save abc123").unwrap(), Some(Command::KeySave("abc123".into())));
        assert_eq!(parse_command(":key delete").unwrap(), Some(Command::KeyDelete));
        assert_eq!(parse_command(":q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_help_notes_linux_key_lifetime() {
        assert!(HELP.contains("until logout or reboot"));
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_command(":voice").is_err());
        assert!(parse_command(":voice Aoede").is_err());
        assert!(parse_command(":key save").is_err());
        assert!(parse_command(":rewind").is_err());
    }
}
