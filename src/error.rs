// SPDX-License-Identifier: MPL-2.0
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
}

/// Failures reported by a playback engine.
///
/// `NotFound` and `UnsupportedFormat` come back synchronously from a load
/// request. `PlaybackFailed` arrives later as a notification once the engine
/// has started working on the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The media path could not be resolved.
    NotFound(PathBuf),

    /// The backend rejected the stream (unknown container, no video track...).
    UnsupportedFormat(String),

    /// The engine gave up after loading (codec missing, device busy, decode error).
    PlaybackFailed(String),
}

impl EngineError {
    /// Text shown to the user in the notice banner.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::NotFound(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Could not find \"{name}\"")
            }
            EngineError::UnsupportedFormat(_) => "This file format is not supported".to_string(),
            EngineError::PlaybackFailed(reason) => format!("Playback stopped: {reason}"),
        }
    }

    /// Classifies a raw backend error message.
    ///
    /// `path` is the media that was being opened, used for `NotFound`.
    pub fn from_message(msg: &str, path: &std::path::Path) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || (msg_lower.contains("not found")
                && !msg_lower.contains("decoder")
                && !msg_lower.contains("codec"))
        {
            return EngineError::NotFound(path.to_path_buf());
        }

        if msg_lower.contains("invalid data found")
            || msg_lower.contains("no video stream")
            || msg_lower.contains("unknown format")
            || msg_lower.contains("unsupported")
        {
            return EngineError::UnsupportedFormat(msg.to_string());
        }

        EngineError::PlaybackFailed(msg.to_string())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotFound(path) => write!(f, "Media not found: {}", path.display()),
            EngineError::UnsupportedFormat(detail) => write!(f, "Unsupported format: {detail}"),
            EngineError::PlaybackFailed(reason) => write!(f, "Playback failed: {reason}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn from_message_detects_missing_file() {
        let err = EngineError::from_message("No such file or directory", Path::new("/tmp/a.mp4"));
        assert_eq!(err, EngineError::NotFound(PathBuf::from("/tmp/a.mp4")));
    }

    #[test]
    fn from_message_keeps_decoder_not_found_as_playback_failure() {
        let err = EngineError::from_message("decoder h264 not found", Path::new("a.mp4"));
        assert!(matches!(err, EngineError::PlaybackFailed(_)));
    }

    #[test]
    fn from_message_detects_unsupported_stream() {
        let err = EngineError::from_message(
            "Invalid data found when processing input",
            Path::new("a.txt"),
        );
        assert!(matches!(err, EngineError::UnsupportedFormat(_)));
    }

    #[test]
    fn user_message_uses_file_name_only() {
        let err = EngineError::NotFound(PathBuf::from("/home/me/videos/clip.mkv"));
        assert_eq!(err.user_message(), "Could not find \"clip.mkv\"");
    }
}
