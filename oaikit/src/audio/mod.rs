//! Audio endpoints: text-to-speech, transcription and translation.
//!
//! Speech takes a JSON body and returns raw audio bytes. Transcription and
//! translation upload an in-memory audio buffer as `multipart/form-data`.
//!
//! ```rust,ignore
//! use oaikit::prelude::*;
//!
//! // Text-to-Speech
//! let request = SpeechRequest::new("tts-1", "Hello, world!", Voice::Alloy)
//!     .format(SpeechFormat::Mp3);
//! let audio = client.create_speech(&request).await?;
//! std::fs::write("hello.mp3", &audio)?;
//!
//! // Speech-to-Text
//! let audio = std::fs::read("hello.mp3")?;
//! let request = TranscriptionRequest::new("whisper-1", "hello.mp3", audio).language("en");
//! let transcript = client.create_transcription(&request).await?;
//! println!("{}", transcript.text);
//! ```

mod speech;
mod transcription;
mod translation;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use speech::{SpeechFormat, SpeechRequest, Voice};
pub use transcription::{
    TimestampGranularity, TranscriptionRequest, TranscriptionResponse, TranscriptionSegment,
    TranscriptionWord,
};
pub use translation::{TranslationRequest, TranslationResponse};

use crate::client::decode_json;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// Response format for transcription and translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioResponseFormat {
    /// `{"text": ...}`
    #[default]
    Json,
    /// Plain text body.
    Text,
    /// SubRip subtitles.
    Srt,
    /// JSON with language, duration, segments and words.
    VerboseJson,
    /// WebVTT subtitles.
    Vtt,
}

impl AudioResponseFormat {
    /// Get the format string for API requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Srt => "srt",
            Self::VerboseJson => "verbose_json",
            Self::Vtt => "vtt",
        }
    }

    /// Whether the server answers with a JSON document.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::VerboseJson)
    }
}

/// Decode a transcript body, honoring non-JSON response formats.
///
/// `text`, `srt` and `vtt` bodies are passed to `plain` unchanged.
fn decode_transcript<T: DeserializeOwned>(
    endpoint: Endpoint,
    format: Option<AudioResponseFormat>,
    body: &[u8],
    plain: impl FnOnce(String) -> T,
) -> Result<T> {
    match format {
        Some(format) if !format.is_json() => {
            let text = std::str::from_utf8(body).map_err(|e| {
                Error::decoding_message(endpoint, format!("{} body is not UTF-8: {e}", format.as_str()))
            })?;
            Ok(plain(text.to_owned()))
        }
        _ => decode_json(endpoint, body),
    }
}
