//! Speech-to-text transcription.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AudioResponseFormat, decode_transcript};
use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::multipart::UploadForm;

/// Timestamp detail requested with `verbose_json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampGranularity {
    Word,
    Segment,
}

impl TimestampGranularity {
    /// Get the string for API requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Segment => "segment",
        }
    }
}

/// Request for transcribing audio.
///
/// The audio is held in memory and uploaded in one piece. The server infers
/// the container from the file name's extension.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    pub audio: Bytes,
    pub file_name: String,
    /// Model (e.g., "whisper-1", "gpt-4o-transcribe").
    pub model: String,
    /// ISO-639-1 language of the audio.
    pub language: Option<String>,
    /// Text to guide style or continue a previous segment.
    pub prompt: Option<String>,
    pub response_format: Option<AudioResponseFormat>,
    /// Sampling temperature (0 to 1). `Some(0.0)` is sent.
    pub temperature: Option<f32>,
    /// Only honored with [`AudioResponseFormat::VerboseJson`].
    pub timestamp_granularities: Vec<TimestampGranularity>,
}

impl TranscriptionRequest {
    /// Create a new transcription request.
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        file_name: impl Into<String>,
        audio: impl Into<Bytes>,
    ) -> Self {
        Self {
            audio: audio.into(),
            file_name: file_name.into(),
            model: model.into(),
            language: None,
            prompt: None,
            response_format: None,
            temperature: None,
            timestamp_granularities: Vec::new(),
        }
    }

    /// Set the language hint.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the response format.
    #[must_use]
    pub const fn format(mut self, format: AudioResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request word and/or segment timestamps.
    #[must_use]
    pub fn timestamps(mut self, granularities: impl IntoIterator<Item = TimestampGranularity>) -> Self {
        self.timestamp_granularities = granularities.into_iter().collect();
        self
    }

    pub(crate) fn to_form(&self) -> UploadForm {
        UploadForm::new(
            Endpoint::Transcription,
            &self.file_name,
            self.audio.clone(),
            &self.model,
        )
        .text("language", self.language.as_deref())
        .text("prompt", self.prompt.as_deref())
        .text("response_format", self.response_format.as_ref().map(AudioResponseFormat::as_str))
        .number("temperature", self.temperature)
        .repeated(
            "timestamp_granularities[]",
            self.timestamp_granularities.iter().map(TimestampGranularity::as_str),
        )
    }
}

/// One decoded segment (`verbose_json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    pub id: u32,
    pub seek: f64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<u32>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub avg_logprob: f64,
    #[serde(default)]
    pub compression_ratio: f64,
    #[serde(default)]
    pub no_speech_prob: f64,
}

/// One word with timing (`verbose_json` + word granularity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Transcription result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Audio length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<TranscriptionSegment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<TranscriptionWord>,
}

impl TranscriptionResponse {
    /// Create a response holding only text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Client {
    /// Transcribe audio into text in its own language.
    ///
    /// With a `text`, `srt` or `vtt` response format the body is returned
    /// verbatim in [`TranscriptionResponse::text`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Encoding`](crate::Error::Encoding),
    /// [`Error::Transport`](crate::Error::Transport),
    /// [`Error::RemoteStatus`](crate::Error::RemoteStatus) or
    /// [`Error::Decoding`](crate::Error::Decoding).
    pub async fn create_transcription(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResponse> {
        let form = request.to_form().into_form()?;
        let body = self.post_multipart(Endpoint::Transcription, form).await?;

        let response = decode_transcript(
            Endpoint::Transcription,
            request.response_format,
            &body,
            TranscriptionResponse::new,
        )?;

        debug!(
            chars = response.text.len(),
            segments = response.segments.len(),
            "transcription decoded"
        );
        Ok(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    mod request {
        use super::*;

        #[test]
        fn minimal_form_has_only_model() {
            let form = TranscriptionRequest::new("whisper-1", "a.wav", vec![1_u8, 2, 3]).to_form();
            assert_eq!(form.fields(), &[("model", "whisper-1".to_owned())]);
        }

        #[test]
        fn all_options_become_fields() {
            let form = TranscriptionRequest::new("whisper-1", "a.wav", Bytes::new())
                .language("en")
                .prompt("Names: Ann, Bob")
                .format(AudioResponseFormat::VerboseJson)
                .temperature(0.2)
                .timestamps([TimestampGranularity::Word, TimestampGranularity::Segment])
                .to_form();

            assert_eq!(form.field("language"), Some("en"));
            assert_eq!(form.field("prompt"), Some("Names: Ann, Bob"));
            assert_eq!(form.field("response_format"), Some("verbose_json"));
            assert_eq!(form.field("temperature"), Some("0.200000"));
            assert_eq!(
                form.fields()
                    .iter()
                    .filter(|(n, _)| *n == "timestamp_granularities[]")
                    .count(),
                2
            );
        }

        #[test]
        fn zero_temperature_is_kept() {
            let form = TranscriptionRequest::new("whisper-1", "a.wav", Bytes::new())
                .temperature(0.0)
                .to_form();
            assert_eq!(form.field("temperature"), Some("0.000000"));
        }

        #[test]
        fn empty_language_is_skipped() {
            let form = TranscriptionRequest::new("whisper-1", "a.wav", Bytes::new())
                .language("")
                .to_form();
            assert_eq!(form.field("language"), None);
        }
    }

    mod response {
        use super::*;

        #[test]
        fn deserializes_minimal_response() {
            let resp: TranscriptionResponse = serde_json::from_str(r#"{"text": "ok"}"#).unwrap();

            assert_eq!(resp, TranscriptionResponse::new("ok"));
        }

        #[test]
        fn deserializes_verbose_response() {
            let json = r#"{
                "task": "transcribe",
                "language": "english",
                "duration": 8.47,
                "text": "The beach was a popular spot on a hot summer day.",
                "segments": [{
                    "id": 0,
                    "seek": 0,
                    "start": 0.0,
                    "end": 3.32,
                    "text": " The beach was a popular spot on a hot summer day.",
                    "tokens": [50364, 440, 7534],
                    "temperature": 0.0,
                    "avg_logprob": -0.286,
                    "compression_ratio": 1.23,
                    "no_speech_prob": 0.009
                }],
                "words": [{"word": "The", "start": 0.0, "end": 0.24}]
            }"#;

            let resp: TranscriptionResponse = serde_json::from_str(json).unwrap();

            assert_eq!(resp.language.as_deref(), Some("english"));
            assert_eq!(resp.duration, Some(8.47));
            assert_eq!(resp.segments.len(), 1);
            assert_eq!(resp.segments[0].tokens, vec![50364, 440, 7534]);
            assert_eq!(resp.segments[0].end, 3.32);
            assert_eq!(resp.words[0].word, "The");

            let again: TranscriptionResponse =
                serde_json::from_value(serde_json::to_value(&resp).unwrap()).unwrap();
            assert_eq!(resp, again);
        }

        #[test]
        fn empty_lists_are_not_serialized() {
            let json = serde_json::to_value(TranscriptionResponse::new("hi")).unwrap();
            assert_eq!(json, serde_json::json!({"text": "hi"}));
        }
    }
}
