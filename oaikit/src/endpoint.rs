//! Endpoint families exposed by the API.

use std::fmt;

/// How a request body is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    /// `application/json` document.
    Json,
    /// `multipart/form-data` with a file part.
    Multipart,
}

/// One of the remote operation families the client can call.
///
/// Carries the path and body encoding of each call and says which call
/// produced an [`Error`](crate::Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Endpoint {
    /// Text-to-speech synthesis.
    Speech,
    /// Speech-to-text in the source language.
    Transcription,
    /// Speech-to-English translation.
    Translation,
    /// Chat completion.
    ChatCompletion,
    /// Text embeddings.
    Embeddings,
    /// Fine-tuning job management.
    FineTuningJob,
}

impl Endpoint {
    /// All endpoint families.
    pub const ALL: [Self; 6] = [
        Self::Speech,
        Self::Transcription,
        Self::Translation,
        Self::ChatCompletion,
        Self::Embeddings,
        Self::FineTuningJob,
    ];

    /// Path of the endpoint relative to the versioned base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Speech => "audio/speech",
            Self::Transcription => "audio/transcriptions",
            Self::Translation => "audio/translations",
            Self::ChatCompletion => "chat/completions",
            Self::Embeddings => "embeddings",
            Self::FineTuningJob => "fine_tuning/jobs",
        }
    }

    /// Human-readable name used in errors and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speech => "audio/speech",
            Self::Transcription => "transcription",
            Self::Translation => "translation",
            Self::ChatCompletion => "chat completion",
            Self::Embeddings => "embeddings",
            Self::FineTuningJob => "fine tuning jobs",
        }
    }

    /// Body encoding used when creating a resource on this endpoint.
    #[must_use]
    pub const fn encoding(self) -> BodyEncoding {
        match self {
            Self::Transcription | Self::Translation => BodyEncoding::Multipart,
            Self::Speech | Self::ChatCompletion | Self::Embeddings | Self::FineTuningJob => {
                BodyEncoding::Json
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
