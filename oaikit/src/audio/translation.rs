//! Speech-to-English translation.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AudioResponseFormat, decode_transcript};
use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::multipart::UploadForm;

/// Request for translating audio into English text.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub audio: Bytes,
    pub file_name: String,
    pub model: String,
    /// English text to guide style.
    pub prompt: Option<String>,
    pub response_format: Option<AudioResponseFormat>,
    /// Sampling temperature (0 to 1). `Some(0.0)` is sent.
    pub temperature: Option<f32>,
}

impl TranslationRequest {
    /// Create a new translation request.
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
            prompt: None,
            response_format: None,
            temperature: None,
        }
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

    pub(crate) fn to_form(&self) -> UploadForm {
        UploadForm::new(
            Endpoint::Translation,
            &self.file_name,
            self.audio.clone(),
            &self.model,
        )
        .text("prompt", self.prompt.as_deref())
        .text("response_format", self.response_format.as_ref().map(AudioResponseFormat::as_str))
        .number("temperature", self.temperature)
    }
}

/// Translation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub text: String,
}

impl Client {
    /// Translate audio into English text.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Encoding`](crate::Error::Encoding),
    /// [`Error::Transport`](crate::Error::Transport),
    /// [`Error::RemoteStatus`](crate::Error::RemoteStatus) or
    /// [`Error::Decoding`](crate::Error::Decoding).
    pub async fn create_translation(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse> {
        let form = request.to_form().into_form()?;
        let body = self.post_multipart(Endpoint::Translation, form).await?;

        let response = decode_transcript(
            Endpoint::Translation,
            request.response_format,
            &body,
            |text| TranslationResponse { text },
        )?;

        debug!(chars = response.text.len(), "translation decoded");
        Ok(response)
    }
}
