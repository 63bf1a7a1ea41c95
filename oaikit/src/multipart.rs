//! Multipart form encoding for audio uploads.

use bytes::Bytes;
use mime::Mime;
use reqwest::multipart::{Form, Part};

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// A form body with one `file` part and a list of text fields.
///
/// Fields are kept in insertion order and only turned into a
/// [`reqwest::multipart::Form`] when the request is sent.
#[derive(Debug, Clone)]
pub(crate) struct UploadForm {
    endpoint: Endpoint,
    file_name: String,
    file_type: Mime,
    data: Bytes,
    fields: Vec<(&'static str, String)>,
}

impl UploadForm {
    /// Start a form with the file part and the always-present `model` field.
    pub(crate) fn new(endpoint: Endpoint, file_name: &str, data: Bytes, model: &str) -> Self {
        Self {
            endpoint,
            file_name: file_name.to_owned(),
            file_type: mime_guess::from_path(file_name).first_or_octet_stream(),
            data,
            fields: vec![("model", model.to_owned())],
        }
    }

    /// Add a text field when the value is present and not empty.
    pub(crate) fn text(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.fields.push((name, value.to_owned()));
        }
        self
    }

    /// Add a number in fixed-point notation when present, zero included.
    pub(crate) fn number(mut self, name: &'static str, value: Option<f32>) -> Self {
        if let Some(value) = value {
            self.fields.push((name, format!("{value:.6}")));
        }
        self
    }

    /// Add one field per value under the same name.
    pub(crate) fn repeated<'a>(
        mut self,
        name: &'static str,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.fields
            .extend(values.into_iter().map(|value| (name, value.to_owned())));
        self
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    #[cfg(test)]
    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Build the wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the file part cannot be written.
    pub(crate) fn into_form(self) -> Result<Form> {
        if self.file_name.trim().is_empty() {
            return Err(Error::encoding(
                self.endpoint,
                "audio file name must not be empty",
            ));
        }

        let length = self.data.len() as u64;
        let file = Part::stream_with_length(self.data, length)
            .file_name(self.file_name)
            .mime_str(self.file_type.as_ref())
            .map_err(|e| Error::encoding(self.endpoint, format!("invalid file part: {e}")))?;

        let form = self
            .fields
            .into_iter()
            .fold(Form::new().part("file", file), |form, (name, value)| {
                form.text(name, value)
            });

        Ok(form)
    }
}
