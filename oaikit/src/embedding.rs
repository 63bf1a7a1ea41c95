//! Embeddings endpoint.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{Client, decode_json};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// Text or tokens to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    /// A single string.
    Text(String),
    /// Several strings, one embedding each.
    Batch(Vec<String>),
    /// A single pre-tokenized input.
    Tokens(Vec<u32>),
    /// Several pre-tokenized inputs.
    TokenBatch(Vec<Vec<u32>>),
}

impl From<&str> for EmbeddingInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for EmbeddingInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for EmbeddingInput {
    fn from(v: Vec<String>) -> Self {
        Self::Batch(v)
    }
}

impl From<Vec<&str>> for EmbeddingInput {
    fn from(v: Vec<&str>) -> Self {
        Self::Batch(v.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<u32>> for EmbeddingInput {
    fn from(v: Vec<u32>) -> Self {
        Self::Tokens(v)
    }
}

/// Wire format of returned vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    /// JSON array of floats.
    Float,
    /// Base64 of little-endian `f32` values.
    Base64,
}

/// Embedding request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddingRequest {
    pub input: EmbeddingInput,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<EncodingFormat>,
    /// Output dimensions (text-embedding-3 and later).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingRequest {
    /// Create a new embedding request.
    #[must_use]
    pub fn new(model: impl Into<String>, input: impl Into<EmbeddingInput>) -> Self {
        Self {
            input: input.into(),
            model: model.into(),
            encoding_format: None,
            dimensions: None,
            user: None,
        }
    }

    /// Set the vector encoding.
    #[must_use]
    pub const fn encoding_format(mut self, format: EncodingFormat) -> Self {
        self.encoding_format = Some(format);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub const fn dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the end-user identifier.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// An embedding vector as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingVector {
    Float(Vec<f32>),
    Base64(String),
}

impl EmbeddingVector {
    /// The vector as floats, decoding base64 when needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decoding`] if the base64 payload is malformed or its
    /// length is not a multiple of four bytes.
    pub fn to_floats(&self) -> Result<Vec<f32>> {
        match self {
            Self::Float(values) => Ok(values.clone()),
            Self::Base64(encoded) => {
                let raw = STANDARD
                    .decode(encoded)
                    .map_err(|e| Error::decoding_message(Endpoint::Embeddings, e))?;
                if raw.len() % 4 != 0 {
                    return Err(Error::decoding_message(
                        Endpoint::Embeddings,
                        format!("base64 embedding has {} bytes, not a multiple of 4", raw.len()),
                    ));
                }
                Ok(raw
                    .chunks_exact(4)
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .collect())
            }
        }
    }
}

/// One embedding in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub object: String,
    pub embedding: EmbeddingVector,
    pub index: u32,
}

/// Token usage of an embedding call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

/// Embedding response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub object: String,
    pub data: Vec<Embedding>,
    pub model: String,
    #[serde(default)]
    pub usage: EmbeddingUsage,
}

impl EmbeddingResponse {
    /// All vectors as floats, ordered by their input index.
    ///
    /// # Errors
    ///
    /// See [`EmbeddingVector::to_floats`].
    pub fn vectors(&self) -> Result<Vec<Vec<f32>>> {
        let mut data: Vec<&Embedding> = self.data.iter().collect();
        data.sort_by_key(|e| e.index);
        data.into_iter().map(|e| e.embedding.to_floats()).collect()
    }
}

impl Client {
    /// Create embeddings for the given input.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Encoding`], [`Error::Transport`],
    /// [`Error::RemoteStatus`] or [`Error::Decoding`].
    pub async fn create_embeddings(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        let body = self.post_json(Endpoint::Embeddings, request).await?;
        let response: EmbeddingResponse = decode_json(Endpoint::Embeddings, &body)?;

        debug!(
            vectors = response.data.len(),
            total_tokens = response.usage.total_tokens,
            "embeddings decoded"
        );
        Ok(response)
    }
}
