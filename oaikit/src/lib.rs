//! oaikit - a typed async client for the OpenAI HTTP API.
//!
//! One [`Client`] covers six endpoint families:
//!
//! - chat completion ([`Client::create_chat_completion`])
//! - embeddings ([`Client::create_embeddings`])
//! - speech synthesis ([`Client::create_speech`], raw audio bytes)
//! - transcription and translation ([`Client::create_transcription`],
//!   [`Client::create_translation`], multipart uploads)
//! - fine-tuning jobs ([`Client::create_fine_tuning_job`] and friends)
//!
//! Every call makes exactly one HTTP request and reports failures through
//! [`Error`]. Retries, streaming and rate limiting are left to the caller.
//!
//! ```rust,ignore
//! use oaikit::prelude::*;
//!
//! let client = Client::new(ClientConfig::new(std::env::var("OPENAI_API_KEY")?))?;
//! let request = ChatCompletionRequest::new("gpt-4o-mini", vec![ChatMessage::user("hi")]);
//! let response = client.create_chat_completion(&request).await?;
//! ```

pub mod audio;
pub mod chat;
mod client;
pub mod config;
pub mod embedding;
pub mod endpoint;
pub mod error;
pub mod fine_tuning;
mod multipart;
pub mod prelude;

pub use client::Client;
pub use config::ClientConfig;
pub use endpoint::{BodyEncoding, Endpoint};
pub use error::{Error, ErrorKind, Result};
