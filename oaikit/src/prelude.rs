//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use oaikit::prelude::*;
//! ```

pub use crate::audio::{
    AudioResponseFormat, SpeechFormat, SpeechRequest, TimestampGranularity, TranscriptionRequest,
    TranscriptionResponse, TranscriptionSegment, TranscriptionWord, TranslationRequest,
    TranslationResponse, Voice,
};
pub use crate::chat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatUsage,
    FinishReason, FunctionCall, FunctionDefinition, JsonSchemaFormat, ResponseFormat, Role, Tool,
    ToolCall,
};
pub use crate::embedding::{
    Embedding, EmbeddingInput, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
    EmbeddingVector, EncodingFormat,
};
pub use crate::fine_tuning::{
    FineTuningJob, FineTuningJobError, FineTuningJobRequest, HyperparameterValue,
    Hyperparameters, JobStatus,
};
pub use crate::{Client, ClientConfig, Endpoint, Error, ErrorKind, Result};
