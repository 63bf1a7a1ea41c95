//! Fine-tuning job management.

use std::fmt;

use reqwest::Method;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::client::{Client, decode_json};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// A hyperparameter that is either chosen by the server or fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HyperparameterValue<T> {
    /// Serialized as the string `"auto"`.
    Auto,
    Fixed(T),
}

impl<T: Serialize> Serialize for HyperparameterValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Fixed(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for HyperparameterValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Text(String),
            Value(T),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Text(text) if text == "auto" => Ok(Self::Auto),
            Repr::Text(text) => Err(D::Error::custom(format!(
                "expected \"auto\" or a number, got {text:?}"
            ))),
            Repr::Value(value) => Ok(Self::Fixed(value)),
        }
    }
}

/// Training hyperparameters. Unset values are left to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<HyperparameterValue<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<HyperparameterValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<HyperparameterValue<u32>>,
}

/// Request for creating a fine-tuning job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FineTuningJobRequest {
    /// Base model to fine-tune.
    pub model: String,
    /// ID of an uploaded JSONL file.
    pub training_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperparameters: Option<Hyperparameters>,
    /// Up to 64 characters added to the fine-tuned model name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl FineTuningJobRequest {
    /// Create a new job request.
    #[must_use]
    pub fn new(model: impl Into<String>, training_file: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            training_file: training_file.into(),
            hyperparameters: None,
            suffix: None,
            validation_file: None,
            seed: None,
        }
    }

    /// Set the hyperparameters.
    #[must_use]
    pub const fn hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = Some(hyperparameters);
        self
    }

    /// Set the model name suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Set the validation file ID.
    #[must_use]
    pub fn validation_file(mut self, file: impl Into<String>) -> Self {
        self.validation_file = Some(file.into());
        self
    }

    /// Set the training seed.
    #[must_use]
    pub const fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    ValidatingFiles,
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether the job will not change state again.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ValidatingFiles => "validating_files",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Why a job failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineTuningJobError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    /// Offending parameter, if any.
    #[serde(default)]
    pub param: Option<String>,
}

/// A fine-tuning job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTuningJob {
    pub id: String,
    pub object: String,
    /// Unix timestamp (seconds).
    pub created_at: i64,
    #[serde(default)]
    pub error: Option<FineTuningJobError>,
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
    #[serde(default)]
    pub finished_at: Option<i64>,
    #[serde(default)]
    pub hyperparameters: Hyperparameters,
    pub model: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub result_files: Vec<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub trained_tokens: Option<i64>,
    pub training_file: String,
    #[serde(default)]
    pub validation_file: Option<String>,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub estimated_finish: Option<i64>,
}

/// Path of a single job.
///
/// IDs are limited to ASCII letters, digits, `-` and `_`; dot segments,
/// separators and escapes are rejected before a URL is built.
fn job_path(id: &str, action: Option<&str>) -> Result<String> {
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !valid {
        return Err(Error::encoding(
            Endpoint::FineTuningJob,
            format!("invalid fine-tuning job id {id:?}"),
        ));
    }

    let base = format!("{}/{id}", Endpoint::FineTuningJob.path());
    Ok(match action {
        Some(action) => format!("{base}/{action}"),
        None => base,
    })
}

impl Client {
    /// Create a fine-tuning job.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Encoding`], [`Error::Transport`],
    /// [`Error::RemoteStatus`] or [`Error::Decoding`].
    pub async fn create_fine_tuning_job(
        &self,
        request: &FineTuningJobRequest,
    ) -> Result<FineTuningJob> {
        let body = self.post_json(Endpoint::FineTuningJob, request).await?;
        let job: FineTuningJob = decode_json(Endpoint::FineTuningJob, &body)?;

        debug!(id = %job.id, status = %job.status, "fine-tuning job created");
        Ok(job)
    }

    /// Fetch the current state of a fine-tuning job.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Encoding`] for a malformed ID, otherwise as
    /// [`Client::create_fine_tuning_job`].
    pub async fn retrieve_fine_tuning_job(&self, id: &str) -> Result<FineTuningJob> {
        let path = job_path(id, None)?;
        let body = self
            .send_empty(Method::GET, Endpoint::FineTuningJob, &path)
            .await?;
        decode_json(Endpoint::FineTuningJob, &body)
    }

    /// Cancel a running fine-tuning job.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Encoding`] for a malformed ID, otherwise as
    /// [`Client::create_fine_tuning_job`].
    pub async fn cancel_fine_tuning_job(&self, id: &str) -> Result<FineTuningJob> {
        let path = job_path(id, Some("cancel"))?;
        let body = self
            .send_empty(Method::POST, Endpoint::FineTuningJob, &path)
            .await?;
        let job: FineTuningJob = decode_json(Endpoint::FineTuningJob, &body)?;

        debug!(id = %job.id, status = %job.status, "fine-tuning job cancel requested");
        Ok(job)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn job_json() -> serde_json::Value {
        json!({
            "object": "fine_tuning.job",
            "id": "ftjob-abc123",
            "model": "gpt-4o-mini-2024-07-18",
            "created_at": 1_721_764_800,
            "finished_at": null,
            "fine_tuned_model": null,
            "organization_id": "org-123",
            "result_files": [],
            "status": "queued",
            "validation_file": null,
            "training_file": "file-abc123",
            "hyperparameters": {"batch_size": "auto", "learning_rate_multiplier": "auto", "n_epochs": 3},
            "trained_tokens": null,
            "error": null,
            "seed": 42
        })
    }

    #[test]
    fn request_omits_unset_fields() {
        let req = FineTuningJobRequest::new("gpt-4o-mini", "file-abc123");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"model": "gpt-4o-mini", "training_file": "file-abc123"})
        );
    }

    #[test]
    fn request_serializes_hyperparameters() {
        let req = FineTuningJobRequest::new("gpt-4o-mini", "file-1")
            .hyperparameters(Hyperparameters {
                batch_size: Some(HyperparameterValue::Auto),
                learning_rate_multiplier: Some(HyperparameterValue::Fixed(0.5)),
                n_epochs: None,
            })
            .suffix("custom")
            .validation_file("file-2")
            .seed(7);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(
            json["hyperparameters"],
            json!({"batch_size": "auto", "learning_rate_multiplier": 0.5})
        );
        assert_eq!(json["suffix"], "custom");
        assert_eq!(json["validation_file"], "file-2");
        assert_eq!(json["seed"], 7);
    }

    #[test]
    fn job_decodes_and_round_trips() {
        let job: FineTuningJob = serde_json::from_value(job_json()).unwrap();

        assert_eq!(job.id, "ftjob-abc123");
        assert_eq!(job.status, JobStatus::Queued);
        assert!(!job.status.is_terminal());
        assert_eq!(job.hyperparameters.batch_size, Some(HyperparameterValue::Auto));
        assert_eq!(job.hyperparameters.n_epochs, Some(HyperparameterValue::Fixed(3)));
        assert_eq!(job.fine_tuned_model, None);

        let again: FineTuningJob =
            serde_json::from_value(serde_json::to_value(&job).unwrap()).unwrap();
        assert_eq!(job, again);
    }

    #[test]
    fn failed_job_carries_error() {
        let mut json = job_json();
        json["status"] = json!("failed");
        json["error"] = json!({"code": "invalid_training_file", "message": "bad line 3", "param": "training_file"});

        let job: FineTuningJob = serde_json::from_value(json).unwrap();
        let error = job.error.unwrap();

        assert!(job.status.is_terminal());
        assert_eq!(error.code, "invalid_training_file");
        assert_eq!(error.param.as_deref(), Some("training_file"));
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let mut json = job_json();
        json["status"] = json!("paused");

        let job: FineTuningJob = serde_json::from_value(json).unwrap();
        assert_eq!(job.status, JobStatus::Unknown);
    }

    #[test]
    fn hyperparameter_rejects_other_strings() {
        let result = serde_json::from_value::<HyperparameterValue<u32>>(json!("many"));
        assert!(result.is_err());
    }

    #[test]
    fn job_path_validates_id() {
        assert_eq!(job_path("ftjob-1", None).unwrap(), "fine_tuning/jobs/ftjob-1");
        assert_eq!(
            job_path("ftjob-1", Some("cancel")).unwrap(),
            "fine_tuning/jobs/ftjob-1/cancel"
        );
        assert_eq!(job_path("", None).unwrap_err().kind(), ErrorKind::Encoding);
        for id in ["a/b", ".", "..", "%2e%2e", "..\\files", "a?b", "a#b", "job 1", "ftjob-é"] {
            assert_eq!(
                job_path(id, Some("cancel")).unwrap_err().kind(),
                ErrorKind::Encoding,
                "{id:?}"
            );
        }
    }
}
