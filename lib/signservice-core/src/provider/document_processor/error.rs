use thiserror::Error;
use time::OffsetDateTime;

use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::provider::signing_engine::SigningEngineError;

#[derive(Debug, Error)]
pub enum DocumentProcessorError {
    #[error("Invalid document content: `{0}`")]
    InvalidContent(String),
    #[error("Missing pre-sign data `{0}`")]
    MissingCorrelationData(String),
    #[error("Invalid pre-sign data `{key}`: {reason}")]
    InvalidCorrelationData { key: String, reason: String },
    #[error("Signed task mismatch: {0}")]
    SignedTaskMismatch(String),
    #[error("Signature validation failed: {0}")]
    SignatureValidation(String),
    #[error(
        "AdES signing time {signing_time} is later than the response time {response_time}"
    )]
    SigningTimeAfterResponse {
        signing_time: OffsetDateTime,
        response_time: OffsetDateTime,
    },
    #[error(
        "AdES signing time {signing_time} is before the request time {request_time} (allowed clock skew {allowed_clock_skew})"
    )]
    SigningTimeBeforeRequest {
        signing_time: OffsetDateTime,
        request_time: OffsetDateTime,
        allowed_clock_skew: time::Duration,
    },
    #[error("AdES object has no signing time")]
    MissingSigningTime,
    #[error("AdES signing certificate digest does not match the signer certificate: {0}")]
    SigningCertificateMismatch(String),
    #[error("Mapping error: `{0}`")]
    MappingError(String),
    #[error(transparent)]
    SigningEngine(#[from] SigningEngineError),
}

impl DocumentProcessorError {
    /// Pre-sign data lost between request and response, as opposed to a bad signature
    pub fn is_state_inconsistency(&self) -> bool {
        matches!(
            self,
            Self::MissingCorrelationData(_) | Self::InvalidCorrelationData { .. }
        )
    }
}

impl From<serde_json::Error> for DocumentProcessorError {
    fn from(e: serde_json::Error) -> Self {
        Self::MappingError(e.to_string())
    }
}

impl ErrorCodeMixin for DocumentProcessorError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidContent(_) => ErrorCode::BR_0041,
            Self::MissingCorrelationData(_) | Self::InvalidCorrelationData { .. } => {
                ErrorCode::BR_0035
            }
            Self::SignedTaskMismatch(_) => ErrorCode::BR_0032,
            Self::SignatureValidation(_)
            | Self::SigningTimeAfterResponse { .. }
            | Self::SigningTimeBeforeRequest { .. }
            | Self::MissingSigningTime
            | Self::SigningCertificateMismatch(_) => ErrorCode::BR_0034,
            Self::MappingError(_) => ErrorCode::BR_0050,
            Self::SigningEngine(_) => ErrorCode::BR_0040,
        }
    }
}
