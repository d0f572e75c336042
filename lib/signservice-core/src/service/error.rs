use itertools::Itertools;
use shared_types::{DocumentId, PolicyName, SignRequestId};
use thiserror::Error;

use crate::config::{ConfigParsingError, ConfigValidationError};
use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::proto::session_state::SessionStateError;
use crate::provider::document_processor::error::DocumentProcessorError;
use crate::provider::message_codec::MessageCodecError;
use crate::provider::metadata_resolver::MetadataResolverError;
use crate::validator::FieldError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Config validation error `{0}`")]
    ConfigValidationError(#[from] ConfigValidationError),
    #[error("Config parsing error `{0}`")]
    ConfigParsingError(#[from] ConfigParsingError),
    #[error("Missing provider `{0}`")]
    MissingProvider(String),

    #[error("Policy `{0}` not found")]
    PolicyNotFound(PolicyName),
    #[error("Signature state of stateful policy `{0}` was handed out to the caller")]
    PolicyModeMismatch(PolicyName),
    #[error("Invalid sign request input: {}", .0.iter().join("; "))]
    InputInvalid(Vec<FieldError>),
    #[error("Document `{id}` of type `{mime_type}` is not supported")]
    UnsupportedDocument { id: DocumentId, mime_type: String },

    #[error("Signature state `{0}` not found")]
    StateNotFound(SignRequestId),
    #[error("Signature state `{0}` is not accessible")]
    NoAccess(SignRequestId),
    #[error("Signature state error: `{0}`")]
    SessionState(SessionStateError),
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Sign service returned status `{major}` (minor `{}`): {}", .minor.as_deref().unwrap_or("-"), .message.as_deref().unwrap_or("-"))]
    ResponseStatus {
        major: String,
        minor: Option<String>,
        message: Option<String>,
    },
    #[error("Signature operation cancelled by the user")]
    ResponseCancelled,
    #[error("Sign response validation failed: {0}")]
    ResponseValidation(String),

    #[error("Processing of document `{id}` failed: {source}")]
    DocumentProcessing {
        id: DocumentId,
        #[source]
        source: DocumentProcessorError,
    },
    #[error("Signature state of document `{id}` is inconsistent: {source}")]
    StateConsistency {
        id: DocumentId,
        #[source]
        source: DocumentProcessorError,
    },

    #[error("Metadata error `{0}`")]
    Metadata(#[from] MetadataResolverError),
    #[error("Message codec error `{0}`")]
    MessageCodec(#[from] MessageCodecError),
    #[error("Mapping error: `{0}`")]
    MappingError(String),
}

impl ServiceError {
    /// Wraps a processor failure, keeping lost pre-sign data apart from bad signatures
    pub(crate) fn document(id: &DocumentId, source: DocumentProcessorError) -> Self {
        let id = id.to_owned();
        if source.is_state_inconsistency() {
            Self::StateConsistency { id, source }
        } else {
            Self::DocumentProcessing { id, source }
        }
    }
}

impl From<SessionStateError> for ServiceError {
    fn from(error: SessionStateError) -> Self {
        match error {
            SessionStateError::NotFound(id) => Self::StateNotFound(id),
            SessionStateError::NoAccess(id) => Self::NoAccess(id),
            SessionStateError::PolicyNotFound(policy) => Self::PolicyNotFound(policy),
            SessionStateError::StatelessStateForStatefulPolicy(policy) => {
                Self::PolicyModeMismatch(policy)
            }
            SessionStateError::IdMismatch { expected, actual } => Self::BadRequest(format!(
                "embedded signature state `{actual}` does not match `{expected}`"
            )),
            other => Self::SessionState(other),
        }
    }
}

impl ErrorCodeMixin for ServiceError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::ConfigValidationError(_) | Self::ConfigParsingError(_) => ErrorCode::BR_0001,
            Self::MissingProvider(_) => ErrorCode::BR_0004,
            Self::PolicyNotFound(_) => ErrorCode::BR_0002,
            Self::PolicyModeMismatch(_) => ErrorCode::BR_0003,
            Self::InputInvalid(_) => ErrorCode::BR_0010,
            Self::UnsupportedDocument { .. } => ErrorCode::BR_0011,
            Self::StateNotFound(_) => ErrorCode::BR_0020,
            Self::NoAccess(_) => ErrorCode::BR_0021,
            Self::SessionState(error) => error.error_code(),
            Self::BadRequest(_) => ErrorCode::BR_0012,
            Self::ResponseStatus { .. } => ErrorCode::BR_0030,
            Self::ResponseCancelled => ErrorCode::BR_0031,
            Self::ResponseValidation(_) => ErrorCode::BR_0032,
            Self::DocumentProcessing { source, .. } => match source {
                DocumentProcessorError::MappingError(_) => ErrorCode::BR_0033,
                other => other.error_code(),
            },
            Self::StateConsistency { .. } => ErrorCode::BR_0035,
            Self::Metadata(error) => error.error_code(),
            Self::MessageCodec(error) => error.error_code(),
            Self::MappingError(_) => ErrorCode::BR_0050,
        }
    }
}
