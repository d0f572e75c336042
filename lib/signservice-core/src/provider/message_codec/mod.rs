//! Encoding of the sign request and decoding of the sign response envelope.
//!
//! The codec owns the wire format including signing of the request with the
//! policy's signing credential and verification of the response against the
//! sign service certificates.

use thiserror::Error;

use crate::config::policy::SigningCredential;
use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::model::certificate::Certificate;
use crate::model::protocol::{SignRequestMessage, SignResponseMessage};

pub mod json;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait MessageCodec: Send + Sync {
    fn encode_sign_request(
        &self,
        request: &SignRequestMessage,
        signing_credential: &SigningCredential,
    ) -> Result<String, MessageCodecError>;

    fn decode_sign_request(&self, encoded: &str) -> Result<SignRequestMessage, MessageCodecError>;

    fn decode_sign_response(
        &self,
        encoded: &str,
        sign_service_certificates: &[Certificate],
    ) -> Result<SignResponseMessage, MessageCodecError>;
}

#[derive(Debug, Error)]
pub enum MessageCodecError {
    #[error("Encoding error: `{0}`")]
    Encoding(String),
    #[error("Decoding error: `{0}`")]
    Decoding(String),
    #[error("Message signature verification failed: `{0}`")]
    InvalidSignature(String),
}

impl ErrorCodeMixin for MessageCodecError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Encoding(_) => ErrorCode::BR_0014,
            Self::Decoding(_) | Self::InvalidSignature(_) => ErrorCode::BR_0032,
        }
    }
}
