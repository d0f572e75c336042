//! Format specific processing of to-be-signed documents.
//!
//! A processor is selected by the declared MIME type of a document. It computes
//! the bytes to be signed before the request is sent and compiles and validates
//! the signed document once the sign response arrives.

use async_trait::async_trait;
use ct_codecs::{Base64, Decoder, Encoder};
use shared_types::DocumentId;
use time::OffsetDateTime;

use crate::config::core_config::{ProcessingConfiguration, SignatureValidatorType};
use crate::config::policy::PolicyConfiguration;
use crate::model::certificate::Certificate;
use crate::model::protocol::{DocumentType, SignRequestMessage, SignedTaskData};
use crate::model::requirements::AdesType;
use crate::model::sign_request::{Extensions, TbsDocument};
use crate::model::sign_result::CompiledSignedDocument;

pub mod ades;
pub mod error;
pub mod pdf;
pub mod provider;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_utils;

use error::DocumentProcessorError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DocumentProcessor: Send + Sync {
    fn document_type(&self) -> DocumentType;

    fn supports(&self, document: &TbsDocument) -> bool;

    async fn calculate_to_be_signed(
        &self,
        document: &TbsDocument,
        signature_algorithm: &str,
        policy: &PolicyConfiguration,
    ) -> Result<TbsCalculationResult, DocumentProcessorError>;

    async fn build_signed_document(
        &self,
        document: &TbsDocument,
        signed_task: &SignedTaskData,
        certificate_chain: &[Certificate],
        request: &SignRequestMessage,
    ) -> Result<CompiledSignedDocument, DocumentProcessorError>;

    async fn validate_signed_document(
        &self,
        document: &CompiledSignedDocument,
        signer_certificate: &Certificate,
        signed_task: &SignedTaskData,
        context: &ValidationContext,
    ) -> Result<(), DocumentProcessorError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct TbsCalculationResult {
    pub to_be_signed_bytes: Vec<u8>,
    pub sig_type: DocumentType,
    pub ades_type: Option<AdesType>,
    /// Pre-sign data that has to survive until the response is processed
    pub extensions: Extensions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidationContext {
    pub request_time: OffsetDateTime,
    pub response_time: OffsetDateTime,
    pub processing: ProcessingConfiguration,
    pub validator_type: SignatureValidatorType,
}

pub(crate) fn document_id(document: &TbsDocument) -> Result<DocumentId, DocumentProcessorError> {
    document
        .id
        .clone()
        .ok_or_else(|| DocumentProcessorError::MissingCorrelationData("document id".to_owned()))
}

pub(crate) fn decode_content(content: &str) -> Result<Vec<u8>, DocumentProcessorError> {
    let trimmed: String = content.split_whitespace().collect();
    let decoded = Base64::decode_to_vec(trimmed, None)
        .map_err(|e| DocumentProcessorError::InvalidContent(e.to_string()))?;
    if decoded.is_empty() {
        return Err(DocumentProcessorError::InvalidContent(
            "document is empty".to_owned(),
        ));
    }
    Ok(decoded)
}

pub(crate) fn encode_content(content: &[u8]) -> Result<String, DocumentProcessorError> {
    Base64::encode_to_string(content).map_err(|e| DocumentProcessorError::MappingError(e.to_string()))
}

pub(crate) fn check_signed_task(
    document_id: &DocumentId,
    document_type: DocumentType,
    signed_task: &SignedTaskData,
) -> Result<(), DocumentProcessorError> {
    if &signed_task.sign_task_id != document_id {
        return Err(DocumentProcessorError::SignedTaskMismatch(format!(
            "signed task `{}` does not belong to document `{document_id}`",
            signed_task.sign_task_id
        )));
    }
    if signed_task.sig_type != document_type {
        return Err(DocumentProcessorError::SignedTaskMismatch(format!(
            "signed task type {} does not match document type {document_type}",
            signed_task.sig_type
        )));
    }
    if signed_task.signature_value.is_empty() {
        return Err(DocumentProcessorError::SignedTaskMismatch(
            "signature value is empty".to_owned(),
        ));
    }
    Ok(())
}
