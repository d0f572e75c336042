//! Contract of the signing engine performing the actual cryptographic work:
//! XML canonicalization and signature assembly, PDF incremental signing,
//! PAdES/XAdES attribute handling and signature validation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::certificate::Certificate;
use crate::model::protocol::DocumentType;
use crate::model::requirements::AdesRequirement;
use crate::model::sign_result::AdesObject;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SigningEngine: Send + Sync {
    /// Computes the exact bytes the sign service will sign
    async fn compute_to_be_signed(
        &self,
        request: ToBeSignedRequest,
    ) -> Result<Vec<u8>, SigningEngineError>;

    /// Inserts the signature returned by the sign service into the document
    async fn assemble_signature(
        &self,
        request: AssembleSignatureRequest,
    ) -> Result<AssembledSignature, SigningEngineError>;

    /// Validates all signatures of a signed document
    async fn validate_signature(
        &self,
        document: &[u8],
        document_type: DocumentType,
        expected_certificate: &Certificate,
    ) -> Result<SignatureValidationReport, SigningEngineError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToBeSignedRequest {
    pub document: Vec<u8>,
    pub document_type: DocumentType,
    pub signature_algorithm: String,
    pub ades_requirement: Option<AdesRequirement>,
    pub signing_time: Option<OffsetDateTime>,
    pub signature_id: Option<String>,
    pub visible_signature: Option<VisibleSignatureImage>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssembleSignatureRequest {
    pub document: Vec<u8>,
    pub document_type: DocumentType,
    pub signature_algorithm: String,
    pub signature_value: Vec<u8>,
    pub signed_attributes: Option<Vec<u8>>,
    pub certificate_chain: Vec<Certificate>,
    pub ades_requirement: Option<AdesRequirement>,
    pub signing_time: Option<OffsetDateTime>,
    pub signature_id: Option<String>,
    pub visible_signature: Option<VisibleSignatureImage>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssembledSignature {
    pub document: Vec<u8>,
    pub ades_object: Option<AdesObject>,
}

/// Visible signature stamp for PDF documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleSignatureImage {
    pub template_reference: String,
    pub image: String,
    pub page: i32,
    pub x_position: i32,
    pub y_position: i32,
    pub width: i32,
    pub height: i32,
    pub scale: i32,
    pub signer_name: Option<String>,
    pub include_signing_time: bool,
    #[serde(default)]
    pub field_values: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignatureValidationReport {
    pub signatures: Vec<SignatureValidationEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SignatureValidationEntry {
    pub signature_id: Option<String>,
    pub signer_certificate: Option<Certificate>,
    pub valid: bool,
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum SigningEngineError {
    #[error("Failed to compute to-be-signed bytes: `{0}`")]
    ToBeSigned(String),
    #[error("Failed to assemble signature: `{0}`")]
    Assembly(String),
    #[error("Failed to validate signature: `{0}`")]
    Validation(String),
}
