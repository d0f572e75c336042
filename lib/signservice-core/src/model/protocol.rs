//! Protocol level view of the sign request and sign response envelopes.
//!
//! Only the fields the orchestration relies on are modelled; wire encoding,
//! XML signing and encryption are left to the [`MessageCodec`].
//!
//! [`MessageCodec`]: crate::provider::message_codec::MessageCodec

use serde::{Deserialize, Serialize};
use shared_types::{DocumentId, PolicyName, SignRequestId};
use strum::{Display, EnumString};
use time::OffsetDateTime;
use url::Url;

use super::certificate::Certificate;
use super::requirements::{
    AdesType, AuthnRequirements, CertificateRequirements, EncryptionParameters,
    SignMessageMimeType,
};
use super::sign_request::Extensions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Xml,
    Pdf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequestMessage {
    pub request_id: SignRequestId,
    pub policy: PolicyName,
    pub sign_requester_id: String,
    pub sign_service_id: String,
    pub destination_url: Url,
    pub return_url: Url,
    #[serde(with = "time::serde::rfc3339")]
    pub request_time: OffsetDateTime,
    pub signature_algorithm: String,
    pub authn_requirements: AuthnRequirements,
    pub certificate_requirements: CertificateRequirements,
    pub sign_message: Option<SignMessage>,
    pub sign_tasks: Vec<SignTaskData>,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessage {
    pub message: String,
    pub mime_type: SignMessageMimeType,
    pub must_show: bool,
    pub display_entity: Option<String>,
    /// Present when the codec has to encrypt the message for the display entity
    pub encryption: Option<SignMessageEncryption>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageEncryption {
    pub recipient: String,
    pub recipient_certificates: Vec<Certificate>,
    pub parameters: EncryptionParameters,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTaskData {
    pub sign_task_id: DocumentId,
    pub sig_type: DocumentType,
    pub ades_type: Option<AdesType>,
    pub processing_rules: Option<String>,
    /// Bytes the sign service signs; canonical form for XML, signed attributes for PDF
    pub to_be_signed_bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponseMessage {
    pub in_response_to: SignRequestId,
    #[serde(with = "time::serde::rfc3339")]
    pub response_time: OffsetDateTime,
    pub status: SignResponseStatus,
    pub signer_assertion: Option<SignerAssertion>,
    #[serde(default)]
    pub signature_certificate_chain: Vec<Certificate>,
    #[serde(default)]
    pub signed_tasks: Vec<SignedTaskData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum SignResponseStatus {
    Success,
    Cancelled,
    Error {
        major: String,
        minor: Option<String>,
        message: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerAssertion {
    pub authn_service_id: String,
    pub authn_context_class_ref: String,
    #[serde(with = "time::serde::rfc3339")]
    pub authn_instant: OffsetDateTime,
    #[serde(default)]
    pub attributes: Vec<super::requirements::SignerIdentityAttribute>,
    pub assertion_reference: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTaskData {
    pub sign_task_id: DocumentId,
    pub sig_type: DocumentType,
    pub signature_value: Vec<u8>,
    /// Signed attributes as returned by the sign service (CMS signed attributes for PDF)
    pub ades_signed_attributes: Option<Vec<u8>>,
    #[serde(default)]
    pub extensions: Extensions,
}
