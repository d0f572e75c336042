use one_dto_mapper::From;
use serde::{Deserialize, Serialize};
use shared_types::{DocumentId, SignRequestId};
use time::OffsetDateTime;

use super::certificate::Certificate;
use super::protocol::SignerAssertion;
use super::requirements::SignerIdentityAttribute;
use super::sign_request::Extensions;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResult {
    pub id: SignRequestId,
    pub correlation_id: String,
    pub signed_documents: Vec<CompiledSignedDocument>,
    pub signer_assertion_info: SignerAssertionInfo,
    pub signer_certificate_chain: Vec<Certificate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledSignedDocument {
    pub id: DocumentId,
    /// Base64 encoded signed document
    pub signed_content: String,
    pub mime_type: String,
    pub ades_object: Option<AdesObject>,
    #[serde(default)]
    pub extensions: Extensions,
}

/// Qualifying properties of an AdES signature as reported by the signing engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdesObject {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub signing_time: Option<OffsetDateTime>,
    pub signing_certificate_digest: Option<CertificateDigest>,
    pub signature_policy: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDigest {
    pub digest_algorithm: String,
    pub digest_value: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, From)]
#[from(SignerAssertion)]
#[serde(rename_all = "camelCase")]
pub struct SignerAssertionInfo {
    pub authn_service_id: String,
    pub authn_context_class_ref: String,
    #[serde(with = "time::serde::rfc3339")]
    pub authn_instant: OffsetDateTime,
    pub attributes: Vec<SignerIdentityAttribute>,
    pub assertion_reference: Option<String>,
}
