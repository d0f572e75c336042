use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{DocumentId, PolicyName};

use super::requirements::{
    AdesRequirement, AuthnRequirements, CertificateRequirements, SignMessageParameters,
    VisiblePdfSignatureRequirement,
};

/// Opaque key/value pairs attached to a document or request. Document processors
/// use document extensions to carry pre-sign data over to the response processing.
pub type Extensions = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequestInput {
    pub policy: Option<PolicyName>,
    pub correlation_id: Option<String>,
    pub sign_requester_id: Option<String>,
    pub return_url: Option<String>,
    pub destination_url: Option<String>,
    pub signature_algorithm: Option<String>,
    pub sign_service_id: Option<String>,
    #[serde(default)]
    pub authn_requirements: AuthnRequirements,
    pub certificate_requirements: Option<CertificateRequirements>,
    #[serde(default)]
    pub tbs_documents: Vec<TbsDocument>,
    pub sign_message_parameters: Option<SignMessageParameters>,
    #[serde(default)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TbsDocument {
    pub id: Option<DocumentId>,
    /// Base64 encoded document
    pub content: String,
    pub mime_type: String,
    pub processing_rules: Option<String>,
    pub ades_requirement: Option<AdesRequirement>,
    pub visible_pdf_signature_requirement: Option<VisiblePdfSignatureRequirement>,
    #[serde(default)]
    pub extensions: Extensions,
}

impl TbsDocument {
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }
}
