use one_dto_mapper::From;
use serde::Serialize;
use shared_types::PolicyName;
use url::Url;

use crate::config::policy::{PolicyConfiguration, SigningCredential};
use crate::model::certificate::Certificate;
use crate::model::requirements::{
    CertificateRequirements, EncryptionParameters, PdfSignatureImageTemplate, PdfSignaturePage,
};

/// Public view of a resolved policy, without the signing key.
#[derive(Clone, Debug, PartialEq, Serialize, From)]
#[from(PolicyConfiguration)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfigurationDTO {
    pub policy: PolicyName,
    pub stateless: bool,
    pub default_sign_requester_id: String,
    pub default_return_url: Url,
    pub default_signature_algorithm: String,
    pub sign_service_id: String,
    pub default_destination_url: Url,
    pub signing_credential: SigningCredentialDTO,
    pub sign_service_certificates: Vec<Certificate>,
    pub trust_anchors: Vec<Certificate>,
    pub default_certificate_requirements: CertificateRequirements,
    pub default_encrypt_parameters: EncryptionParameters,
    pub pdf_signature_image_templates: Vec<PdfSignatureImageTemplate>,
    pub pdf_signature_pages: Vec<PdfSignaturePage>,
}

#[derive(Clone, Debug, PartialEq, Serialize, From)]
#[from(SigningCredential)]
#[serde(rename_all = "camelCase")]
pub struct SigningCredentialDTO {
    pub certificate: Certificate,
}
