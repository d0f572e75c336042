use std::collections::BTreeMap;
use std::sync::Arc;

use shared_types::PolicyName;

use super::policy::{PolicyConfigurationParams, SigningCredentialParams};
use super::policy_store::PolicyConfigurationStore;
use crate::model::requirements::{
    CertificateAttribute, CertificateAttributeMapping, CertificateAttributeType,
    CertificateRequirements, CertificateType, PdfSignatureImageTemplate,
    RequestedCertificateAttribute,
};

/// Base64 of `[1, 2, 3]`
pub(crate) const SIGNING_CERTIFICATE: &str = "AQID";
/// Base64 of `[4, 5, 6]`
pub(crate) const SIGN_SERVICE_CERTIFICATE: &str = "BAUG";

pub(crate) fn certificate_requirements() -> CertificateRequirements {
    CertificateRequirements {
        certificate_type: Some(CertificateType::Pkc),
        attribute_mappings: vec![CertificateAttributeMapping {
            sources: vec![RequestedCertificateAttribute {
                name: "urn:oid:1.2.752.29.4.13".to_owned(),
                friendly_name: Some("personalIdentityNumber".to_owned()),
                required: true,
            }],
            destination: Some(CertificateAttribute {
                r#type: Some(CertificateAttributeType::Rdn),
                identifier: "2.5.4.5".to_owned(),
                friendly_name: Some("serialNumber".to_owned()),
                default_value: None,
                required: true,
            }),
        }],
    }
}

/// Complete policy that passes validation on its own
pub(crate) fn policy_params(stateless: bool) -> PolicyConfigurationParams {
    PolicyConfigurationParams {
        parent_policy: None,
        stateless: Some(stateless),
        default_sign_requester_id: Some("https://requester.example.com".to_owned()),
        default_return_url: Some("https://requester.example.com/return".to_owned()),
        default_signature_algorithm: Some(
            "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256".to_owned(),
        ),
        sign_service_id: Some("https://sign.example.com".to_owned()),
        default_destination_url: Some("https://sign.example.com/request".to_owned()),
        signing_credential: Some(SigningCredentialParams {
            private_key: Some("private-key".into()),
            certificate: Some(SIGNING_CERTIFICATE.to_owned()),
        }),
        sign_service_certificates: Some(vec![SIGN_SERVICE_CERTIFICATE.to_owned()]),
        trust_anchors: None,
        default_certificate_requirements: Some(certificate_requirements()),
        default_encrypt_parameters: None,
        pdf_signature_image_templates: Some(vec![PdfSignatureImageTemplate {
            reference: "stamp".to_owned(),
            image: "<svg/>".to_owned(),
            width: 300,
            height: 100,
            include_signer_name: true,
            include_signing_time: true,
            fields: BTreeMap::new(),
        }]),
        pdf_signature_pages: None,
    }
}

/// Store with a stateful `default` and a stateless `stateless` policy
pub(crate) fn policy_store() -> Arc<PolicyConfigurationStore> {
    let sources = BTreeMap::from([
        (PolicyName::from("default"), policy_params(false)),
        (PolicyName::from("stateless"), policy_params(true)),
    ]);
    Arc::new(PolicyConfigurationStore::new(&sources, PolicyName::from("default")).unwrap())
}
