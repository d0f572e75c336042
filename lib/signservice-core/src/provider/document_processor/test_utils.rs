use shared_types::{PolicyName, SignRequestId};
use time::macros::datetime;
use url::Url;

use crate::config::policy::{PolicyConfiguration, SigningCredential};
use crate::model::certificate::Certificate;
use crate::model::protocol::SignRequestMessage;
use crate::model::requirements::{CertificateType, PdfSignatureImageTemplate};
use crate::provider::signing_engine::SignatureValidationEntry;

pub(crate) fn dummy_policy() -> PolicyConfiguration {
    PolicyConfiguration {
        policy: PolicyName::from("default"),
        stateless: false,
        default_sign_requester_id: "https://requester.example.com".to_owned(),
        default_return_url: Url::parse("https://requester.example.com/return").unwrap(),
        default_signature_algorithm: "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256"
            .to_owned(),
        sign_service_id: "https://sign.example.com".to_owned(),
        default_destination_url: Url::parse("https://sign.example.com/request").unwrap(),
        signing_credential: SigningCredential {
            private_key: "private-key".into(),
            certificate: Certificate::new(vec![10, 11, 12]),
        },
        sign_service_certificates: vec![Certificate::new(vec![20, 21, 22])],
        trust_anchors: vec![],
        default_certificate_requirements: crate::model::requirements::CertificateRequirements {
            certificate_type: Some(CertificateType::Pkc),
            attribute_mappings: vec![],
        },
        default_encrypt_parameters: Default::default(),
        pdf_signature_image_templates: vec![PdfSignatureImageTemplate {
            reference: "stamp".to_owned(),
            image: "<svg/>".to_owned(),
            width: 300,
            height: 100,
            include_signer_name: true,
            include_signing_time: true,
            fields: maplit::btreemap! {
                "idp".to_owned() => "Identity provider".to_owned(),
            },
        }],
        pdf_signature_pages: vec![],
    }
}

pub(crate) fn dummy_sign_request() -> SignRequestMessage {
    let policy = dummy_policy();
    SignRequestMessage {
        request_id: SignRequestId::from("request-1"),
        policy: policy.policy,
        sign_requester_id: policy.default_sign_requester_id,
        sign_service_id: policy.sign_service_id,
        destination_url: policy.default_destination_url,
        return_url: policy.default_return_url,
        request_time: datetime!(2024-03-01 10:00 UTC),
        signature_algorithm: policy.default_signature_algorithm,
        authn_requirements: Default::default(),
        certificate_requirements: policy.default_certificate_requirements,
        sign_message: None,
        sign_tasks: vec![],
        extensions: Default::default(),
    }
}

pub(crate) fn validation_entry(certificate: Certificate, valid: bool) -> SignatureValidationEntry {
    SignatureValidationEntry {
        signature_id: None,
        signer_certificate: Some(certificate),
        valid,
        message: None,
    }
}
