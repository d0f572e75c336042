use ct_codecs::{Base64, Encoder};
use shared_types::DocumentId;
use time::OffsetDateTime;

use crate::model::certificate::Certificate;
use crate::model::protocol::{
    DocumentType, SignRequestMessage, SignResponseMessage, SignResponseStatus, SignedTaskData,
    SignerAssertion,
};
use crate::model::requirements::{AuthnRequirements, SignerIdentityAttribute};
use crate::model::sign_request::{SignRequestInput, TbsDocument};
use crate::model::sign_result::AdesObject;
use crate::provider::signing_engine::{
    AssembledSignature, MockSigningEngine, SignatureValidationEntry, SignatureValidationReport,
};

pub(crate) const IDP: &str = "https://idp.example.com";

pub(crate) fn signer_certificate() -> Certificate {
    Certificate::new(vec![42, 42, 42])
}

pub(crate) fn xml_document(id: &str) -> TbsDocument {
    TbsDocument {
        id: Some(DocumentId::from(id)),
        content: Base64::encode_to_string(b"<document/>").unwrap(),
        mime_type: "application/xml".to_owned(),
        ..Default::default()
    }
}

pub(crate) fn pdf_document(id: &str) -> TbsDocument {
    TbsDocument {
        id: Some(DocumentId::from(id)),
        content: Base64::encode_to_string(b"%PDF-1.7").unwrap(),
        mime_type: "application/pdf".to_owned(),
        ..Default::default()
    }
}

pub(crate) fn authn_requirements() -> AuthnRequirements {
    AuthnRequirements {
        authn_service_id: Some(IDP.to_owned()),
        authn_context_class_refs: vec!["http://id.elegnamnden.se/loa/1.0/loa3".to_owned()],
        requested_signer_attributes: vec![SignerIdentityAttribute {
            name: "urn:oid:1.2.752.29.4.13".to_owned(),
            value: "195207092818".to_owned(),
        }],
        user_display_name: None,
    }
}

pub(crate) fn sign_request_input(documents: Vec<TbsDocument>) -> SignRequestInput {
    SignRequestInput {
        correlation_id: Some("correlation-1".to_owned()),
        authn_requirements: authn_requirements(),
        tbs_documents: documents,
        ..Default::default()
    }
}

/// Successful response signing every task of `request`
pub(crate) fn sign_response(
    request: &SignRequestMessage,
    response_time: OffsetDateTime,
) -> SignResponseMessage {
    SignResponseMessage {
        in_response_to: request.request_id.to_owned(),
        response_time,
        status: SignResponseStatus::Success,
        signer_assertion: Some(SignerAssertion {
            authn_service_id: IDP.to_owned(),
            authn_context_class_ref: "http://id.elegnamnden.se/loa/1.0/loa3".to_owned(),
            authn_instant: response_time,
            attributes: authn_requirements().requested_signer_attributes,
            assertion_reference: Some("assertion-1".to_owned()),
        }),
        signature_certificate_chain: vec![signer_certificate()],
        signed_tasks: request
            .sign_tasks
            .iter()
            .map(|task| SignedTaskData {
                sign_task_id: task.sign_task_id.to_owned(),
                sig_type: task.sig_type,
                signature_value: vec![7; 16],
                ades_signed_attributes: (task.sig_type == DocumentType::Pdf)
                    .then(|| task.to_be_signed_bytes.to_owned()),
                extensions: Default::default(),
            })
            .collect(),
    }
}

/// Engine accepting everything, its signatures carry `signing_time`
pub(crate) fn signing_engine(signing_time: Option<OffsetDateTime>) -> MockSigningEngine {
    let mut engine = MockSigningEngine::new();
    engine
        .expect_compute_to_be_signed()
        .returning(|request| Ok([b"tbs:".as_slice(), &request.document[..]].concat()));
    engine.expect_assemble_signature().returning(move |request| {
        Ok(AssembledSignature {
            document: [request.document, request.signature_value].concat(),
            ades_object: Some(AdesObject {
                signing_time: request.signing_time.or(signing_time),
                ..Default::default()
            }),
        })
    });
    engine
        .expect_validate_signature()
        .returning(|_, _, certificate| {
            Ok(SignatureValidationReport {
                signatures: vec![SignatureValidationEntry {
                    signature_id: None,
                    signer_certificate: Some(certificate.to_owned()),
                    valid: true,
                    message: None,
                }],
            })
        });
    engine
}
