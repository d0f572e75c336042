use std::sync::Arc;

use ct_codecs::{Base64, Encoder};
use rstest::rstest;
use shared_types::DocumentId;
use time::Duration;
use time::macros::datetime;

use super::*;
use crate::config::core_config::{ProcessingConfiguration, SignatureValidatorType};
use crate::model::requirements::{AdesRequirement, AdesType};
use crate::model::sign_result::AdesObject;
use crate::provider::document_processor::test_utils::{
    dummy_policy, dummy_sign_request, validation_entry,
};
use crate::provider::signing_engine::{
    AssembledSignature, MockSigningEngine, SignatureValidationReport,
};

fn xml_document() -> TbsDocument {
    TbsDocument {
        id: Some(DocumentId::from("doc-1")),
        content: Base64::encode_to_string(b"<doc/>").unwrap(),
        mime_type: "application/xml".to_owned(),
        ades_requirement: Some(AdesRequirement {
            ades_format: AdesType::Bes,
            signature_policy: None,
        }),
        ..Default::default()
    }
}

fn signed_task() -> SignedTaskData {
    SignedTaskData {
        sign_task_id: DocumentId::from("doc-1"),
        sig_type: DocumentType::Xml,
        signature_value: vec![5, 5, 5],
        ades_signed_attributes: None,
        extensions: Default::default(),
    }
}

#[rstest]
#[case("application/xml", true)]
#[case("text/xml", true)]
#[case("application/samlmetadata+xml", true)]
#[case("application/pdf", false)]
#[case("not a mime type", false)]
fn test_supports(#[case] mime_type: &str, #[case] expected: bool) {
    let processor = XmlDocumentProcessor::new(Arc::new(MockSigningEngine::new()));
    let document = TbsDocument {
        mime_type: mime_type.to_owned(),
        ..Default::default()
    };

    assert_eq!(processor.supports(&document), expected);
}

#[tokio::test]
async fn test_calculate_to_be_signed() {
    let mut engine = MockSigningEngine::new();
    engine
        .expect_compute_to_be_signed()
        .once()
        .withf(|request| {
            request.document == b"<doc/>"
                && request.document_type == DocumentType::Xml
                && request.signature_algorithm == "rsa-sha256"
        })
        .returning(|_| Ok(vec![1, 2, 3]));

    let processor = XmlDocumentProcessor::new(Arc::new(engine));
    let result = processor
        .calculate_to_be_signed(&xml_document(), "rsa-sha256", &dummy_policy())
        .await
        .unwrap();

    assert_eq!(result.to_be_signed_bytes, vec![1, 2, 3]);
    assert_eq!(result.sig_type, DocumentType::Xml);
    assert_eq!(result.ades_type, Some(AdesType::Bes));
    assert!(result.extensions.is_empty());
}

#[tokio::test]
async fn test_calculate_to_be_signed_empty_content() {
    let processor = XmlDocumentProcessor::new(Arc::new(MockSigningEngine::new()));
    let document = TbsDocument {
        content: "".to_owned(),
        ..xml_document()
    };

    let result = processor
        .calculate_to_be_signed(&document, "rsa-sha256", &dummy_policy())
        .await;
    assert!(matches!(result, Err(DocumentProcessorError::InvalidContent(_))));
}

#[tokio::test]
async fn test_build_signed_document() {
    let mut engine = MockSigningEngine::new();
    engine
        .expect_assemble_signature()
        .once()
        .withf(|request| request.signature_value == vec![5, 5, 5])
        .returning(|_| {
            Ok(AssembledSignature {
                document: b"<doc><Signature/></doc>".to_vec(),
                ades_object: None,
            })
        });

    let processor = XmlDocumentProcessor::new(Arc::new(engine));
    let result = processor
        .build_signed_document(&xml_document(), &signed_task(), &[], &dummy_sign_request())
        .await
        .unwrap();

    assert_eq!(result.id, DocumentId::from("doc-1"));
    assert_eq!(result.mime_type, "application/xml");
    assert_eq!(
        result.signed_content,
        Base64::encode_to_string(b"<doc><Signature/></doc>").unwrap()
    );
}

#[tokio::test]
async fn test_build_signed_document_task_mismatch() {
    let processor = XmlDocumentProcessor::new(Arc::new(MockSigningEngine::new()));
    let task = SignedTaskData {
        sign_task_id: DocumentId::from("other"),
        ..signed_task()
    };

    let result = processor
        .build_signed_document(&xml_document(), &task, &[], &dummy_sign_request())
        .await;
    assert!(matches!(
        result,
        Err(DocumentProcessorError::SignedTaskMismatch(_))
    ));
}

#[tokio::test]
async fn test_validate_signed_document_rejects_late_signing_time() {
    let request_time = datetime!(2024-03-01 10:00 UTC);
    let signer = Certificate::new(vec![1, 2, 3]);

    let mut engine = MockSigningEngine::new();
    engine
        .expect_validate_signature()
        .once()
        .withf(|document, document_type, certificate| {
            document == b"<doc/>"
                && *document_type == DocumentType::Xml
                && certificate.der() == [1, 2, 3]
        })
        .returning(|_, _, certificate| {
            Ok(SignatureValidationReport {
                signatures: vec![validation_entry(certificate.clone(), true)],
            })
        });

    let processor = XmlDocumentProcessor::new(Arc::new(engine));
    let document = CompiledSignedDocument {
        id: DocumentId::from("doc-1"),
        signed_content: Base64::encode_to_string(b"<doc/>").unwrap(),
        mime_type: "application/xml".to_owned(),
        ades_object: Some(AdesObject {
            signing_time: Some(request_time + Duration::hours(1)),
            ..Default::default()
        }),
        extensions: Default::default(),
    };
    let context = ValidationContext {
        request_time,
        response_time: request_time + Duration::minutes(2),
        processing: ProcessingConfiguration {
            allowed_clock_skew: Duration::minutes(1),
            ..Default::default()
        },
        validator_type: SignatureValidatorType::Basic,
    };

    let result = processor
        .validate_signed_document(&document, &signer, &signed_task(), &context)
        .await;
    assert!(matches!(
        result,
        Err(DocumentProcessorError::SigningTimeAfterResponse { .. })
    ));
}
