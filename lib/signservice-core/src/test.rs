use std::collections::BTreeMap;
use std::sync::Arc;

use shared_types::{DocumentId, PolicyName};
use similar_asserts::assert_eq;
use time::{Duration, OffsetDateTime};

use super::*;
use crate::config::ConfigValidationError;
use crate::config::core_config::{CacheConfig, ProcessingConfiguration, SignatureValidatorType};
use crate::config::test_utils::policy_params;
use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::model::protocol::SignRequestMessage;
use crate::model::session_state::SignatureState;
use crate::model::sign_request::SignRequestInput;
use crate::model::sign_result::SignatureResult;
use crate::provider::message_codec::json::JsonMessageCodec;
use crate::provider::metadata_resolver::MockMetadataResolver;
use crate::provider::signing_engine::MockSigningEngine;
use crate::service::sign_request::dto::SignRequestDataDTO;
use crate::service::sign_response::dto::SignResponseProcessingParameters;
use crate::service::test_utilities::{
    pdf_document, sign_request_input, sign_response, signer_certificate, signing_engine,
    xml_document,
};

fn config() -> SignServiceConfig {
    SignServiceConfig {
        default_policy: PolicyName::from("default"),
        policies: BTreeMap::from([
            (PolicyName::from("default"), policy_params(false)),
            (PolicyName::from("stateless"), policy_params(true)),
        ]),
        cache: CacheConfig::default(),
        processing: ProcessingConfiguration::default(),
        signature_validator: SignatureValidatorType::Basic,
    }
}

fn build_core(engine: MockSigningEngine) -> SignServiceCore {
    SignServiceCore::builder(config())
        .with_signing_engine(Arc::new(engine))
        .with_metadata_resolver(Arc::new(MockMetadataResolver::new()))
        .with_message_codec(Arc::new(JsonMessageCodec))
        .build()
        .unwrap()
}

fn encoded_response(data: &SignRequestDataDTO) -> String {
    let request: SignRequestMessage = JsonMessageCodec::decode(&data.sign_request).unwrap();
    JsonMessageCodec::encode(&sign_response(&request, OffsetDateTime::now_utc())).unwrap()
}

async fn process(
    core: &SignServiceCore,
    data: &SignRequestDataDTO,
    state: SignatureState,
) -> Result<SignatureResult, ServiceError> {
    core.sign_response_service
        .process_sign_response(
            &encoded_response(data),
            &data.relay_state,
            state,
            SignResponseProcessingParameters::default(),
            Some("caller"),
        )
        .await
}

#[tokio::test]
async fn test_round_trip_keeps_document_ids() {
    let core = build_core(signing_engine(Some(OffsetDateTime::now_utc())));

    let input = sign_request_input(vec![xml_document("xml-1"), pdf_document("pdf-1")]);
    let data = core
        .sign_request_service
        .create_sign_request(input, Some("caller"))
        .await
        .unwrap();
    assert!(!data.state.is_stateless());
    assert_eq!(data.relay_state, data.state.id.to_string());
    assert_eq!(data.correlation_id, "correlation-1");

    let result = process(&core, &data, data.state.clone()).await.unwrap();

    assert_eq!(result.id, data.state.id);
    assert_eq!(result.correlation_id, "correlation-1");
    assert_eq!(
        result
            .signed_documents
            .iter()
            .map(|document| document.id.clone())
            .collect::<Vec<_>>(),
        vec![DocumentId::from("xml-1"), DocumentId::from("pdf-1")]
    );
    assert_eq!(result.signer_certificate_chain, vec![signer_certificate()]);
    assert_eq!(
        result.signer_assertion_info.assertion_reference.as_deref(),
        Some("assertion-1")
    );
}

#[tokio::test]
async fn test_stateful_response_processed_at_most_once() {
    let core = build_core(signing_engine(Some(OffsetDateTime::now_utc())));

    let data = core
        .sign_request_service
        .create_sign_request(sign_request_input(vec![xml_document("xml-1")]), Some("caller"))
        .await
        .unwrap();

    process(&core, &data, data.state.clone()).await.unwrap();
    let second = process(&core, &data, data.state.clone()).await;

    assert!(matches!(second, Err(ServiceError::StateNotFound(_))));
}

#[tokio::test]
async fn test_stateless_round_trip() {
    let core = build_core(signing_engine(Some(OffsetDateTime::now_utc())));

    let input = SignRequestInput {
        policy: Some(PolicyName::from("stateless")),
        ..sign_request_input(vec![pdf_document("pdf-1")])
    };
    let data = core
        .sign_request_service
        .create_sign_request(input, None)
        .await
        .unwrap();
    assert!(data.state.is_stateless());

    // the caller holds the state in between
    let json = serde_json::to_string(&data.state).unwrap();
    let state: SignatureState = serde_json::from_str(&json).unwrap();

    let result = process(&core, &data, state).await.unwrap();
    assert_eq!(result.signed_documents.len(), 1);
    assert_eq!(result.signed_documents[0].id, DocumentId::from("pdf-1"));
}

#[tokio::test]
async fn test_embedded_state_for_stateful_policy_rejected() {
    let core = build_core(signing_engine(Some(OffsetDateTime::now_utc())));

    let data = core
        .sign_request_service
        .create_sign_request(sign_request_input(vec![xml_document("xml-1")]), None)
        .await
        .unwrap();

    let stateless = core
        .sign_request_service
        .create_sign_request(
            SignRequestInput {
                policy: Some(PolicyName::from("stateless")),
                ..sign_request_input(vec![xml_document("xml-1")])
            },
            None,
        )
        .await
        .unwrap();

    // embedded state claiming the stateful default policy
    let mut state = stateless.state.clone();
    if let Some(embedded) = state.state.as_mut() {
        embedded.policy = PolicyName::from("default");
    }

    let result = process(&core, &stateless, state).await;
    assert!(matches!(result, Err(ServiceError::PolicyModeMismatch(_))));

    // the stateful request is untouched
    process(&core, &data, data.state.clone()).await.unwrap();
}

#[tokio::test]
async fn test_unsupported_second_document_fails_whole_request() {
    let mut engine = MockSigningEngine::new();
    engine.expect_compute_to_be_signed().never();
    let core = build_core(engine);

    let mut unsupported = xml_document("png-1");
    unsupported.mime_type = "image/png".to_owned();

    let result = core
        .sign_request_service
        .create_sign_request(
            sign_request_input(vec![xml_document("xml-1"), unsupported]),
            None,
        )
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::UnsupportedDocument { id, .. }) if id == "png-1"
    ));
}

#[tokio::test]
async fn test_signing_time_after_response_fails() {
    let engine = signing_engine(Some(OffsetDateTime::now_utc() + Duration::hours(1)));
    let core = build_core(engine);

    let data = core
        .sign_request_service
        .create_sign_request(sign_request_input(vec![xml_document("xml-1")]), Some("caller"))
        .await
        .unwrap();

    let result = process(&core, &data, data.state.clone()).await;
    assert!(matches!(
        result,
        Err(ServiceError::DocumentProcessing { ref id, .. }) if id == "xml-1"
    ));
    assert_eq!(
        result.err().map(|error| error.error_code()),
        Some(ErrorCode::BR_0034)
    );
}

#[test]
fn test_build_requires_signing_engine() {
    let result = SignServiceCore::builder(config())
        .with_metadata_resolver(Arc::new(MockMetadataResolver::new()))
        .with_message_codec(Arc::new(JsonMessageCodec))
        .build();

    assert!(matches!(result, Err(ServiceError::MissingProvider(_))));
}

#[test]
fn test_build_rejects_invalid_configuration() {
    let mut config = config();
    config.default_policy = PolicyName::from("missing");

    let result = SignServiceCore::builder(config)
        .with_signing_engine(Arc::new(MockSigningEngine::new()))
        .with_metadata_resolver(Arc::new(MockMetadataResolver::new()))
        .with_message_codec(Arc::new(JsonMessageCodec))
        .build();

    assert!(matches!(result, Err(ServiceError::ConfigValidationError(_))));
}

#[test]
fn test_build_rejects_invalid_processing_settings() {
    let mut config = config();
    config.processing.allowed_clock_skew = Duration::seconds(-60);

    let result = SignServiceCore::builder(config)
        .with_signing_engine(Arc::new(MockSigningEngine::new()))
        .with_metadata_resolver(Arc::new(MockMetadataResolver::new()))
        .with_message_codec(Arc::new(JsonMessageCodec))
        .build();

    let Err(error) = result else {
        panic!("expected build failure");
    };
    assert_eq!(error.error_code(), ErrorCode::BR_0001);
    assert!(matches!(
        error,
        ServiceError::ConfigValidationError(ConfigValidationError::InvalidSettings { .. })
    ));
}
