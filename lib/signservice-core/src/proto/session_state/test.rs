use std::sync::Arc;

use shared_types::{DocumentId, PolicyName, SignRequestId};
use similar_asserts::assert_eq;
use time::macros::datetime;
use url::Url;

use super::*;
use crate::config::test_utils::policy_store;
use crate::model::requirements::{AuthnRequirements, CertificateRequirements};
use crate::proto::clock::DefaultClock;
use crate::provider::message_codec::MockMessageCodec;
use crate::provider::message_codec::json::JsonMessageCodec;
use crate::provider::session_cache::MockSessionCache;
use crate::provider::session_cache::in_memory::InMemorySessionCache;

fn sign_request(id: &str, policy: &str) -> SignRequestMessage {
    SignRequestMessage {
        request_id: SignRequestId::from(id),
        policy: PolicyName::from(policy),
        sign_requester_id: "https://requester.example.com".to_owned(),
        sign_service_id: "https://sign.example.com".to_owned(),
        destination_url: Url::parse("https://sign.example.com/request").unwrap(),
        return_url: Url::parse("https://requester.example.com/return").unwrap(),
        request_time: datetime!(2024-03-01 10:00 UTC),
        signature_algorithm: "rsa-sha256".to_owned(),
        authn_requirements: AuthnRequirements::default(),
        certificate_requirements: CertificateRequirements::default(),
        sign_message: None,
        sign_tasks: vec![],
        extensions: Default::default(),
    }
}

fn input() -> SessionStateInput {
    SessionStateInput {
        correlation_id: "correlation".to_owned(),
        tbs_documents: vec![TbsDocument {
            id: Some(DocumentId::from("doc-1")),
            content: "PGRvYy8+".to_owned(),
            mime_type: "application/xml".to_owned(),
            extensions: maplit::btreemap! { "key".to_owned() => "value".to_owned() },
            ..Default::default()
        }],
        sign_message: None,
    }
}

fn manager() -> SessionStateManagerImpl {
    SessionStateManagerImpl::new(
        Arc::new(InMemorySessionCache::new(
            Some(time::Duration::minutes(5)),
            Arc::new(DefaultClock),
        )),
        Arc::new(JsonMessageCodec),
        policy_store(),
    )
}

#[test]
fn test_stateful_create_and_retrieve_once() {
    let manager = manager();
    let request = sign_request("request-1", "default");

    let state = manager
        .create(input(), &request, "encoded", false, Some("caller".to_owned()))
        .unwrap();
    assert_eq!(state.id, SignRequestId::from("request-1"));
    assert!(!state.is_stateless());

    let retrieved = manager.retrieve(&state, Some("caller")).unwrap();
    assert_eq!(retrieved.request, request);
    assert_eq!(retrieved.state.correlation_id, "correlation");
    assert_eq!(retrieved.state.tbs_documents, input().tbs_documents);

    let second = manager.retrieve(&state, Some("caller"));
    assert!(matches!(second, Err(SessionStateError::NotFound(_))));
}

#[test]
fn test_stateful_retrieve_by_other_caller() {
    let manager = manager();
    let request = sign_request("request-1", "default");
    let state = manager
        .create(input(), &request, "encoded", false, Some("caller".to_owned()))
        .unwrap();

    let result = manager.retrieve(&state, Some("intruder"));
    assert!(matches!(result, Err(SessionStateError::NoAccess(_))));
    let result = manager.retrieve(&state, None);
    assert!(matches!(result, Err(SessionStateError::NoAccess(_))));

    manager.retrieve(&state, Some("caller")).unwrap();
}

#[test]
fn test_stateful_unknown_id() {
    let state = SignatureState {
        id: SignRequestId::from("unknown"),
        state: None,
    };

    let result = manager().retrieve(&state, None);
    assert!(matches!(result, Err(SessionStateError::NotFound(_))));
}

#[test]
fn test_stateless_create_and_retrieve() {
    let manager = manager();
    let request = sign_request("request-1", "stateless");
    let encoded = JsonMessageCodec::encode(&request).unwrap();

    let state = manager
        .create(input(), &request, &encoded, true, None)
        .unwrap();
    assert!(state.is_stateless());
    let embedded = state.state.as_ref().unwrap();
    assert_eq!(embedded.request, SessionRequest::Encoded(encoded));

    // caller held state survives serialization
    let json = serde_json::to_string(&state).unwrap();
    let state: SignatureState = serde_json::from_str(&json).unwrap();

    let retrieved = manager.retrieve(&state, None).unwrap();
    assert_eq!(retrieved.request, request);

    // nothing is consumed server side
    manager.retrieve(&state, None).unwrap();
}

#[test]
fn test_stateless_state_for_stateful_policy() {
    let manager = manager();
    let request = sign_request("request-1", "default");
    let encoded = JsonMessageCodec::encode(&request).unwrap();

    let state = manager
        .create(input(), &request, &encoded, true, None)
        .unwrap();

    let result = manager.retrieve(&state, None);
    assert!(matches!(
        result,
        Err(SessionStateError::StatelessStateForStatefulPolicy(policy)) if policy == "default"
    ));
}

#[test]
fn test_stateless_unknown_policy() {
    let manager = manager();
    let request = sign_request("request-1", "removed");

    let state = manager
        .create(input(), &request, "encoded", true, None)
        .unwrap();

    let result = manager.retrieve(&state, None);
    assert!(matches!(result, Err(SessionStateError::PolicyNotFound(_))));
}

#[test]
fn test_stateless_id_mismatch() {
    let manager = manager();
    let request = sign_request("request-1", "stateless");
    let encoded = JsonMessageCodec::encode(&request).unwrap();

    let mut state = manager
        .create(input(), &request, &encoded, true, None)
        .unwrap();
    state.id = SignRequestId::from("request-2");

    let result = manager.retrieve(&state, None);
    assert!(matches!(result, Err(SessionStateError::IdMismatch { .. })));
}

#[test]
fn test_stateless_tampered_request() {
    let manager = manager();
    let request = sign_request("request-1", "stateless");
    let other = JsonMessageCodec::encode(&sign_request("request-2", "stateless")).unwrap();

    let state = manager.create(input(), &request, &other, true, None).unwrap();

    let result = manager.retrieve(&state, None);
    assert!(matches!(result, Err(SessionStateError::RequestMismatch(_))));
}

#[test]
fn test_stateless_undecodable_request() {
    let mut codec = MockMessageCodec::new();
    codec
        .expect_decode_sign_request()
        .once()
        .returning(|_| Err(MessageCodecError::Decoding("broken".to_owned())));
    let manager = SessionStateManagerImpl::new(
        Arc::new(MockSessionCache::<SignatureSessionState>::new()),
        Arc::new(codec),
        policy_store(),
    );
    let request = sign_request("request-1", "stateless");

    let state = manager
        .create(input(), &request, "broken", true, None)
        .unwrap();

    let result = manager.retrieve(&state, None);
    assert!(matches!(result, Err(SessionStateError::Codec(_))));
}

#[test]
fn test_stateful_storage_failure() {
    let mut cache = MockSessionCache::<SignatureSessionState>::new();
    cache
        .expect_put()
        .once()
        .returning(|_, _, _| Err(SessionCacheError::Storage("full".to_owned())));
    let manager = SessionStateManagerImpl::new(
        Arc::new(cache),
        Arc::new(JsonMessageCodec),
        policy_store(),
    );

    let result = manager.create(
        input(),
        &sign_request("request-1", "default"),
        "encoded",
        false,
        None,
    );
    assert!(matches!(result, Err(SessionStateError::Cache(_))));
}

#[test]
fn test_stateful_retrieve_forwards_requester_to_cache() {
    let mut cache = MockSessionCache::<SignatureSessionState>::new();
    cache
        .expect_get_and_remove()
        .once()
        .withf(|id, requester_id| id == "request-1" && requester_id == &Some("intruder"))
        .returning(|id, _| Err(SessionCacheError::NoAccess(id.to_owned())));
    let manager = SessionStateManagerImpl::new(
        Arc::new(cache),
        Arc::new(JsonMessageCodec),
        policy_store(),
    );

    let state = SignatureState {
        id: SignRequestId::from("request-1"),
        state: None,
    };
    let result = manager.retrieve(&state, Some("intruder"));
    assert!(matches!(result, Err(SessionStateError::NoAccess(id)) if id == SignRequestId::from("request-1")));
}
