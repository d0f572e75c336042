use similar_asserts::assert_eq;
use time::macros::datetime;

use super::JsonMessageCodec;
use crate::model::protocol::{DocumentType, SignResponseMessage, SignResponseStatus, SignedTaskData};
use crate::provider::message_codec::{MessageCodec, MessageCodecError};

#[test]
fn test_decode_sign_response() {
    let response = SignResponseMessage {
        in_response_to: "request-1".into(),
        response_time: datetime!(2024-03-01 12:00:30 UTC),
        status: SignResponseStatus::Error {
            major: "urn:oasis:names:tc:dss:1.0:resultmajor:RequesterError".to_string(),
            minor: None,
            message: Some("bad request".to_string()),
        },
        signer_assertion: None,
        signature_certificate_chain: vec![],
        signed_tasks: vec![SignedTaskData {
            sign_task_id: "doc-1".into(),
            sig_type: DocumentType::Xml,
            signature_value: vec![1, 2, 3],
            ades_signed_attributes: None,
            extensions: Default::default(),
        }],
    };
    let encoded = JsonMessageCodec::encode(&response).unwrap();

    let decoded = JsonMessageCodec.decode_sign_response(&encoded, &[]).unwrap();

    assert_eq!(decoded, response);
}

#[test]
fn test_decode_garbage_fails() {
    let result = JsonMessageCodec.decode_sign_request("not//base64");

    assert!(matches!(result, Err(MessageCodecError::Decoding(_))));
}
