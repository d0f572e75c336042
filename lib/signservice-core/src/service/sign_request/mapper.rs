use shared_types::{DocumentId, SignRequestId};
use url::Url;

use super::dto::NormalizedSignRequest;
use crate::config::policy::PolicyConfiguration;
use crate::model::protocol::{SignMessage, SignMessageEncryption, SignTaskData};
use crate::model::requirements::SignMessageParameters;
use crate::model::sign_request::{SignRequestInput, TbsDocument};
use crate::provider::document_processor::TbsCalculationResult;
use crate::service::error::ServiceError;

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

pub(super) fn normalize(
    input: SignRequestInput,
    policy: &PolicyConfiguration,
    correlation_id: String,
) -> NormalizedSignRequest {
    let tbs_documents = input
        .tbs_documents
        .into_iter()
        .map(|document| TbsDocument {
            id: document
                .id
                .filter(|id| !id.as_ref().trim().is_empty())
                .or_else(|| Some(DocumentId::new_random())),
            ..document
        })
        .collect();

    NormalizedSignRequest {
        correlation_id,
        sign_requester_id: non_blank(input.sign_requester_id)
            .unwrap_or_else(|| policy.default_sign_requester_id.to_owned()),
        return_url: non_blank(input.return_url)
            .unwrap_or_else(|| policy.default_return_url.to_string()),
        destination_url: non_blank(input.destination_url)
            .unwrap_or_else(|| policy.default_destination_url.to_string()),
        signature_algorithm: non_blank(input.signature_algorithm)
            .unwrap_or_else(|| policy.default_signature_algorithm.to_owned()),
        sign_service_id: non_blank(input.sign_service_id)
            .unwrap_or_else(|| policy.sign_service_id.to_owned()),
        authn_requirements: input.authn_requirements,
        certificate_requirements: input
            .certificate_requirements
            .unwrap_or_else(|| policy.default_certificate_requirements.to_owned()),
        tbs_documents,
        sign_message: input.sign_message_parameters,
        extensions: input.extensions,
    }
}

pub(super) fn parse_url(url: &str) -> Result<Url, ServiceError> {
    Url::parse(url).map_err(|e| ServiceError::MappingError(format!("invalid url `{url}`: {e}")))
}

pub(super) fn document_id(document: &TbsDocument) -> Result<DocumentId, ServiceError> {
    document
        .id
        .to_owned()
        .ok_or_else(|| ServiceError::MappingError("document id not assigned".to_owned()))
}

pub(super) fn sign_task(
    id: DocumentId,
    document: &TbsDocument,
    result: &TbsCalculationResult,
) -> SignTaskData {
    SignTaskData {
        sign_task_id: id,
        sig_type: result.sig_type,
        ades_type: result.ades_type,
        processing_rules: document.processing_rules.to_owned(),
        to_be_signed_bytes: result.to_be_signed_bytes.to_owned(),
    }
}

/// Adds the processor's pre-sign data to the document kept in the session state
pub(super) fn with_presign_extensions(
    mut document: TbsDocument,
    result: TbsCalculationResult,
) -> TbsDocument {
    document.extensions.extend(result.extensions);
    document
}

pub(super) fn sign_message(
    parameters: &SignMessageParameters,
    encryption: Option<SignMessageEncryption>,
) -> SignMessage {
    SignMessage {
        message: parameters.sign_message.to_owned(),
        mime_type: parameters.mime_type,
        must_show: parameters.must_show,
        display_entity: parameters.display_entity.to_owned(),
        encryption,
    }
}

pub(super) fn relay_state(request_id: &SignRequestId) -> String {
    request_id.to_string()
}
