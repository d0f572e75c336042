use std::collections::HashMap;

use shared_types::DocumentId;
use time::OffsetDateTime;

use crate::config::core_config::ProcessingConfiguration;
use crate::model::protocol::{
    SignRequestMessage, SignResponseMessage, SignResponseStatus, SignedTaskData, SignerAssertion,
};
use crate::model::sign_request::TbsDocument;
use crate::service::error::ServiceError;

pub(super) fn check_response_status(status: &SignResponseStatus) -> Result<(), ServiceError> {
    match status {
        SignResponseStatus::Success => Ok(()),
        SignResponseStatus::Cancelled => Err(ServiceError::ResponseCancelled),
        SignResponseStatus::Error {
            major,
            minor,
            message,
        } => Err(ServiceError::ResponseStatus {
            major: major.to_owned(),
            minor: minor.to_owned(),
            message: message.to_owned(),
        }),
    }
}

fn invalid(message: impl Into<String>) -> ServiceError {
    ServiceError::ResponseValidation(message.into())
}

pub(super) fn validate_response_correlation(
    response: &SignResponseMessage,
    request: &SignRequestMessage,
) -> Result<(), ServiceError> {
    if response.in_response_to != request.request_id {
        return Err(invalid(format!(
            "response to `{}` received for request `{}`",
            response.in_response_to, request.request_id
        )));
    }
    Ok(())
}

/// Response must be issued after the request and be neither from the future
/// nor older than the maximum allowed age, each with the allowed clock skew.
pub(super) fn validate_response_time(
    response_time: OffsetDateTime,
    request_time: OffsetDateTime,
    now: OffsetDateTime,
    processing: &ProcessingConfiguration,
) -> Result<(), ServiceError> {
    let skew = processing.allowed_clock_skew;
    let out_of_range = || invalid("response time window out of range");

    let earliest = request_time.checked_sub(skew).ok_or_else(out_of_range)?;
    if response_time < earliest {
        return Err(invalid(format!(
            "response time {response_time} is before request time {request_time}"
        )));
    }
    let latest = now.checked_add(skew).ok_or_else(out_of_range)?;
    if response_time > latest {
        return Err(invalid(format!("response time {response_time} is in the future")));
    }
    let maximum_age = processing
        .maximum_allowed_response_age
        .checked_add(skew)
        .ok_or_else(out_of_range)?;
    if now - response_time > maximum_age {
        return Err(invalid(format!(
            "response time {response_time} exceeds the maximum allowed response age"
        )));
    }
    Ok(())
}

/// Signer must have been authenticated by the requested authentication
/// service and carry every requested identity attribute.
pub(super) fn validate_signer_assertion<'a>(
    assertion: Option<&'a SignerAssertion>,
    request: &SignRequestMessage,
) -> Result<&'a SignerAssertion, ServiceError> {
    let assertion = assertion.ok_or_else(|| invalid("signer assertion missing"))?;
    let requirements = &request.authn_requirements;

    if let Some(authn_service_id) = &requirements.authn_service_id
        && &assertion.authn_service_id != authn_service_id
    {
        return Err(invalid(format!(
            "signer authenticated by `{}` instead of `{authn_service_id}`",
            assertion.authn_service_id
        )));
    }

    if !requirements.authn_context_class_refs.is_empty()
        && !requirements
            .authn_context_class_refs
            .contains(&assertion.authn_context_class_ref)
    {
        return Err(invalid(format!(
            "authentication context `{}` was not requested",
            assertion.authn_context_class_ref
        )));
    }

    for requested in &requirements.requested_signer_attributes {
        let matching = assertion
            .attributes
            .iter()
            .any(|attribute| attribute.name == requested.name && attribute.value == requested.value);
        if !matching {
            return Err(invalid(format!(
                "requested signer attribute `{}` missing or different",
                requested.name
            )));
        }
    }

    Ok(assertion)
}

/// Pairs every document with its signed task. Missing, duplicate and unknown
/// tasks are rejected.
pub(super) fn match_signed_tasks<'a>(
    documents: &'a [TbsDocument],
    signed_tasks: &'a [SignedTaskData],
) -> Result<Vec<(&'a TbsDocument, &'a SignedTaskData)>, ServiceError> {
    let mut tasks: HashMap<&DocumentId, &SignedTaskData> = HashMap::new();
    for task in signed_tasks {
        if tasks.insert(&task.sign_task_id, task).is_some() {
            return Err(invalid(format!(
                "duplicate signed task `{}`",
                task.sign_task_id
            )));
        }
    }

    let mut pairs = Vec::with_capacity(documents.len());
    for document in documents {
        let Some(id) = &document.id else {
            return Err(ServiceError::MappingError(
                "document id missing in signature state".to_owned(),
            ));
        };
        let task = tasks
            .remove(id)
            .ok_or_else(|| invalid(format!("no signed task for document `{id}`")))?;
        pairs.push((document, task));
    }

    if let Some(unknown) = tasks.keys().next() {
        return Err(invalid(format!("signed task `{unknown}` matches no document")));
    }

    Ok(pairs)
}
