use std::collections::HashSet;

use url::Url;

use super::dto::NormalizedSignRequest;
use crate::config::policy::PolicyConfiguration;
use crate::service::error::ServiceError;
use crate::validator::ades::validate_ades_requirement;
use crate::validator::authn::validate_authn_requirements;
use crate::validator::certificate::validate_certificate_requirements;
use crate::validator::pdf::validate_visible_requirement;
use crate::validator::{FieldErrors, field, indexed, is_blank};

pub(super) fn validate_sign_request(
    request: &NormalizedSignRequest,
    policy: &PolicyConfiguration,
    strict_processing: bool,
) -> Result<(), ServiceError> {
    let mut errors = FieldErrors::default();

    for (name, value) in [
        ("signRequesterId", &request.sign_requester_id),
        ("signatureAlgorithm", &request.signature_algorithm),
        ("signServiceId", &request.sign_service_id),
    ] {
        if is_blank(value) {
            errors.add(name, "must not be empty");
        }
    }
    for (name, value) in [
        ("returnUrl", &request.return_url),
        ("destinationUrl", &request.destination_url),
    ] {
        if let Err(e) = Url::parse(value) {
            errors.add(name, format!("invalid url: {e}"));
        }
    }

    validate_authn_requirements(
        &request.authn_requirements,
        strict_processing,
        "authnRequirements",
        &mut errors,
    );
    validate_certificate_requirements(
        &request.certificate_requirements,
        "certificateRequirements",
        &mut errors,
    );

    if request.tbs_documents.is_empty() {
        errors.add("tbsDocuments", "at least one document is required");
    }
    let mut ids = HashSet::new();
    for (index, document) in request.tbs_documents.iter().enumerate() {
        let path = indexed("", "tbsDocuments", index);
        if let Some(id) = &document.id
            && !ids.insert(id.as_ref())
        {
            errors.add(field(&path, "id"), format!("duplicate document id `{id}`"));
        }
        if is_blank(&document.content) {
            errors.add(field(&path, "content"), "document content must be set");
        }
        if is_blank(&document.mime_type) {
            errors.add(field(&path, "mimeType"), "mime type must be set");
        }
        if let Some(requirement) = &document.ades_requirement {
            validate_ades_requirement(requirement, &field(&path, "adesRequirement"), &mut errors);
        }
        if let Some(requirement) = &document.visible_pdf_signature_requirement {
            validate_visible_requirement(
                requirement,
                &policy.pdf_signature_image_templates,
                &field(&path, "visiblePdfSignatureRequirement"),
                &mut errors,
            );
        }
    }

    if let Some(sign_message) = &request.sign_message
        && is_blank(&sign_message.sign_message)
    {
        errors.add(
            "signMessageParameters.signMessage",
            "sign message must not be empty",
        );
    }

    errors.into_result().map_err(ServiceError::InputInvalid)
}
