use super::{FieldErrors, field, indexed, is_blank};
use crate::model::requirements::AuthnRequirements;

/// With `strict` set at least one requested signer attribute is required.
pub fn validate_authn_requirements(
    requirements: &AuthnRequirements,
    strict: bool,
    path: &str,
    errors: &mut FieldErrors,
) {
    if requirements
        .authn_service_id
        .as_deref()
        .is_none_or(is_blank)
    {
        errors.add(
            field(path, "authnServiceId"),
            "authentication service id must be set",
        );
    }

    for (index, context) in requirements.authn_context_class_refs.iter().enumerate() {
        if is_blank(context) {
            errors.add(
                indexed(path, "authnContextClassRefs", index),
                "authentication context must not be empty",
            );
        }
    }

    if strict && requirements.requested_signer_attributes.is_empty() {
        errors.add(
            field(path, "requestedSignerAttributes"),
            "at least one requested signer attribute is required",
        );
    }

    for (index, attribute) in requirements.requested_signer_attributes.iter().enumerate() {
        let attribute_path = indexed(path, "requestedSignerAttributes", index);
        if is_blank(&attribute.name) {
            errors.add(field(&attribute_path, "name"), "attribute name must be set");
        }
        if is_blank(&attribute.value) {
            errors.add(field(&attribute_path, "value"), "attribute value must be set");
        }
    }
}
