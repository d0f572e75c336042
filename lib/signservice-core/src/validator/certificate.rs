use super::{FieldErrors, field, indexed, is_blank};
use crate::model::requirements::{CertificateAttributeMapping, CertificateRequirements};

pub fn validate_certificate_requirements(
    requirements: &CertificateRequirements,
    path: &str,
    errors: &mut FieldErrors,
) {
    if requirements.certificate_type.is_none() {
        errors.add(field(path, "certificateType"), "certificate type must be set");
    }

    if requirements.attribute_mappings.is_empty() {
        errors.add(
            field(path, "attributeMappings"),
            "at least one attribute mapping is required",
        );
    }

    for (index, mapping) in requirements.attribute_mappings.iter().enumerate() {
        validate_attribute_mapping(mapping, &indexed(path, "attributeMappings", index), errors);
    }
}

/// A mapping must name its destination. Without sources the destination can
/// only be filled from its default value, which is mandatory for a required
/// destination.
pub fn validate_attribute_mapping(
    mapping: &CertificateAttributeMapping,
    path: &str,
    errors: &mut FieldErrors,
) {
    for (index, source) in mapping.sources.iter().enumerate() {
        if is_blank(&source.name) {
            errors.add(
                field(&indexed(path, "sources", index), "name"),
                "attribute name must be set",
            );
        }
    }

    let destination_path = field(path, "destination");
    let Some(destination) = &mapping.destination else {
        errors.add(destination_path, "destination must be set");
        return;
    };

    if destination.r#type.is_none() {
        errors.add(field(&destination_path, "type"), "attribute type must be set");
    }
    if is_blank(&destination.identifier) {
        errors.add(
            field(&destination_path, "identifier"),
            "attribute identifier must be set",
        );
    }

    let has_default = destination
        .default_value
        .as_deref()
        .is_some_and(|value| !is_blank(value));
    if mapping.sources.is_empty() && destination.required && !has_default {
        errors.add(
            field(path, "sources"),
            format!(
                "no sources given for required attribute `{}` and no default value set",
                destination.identifier
            ),
        );
    }
}
