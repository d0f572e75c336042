use super::{FieldErrors, field};
use crate::model::requirements::{AdesRequirement, AdesType};

pub fn validate_ades_requirement(
    requirement: &AdesRequirement,
    path: &str,
    errors: &mut FieldErrors,
) {
    let has_policy = requirement
        .signature_policy
        .as_deref()
        .is_some_and(|policy| !policy.trim().is_empty());

    if requirement.ades_format == AdesType::Epes && !has_policy {
        errors.add(
            field(path, "signaturePolicy"),
            "signature policy is required for EPES",
        );
    }
}
