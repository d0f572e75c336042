use super::ValidationContext;
use super::error::DocumentProcessorError;
use crate::config::core_config::SignatureValidatorType;
use crate::model::certificate::Certificate;
use crate::model::sign_result::AdesObject;
use crate::provider::signing_engine::SignatureValidationReport;

const SHA256_DIGEST_ALGORITHMS: &[&str] = &[
    "http://www.w3.org/2001/04/xmlenc#sha256",
    "2.16.840.1.101.3.4.2.1",
];

/// Checks the validation report of a freshly signed document.
///
/// The signature made by `signer_certificate` must be present and valid. Other
/// invalid signatures already present in the document only fail strict processing.
pub(crate) fn check_validation_report(
    report: &SignatureValidationReport,
    signer_certificate: &Certificate,
    context: &ValidationContext,
) -> Result<(), DocumentProcessorError> {
    let (ours, others): (Vec<_>, Vec<_>) = report
        .signatures
        .iter()
        .partition(|entry| entry.signer_certificate.as_ref() == Some(signer_certificate));

    if ours.is_empty() {
        return Err(DocumentProcessorError::SignatureValidation(
            "no signature by the expected signer certificate found".to_owned(),
        ));
    }
    if let Some(invalid) = ours.iter().find(|entry| !entry.valid) {
        return Err(DocumentProcessorError::SignatureValidation(
            invalid
                .message
                .clone()
                .unwrap_or_else(|| "signature is invalid".to_owned()),
        ));
    }

    let invalid_others = others.iter().filter(|entry| !entry.valid).count();
    if invalid_others > 0 {
        if context.processing.strict_processing {
            return Err(DocumentProcessorError::SignatureValidation(format!(
                "document contains {invalid_others} other invalid signature(s)"
            )));
        }
        tracing::warn!(
            "Signed document contains {invalid_others} other invalid signature(s), ignoring"
        );
    }

    Ok(())
}

/// Checks the AdES properties of a produced signature.
///
/// The signing time must lie between the request time (minus the allowed clock
/// skew) and the response time.
pub(crate) fn check_ades_object(
    ades_object: &AdesObject,
    signer_certificate: &Certificate,
    context: &ValidationContext,
) -> Result<(), DocumentProcessorError> {
    match ades_object.signing_time {
        Some(signing_time) => {
            if signing_time > context.response_time {
                return Err(DocumentProcessorError::SigningTimeAfterResponse {
                    signing_time,
                    response_time: context.response_time,
                });
            }
            let allowed_clock_skew = context.processing.allowed_clock_skew;
            let earliest = context
                .request_time
                .checked_sub(allowed_clock_skew)
                .ok_or_else(|| {
                    DocumentProcessorError::SignatureValidation(format!(
                        "allowed clock skew {allowed_clock_skew} out of range"
                    ))
                })?;
            if signing_time < earliest {
                return Err(DocumentProcessorError::SigningTimeBeforeRequest {
                    signing_time,
                    request_time: context.request_time,
                    allowed_clock_skew,
                });
            }
        }
        None if context.processing.strict_processing => {
            return Err(DocumentProcessorError::MissingSigningTime);
        }
        None => tracing::warn!("AdES object has no signing time, continuing"),
    }

    if context.validator_type == SignatureValidatorType::Extended {
        check_signing_certificate_digest(ades_object, signer_certificate)?;
    }

    Ok(())
}

fn check_signing_certificate_digest(
    ades_object: &AdesObject,
    signer_certificate: &Certificate,
) -> Result<(), DocumentProcessorError> {
    let Some(digest) = &ades_object.signing_certificate_digest else {
        return Err(DocumentProcessorError::SigningCertificateMismatch(
            "no signing certificate digest present".to_owned(),
        ));
    };

    if !SHA256_DIGEST_ALGORITHMS.contains(&digest.digest_algorithm.as_str()) {
        return Err(DocumentProcessorError::SigningCertificateMismatch(format!(
            "unsupported digest algorithm `{}`",
            digest.digest_algorithm
        )));
    }

    if digest.digest_value != signer_certificate.sha256_digest() {
        return Err(DocumentProcessorError::SigningCertificateMismatch(
            "digest value differs".to_owned(),
        ));
    }

    Ok(())
}
