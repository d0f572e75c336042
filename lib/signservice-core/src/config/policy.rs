use secrecy::SecretString;
use serde::Deserialize;
use shared_types::PolicyName;
use url::Url;

use crate::model::certificate::Certificate;
use crate::model::requirements::{
    CertificateRequirements, EncryptionParameters, PdfSignatureImageTemplate, PdfSignaturePage,
};
use crate::validator::certificate::validate_certificate_requirements;
use crate::validator::pdf::{validate_image_template, validate_sign_page};
use crate::validator::{FieldError, FieldErrors, field, indexed};

/// Policy configuration as read from the configuration sources. Every field is
/// optional so that a policy can inherit unset values from its parent policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfigurationParams {
    pub parent_policy: Option<PolicyName>,
    pub stateless: Option<bool>,
    pub default_sign_requester_id: Option<String>,
    pub default_return_url: Option<String>,
    pub default_signature_algorithm: Option<String>,
    pub sign_service_id: Option<String>,
    pub default_destination_url: Option<String>,
    pub signing_credential: Option<SigningCredentialParams>,
    /// Base64 encoded certificates of the sign service
    pub sign_service_certificates: Option<Vec<String>>,
    /// Base64 encoded trust anchors for signer certificate chains
    pub trust_anchors: Option<Vec<String>>,
    pub default_certificate_requirements: Option<CertificateRequirements>,
    pub default_encrypt_parameters: Option<EncryptionParameters>,
    pub pdf_signature_image_templates: Option<Vec<PdfSignatureImageTemplate>>,
    pub pdf_signature_pages: Option<Vec<PdfSignaturePage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningCredentialParams {
    pub private_key: Option<SecretString>,
    /// Base64 encoded signing certificate
    pub certificate: Option<String>,
}

impl PolicyConfigurationParams {
    /// Fills every unset field from `parent`, which must already be fully merged.
    /// The merged result no longer references a parent.
    pub(super) fn merge_with_parent(self, parent: &PolicyConfigurationParams) -> Self {
        Self {
            parent_policy: None,
            stateless: self.stateless.or(parent.stateless),
            default_sign_requester_id: self
                .default_sign_requester_id
                .or_else(|| parent.default_sign_requester_id.clone()),
            default_return_url: self
                .default_return_url
                .or_else(|| parent.default_return_url.clone()),
            default_signature_algorithm: self
                .default_signature_algorithm
                .or_else(|| parent.default_signature_algorithm.clone()),
            sign_service_id: self
                .sign_service_id
                .or_else(|| parent.sign_service_id.clone()),
            default_destination_url: self
                .default_destination_url
                .or_else(|| parent.default_destination_url.clone()),
            signing_credential: self
                .signing_credential
                .or_else(|| parent.signing_credential.clone()),
            sign_service_certificates: self
                .sign_service_certificates
                .or_else(|| parent.sign_service_certificates.clone()),
            trust_anchors: self.trust_anchors.or_else(|| parent.trust_anchors.clone()),
            default_certificate_requirements: self
                .default_certificate_requirements
                .or_else(|| parent.default_certificate_requirements.clone()),
            default_encrypt_parameters: self
                .default_encrypt_parameters
                .or_else(|| parent.default_encrypt_parameters.clone()),
            pdf_signature_image_templates: self
                .pdf_signature_image_templates
                .or_else(|| parent.pdf_signature_image_templates.clone()),
            pdf_signature_pages: self
                .pdf_signature_pages
                .or_else(|| parent.pdf_signature_pages.clone()),
        }
    }
}

/// Fully merged and validated policy configuration.
#[derive(Debug, Clone)]
pub struct PolicyConfiguration {
    pub policy: PolicyName,
    pub stateless: bool,
    pub default_sign_requester_id: String,
    pub default_return_url: Url,
    pub default_signature_algorithm: String,
    pub sign_service_id: String,
    pub default_destination_url: Url,
    pub signing_credential: SigningCredential,
    pub sign_service_certificates: Vec<Certificate>,
    pub trust_anchors: Vec<Certificate>,
    pub default_certificate_requirements: CertificateRequirements,
    pub default_encrypt_parameters: EncryptionParameters,
    pub pdf_signature_image_templates: Vec<PdfSignatureImageTemplate>,
    pub pdf_signature_pages: Vec<PdfSignaturePage>,
}

#[derive(Debug, Clone)]
pub struct SigningCredential {
    pub private_key: SecretString,
    pub certificate: Certificate,
}

impl PolicyConfiguration {
    pub fn image_template(&self, reference: &str) -> Option<&PdfSignatureImageTemplate> {
        self.pdf_signature_image_templates
            .iter()
            .find(|template| template.reference == reference)
    }
}

/// Validates a merged policy and converts it into its resolved form. All
/// problems are reported together, prefixed with `policies.<name>`.
pub(super) fn resolve_policy(
    name: &PolicyName,
    params: PolicyConfigurationParams,
) -> Result<PolicyConfiguration, Vec<FieldError>> {
    let path = format!("policies.{name}");
    let mut errors = FieldErrors::default();

    if name.is_empty() {
        errors.add(&path, "policy name must not be empty");
    }
    if params.parent_policy.is_some() {
        errors.add(field(&path, "parentPolicy"), "parent policy was not merged");
    }

    let default_sign_requester_id = required_string(
        params.default_sign_requester_id,
        &field(&path, "defaultSignRequesterId"),
        &mut errors,
    );
    let default_signature_algorithm = required_string(
        params.default_signature_algorithm,
        &field(&path, "defaultSignatureAlgorithm"),
        &mut errors,
    );
    let sign_service_id = required_string(
        params.sign_service_id,
        &field(&path, "signServiceId"),
        &mut errors,
    );
    let default_return_url = required_url(
        params.default_return_url,
        &field(&path, "defaultReturnUrl"),
        &mut errors,
    );
    let default_destination_url = required_url(
        params.default_destination_url,
        &field(&path, "defaultDestinationUrl"),
        &mut errors,
    );

    let signing_credential = signing_credential(
        params.signing_credential,
        &field(&path, "signingCredential"),
        &mut errors,
    );

    let sign_service_certificates = certificates(
        params.sign_service_certificates.unwrap_or_default(),
        &field(&path, "signServiceCertificates"),
        &mut errors,
    );
    if sign_service_certificates.is_empty() {
        errors.add(
            field(&path, "signServiceCertificates"),
            "at least one sign service certificate is required",
        );
    }
    let trust_anchors = certificates(
        params.trust_anchors.unwrap_or_default(),
        &field(&path, "trustAnchors"),
        &mut errors,
    );

    let certificate_requirements_path = field(&path, "defaultCertificateRequirements");
    let default_certificate_requirements = match params.default_certificate_requirements {
        Some(requirements) => {
            validate_certificate_requirements(
                &requirements,
                &certificate_requirements_path,
                &mut errors,
            );
            Some(requirements)
        }
        None => {
            errors.add(
                certificate_requirements_path,
                "default certificate requirements are required",
            );
            None
        }
    };

    let default_encrypt_parameters = params.default_encrypt_parameters.unwrap_or_default();
    let encrypt_path = field(&path, "defaultEncryptParameters");
    if default_encrypt_parameters
        .data_encryption_algorithm
        .trim()
        .is_empty()
    {
        errors.add(
            field(&encrypt_path, "dataEncryptionAlgorithm"),
            "must not be empty",
        );
    }
    if default_encrypt_parameters
        .key_transport_encryption_algorithm
        .trim()
        .is_empty()
    {
        errors.add(
            field(&encrypt_path, "keyTransportEncryptionAlgorithm"),
            "must not be empty",
        );
    }

    let pdf_signature_image_templates = params.pdf_signature_image_templates.unwrap_or_default();
    for (index, template) in pdf_signature_image_templates.iter().enumerate() {
        validate_image_template(
            template,
            &indexed(&path, "pdfSignatureImageTemplates", index),
            &mut errors,
        );
    }
    let pdf_signature_pages = params.pdf_signature_pages.unwrap_or_default();
    for (index, page) in pdf_signature_pages.iter().enumerate() {
        validate_sign_page(
            page,
            &pdf_signature_image_templates,
            &indexed(&path, "pdfSignaturePages", index),
            &mut errors,
        );
    }

    errors.into_result()?;

    match (
        default_sign_requester_id,
        default_signature_algorithm,
        sign_service_id,
        default_return_url,
        default_destination_url,
        signing_credential,
        default_certificate_requirements,
    ) {
        (
            Some(default_sign_requester_id),
            Some(default_signature_algorithm),
            Some(sign_service_id),
            Some(default_return_url),
            Some(default_destination_url),
            Some(signing_credential),
            Some(default_certificate_requirements),
        ) => Ok(PolicyConfiguration {
            policy: name.to_owned(),
            stateless: params.stateless.unwrap_or(false),
            default_sign_requester_id,
            default_return_url,
            default_signature_algorithm,
            sign_service_id,
            default_destination_url,
            signing_credential,
            sign_service_certificates,
            trust_anchors,
            default_certificate_requirements,
            default_encrypt_parameters,
            pdf_signature_image_templates,
            pdf_signature_pages,
        }),
        _ => Err(vec![FieldError::new(path, "incomplete policy configuration")]),
    }
}

fn required_string(value: Option<String>, path: &str, errors: &mut FieldErrors) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            errors.add(path, "must be set");
            None
        }
    }
}

fn required_url(value: Option<String>, path: &str, errors: &mut FieldErrors) -> Option<Url> {
    let value = required_string(value, path, errors)?;
    match Url::parse(&value) {
        Ok(url) => Some(url),
        Err(err) => {
            errors.add(path, format!("invalid URL `{value}`: {err}"));
            None
        }
    }
}

fn signing_credential(
    value: Option<SigningCredentialParams>,
    path: &str,
    errors: &mut FieldErrors,
) -> Option<SigningCredential> {
    let Some(value) = value else {
        errors.add(path, "signing credential is required");
        return None;
    };

    let private_key = value.private_key;
    if private_key.is_none() {
        errors.add(field(path, "privateKey"), "must be set");
    }
    let certificate_path = field(path, "certificate");
    let certificate = value
        .certificate
        .and_then(|encoded| match Certificate::from_base64(&encoded) {
            Ok(certificate) => Some(certificate),
            Err(err) => {
                errors.add(&certificate_path, format!("invalid certificate: {err}"));
                None
            }
        });
    if certificate.is_none() && !errors.contains(&certificate_path) {
        errors.add(&certificate_path, "must be set");
    }

    Some(SigningCredential {
        private_key: private_key?,
        certificate: certificate?,
    })
}

fn certificates(values: Vec<String>, path: &str, errors: &mut FieldErrors) -> Vec<Certificate> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, encoded)| match Certificate::from_base64(&encoded) {
            Ok(certificate) => Some(certificate),
            Err(err) => {
                errors.add(format!("{path}[{index}]"), format!("invalid certificate: {err}"));
                None
            }
        })
        .collect()
}
