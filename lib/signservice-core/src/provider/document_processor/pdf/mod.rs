//! PAdES processing. The signing time and signature id fixed during pre-sign are
//! part of the signed attributes, so they travel with the document extensions
//! until the response is processed.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::ades::{check_ades_object, check_validation_report};
use super::error::DocumentProcessorError;
use super::{
    DocumentProcessor, TbsCalculationResult, ValidationContext, check_signed_task,
    decode_content, document_id, encode_content,
};
use crate::config::policy::PolicyConfiguration;
use crate::model::certificate::Certificate;
use crate::model::protocol::{DocumentType, SignRequestMessage, SignedTaskData};
use crate::model::requirements::{AdesType, VisiblePdfSignatureRequirement};
use crate::model::sign_request::{Extensions, TbsDocument};
use crate::model::sign_result::CompiledSignedDocument;
use crate::proto::clock::Clock;
use crate::provider::signing_engine::{
    AssembleSignatureRequest, SigningEngine, ToBeSignedRequest, VisibleSignatureImage,
};

pub const SIGNING_TIME_AND_ID_EXTENSION: &str = "pdfSigningTimeAndId";
pub const VISIBLE_SIGNATURE_IMAGE_EXTENSION: &str = "pdfVisibleSignatureImage";

const PDF_MIME_TYPE: &str = "application/pdf";

pub struct PdfDocumentProcessor {
    signing_engine: Arc<dyn SigningEngine>,
    clock: Arc<dyn Clock>,
}

impl PdfDocumentProcessor {
    pub fn new(signing_engine: Arc<dyn SigningEngine>, clock: Arc<dyn Clock>) -> Self {
        Self {
            signing_engine,
            clock,
        }
    }
}

/// Signing time (unix milliseconds) and signature id, serialized as `<millis>:<id>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SigningTimeAndId {
    pub signing_time: OffsetDateTime,
    pub signature_id: String,
}

impl fmt::Display for SigningTimeAndId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.signing_time.unix_timestamp_nanos() / 1_000_000;
        write!(f, "{millis}:{}", self.signature_id)
    }
}

impl FromStr for SigningTimeAndId {
    type Err = DocumentProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| DocumentProcessorError::InvalidCorrelationData {
            key: SIGNING_TIME_AND_ID_EXTENSION.to_owned(),
            reason,
        };

        let (millis, signature_id) = s
            .split_once(':')
            .ok_or_else(|| invalid("missing separator".to_owned()))?;
        if signature_id.is_empty() {
            return Err(invalid("empty signature id".to_owned()));
        }
        let millis: i128 = millis.parse().map_err(|e| invalid(format!("{e}")))?;
        let nanos = millis
            .checked_mul(1_000_000)
            .ok_or_else(|| invalid("signing time out of range".to_owned()))?;
        let signing_time =
            OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            signing_time,
            signature_id: signature_id.to_owned(),
        })
    }
}

fn truncate_to_millis(time: OffsetDateTime) -> OffsetDateTime {
    let nanos = time.unix_timestamp_nanos();
    OffsetDateTime::from_unix_timestamp_nanos(nanos - nanos % 1_000_000).unwrap_or(time)
}

fn visible_signature_image(
    requirement: &VisiblePdfSignatureRequirement,
    policy: &PolicyConfiguration,
) -> Result<VisibleSignatureImage, DocumentProcessorError> {
    let template = policy
        .image_template(&requirement.template_reference)
        .ok_or_else(|| {
            DocumentProcessorError::MappingError(format!(
                "unknown signature image template `{}`",
                requirement.template_reference
            ))
        })?;

    Ok(VisibleSignatureImage {
        template_reference: template.reference.to_owned(),
        image: template.image.to_owned(),
        page: requirement.page,
        x_position: requirement.x_position,
        y_position: requirement.y_position,
        width: template.width,
        height: template.height,
        scale: requirement.scale,
        signer_name: requirement
            .signer_name
            .clone()
            .filter(|_| template.include_signer_name),
        include_signing_time: template.include_signing_time,
        field_values: requirement.field_values.clone(),
    })
}

fn signing_time_and_id(document: &TbsDocument) -> Result<SigningTimeAndId, DocumentProcessorError> {
    document
        .extension(SIGNING_TIME_AND_ID_EXTENSION)
        .ok_or_else(|| {
            DocumentProcessorError::MissingCorrelationData(SIGNING_TIME_AND_ID_EXTENSION.to_owned())
        })?
        .parse()
}

fn stored_visible_signature(
    document: &TbsDocument,
) -> Result<Option<VisibleSignatureImage>, DocumentProcessorError> {
    let Some(serialized) = document.extension(VISIBLE_SIGNATURE_IMAGE_EXTENSION) else {
        return Ok(None);
    };
    serde_json::from_str(serialized)
        .map(Some)
        .map_err(|e| DocumentProcessorError::InvalidCorrelationData {
            key: VISIBLE_SIGNATURE_IMAGE_EXTENSION.to_owned(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl DocumentProcessor for PdfDocumentProcessor {
    fn document_type(&self) -> DocumentType {
        DocumentType::Pdf
    }

    fn supports(&self, document: &TbsDocument) -> bool {
        document
            .mime_type
            .parse::<mime::Mime>()
            .is_ok_and(|mime| mime.essence_str() == PDF_MIME_TYPE)
    }

    async fn calculate_to_be_signed(
        &self,
        document: &TbsDocument,
        signature_algorithm: &str,
        policy: &PolicyConfiguration,
    ) -> Result<TbsCalculationResult, DocumentProcessorError> {
        let content = decode_content(&document.content)?;

        let signing_time_and_id = SigningTimeAndId {
            signing_time: truncate_to_millis(self.clock.now_utc()),
            signature_id: uuid::Uuid::new_v4().to_string(),
        };
        let visible_signature = document
            .visible_pdf_signature_requirement
            .as_ref()
            .map(|requirement| visible_signature_image(requirement, policy))
            .transpose()?;

        let to_be_signed_bytes = self
            .signing_engine
            .compute_to_be_signed(ToBeSignedRequest {
                document: content,
                document_type: DocumentType::Pdf,
                signature_algorithm: signature_algorithm.to_owned(),
                ades_requirement: document.ades_requirement.clone(),
                signing_time: Some(signing_time_and_id.signing_time),
                signature_id: Some(signing_time_and_id.signature_id.to_owned()),
                visible_signature: visible_signature.clone(),
            })
            .await?;

        let mut extensions = Extensions::new();
        extensions.insert(
            SIGNING_TIME_AND_ID_EXTENSION.to_owned(),
            signing_time_and_id.to_string(),
        );
        if let Some(visible_signature) = &visible_signature {
            extensions.insert(
                VISIBLE_SIGNATURE_IMAGE_EXTENSION.to_owned(),
                serde_json::to_string(visible_signature)?,
            );
        }

        Ok(TbsCalculationResult {
            to_be_signed_bytes,
            sig_type: DocumentType::Pdf,
            ades_type: Some(
                document
                    .ades_requirement
                    .as_ref()
                    .map_or(AdesType::Bes, |requirement| requirement.ades_format),
            ),
            extensions,
        })
    }

    async fn build_signed_document(
        &self,
        document: &TbsDocument,
        signed_task: &SignedTaskData,
        certificate_chain: &[Certificate],
        request: &SignRequestMessage,
    ) -> Result<CompiledSignedDocument, DocumentProcessorError> {
        let id = document_id(document)?;
        check_signed_task(&id, DocumentType::Pdf, signed_task)?;
        let Some(signed_attributes) = &signed_task.ades_signed_attributes else {
            return Err(DocumentProcessorError::SignedTaskMismatch(
                "signed task carries no signed attributes".to_owned(),
            ));
        };

        let signing_time_and_id = signing_time_and_id(document)?;
        let visible_signature = stored_visible_signature(document)?;
        let content = decode_content(&document.content)?;

        let assembled = self
            .signing_engine
            .assemble_signature(AssembleSignatureRequest {
                document: content,
                document_type: DocumentType::Pdf,
                signature_algorithm: request.signature_algorithm.to_owned(),
                signature_value: signed_task.signature_value.to_owned(),
                signed_attributes: Some(signed_attributes.to_owned()),
                certificate_chain: certificate_chain.to_vec(),
                ades_requirement: document.ades_requirement.clone(),
                signing_time: Some(signing_time_and_id.signing_time),
                signature_id: Some(signing_time_and_id.signature_id),
                visible_signature,
            })
            .await?;

        tracing::debug!("Compiled signed PDF document `{id}`");

        let extensions = document
            .extensions
            .iter()
            .filter(|(key, _)| {
                key.as_str() != SIGNING_TIME_AND_ID_EXTENSION
                    && key.as_str() != VISIBLE_SIGNATURE_IMAGE_EXTENSION
            })
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();

        Ok(CompiledSignedDocument {
            id,
            signed_content: encode_content(&assembled.document)?,
            mime_type: document.mime_type.to_owned(),
            ades_object: assembled.ades_object,
            extensions,
        })
    }

    async fn validate_signed_document(
        &self,
        document: &CompiledSignedDocument,
        signer_certificate: &Certificate,
        _signed_task: &SignedTaskData,
        context: &ValidationContext,
    ) -> Result<(), DocumentProcessorError> {
        let content = decode_content(&document.signed_content)?;

        let report = self
            .signing_engine
            .validate_signature(&content, DocumentType::Pdf, signer_certificate)
            .await?;
        check_validation_report(&report, signer_certificate, context)?;

        if let Some(ades_object) = &document.ades_object {
            check_ades_object(ades_object, signer_certificate, context)?;
        }

        Ok(())
    }
}
