use std::sync::Arc;

use async_trait::async_trait;

use super::ades::{check_ades_object, check_validation_report};
use super::error::DocumentProcessorError;
use super::{
    DocumentProcessor, TbsCalculationResult, ValidationContext, check_signed_task,
    decode_content, document_id, encode_content,
};
use crate::config::policy::PolicyConfiguration;
use crate::model::certificate::Certificate;
use crate::model::protocol::{DocumentType, SignRequestMessage, SignedTaskData};
use crate::model::sign_request::TbsDocument;
use crate::model::sign_result::CompiledSignedDocument;
use crate::provider::signing_engine::{AssembleSignatureRequest, SigningEngine, ToBeSignedRequest};

pub struct XmlDocumentProcessor {
    signing_engine: Arc<dyn SigningEngine>,
}

impl XmlDocumentProcessor {
    pub fn new(signing_engine: Arc<dyn SigningEngine>) -> Self {
        Self { signing_engine }
    }
}

fn is_xml(mime_type: &str) -> bool {
    mime_type.parse::<mime::Mime>().is_ok_and(|mime| {
        mime.subtype() == mime::XML || mime.suffix().is_some_and(|suffix| suffix == mime::XML)
    })
}

#[async_trait]
impl DocumentProcessor for XmlDocumentProcessor {
    fn document_type(&self) -> DocumentType {
        DocumentType::Xml
    }

    fn supports(&self, document: &TbsDocument) -> bool {
        is_xml(&document.mime_type)
    }

    async fn calculate_to_be_signed(
        &self,
        document: &TbsDocument,
        signature_algorithm: &str,
        _policy: &PolicyConfiguration,
    ) -> Result<TbsCalculationResult, DocumentProcessorError> {
        let content = decode_content(&document.content)?;

        let to_be_signed_bytes = self
            .signing_engine
            .compute_to_be_signed(ToBeSignedRequest {
                document: content,
                document_type: DocumentType::Xml,
                signature_algorithm: signature_algorithm.to_owned(),
                ades_requirement: document.ades_requirement.clone(),
                signing_time: None,
                signature_id: None,
                visible_signature: None,
            })
            .await?;

        Ok(TbsCalculationResult {
            to_be_signed_bytes,
            sig_type: DocumentType::Xml,
            ades_type: document
                .ades_requirement
                .as_ref()
                .map(|requirement| requirement.ades_format),
            extensions: Default::default(),
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
        check_signed_task(&id, DocumentType::Xml, signed_task)?;
        let content = decode_content(&document.content)?;

        let assembled = self
            .signing_engine
            .assemble_signature(AssembleSignatureRequest {
                document: content,
                document_type: DocumentType::Xml,
                signature_algorithm: request.signature_algorithm.to_owned(),
                signature_value: signed_task.signature_value.to_owned(),
                signed_attributes: signed_task.ades_signed_attributes.to_owned(),
                certificate_chain: certificate_chain.to_vec(),
                ades_requirement: document.ades_requirement.clone(),
                signing_time: None,
                signature_id: None,
                visible_signature: None,
            })
            .await?;

        tracing::debug!("Compiled signed XML document `{id}`");

        Ok(CompiledSignedDocument {
            id,
            signed_content: encode_content(&assembled.document)?,
            mime_type: document.mime_type.to_owned(),
            ades_object: assembled.ades_object,
            extensions: document.extensions.clone(),
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
            .validate_signature(&content, DocumentType::Xml, signer_certificate)
            .await?;
        check_validation_report(&report, signer_certificate, context)?;

        if let Some(ades_object) = &document.ades_object {
            check_ades_object(ades_object, signer_certificate, context)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test;
