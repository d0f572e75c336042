use tracing::Instrument;

use super::SignResponseService;
use super::dto::SignResponseProcessingParameters;
use super::mapper::signature_result;
use super::validator::{
    check_response_status, match_signed_tasks, validate_response_correlation,
    validate_response_time, validate_signer_assertion,
};
use crate::model::session_state::SignatureState;
use crate::model::sign_result::SignatureResult;
use crate::provider::document_processor::ValidationContext;
use crate::service::error::ServiceError;
use crate::validator::FieldErrors;
use crate::validator::processing::validate_processing_configuration;

impl SignResponseService {
    /// Compiles and validates the signed documents of a sign response.
    ///
    /// # Arguments
    ///
    /// * `sign_response` - codec encoded sign response
    /// * `relay_state` - relay state received together with the response
    /// * `state` - signature state returned when the request was created
    /// * `caller_id` - must match the owner of a server side signature state
    pub async fn process_sign_response(
        &self,
        sign_response: &str,
        relay_state: &str,
        state: SignatureState,
        parameters: SignResponseProcessingParameters,
        caller_id: Option<&str>,
    ) -> Result<SignatureResult, ServiceError> {
        let span = tracing::info_span!(
            "process_sign_response",
            sign_request_id = %state.id,
            correlation_id = tracing::field::Empty,
        );
        self.process_sign_response_inner(sign_response, relay_state, state, parameters, caller_id)
            .instrument(span)
            .await
    }

    async fn process_sign_response_inner(
        &self,
        sign_response: &str,
        relay_state: &str,
        state: SignatureState,
        parameters: SignResponseProcessingParameters,
        caller_id: Option<&str>,
    ) -> Result<SignatureResult, ServiceError> {
        let session = self.session_state_manager.retrieve(&state, caller_id)?;
        tracing::Span::current().record("correlation_id", session.state.correlation_id.as_str());

        if session.state.id != relay_state {
            return Err(ServiceError::BadRequest(format!(
                "relay state `{relay_state}` does not match signature state `{}`",
                session.state.id
            )));
        }

        let policy = self
            .policies
            .resolve(&session.state.policy)
            .ok_or_else(|| ServiceError::PolicyNotFound(session.state.policy.to_owned()))?;

        let response = self
            .message_codec
            .decode_sign_response(sign_response, &policy.sign_service_certificates)?;
        check_response_status(&response.status)?;

        let processing = match parameters.processing_configuration {
            Some(processing) => {
                let mut errors = FieldErrors::default();
                validate_processing_configuration(
                    &processing,
                    "processingConfiguration",
                    &mut errors,
                );
                errors.into_result().map_err(ServiceError::InputInvalid)?;
                processing
            }
            None => self.processing.to_owned(),
        };
        let request = &session.request;

        validate_response_correlation(&response, request)?;
        validate_response_time(
            response.response_time,
            request.request_time,
            self.clock.now_utc(),
            &processing,
        )?;
        let signer_assertion = validate_signer_assertion(response.signer_assertion.as_ref(), request)?;
        let signer_certificate = response
            .signature_certificate_chain
            .first()
            .ok_or_else(|| ServiceError::ResponseValidation("signer certificate missing".to_owned()))?;

        let context = ValidationContext {
            request_time: request.request_time,
            response_time: response.response_time,
            processing,
            validator_type: self.validator_type,
        };

        let pairs = match_signed_tasks(&session.state.tbs_documents, &response.signed_tasks)?;
        let mut signed_documents = Vec::with_capacity(pairs.len());
        for (document, signed_task) in pairs {
            let id = &signed_task.sign_task_id;
            let processor = self
                .document_processor_provider
                .get_processor(document)
                .ok_or_else(|| ServiceError::UnsupportedDocument {
                    id: id.to_owned(),
                    mime_type: document.mime_type.to_owned(),
                })?;

            let compiled = processor
                .build_signed_document(
                    document,
                    signed_task,
                    &response.signature_certificate_chain,
                    request,
                )
                .await
                .map_err(|e| ServiceError::document(id, e))?;
            processor
                .validate_signed_document(&compiled, signer_certificate, signed_task, &context)
                .await
                .map_err(|e| ServiceError::document(id, e))?;

            tracing::debug!("Signed document `{id}` compiled and validated");
            signed_documents.push(compiled);
        }

        tracing::info!(
            "Processed sign response for `{}` with {} signed document(s)",
            session.state.id,
            signed_documents.len()
        );

        let signer_assertion = signer_assertion.to_owned();
        let certificate_chain = response.signature_certificate_chain.to_owned();
        Ok(signature_result(
            session.state,
            signed_documents,
            signer_assertion,
            certificate_chain,
        ))
    }
}
