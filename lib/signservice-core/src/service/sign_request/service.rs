use shared_types::SignRequestId;
use tracing::Instrument;

use super::SignRequestService;
use super::dto::{NormalizedSignRequest, SignRequestDataDTO};
use super::mapper::{
    document_id, normalize, parse_url, relay_state, sign_message, sign_task,
    with_presign_extensions,
};
use super::validator::validate_sign_request;
use crate::config::policy::PolicyConfiguration;
use crate::model::protocol::{SignMessage, SignMessageEncryption, SignRequestMessage};
use crate::model::requirements::SignMessageParameters;
use crate::model::sign_request::SignRequestInput;
use crate::proto::session_state::SessionStateInput;
use crate::provider::metadata_resolver::MetadataResolverError;
use crate::service::error::ServiceError;
use crate::validator::FieldError;

impl SignRequestService {
    /// Builds the sign request for `input`.
    ///
    /// # Arguments
    ///
    /// * `input` - documents and requirements, unset values default to the policy
    /// * `caller_id` - owner of the server side signature state in stateful mode
    pub async fn create_sign_request(
        &self,
        input: SignRequestInput,
        caller_id: Option<&str>,
    ) -> Result<SignRequestDataDTO, ServiceError> {
        let correlation_id = input
            .correlation_id
            .to_owned()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let span = tracing::info_span!("create_sign_request", correlation_id = %correlation_id);
        self.create_sign_request_inner(input, correlation_id, caller_id)
            .instrument(span)
            .await
    }

    async fn create_sign_request_inner(
        &self,
        input: SignRequestInput,
        correlation_id: String,
        caller_id: Option<&str>,
    ) -> Result<SignRequestDataDTO, ServiceError> {
        let policy_name = input
            .policy
            .to_owned()
            .filter(|policy| !policy.is_empty())
            .unwrap_or_else(|| self.policies.default_policy_name().to_owned());
        let policy = self
            .policies
            .resolve(&policy_name)
            .ok_or(ServiceError::PolicyNotFound(policy_name))?;

        let request = normalize(input, &policy, correlation_id);
        validate_sign_request(&request, &policy, self.strict_processing)?;

        // every document needs a processor before anything is pre-signed
        let processors = request
            .tbs_documents
            .iter()
            .map(|document| {
                let id = document_id(document)?;
                self.document_processor_provider
                    .get_processor(document)
                    .ok_or_else(|| ServiceError::UnsupportedDocument {
                        id,
                        mime_type: document.mime_type.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_id = SignRequestId::new_random();
        let NormalizedSignRequest {
            correlation_id,
            sign_requester_id,
            return_url,
            destination_url,
            signature_algorithm,
            sign_service_id,
            authn_requirements,
            certificate_requirements,
            tbs_documents,
            sign_message: sign_message_parameters,
            extensions,
        } = request;

        let mut sign_tasks = Vec::with_capacity(tbs_documents.len());
        let mut presigned_documents = Vec::with_capacity(tbs_documents.len());
        for (document, processor) in tbs_documents.into_iter().zip(processors) {
            let id = document_id(&document)?;
            let result = processor
                .calculate_to_be_signed(&document, &signature_algorithm, &policy)
                .await
                .map_err(|e| ServiceError::document(&id, e))?;
            tracing::debug!(
                "Calculated to-be-signed data of {} document `{id}`",
                result.sig_type
            );

            sign_tasks.push(sign_task(id, &document, &result));
            presigned_documents.push(with_presign_extensions(document, result));
        }

        let sign_message = match &sign_message_parameters {
            Some(parameters) => Some(
                self.prepare_sign_message(
                    parameters,
                    authn_requirements.authn_service_id.as_deref(),
                    &policy,
                )
                .await?,
            ),
            None => None,
        };

        let destination_url = parse_url(&destination_url)?;
        let message = SignRequestMessage {
            request_id: request_id.to_owned(),
            policy: policy.policy.to_owned(),
            sign_requester_id,
            sign_service_id,
            destination_url: destination_url.to_owned(),
            return_url: parse_url(&return_url)?,
            request_time: self.clock.now_utc(),
            signature_algorithm,
            authn_requirements,
            certificate_requirements,
            sign_message,
            sign_tasks,
            extensions,
        };

        let encoded = self
            .message_codec
            .encode_sign_request(&message, &policy.signing_credential)?;

        let state = self.session_state_manager.create(
            SessionStateInput {
                correlation_id: correlation_id.to_owned(),
                tbs_documents: presigned_documents,
                sign_message: sign_message_parameters,
            },
            &message,
            &encoded,
            policy.stateless,
            caller_id.map(str::to_owned),
        )?;

        tracing::info!(
            "Created sign request `{request_id}` with {} document(s) for policy `{}`",
            message.sign_tasks.len(),
            policy.policy
        );

        Ok(SignRequestDataDTO {
            state,
            sign_request: encoded,
            relay_state: relay_state(&request_id),
            destination_url,
            correlation_id,
        })
    }

    async fn prepare_sign_message(
        &self,
        parameters: &SignMessageParameters,
        authn_service_id: Option<&str>,
        policy: &PolicyConfiguration,
    ) -> Result<SignMessage, ServiceError> {
        if !parameters.encrypt {
            return Ok(sign_message(parameters, None));
        }

        let recipient = parameters
            .display_entity
            .as_deref()
            .or(authn_service_id)
            .ok_or_else(|| {
                ServiceError::InputInvalid(vec![FieldError::new(
                    "signMessageParameters.displayEntity",
                    "recipient of the encrypted sign message is unknown",
                )])
            })?;

        let descriptor = self.metadata_resolver.resolve(recipient).await?;
        if descriptor.encryption_certificates.is_empty() {
            return Err(MetadataResolverError::NoEncryptionCertificate(recipient.to_owned()).into());
        }
        tracing::debug!("Encrypting sign message for `{}`", descriptor.entity_id);

        Ok(sign_message(
            parameters,
            Some(SignMessageEncryption {
                recipient: recipient.to_owned(),
                recipient_certificates: descriptor.encryption_certificates,
                parameters: policy.default_encrypt_parameters.to_owned(),
            }),
        ))
    }
}
