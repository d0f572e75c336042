use std::sync::Arc;

use crate::config::core_config::{ProcessingConfiguration, SignatureValidatorType};
use crate::config::policy_store::PolicyConfigurationStore;
use crate::proto::clock::Clock;
use crate::proto::session_state::SessionStateManager;
use crate::provider::document_processor::provider::DocumentProcessorProvider;
use crate::provider::message_codec::MessageCodec;

pub mod dto;
mod mapper;
pub mod service;
mod validator;

#[derive(Clone)]
pub struct SignResponseService {
    policies: Arc<PolicyConfigurationStore>,
    document_processor_provider: Arc<dyn DocumentProcessorProvider>,
    session_state_manager: Arc<dyn SessionStateManager>,
    message_codec: Arc<dyn MessageCodec>,
    clock: Arc<dyn Clock>,
    processing: ProcessingConfiguration,
    validator_type: SignatureValidatorType,
}

impl SignResponseService {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        policies: Arc<PolicyConfigurationStore>,
        document_processor_provider: Arc<dyn DocumentProcessorProvider>,
        session_state_manager: Arc<dyn SessionStateManager>,
        message_codec: Arc<dyn MessageCodec>,
        clock: Arc<dyn Clock>,
        processing: ProcessingConfiguration,
        validator_type: SignatureValidatorType,
    ) -> Self {
        Self {
            policies,
            document_processor_provider,
            session_state_manager,
            message_codec,
            clock,
            processing,
            validator_type,
        }
    }
}
