use std::sync::Arc;

use crate::config::policy_store::PolicyConfigurationStore;
use crate::proto::clock::Clock;
use crate::proto::session_state::SessionStateManager;
use crate::provider::document_processor::provider::DocumentProcessorProvider;
use crate::provider::message_codec::MessageCodec;
use crate::provider::metadata_resolver::MetadataResolver;

pub mod dto;
mod mapper;
pub mod service;
mod validator;

#[derive(Clone)]
pub struct SignRequestService {
    policies: Arc<PolicyConfigurationStore>,
    document_processor_provider: Arc<dyn DocumentProcessorProvider>,
    session_state_manager: Arc<dyn SessionStateManager>,
    message_codec: Arc<dyn MessageCodec>,
    metadata_resolver: Arc<dyn MetadataResolver>,
    clock: Arc<dyn Clock>,
    strict_processing: bool,
}

impl SignRequestService {
    pub(crate) fn new(
        policies: Arc<PolicyConfigurationStore>,
        document_processor_provider: Arc<dyn DocumentProcessorProvider>,
        session_state_manager: Arc<dyn SessionStateManager>,
        message_codec: Arc<dyn MessageCodec>,
        metadata_resolver: Arc<dyn MetadataResolver>,
        clock: Arc<dyn Clock>,
        strict_processing: bool,
    ) -> Self {
        Self {
            policies,
            document_processor_provider,
            session_state_manager,
            message_codec,
            metadata_resolver,
            clock,
            strict_processing,
        }
    }
}
