#![cfg_attr(feature = "strict", deny(warnings))]

//! Integration core for a federated signing service.
//!
//! [`SignServiceCore`] builds sign requests from caller supplied documents and
//! turns the sign service's response back into validated signed documents.
//! Cryptographic work is delegated to a [`SigningEngine`], the wire format to a
//! [`MessageCodec`].

use std::sync::Arc;

use config::core_config::SignServiceConfig;
use config::policy_store::PolicyConfigurationStore;
use model::session_state::SignatureSessionState;
use proto::clock::{Clock, DefaultClock};
use proto::session_state::SessionStateManagerImpl;
use provider::document_processor::DocumentProcessor;
use provider::document_processor::pdf::PdfDocumentProcessor;
use provider::document_processor::provider::DocumentProcessorProviderImpl;
use provider::document_processor::xml::XmlDocumentProcessor;
use provider::message_codec::MessageCodec;
use provider::metadata_resolver::MetadataResolver;
use provider::session_cache::SessionCache;
use provider::session_cache::in_memory::InMemorySessionCache;
use provider::signing_engine::SigningEngine;
use service::error::ServiceError;
use service::policy::PolicyService;
use service::sign_request::SignRequestService;
use service::sign_response::SignResponseService;

pub mod config;
pub mod error;
pub mod model;
pub mod proto;
pub mod provider;
pub mod service;
pub mod validator;

#[derive(Clone)]
pub struct SignServiceCore {
    pub sign_request_service: SignRequestService,
    pub sign_response_service: SignResponseService,
    pub policy_service: PolicyService,
}

impl SignServiceCore {
    pub fn builder(config: SignServiceConfig) -> SignServiceCoreBuilder {
        SignServiceCoreBuilder::new(config)
    }
}

pub struct SignServiceCoreBuilder {
    config: SignServiceConfig,
    signing_engine: Option<Arc<dyn SigningEngine>>,
    metadata_resolver: Option<Arc<dyn MetadataResolver>>,
    message_codec: Option<Arc<dyn MessageCodec>>,
    session_cache: Option<Arc<dyn SessionCache<SignatureSessionState>>>,
    document_processors: Vec<Arc<dyn DocumentProcessor>>,
    clock: Option<Arc<dyn Clock>>,
}

impl SignServiceCoreBuilder {
    pub fn new(config: SignServiceConfig) -> Self {
        Self {
            config,
            signing_engine: None,
            metadata_resolver: None,
            message_codec: None,
            session_cache: None,
            document_processors: vec![],
            clock: None,
        }
    }

    pub fn with_signing_engine(mut self, signing_engine: Arc<dyn SigningEngine>) -> Self {
        self.signing_engine = Some(signing_engine);
        self
    }

    pub fn with_metadata_resolver(mut self, metadata_resolver: Arc<dyn MetadataResolver>) -> Self {
        self.metadata_resolver = Some(metadata_resolver);
        self
    }

    pub fn with_message_codec(mut self, message_codec: Arc<dyn MessageCodec>) -> Self {
        self.message_codec = Some(message_codec);
        self
    }

    /// Replaces the default in-memory storage of stateful signature states
    pub fn with_session_cache(
        mut self,
        session_cache: Arc<dyn SessionCache<SignatureSessionState>>,
    ) -> Self {
        self.session_cache = Some(session_cache);
        self
    }

    /// Additional processor, consulted before the built-in XML and PDF processors
    pub fn with_document_processor(mut self, processor: Arc<dyn DocumentProcessor>) -> Self {
        self.document_processors.push(processor);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<SignServiceCore, ServiceError> {
        let config = self.config;
        config.validate_settings()?;
        let policies = Arc::new(PolicyConfigurationStore::new(
            &config.policies,
            config.default_policy,
        )?);

        let signing_engine = self
            .signing_engine
            .ok_or_else(|| ServiceError::MissingProvider("signing engine".to_owned()))?;
        let metadata_resolver = self
            .metadata_resolver
            .ok_or_else(|| ServiceError::MissingProvider("metadata resolver".to_owned()))?;
        let message_codec = self
            .message_codec
            .ok_or_else(|| ServiceError::MissingProvider("message codec".to_owned()))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(DefaultClock));
        let session_cache = self.session_cache.unwrap_or_else(|| {
            Arc::new(InMemorySessionCache::<SignatureSessionState>::new(
                Some(config.cache.time_to_live),
                clock.clone(),
            ))
        });

        let mut processors = self.document_processors;
        processors.push(Arc::new(XmlDocumentProcessor::new(signing_engine.clone())));
        processors.push(Arc::new(PdfDocumentProcessor::new(
            signing_engine,
            clock.clone(),
        )));
        let document_processor_provider = Arc::new(DocumentProcessorProviderImpl::new(processors));

        let session_state_manager = Arc::new(SessionStateManagerImpl::new(
            session_cache,
            message_codec.clone(),
            policies.clone(),
        ));

        tracing::info!(
            "Sign service core initialized, signature validator {}",
            config.signature_validator
        );

        Ok(SignServiceCore {
            sign_request_service: SignRequestService::new(
                policies.clone(),
                document_processor_provider.clone(),
                session_state_manager.clone(),
                message_codec.clone(),
                metadata_resolver,
                clock.clone(),
                config.processing.strict_processing,
            ),
            sign_response_service: SignResponseService::new(
                policies.clone(),
                document_processor_provider,
                session_state_manager,
                message_codec,
                clock,
                config.processing,
                config.signature_validator,
            ),
            policy_service: PolicyService::new(policies),
        })
    }
}

#[cfg(test)]
mod test;
