//! Lifecycle of signature session state.
//!
//! Stateless policies embed the whole session state, including the codec
//! encoded request, in the [`SignatureState`] returned to the caller. Stateful
//! policies keep it in the [`SessionCache`] under the request id and hand out
//! the bare id; retrieval consumes the entry.

use std::sync::Arc;

use shared_types::{PolicyName, SignRequestId};
use thiserror::Error;

use crate::config::policy_store::PolicyConfigurationStore;
use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::model::protocol::SignRequestMessage;
use crate::model::requirements::SignMessageParameters;
use crate::model::session_state::{SessionRequest, SignatureSessionState, SignatureState};
use crate::model::sign_request::TbsDocument;
use crate::provider::message_codec::{MessageCodec, MessageCodecError};
use crate::provider::session_cache::{SessionCache, SessionCacheError};

#[derive(Clone, Debug, PartialEq)]
pub struct SessionStateInput {
    pub correlation_id: String,
    /// Documents including the pre-sign extensions added by the processors
    pub tbs_documents: Vec<TbsDocument>,
    pub sign_message: Option<SignMessageParameters>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetrievedSession {
    pub state: SignatureSessionState,
    pub request: SignRequestMessage,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SessionStateManager: Send + Sync {
    fn create(
        &self,
        input: SessionStateInput,
        request: &SignRequestMessage,
        encoded_request: &str,
        stateless: bool,
        owner_id: Option<String>,
    ) -> Result<SignatureState, SessionStateError>;

    /// Consumes the session state belonging to `state`
    fn retrieve<'a>(
        &self,
        state: &SignatureState,
        requester_id: Option<&'a str>,
    ) -> Result<RetrievedSession, SessionStateError>;
}

#[derive(Debug, Error)]
pub enum SessionStateError {
    #[error("Signature state `{0}` not found")]
    NotFound(SignRequestId),
    #[error("Signature state `{0}` is not accessible by the requester")]
    NoAccess(SignRequestId),
    #[error("Policy `{0}` of the signature state not found")]
    PolicyNotFound(PolicyName),
    #[error("Received embedded signature state for stateful policy `{0}`")]
    StatelessStateForStatefulPolicy(PolicyName),
    #[error("Signature state id `{actual}` does not match `{expected}`")]
    IdMismatch {
        expected: SignRequestId,
        actual: SignRequestId,
    },
    #[error("Signature state request mismatch: {0}")]
    RequestMismatch(String),
    #[error("Signature state encoding error: `{0}`")]
    Codec(#[from] MessageCodecError),
    #[error("Signature state storage error: `{0}`")]
    Cache(SessionCacheError),
}

impl ErrorCodeMixin for SessionStateError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::BR_0020,
            Self::NoAccess(_) => ErrorCode::BR_0021,
            Self::PolicyNotFound(_) => ErrorCode::BR_0002,
            Self::StatelessStateForStatefulPolicy(_) => ErrorCode::BR_0003,
            Self::IdMismatch { .. } => ErrorCode::BR_0012,
            Self::RequestMismatch(_) => ErrorCode::BR_0035,
            Self::Codec(_) | Self::Cache(_) => ErrorCode::BR_0022,
        }
    }
}

pub struct SessionStateManagerImpl {
    cache: Arc<dyn SessionCache<SignatureSessionState>>,
    codec: Arc<dyn MessageCodec>,
    policies: Arc<PolicyConfigurationStore>,
}

impl SessionStateManagerImpl {
    pub fn new(
        cache: Arc<dyn SessionCache<SignatureSessionState>>,
        codec: Arc<dyn MessageCodec>,
        policies: Arc<PolicyConfigurationStore>,
    ) -> Self {
        Self {
            cache,
            codec,
            policies,
        }
    }

    fn retrieve_embedded(
        &self,
        id: &SignRequestId,
        session: &SignatureSessionState,
    ) -> Result<RetrievedSession, SessionStateError> {
        if &session.id != id {
            return Err(SessionStateError::IdMismatch {
                expected: id.to_owned(),
                actual: session.id.to_owned(),
            });
        }

        let policy = self
            .policies
            .resolve(&session.policy)
            .ok_or_else(|| SessionStateError::PolicyNotFound(session.policy.to_owned()))?;
        if !policy.stateless {
            return Err(SessionStateError::StatelessStateForStatefulPolicy(
                session.policy.to_owned(),
            ));
        }

        let request = match &session.request {
            SessionRequest::Encoded(encoded) => self.codec.decode_sign_request(encoded)?,
            SessionRequest::Object(request) => request.as_ref().to_owned(),
        };
        if &request.request_id != id {
            return Err(SessionStateError::RequestMismatch(format!(
                "embedded request `{}` does not belong to state `{id}`",
                request.request_id
            )));
        }

        Ok(RetrievedSession {
            state: session.to_owned(),
            request,
        })
    }

    fn retrieve_cached(
        &self,
        id: &SignRequestId,
        requester_id: Option<&str>,
    ) -> Result<RetrievedSession, SessionStateError> {
        let session = self
            .cache
            .get_and_remove(id.as_ref(), requester_id)
            .map_err(|e| match e {
                SessionCacheError::NoAccess(_) => SessionStateError::NoAccess(id.to_owned()),
                other => SessionStateError::Cache(other),
            })?
            .ok_or_else(|| SessionStateError::NotFound(id.to_owned()))?;

        let request = match &session.request {
            SessionRequest::Object(request) => request.as_ref().to_owned(),
            SessionRequest::Encoded(encoded) => self.codec.decode_sign_request(encoded)?,
        };

        Ok(RetrievedSession {
            state: session,
            request,
        })
    }
}

impl SessionStateManager for SessionStateManagerImpl {
    fn create(
        &self,
        input: SessionStateInput,
        request: &SignRequestMessage,
        encoded_request: &str,
        stateless: bool,
        owner_id: Option<String>,
    ) -> Result<SignatureState, SessionStateError> {
        let id = request.request_id.to_owned();
        let session = SignatureSessionState {
            id: id.to_owned(),
            correlation_id: input.correlation_id,
            policy: request.policy.to_owned(),
            expected_return_url: request.return_url.to_owned(),
            tbs_documents: input.tbs_documents,
            sign_message: input.sign_message,
            request: if stateless {
                SessionRequest::Encoded(encoded_request.to_owned())
            } else {
                SessionRequest::Object(Box::new(request.to_owned()))
            },
        };

        if stateless {
            tracing::debug!("Embedding stateless signature state `{id}`");
            return Ok(SignatureState {
                id,
                state: Some(session),
            });
        }

        self.cache
            .put(id.as_ref(), session, owner_id)
            .map_err(SessionStateError::Cache)?;
        tracing::debug!("Stored signature state `{id}`");

        Ok(SignatureState { id, state: None })
    }

    fn retrieve<'a>(
        &self,
        state: &SignatureState,
        requester_id: Option<&'a str>,
    ) -> Result<RetrievedSession, SessionStateError> {
        match &state.state {
            Some(session) => self.retrieve_embedded(&state.id, session),
            None => self.retrieve_cached(&state.id, requester_id),
        }
    }
}

#[cfg(test)]
mod test;
