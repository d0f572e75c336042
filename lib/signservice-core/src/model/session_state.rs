use serde::{Deserialize, Serialize};
use shared_types::{PolicyName, SignRequestId};
use url::Url;

use super::protocol::SignRequestMessage;
use super::requirements::SignMessageParameters;
use super::sign_request::TbsDocument;

/// Everything needed to process the sign response of one sign request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureSessionState {
    pub id: SignRequestId,
    pub correlation_id: String,
    pub policy: PolicyName,
    pub expected_return_url: Url,
    pub tbs_documents: Vec<TbsDocument>,
    pub sign_message: Option<SignMessageParameters>,
    pub request: SessionRequest,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionRequest {
    /// Stateful mode, the state never leaves the server
    Object(Box<SignRequestMessage>),
    /// Stateless mode, codec encoded request travelling with the caller
    Encoded(String),
}

/// State handed to the caller after a sign request has been created and
/// expected back when the sign response is processed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureState {
    pub id: SignRequestId,
    /// Embedded session state, only present in stateless mode
    pub state: Option<SignatureSessionState>,
}

impl SignatureState {
    pub fn is_stateless(&self) -> bool {
        self.state.is_some()
    }
}
