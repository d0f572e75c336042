use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::requirements::{AuthnRequirements, CertificateRequirements, SignMessageParameters};
use crate::model::session_state::SignatureState;
use crate::model::sign_request::{Extensions, TbsDocument};

/// Everything the caller needs to send the user to the sign service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequestDataDTO {
    /// Must be handed back unchanged when the sign response is processed
    pub state: SignatureState,
    /// Codec encoded sign request
    pub sign_request: String,
    pub relay_state: String,
    pub destination_url: Url,
    pub correlation_id: String,
}

/// Sign request input with all policy defaults applied and document ids assigned.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct NormalizedSignRequest {
    pub correlation_id: String,
    pub sign_requester_id: String,
    pub return_url: String,
    pub destination_url: String,
    pub signature_algorithm: String,
    pub sign_service_id: String,
    pub authn_requirements: AuthnRequirements,
    pub certificate_requirements: CertificateRequirements,
    pub tbs_documents: Vec<TbsDocument>,
    pub sign_message: Option<SignMessageParameters>,
    pub extensions: Extensions,
}
