use crate::model::certificate::Certificate;
use crate::model::protocol::SignerAssertion;
use crate::model::session_state::SignatureSessionState;
use crate::model::sign_result::{CompiledSignedDocument, SignatureResult};

pub(super) fn signature_result(
    state: SignatureSessionState,
    signed_documents: Vec<CompiledSignedDocument>,
    signer_assertion: SignerAssertion,
    signer_certificate_chain: Vec<Certificate>,
) -> SignatureResult {
    SignatureResult {
        id: state.id,
        correlation_id: state.correlation_id,
        signed_documents,
        signer_assertion_info: signer_assertion.into(),
        signer_certificate_chain,
    }
}
