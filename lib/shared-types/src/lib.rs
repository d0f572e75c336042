mod document_id;
mod macros;
mod policy_name;
mod sign_request_id;

pub use document_id::DocumentId;
pub use policy_name::PolicyName;
pub use sign_request_id::SignRequestId;

#[derive(Debug, Clone, thiserror::Error)]
#[error("`{0}` must not be empty")]
pub struct EmptyIdentifierError(pub &'static str);
