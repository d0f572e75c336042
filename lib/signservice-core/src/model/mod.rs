pub mod certificate;
pub mod protocol;
pub mod requirements;
pub mod session_state;
pub mod sign_request;
pub mod sign_result;
