pub mod error;
pub mod policy;
pub mod sign_request;
pub mod sign_response;

#[cfg(test)]
pub(crate) mod test_utilities;
