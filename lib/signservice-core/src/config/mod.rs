use itertools::Itertools;
use shared_types::PolicyName;
use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::validator::FieldError;

pub mod core_config;
mod merge;
pub mod policy;
pub mod policy_store;

#[cfg(test)]
pub(crate) mod test_utils;

#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("Config parsing error: {0}")]
    GeneralParsingError(String),
}

/// Startup-time configuration failures. None of these is recoverable, the
/// integration must not be started with an invalid configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigValidationError {
    #[error("No policies configured")]
    NoPolicies,
    #[error("Circular parent policy reference: {}", .path.iter().join(" -> "))]
    CircularParentPolicy { path: Vec<PolicyName> },
    #[error("Policy `{policy}` references unknown parent policy `{parent}`")]
    MissingParentPolicy {
        policy: PolicyName,
        parent: PolicyName,
    },
    #[error("Invalid policy configuration: {}", .errors.iter().join("; "))]
    InvalidPolicies { errors: Vec<FieldError> },
    #[error("Invalid service settings: {}", .errors.iter().join("; "))]
    InvalidSettings { errors: Vec<FieldError> },
    #[error("Default policy `{0}` is not configured")]
    MissingDefaultPolicy(PolicyName),
}

impl ErrorCodeMixin for ConfigValidationError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0001
    }
}
