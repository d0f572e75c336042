//! Federation metadata lookup, used to find the encryption certificates of the
//! entity a sign message is encrypted for.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::{ErrorCode, ErrorCodeMixin};
use crate::model::certificate::Certificate;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, entity_id: &str) -> Result<EntityDescriptor, MetadataResolverError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntityDescriptor {
    pub entity_id: String,
    pub encryption_certificates: Vec<Certificate>,
}

#[derive(Debug, Error)]
pub enum MetadataResolverError {
    #[error("Metadata for `{0}` not found")]
    NotFound(String),
    #[error("Metadata for `{0}` has no encryption certificate")]
    NoEncryptionCertificate(String),
    #[error("Metadata resolution failed: `{0}`")]
    Resolution(String),
}

impl ErrorCodeMixin for MetadataResolverError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::BR_0013
    }
}
