use std::sync::Arc;

use super::DocumentProcessor;
use crate::model::sign_request::TbsDocument;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait DocumentProcessorProvider: Send + Sync {
    /// First registered processor supporting the document
    fn get_processor(&self, document: &TbsDocument) -> Option<Arc<dyn DocumentProcessor>>;
}

pub struct DocumentProcessorProviderImpl {
    processors: Vec<Arc<dyn DocumentProcessor>>,
}

impl DocumentProcessorProviderImpl {
    pub fn new(processors: Vec<Arc<dyn DocumentProcessor>>) -> Self {
        Self { processors }
    }
}

impl DocumentProcessorProvider for DocumentProcessorProviderImpl {
    fn get_processor(&self, document: &TbsDocument) -> Option<Arc<dyn DocumentProcessor>> {
        self.processors
            .iter()
            .find(|processor| processor.supports(document))
            .cloned()
    }
}
