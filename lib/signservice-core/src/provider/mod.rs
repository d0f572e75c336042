pub mod document_processor;
pub mod message_codec;
pub mod metadata_resolver;
pub mod session_cache;
pub mod signing_engine;
