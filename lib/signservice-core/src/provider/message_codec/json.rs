use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{MessageCodec, MessageCodecError};
use crate::config::policy::SigningCredential;
use crate::model::certificate::Certificate;
use crate::model::protocol::{SignRequestMessage, SignResponseMessage};

/// Unsigned base64url JSON envelope.
///
/// Does not sign requests nor verify responses; meant for development setups
/// and for sign services reachable only over an authenticated channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMessageCodec;

impl JsonMessageCodec {
    pub fn encode<T: Serialize>(value: &T) -> Result<String, MessageCodecError> {
        let json =
            serde_json::to_vec(value).map_err(|e| MessageCodecError::Encoding(e.to_string()))?;
        Base64UrlSafeNoPadding::encode_to_string(json)
            .map_err(|e| MessageCodecError::Encoding(e.to_string()))
    }

    pub fn decode<T: DeserializeOwned>(encoded: &str) -> Result<T, MessageCodecError> {
        let json = Base64UrlSafeNoPadding::decode_to_vec(encoded, None)
            .map_err(|e| MessageCodecError::Decoding(e.to_string()))?;
        serde_json::from_slice(&json).map_err(|e| MessageCodecError::Decoding(e.to_string()))
    }
}

impl MessageCodec for JsonMessageCodec {
    fn encode_sign_request(
        &self,
        request: &SignRequestMessage,
        _signing_credential: &SigningCredential,
    ) -> Result<String, MessageCodecError> {
        Self::encode(request)
    }

    fn decode_sign_request(&self, encoded: &str) -> Result<SignRequestMessage, MessageCodecError> {
        Self::decode(encoded)
    }

    fn decode_sign_response(
        &self,
        encoded: &str,
        _sign_service_certificates: &[Certificate],
    ) -> Result<SignResponseMessage, MessageCodecError> {
        Self::decode(encoded)
    }
}

#[cfg(test)]
mod test;
