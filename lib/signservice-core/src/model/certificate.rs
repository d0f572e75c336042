use ct_codecs::{Base64, Decoder, Encoder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// DER encoded X.509 certificate. Opaque to this crate apart from equality and digests.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Certificate(Vec<u8>);

impl Certificate {
    pub fn new(der: Vec<u8>) -> Self {
        Self(der)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, ct_codecs::Error> {
        let trimmed: String = encoded.split_whitespace().collect();
        Ok(Self(Base64::decode_to_vec(trimmed, None)?))
    }

    pub fn to_base64(&self) -> Result<String, ct_codecs::Error> {
        Base64::encode_to_string(&self.0)
    }

    pub fn der(&self) -> &[u8] {
        &self.0
    }

    pub fn sha256_digest(&self) -> Vec<u8> {
        Sha256::digest(&self.0).to_vec()
    }
}

impl std::fmt::Debug for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Certificate")
            .field(&format_args!("{} bytes", self.0.len()))
            .finish()
    }
}

impl Serialize for Certificate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = self.to_base64().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for Certificate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}
