//! Requirement types shared by policy configuration and sign request input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum CertificateType {
    #[serde(rename = "PKC")]
    #[strum(serialize = "PKC")]
    Pkc,
    #[serde(rename = "QC")]
    #[strum(serialize = "QC")]
    Qc,
    #[serde(rename = "QC_SSCD")]
    #[strum(serialize = "QC_SSCD")]
    QcSscd,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequirements {
    pub certificate_type: Option<CertificateType>,
    #[serde(default)]
    pub attribute_mappings: Vec<CertificateAttributeMapping>,
}

/// Maps one or more identity attributes from the signer's assertion onto a
/// certificate attribute. The first source present in the assertion wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttributeMapping {
    #[serde(default)]
    pub sources: Vec<RequestedCertificateAttribute>,
    pub destination: Option<CertificateAttribute>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedCertificateAttribute {
    pub name: String,
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateAttributeType {
    /// Relative distinguished name in the subject
    Rdn,
    /// Subject alternative name
    San,
    /// Subject directory attribute
    Sda,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttribute {
    pub r#type: Option<CertificateAttributeType>,
    pub identifier: String,
    pub friendly_name: Option<String>,
    pub default_value: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthnRequirements {
    pub authn_service_id: Option<String>,
    #[serde(default)]
    pub authn_context_class_refs: Vec<String>,
    #[serde(default)]
    pub requested_signer_attributes: Vec<SignerIdentityAttribute>,
    pub user_display_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerIdentityAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AdesType {
    Bes,
    Epes,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdesRequirement {
    pub ades_format: AdesType,
    pub signature_policy: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SignMessageMimeType {
    #[default]
    Text,
    Html,
    Markdown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageParameters {
    pub sign_message: String,
    #[serde(default)]
    pub mime_type: SignMessageMimeType,
    #[serde(default)]
    pub must_show: bool,
    #[serde(default)]
    pub encrypt: bool,
    /// Entity the message is encrypted for, defaults to the authentication service
    pub display_entity: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionParameters {
    pub data_encryption_algorithm: String,
    pub key_transport_encryption_algorithm: String,
    pub rsa_oaep_digest_algorithm: Option<String>,
}

impl Default for EncryptionParameters {
    fn default() -> Self {
        Self {
            data_encryption_algorithm: "http://www.w3.org/2009/xmlenc11#aes256-gcm".to_owned(),
            key_transport_encryption_algorithm: "http://www.w3.org/2009/xmlenc11#rsa-oaep"
                .to_owned(),
            rsa_oaep_digest_algorithm: Some("http://www.w3.org/2001/04/xmlenc#sha256".to_owned()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSignatureImageTemplate {
    pub reference: String,
    /// SVG or bitmap resource, opaque to this crate
    pub image: String,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub include_signer_name: bool,
    #[serde(default)]
    pub include_signing_time: bool,
    /// Field name to description of the field values a requester may supply
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSignaturePage {
    pub id: String,
    /// Page number, 0 means the last page of the document
    #[serde(default)]
    pub page: i32,
    pub image_reference: String,
    #[serde(default = "one")]
    pub rows: u32,
    #[serde(default = "one")]
    pub columns: u32,
    pub image_placement: PdfImagePlacement,
}

fn one() -> u32 {
    1
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfImagePlacement {
    pub x_position: i32,
    pub y_position: i32,
    pub x_increment: Option<i32>,
    pub y_increment: Option<i32>,
    #[serde(default)]
    pub scale: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisiblePdfSignatureRequirement {
    pub template_reference: String,
    /// Page number, 0 means the last page of the document
    #[serde(default)]
    pub page: i32,
    pub x_position: i32,
    pub y_position: i32,
    /// Zoom percentage relative to the template size, -100 < scale
    #[serde(default)]
    pub scale: i32,
    pub signer_name: Option<String>,
    #[serde(default)]
    pub field_values: BTreeMap<String, String>,
}
