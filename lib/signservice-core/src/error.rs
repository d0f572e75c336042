//! Stable error codes reported to integrating callers.

use strum::{AsRefStr, Display};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ErrorCode {
    BR_0001,
    BR_0002,
    BR_0003,
    BR_0004,

    BR_0010,
    BR_0011,
    BR_0012,
    BR_0013,
    BR_0014,

    BR_0020,
    BR_0021,
    BR_0022,

    BR_0030,
    BR_0031,
    BR_0032,
    BR_0033,
    BR_0034,
    BR_0035,

    BR_0040,
    BR_0041,

    BR_0050,
}

impl ErrorCode {
    pub const fn msg(&self) -> &'static str {
        match self {
            Self::BR_0001 => "Invalid configuration",
            Self::BR_0002 => "Policy not found",
            Self::BR_0003 => "Policy mode mismatch",
            Self::BR_0004 => "Missing provider",

            Self::BR_0010 => "Invalid sign request input",
            Self::BR_0011 => "Unsupported document",
            Self::BR_0012 => "Bad request",
            Self::BR_0013 => "Metadata resolution failed",
            Self::BR_0014 => "Message encoding failed",

            Self::BR_0020 => "Signature state not found",
            Self::BR_0021 => "Signature state not accessible",
            Self::BR_0022 => "Signature state encoding failed",

            Self::BR_0030 => "Sign service returned an error",
            Self::BR_0031 => "Signature operation cancelled",
            Self::BR_0032 => "Sign response validation failed",
            Self::BR_0033 => "Document processing failed",
            Self::BR_0034 => "Signed document validation failed",
            Self::BR_0035 => "Signature state inconsistent",

            Self::BR_0040 => "Signing engine failure",
            Self::BR_0041 => "Invalid document content",

            Self::BR_0050 => "Mapping error",
        }
    }
}

pub trait ErrorCodeMixin {
    fn error_code(&self) -> ErrorCode;
}
