use serde::{Deserialize, Serialize};

use crate::macros::impls_for_string_newtype;

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PolicyName(String);

impls_for_string_newtype!(PolicyName);

impl PolicyName {
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}
