use serde::{Deserialize, Serialize};

use crate::macros::{impl_new_random, impls_for_string_newtype};

#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DocumentId(String);

impls_for_string_newtype!(DocumentId);
impl_new_random!(DocumentId);
