use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

///
/// DataType
///
/// Opaque type tag carried by a type environment.
/// The IR only compares tags for equality; it never interprets the signature.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DataType(Cow<'static, str>);

impl DataType {
    pub const BIGINT: Self = Self::from_static("bigint");
    pub const BOOLEAN: Self = Self::from_static("boolean");
    pub const DATE: Self = Self::from_static("date");
    pub const DOUBLE: Self = Self::from_static("double");
    pub const VARCHAR: Self = Self::from_static("varchar");

    /// Build a tag from an arbitrary type signature, e.g. `decimal(10,2)`.
    #[must_use]
    pub fn new(signature: impl Into<String>) -> Self {
        Self(Cow::Owned(signature.into()))
    }

    #[must_use]
    pub const fn from_static(signature: &'static str) -> Self {
        Self(Cow::Borrowed(signature))
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for DataType {
    fn from(signature: &'static str) -> Self {
        Self::from_static(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::DataType;

    #[test]
    fn static_and_owned_tags_compare_by_signature() {
        assert_eq!(DataType::BIGINT, DataType::new("bigint"));
        assert_ne!(DataType::BIGINT, DataType::new("BIGINT"));
    }

    #[test]
    fn tags_round_trip_as_plain_strings() {
        let json = serde_json::to_string(&DataType::new("decimal(10,2)")).unwrap();
        assert_eq!(json, "\"decimal(10,2)\"");

        let back: DataType = serde_json::from_str(&json).unwrap();
        assert_eq!(back.signature(), "decimal(10,2)");
    }
}
