//! String-backed identifier newtypes.
//!
//! A `TenantId` cannot be accidentally used where an `EntityId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SEGMENT_ALL;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Tenant ("site") identifier. Every request is scoped to exactly one.
    TenantId
);

define_id!(
    /// Identifier of a tracked entity: a lead or a visitor.
    EntityId
);

/// Sub-population filter applied by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentScope {
    /// No filter; every entity of the tenant qualifies.
    #[default]
    All,
    /// Only members of the given segment qualify.
    Segment(String),
}

impl SegmentScope {
    /// Parse a caller-supplied segment id. Empty and `"all"` mean unfiltered.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::All,
            Some(s) if s.eq_ignore_ascii_case(SEGMENT_ALL) => Self::All,
            Some(s) => Self::Segment(s.to_string()),
        }
    }

    pub fn segment_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Segment(id) => Some(id),
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, Self::Segment(_))
    }
}

impl fmt::Display for SegmentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(SEGMENT_ALL),
            Self::Segment(id) => f.write_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_scope_parse() {
        assert_eq!(SegmentScope::parse(None), SegmentScope::All);
        assert_eq!(SegmentScope::parse(Some("all")), SegmentScope::All);
        assert_eq!(SegmentScope::parse(Some(" ALL ")), SegmentScope::All);
        assert_eq!(SegmentScope::parse(Some("")), SegmentScope::All);
        assert_eq!(
            SegmentScope::parse(Some("seg-1")),
            SegmentScope::Segment("seg-1".to_string())
        );
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = TenantId::new("site-9");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"site-9\"");
    }
}
