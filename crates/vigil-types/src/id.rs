//! Store-assigned record identifiers.
//!
//! Every record is keyed by a `u64` handed out by the store. The prefixed,
//! zero-padded form (`inc-000042`) is a presentation concern: it is produced
//! by [`Display`](std::fmt::Display), accepted by [`FromStr`], and used as the
//! serialized representation so JSON consumers see stable display ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(u64);

        impl $name {
            /// Prefix used in the display form.
            pub const PREFIX: &'static str = $prefix;

            /// Wraps a raw store-assigned value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw store-assigned value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{:06}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            /// Accepts either the display form (`alt-000007`) or the bare number.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .unwrap_or(trimmed);
                digits.parse::<u64>().map(Self).map_err(|_| ParseError::InvalidId {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

record_id!(
    /// Identifier of a persisted [`Alert`](crate::Alert).
    AlertId,
    "alt",
    "alert id"
);

record_id!(
    /// Identifier of a persisted [`Incident`](crate::Incident).
    IncidentId,
    "inc",
    "incident id"
);

record_id!(
    /// Identifier of a persisted [`Service`](crate::Service).
    ServiceId,
    "svc",
    "service id"
);
