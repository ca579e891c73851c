//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Scenes and traces are tagged with UUID v7 identifiers so exported
//! documents sort by creation time and can be correlated with log lines.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of an assembled voxel scene.
    SceneId
);

define_id!(
    /// Identifier of one trace request (extraction, both walks, assembly).
    TraceId
);
