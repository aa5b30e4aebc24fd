//! Typed in-memory metadata records for asset sidecar files.
//!
//! This crate provides the value model shared by the sidecar codec and the
//! asset cache: validated field names, the four field kinds, the ordered
//! [`MetadataFile`] store with its sticky-overwrite rule, and the zlib helpers
//! used for compressed binary fields.

#![warn(missing_docs)]

pub mod compress;
pub mod error;
pub mod name;
pub mod store;
pub mod value;

pub use compress::{compress, decompress};
pub use error::StoreError;
pub use name::{FieldName, MAX_FIELD_NAME_LEN};
pub use store::{Field, MetadataFile};
pub use value::{Value, ValueKind};
