//! Reader and writer for the line-oriented sidecar text format.
//!
//! Each field of a [`MetadataFile`](mdata_store::MetadataFile) is one line:
//!
//! ```text
//! <type> <name> <payload>\n
//! ```
//!
//! where `<type>` is one of `int`, `uint64`, `string`, `bin_data`. Integers are
//! decimal, strings are stored verbatim up to the newline, and binary payloads
//! are standard base64. Sidecars are only ever produced by [`serialize`], so
//! [`parse`] does not attempt recovery: the first deviation is reported as a
//! [`CodecError`] carrying its byte offset.

#![warn(missing_docs)]

pub mod error;
pub mod parse;
pub mod serialize;

pub use error::CodecError;
pub use parse::{parse, MAX_TYPE_TOKEN_LEN};
pub use serialize::serialize;
