//! Sidecar parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mdata_store::{MetadataFile, ValueKind, MAX_FIELD_NAME_LEN};

use crate::error::CodecError;

/// Maximum length of a type token, in bytes.
pub const MAX_TYPE_TOKEN_LEN: usize = 31;

/// Parses a complete sidecar into a [`MetadataFile`].
///
/// Fields are inserted in file order as non-sticky values. Parsing succeeds only
/// if the final line ends exactly at the end of `input`.
pub fn parse(input: &[u8]) -> Result<MetadataFile, CodecError> {
    let mut cursor = Cursor { input, pos: 0 };
    let mut file = MetadataFile::new();

    while !cursor.at_end() {
        let line_start = cursor.pos;

        let type_token = cursor.token("type", "space after type", MAX_TYPE_TOKEN_LEN)?;
        let kind = std::str::from_utf8(type_token)
            .ok()
            .and_then(ValueKind::from_token)
            .ok_or_else(|| CodecError::UnknownType {
                offset: line_start,
                token: String::from_utf8_lossy(type_token).into_owned(),
            })?;

        let name_start = cursor.pos;
        let name = cursor.token("name", "space after name", MAX_FIELD_NAME_LEN)?;
        let name = std::str::from_utf8(name).map_err(|_| CodecError::InvalidUtf8 {
            offset: name_start,
            what: "field name",
        })?;
        if file.contains(name) {
            return Err(CodecError::DuplicateField {
                offset: name_start,
                name: name.to_string(),
            });
        }

        let payload_start = cursor.pos;
        let payload = cursor.rest_of_line()?;
        insert(&mut file, kind, name, payload, payload_start).map_err(|e| match e {
            InsertError::Codec(e) => e,
            InsertError::Store(source) => CodecError::InvalidField {
                offset: line_start,
                source,
            },
        })?;
    }

    Ok(file)
}

enum InsertError {
    Codec(CodecError),
    Store(mdata_store::StoreError),
}

impl From<mdata_store::StoreError> for InsertError {
    fn from(e: mdata_store::StoreError) -> Self {
        InsertError::Store(e)
    }
}

/// Decodes one payload and writes it to `file`.
fn insert(
    file: &mut MetadataFile,
    kind: ValueKind,
    name: &str,
    payload: &[u8],
    offset: usize,
) -> Result<(), InsertError> {
    let invalid = |reason: String| {
        InsertError::Codec(CodecError::InvalidPayload {
            offset,
            kind,
            reason,
        })
    };
    let text = std::str::from_utf8(payload).map_err(|_| {
        InsertError::Codec(CodecError::InvalidUtf8 {
            offset,
            what: "payload",
        })
    })?;

    match kind {
        ValueKind::Int => {
            let v: i32 = text.parse().map_err(|e| invalid(format!("{e}")))?;
            file.set_int(name, v, false)?;
        }
        ValueKind::Uint64 => {
            let v: u64 = text.parse().map_err(|e| invalid(format!("{e}")))?;
            file.set_uint64(name, v, false)?;
        }
        ValueKind::String => {
            file.set_string(name, text, false)?;
        }
        ValueKind::Binary => {
            let bytes = STANDARD.decode(text).map_err(|e| invalid(e.to_string()))?;
            file.set_binary(name, &bytes, false)?;
        }
    }
    Ok(())
}

/// Forward-only scanner over the sidecar bytes.
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Reads up to the next space and consumes it.
    ///
    /// Fails on end of input or end of line before the space, and when the
    /// token grows past `limit`.
    fn token(
        &mut self,
        what: &'static str,
        expected: &'static str,
        limit: usize,
    ) -> Result<&'a [u8], CodecError> {
        let start = self.pos;
        loop {
            match self.input.get(self.pos) {
                Some(b' ') => break,
                Some(b'\n') | None => {
                    return Err(CodecError::UnterminatedToken {
                        offset: self.pos,
                        expected,
                    })
                }
                Some(_) => {
                    if self.pos - start >= limit {
                        return Err(CodecError::TokenTooLong {
                            offset: start,
                            token: what,
                            limit,
                        });
                    }
                    self.pos += 1;
                }
            }
        }
        let token = &self.input[start..self.pos];
        self.pos += 1;
        Ok(token)
    }

    /// Reads up to the next newline and consumes it.
    fn rest_of_line(&mut self) -> Result<&'a [u8], CodecError> {
        let start = self.pos;
        match self.input[start..].iter().position(|&b| b == b'\n') {
            Some(len) => {
                self.pos = start + len + 1;
                Ok(&self.input[start..start + len])
            }
            None => Err(CodecError::UnterminatedToken {
                offset: self.input.len(),
                expected: "newline after payload",
            }),
        }
    }
}
