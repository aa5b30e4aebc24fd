//! The ordered metadata record for a single asset.
//!
//! A [`MetadataFile`] holds named, typed fields in insertion order. Writes go
//! through the typed `set_*` methods, which share one overwrite rule: a write
//! replaces any existing field of the same name in place, unless the write is
//! sticky and the existing field already has the same kind. Fields are never
//! removed.

use serde::Serialize;

use crate::compress::{compress, decompress};
use crate::error::StoreError;
use crate::name::FieldName;
use crate::value::Value;

/// A single named field within a [`MetadataFile`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    name: FieldName,
    value: Value,
    sticky: bool,
}

impl Field {
    /// The field's name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// The field's current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the field was last written as an explicit, protected setting.
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }
}

/// The in-memory form of one sidecar file.
///
/// Field order is insertion order and is preserved by serialization. Names are
/// unique: at most one field exists per name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataFile {
    fields: Vec<Field>,
}

impl MetadataFile {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the store has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Returns `true` if a field with this name exists, of any kind.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns the value stored under `name`, of any kind.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.find(name).map(|f| &f.value)
    }

    /// Returns whether the field under `name` is sticky.
    ///
    /// Returns `None` if there is no such field.
    pub fn is_sticky(&self, name: &str) -> Option<bool> {
        self.find(name).map(|f| f.sticky)
    }

    /// Returns the integer stored under `name`.
    pub fn get_int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the unsigned 64-bit integer stored under `name`.
    pub fn get_uint64(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string stored under `name`.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the bytes stored under `name`, exactly as stored.
    ///
    /// Fields written with `compress = true` come back compressed; see
    /// [`get_binary_decompressed`](Self::get_binary_decompressed).
    pub fn get_binary(&self, name: &str) -> Option<&[u8]> {
        match self.get(name)? {
            Value::Binary(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Returns the bytes stored under `name`, inflated with zlib.
    pub fn get_binary_decompressed(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.get_binary(name).map(decompress).transpose()
    }

    /// Writes an integer field.
    pub fn set_int(&mut self, name: &str, value: i32, sticky: bool) -> Result<(), StoreError> {
        self.set(name, Value::Int(value), sticky)
    }

    /// Writes an unsigned 64-bit integer field.
    pub fn set_uint64(&mut self, name: &str, value: u64, sticky: bool) -> Result<(), StoreError> {
        self.set(name, Value::Uint64(value), sticky)
    }

    /// Writes a string field. The text is copied into the store and must not
    /// contain `\n` or `\r`.
    pub fn set_string(&mut self, name: &str, value: &str, sticky: bool) -> Result<(), StoreError> {
        if value.contains(|c| c == '\n' || c == '\r') {
            return Err(StoreError::InvalidString {
                name: name.to_string(),
            });
        }
        self.set(name, Value::String(value.to_string()), sticky)
    }

    /// Writes a binary field, optionally zlib-compressing the bytes first.
    ///
    /// Binary fields are never sticky.
    pub fn set_binary(
        &mut self,
        name: &str,
        data: &[u8],
        compress_data: bool,
    ) -> Result<(), StoreError> {
        let bytes = if compress_data {
            compress(data)?
        } else {
            data.to_vec()
        };
        self.set(name, Value::Binary(bytes), false)
    }

    /// Applies the overwrite rule for a single write.
    fn set(&mut self, name: &str, value: Value, sticky: bool) -> Result<(), StoreError> {
        let name = FieldName::new(name)?;
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => {
                if sticky && existing.value.kind() == value.kind() {
                    return Ok(());
                }
                existing.value = value;
                existing.sticky = sticky;
            }
            None => self.fields.push(Field {
                name,
                value,
                sticky,
            }),
        }
        Ok(())
    }

    fn find(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name.as_str() == name)
    }
}
