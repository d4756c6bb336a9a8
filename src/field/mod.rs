//! Field Layer: self-encoding units of a binary layout
//!
//! Prinsip desain:
//! - Closed sum type: `Field` adalah enum, `Struct` salah satu variant-nya
//! - Lazy encoding: `size()` dan `bytes()` dihitung dari value saat ini
//! - Big-endian di semua numeric field

mod numeric;
mod text;

pub use numeric::{FloatArrayField, FloatField, FloatWidth, IntArrayField, IntField, IntWidth};
pub use text::{FixedCharString, VarCharString};

use crate::error::{LayoutError, Result};
use crate::layout::Struct;

/// Capability set shared by every field and by `Struct`.
///
/// `write_to` menulis tepat `size()` bytes.
pub trait Encode {
    fn name(&self) -> &str;

    fn size(&self) -> usize;

    fn write_to(&self, out: &mut Vec<u8>);

    /// Fresh buffer berukuran tepat `size()`
    fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.write_to(&mut out);
        out
    }
}

/// Owned snapshot of a field value, used by the accessor layer
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Uint(u64),
    Float(f64),
    UintArray(Vec<u64>),
    FloatArray(Vec<f64>),
    Text(String),
    /// Encoded bytes of a nested struct
    Bytes(Vec<u8>),
}

/// A named member of a `Struct`
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Int(IntField),
    Float(FloatField),
    IntArray(IntArrayField),
    FloatArray(FloatArrayField),
    Ascii(FixedCharString),
    Utf8(VarCharString),
    Struct(Struct),
}

impl Field {
    pub fn uint8(name: impl Into<String>, value: u64) -> Self {
        Self::Int(IntField::new(name, IntWidth::U8, value))
    }

    pub fn uint16(name: impl Into<String>, value: u64) -> Self {
        Self::Int(IntField::new(name, IntWidth::U16, value))
    }

    pub fn uint32(name: impl Into<String>, value: u64) -> Self {
        Self::Int(IntField::new(name, IntWidth::U32, value))
    }

    pub fn uint64(name: impl Into<String>, value: u64) -> Self {
        Self::Int(IntField::new(name, IntWidth::U64, value))
    }

    pub fn float32(name: impl Into<String>, value: f32) -> Self {
        Self::Float(FloatField::new(name, FloatWidth::F32, value as f64))
    }

    pub fn float64(name: impl Into<String>, value: f64) -> Self {
        Self::Float(FloatField::new(name, FloatWidth::F64, value))
    }

    pub fn uint8_array(name: impl Into<String>, values: impl IntoIterator<Item = u64>) -> Self {
        Self::IntArray(IntArrayField::new(name, IntWidth::U8, values))
    }

    pub fn uint16_array(name: impl Into<String>, values: impl IntoIterator<Item = u64>) -> Self {
        Self::IntArray(IntArrayField::new(name, IntWidth::U16, values))
    }

    pub fn uint32_array(name: impl Into<String>, values: impl IntoIterator<Item = u64>) -> Self {
        Self::IntArray(IntArrayField::new(name, IntWidth::U32, values))
    }

    pub fn uint64_array(name: impl Into<String>, values: impl IntoIterator<Item = u64>) -> Self {
        Self::IntArray(IntArrayField::new(name, IntWidth::U64, values))
    }

    pub fn float32_array(name: impl Into<String>, values: impl IntoIterator<Item = f32>) -> Self {
        Self::FloatArray(FloatArrayField::new(name, FloatWidth::F32, values.into_iter().map(f64::from)))
    }

    pub fn float64_array(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::FloatArray(FloatArrayField::new(name, FloatWidth::F64, values))
    }

    /// Zero-filled integer array of `len` elements (padding, reserved blocks)
    pub fn zeroed(name: impl Into<String>, width: IntWidth, len: usize) -> Self {
        Self::IntArray(IntArrayField::zeroed(name, width, len))
    }

    /// Zero-filled float array of `len` elements
    pub fn zeroed_float(name: impl Into<String>, width: FloatWidth, len: usize) -> Self {
        Self::FloatArray(FloatArrayField::zeroed(name, width, len))
    }

    pub fn ascii(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Ascii(FixedCharString::new(name, value, None))
    }

    pub fn ascii_capped(name: impl Into<String>, value: impl Into<String>, max_len: usize) -> Self {
        Self::Ascii(FixedCharString::new(name, value, Some(max_len)))
    }

    pub fn utf8(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Utf8(VarCharString::new(name, value, None))
    }

    pub fn utf8_capped(name: impl Into<String>, value: impl Into<String>, max_bytes: usize) -> Self {
        Self::Utf8(VarCharString::new(name, value, Some(max_bytes)))
    }

    /// Nama kind untuk pesan error
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::IntArray(_) => "integer array",
            Self::FloatArray(_) => "float array",
            Self::Ascii(_) | Self::Utf8(_) => "text",
            Self::Struct(_) => "struct",
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut Struct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Snapshot value saat ini. Value sebuah struct adalah bytes-nya.
    pub fn value(&self) -> Value {
        match self {
            Self::Int(f) => Value::Uint(f.value()),
            Self::Float(f) => Value::Float(f.value()),
            Self::IntArray(f) => Value::UintArray(f.values().to_vec()),
            Self::FloatArray(f) => Value::FloatArray(f.values()),
            Self::Ascii(f) => Value::Text(f.value().to_string()),
            Self::Utf8(f) => Value::Text(f.value().to_string()),
            Self::Struct(s) => Value::Bytes(s.bytes()),
        }
    }

    /// Assign a new value; numeric values are masked or rounded to the width.
    ///
    /// Struct members cannot be assigned a value, only their own members can.
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (Self::Int(f), Value::Uint(v)) => f.set(v),
            (Self::Float(f), Value::Float(v)) => f.set(v),
            (Self::IntArray(f), Value::UintArray(v)) => f.set(v),
            (Self::FloatArray(f), Value::FloatArray(v)) => f.set(v),
            (Self::Ascii(f), Value::Text(v)) => f.set(v),
            (Self::Utf8(f), Value::Text(v)) => f.set(v),
            (field, _) => {
                let expected = match &*field {
                    Self::Struct(_) => "member-level (structs have no assignable value)",
                    other => other.kind(),
                };
                return Err(LayoutError::TypeMismatch {
                    name: field.name().to_string(),
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Default decode dari tepat `size()` bytes.
    ///
    /// Hanya untuk leaf field: nested struct di-decode member per member oleh
    /// `Decoder`, supaya interpreter tetap ditanya untuk setiap member-nya.
    pub(crate) fn load(&mut self, raw: &[u8]) -> Result<()> {
        match self {
            Self::Int(f) => f.load(raw),
            Self::Float(f) => f.load(raw),
            Self::IntArray(f) => f.load(raw),
            Self::FloatArray(f) => f.load(raw),
            Self::Ascii(f) => f.load(raw),
            Self::Utf8(f) => f.load(raw).map_err(|_| LayoutError::InvalidText {
                member: f.name().to_string(),
            })?,
            Self::Struct(s) => {
                return Err(LayoutError::TypeMismatch {
                    name: s.name().to_string(),
                    expected: "leaf field (structs decode member by member)",
                });
            }
        }
        Ok(())
    }
}

impl Encode for Field {
    fn name(&self) -> &str {
        match self {
            Self::Int(f) => f.name(),
            Self::Float(f) => f.name(),
            Self::IntArray(f) => f.name(),
            Self::FloatArray(f) => f.name(),
            Self::Ascii(f) => f.name(),
            Self::Utf8(f) => f.name(),
            Self::Struct(s) => s.name(),
        }
    }

    #[inline]
    fn size(&self) -> usize {
        match self {
            Self::Int(f) => f.size(),
            Self::Float(f) => f.size(),
            Self::IntArray(f) => f.size(),
            Self::FloatArray(f) => f.size(),
            Self::Ascii(f) => f.size(),
            Self::Utf8(f) => f.size(),
            Self::Struct(s) => s.size(),
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Int(f) => f.write_to(out),
            Self::Float(f) => f.write_to(out),
            Self::IntArray(f) => f.write_to(out),
            Self::FloatArray(f) => f.write_to(out),
            Self::Ascii(f) => f.write_to(out),
            Self::Utf8(f) => f.write_to(out),
            Self::Struct(s) => s.write_to(out),
        }
    }
}

impl From<Struct> for Field {
    fn from(s: Struct) -> Self {
        Self::Struct(s)
    }
}
