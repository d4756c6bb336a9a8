//! Struct Layer: ordered composite of fields
//!
//! Layout:
//! ┌──────────┬──────────┬─────┬──────────┐
//! │ member 0 │ member 1 │ ... │ member N │   (tanpa padding, tanpa framing)
//! └──────────┴──────────┴─────┴──────────┘
//!
//! Offset tidak pernah disimpan: selalu dihitung ulang dari size member
//! yang mendahuluinya, jadi mutasi struktural tidak bisa membuat offset basi.

mod names;

pub use names::{is_reserved, names_collide, NameCheck, MEMBER_PREFIX, RESERVED_NAMES};

use std::path::Path;

use tracing::{debug, warn};

use crate::codec::{DecodeOptions, Decoder, Interpreter};
use crate::error::{LayoutError, Result};
use crate::field::{Encode, Field, Value};
use crate::sink;

/// Member yang akan dipindah atau disisipkan oleh `Struct::insert_member`
#[derive(Debug, Clone, PartialEq)]
pub enum Insert {
    /// Pindahkan member yang sudah ada
    Existing(String),
    /// Sisipkan member baru (divalidasi seperti `add_member`)
    New(Field),
}

impl From<&str> for Insert {
    fn from(name: &str) -> Self {
        Self::Existing(name.to_string())
    }
}

impl From<Field> for Insert {
    fn from(field: Field) -> Self {
        Self::New(field)
    }
}

/// Named, ordered composite of fields. Also usable as a `Field`.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    name: String,
    members: Vec<Field>,
}

impl Struct {
    /// Membuat struct kosong
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Membuat struct dari daftar member awal, masing-masing lewat `add_member`
    pub fn with_members(name: impl Into<String>, members: impl IntoIterator<Item = Field>) -> Result<Self> {
        let mut s = Self::new(name);
        for member in members {
            s.add_member(member)?;
        }
        Ok(s)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Field] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut [Field] {
        &mut self.members
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name())
    }

    /// Normalized membership test (`name` dan `$name` dianggap sama)
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| names_collide(m.name(), name))
    }

    /// Cek apakah nama bisa dipakai untuk member baru
    pub fn check_name(&self, name: &str) -> NameCheck {
        if self.has_member(name) {
            NameCheck::Duplicate
        } else if is_reserved(name) {
            NameCheck::Reserved
        } else {
            NameCheck::Ok
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        match self.check_name(name) {
            NameCheck::Ok => Ok(()),
            NameCheck::Duplicate => {
                warn!(layout = %self.name, member = name, "rejected duplicate member name");
                Err(LayoutError::DuplicateName {
                    name: name.to_string(),
                })
            }
            NameCheck::Reserved => {
                warn!(layout = %self.name, member = name, "rejected reserved member name");
                Err(LayoutError::ReservedName {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Index member. Nama persis dulu, lalu nama yang collide (`name` / `$name`),
    /// sama dengan relasi yang dipakai `has_member`.
    fn position(&self, name: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|m| m.name() == name)
            .or_else(|| self.members.iter().position(|m| names_collide(m.name(), name)))
    }

    /// Append member di akhir struct. Gagal tanpa mengubah state.
    pub fn add_member(&mut self, field: impl Into<Field>) -> Result<()> {
        let field = field.into();
        self.validate(field.name())?;

        debug!(layout = %self.name, member = field.name(), size = field.size(), "add member");
        self.members.push(field);
        Ok(())
    }

    /// Lepas member dan kembalikan ownership-nya ke caller
    pub fn remove_member(&mut self, name: &str) -> Option<Field> {
        let index = self.position(name)?;
        let field = self.members.remove(index);

        debug!(layout = %self.name, member = field.name(), "remove member");
        Some(field)
    }

    /// Pindahkan member yang ada, atau sisipkan member baru, tepat sebelum
    /// (atau sesudah jika `after`) member `anchor`.
    ///
    /// Returns index akhir member tersebut.
    pub fn insert_member(&mut self, member: impl Into<Insert>, anchor: &str, after: bool) -> Result<usize> {
        let member = member.into();

        // Semua validasi sebelum mutasi
        let anchor_index = self
            .position(anchor)
            .ok_or_else(|| LayoutError::not_found(anchor))?;

        let (field, mut target) = match member {
            Insert::Existing(name) => {
                let from = self
                    .position(&name)
                    .ok_or_else(|| LayoutError::not_found(&name))?;
                if from == anchor_index {
                    return Ok(from);
                }
                let field = self.members.remove(from);
                let target = if from < anchor_index {
                    anchor_index - 1
                } else {
                    anchor_index
                };
                (field, target)
            }
            Insert::New(field) => {
                self.validate(field.name())?;
                (field, anchor_index)
            }
        };

        if after {
            target += 1;
        }

        debug!(
            layout = %self.name,
            member = field.name(),
            anchor,
            after,
            index = target,
            "insert member"
        );
        self.members.insert(target, field);
        Ok(target)
    }

    /// Byte offset member dari awal encoding struct
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let index = self.position(name)?;
        Some(self.members[..index].iter().map(|m| m.size()).sum())
    }

    /// Total size = jumlah size semua member
    #[inline]
    pub fn size(&self) -> usize {
        self.members.iter().map(|m| m.size()).sum()
    }

    /// Encode seluruh struct ke buffer baru
    pub fn bytes(&self) -> Vec<u8> {
        let size = self.size();
        let mut out = Vec::with_capacity(size);
        self.write_to(&mut out);
        debug_assert_eq!(out.len(), size);
        out
    }

    /// Value sebuah struct adalah encoding-nya
    pub fn value(&self) -> Value {
        Value::Bytes(self.bytes())
    }

    pub fn member(&self, name: &str) -> Option<&Field> {
        self.position(name).map(|i| &self.members[i])
    }

    pub fn member_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.position(name).map(move |i| &mut self.members[i])
    }

    /// Typed getter: `NotFound` jika member tidak ada
    pub fn get(&self, name: &str) -> Result<Value> {
        self.member(name)
            .map(Field::value)
            .ok_or_else(|| LayoutError::not_found(name))
    }

    /// Typed setter: value di-mask/round sesuai width member
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.member_mut(name)
            .ok_or_else(|| LayoutError::not_found(name))?
            .set_value(value)
    }

    /// Decode `buffer` ke member values (kebalikan dari `bytes()`).
    ///
    /// Interpreter ditanya dulu untuk setiap member; jika menjawab
    /// `UseDefault`, member di-decode dengan lebar default-nya.
    /// Returns jumlah bytes yang dikonsumsi.
    pub fn set_bytes<I: Interpreter + ?Sized>(&mut self, buffer: &[u8], interpreter: &mut I) -> Result<usize> {
        self.set_bytes_with(buffer, interpreter, DecodeOptions::default())
    }

    pub fn set_bytes_with<I: Interpreter + ?Sized>(
        &mut self,
        buffer: &[u8],
        interpreter: &mut I,
        options: DecodeOptions,
    ) -> Result<usize> {
        Decoder::with_options(buffer, options).decode_into(self, interpreter)
    }

    /// Tulis `bytes()` ke file (output handle). Returns jumlah bytes.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        Ok(sink::write_file(path, &self.bytes())?)
    }
}

impl Encode for Struct {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        Struct::size(self)
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        for member in &self.members {
            member.write_to(out);
        }
    }

    fn bytes(&self) -> Vec<u8> {
        Struct::bytes(self)
    }
}
