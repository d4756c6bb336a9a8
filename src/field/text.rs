//! String fields
//!
//! - `FixedCharString`: 1 byte per karakter (ASCII/Latin-1 payload)
//! - `VarCharString`: UTF-8, 1-4 bytes per karakter, dibatasi byte budget

use std::string::FromUtf8Error;

/// One byte per character, capped by an optional maximum character count.
///
/// Karakter di atas U+00FF di-truncate ke low 8 bits (lossy).
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCharString {
    name: String,
    value: String,
    max_len: Option<usize>,
}

impl FixedCharString {
    pub fn new(name: impl Into<String>, value: impl Into<String>, max_len: Option<usize>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_len,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    #[inline]
    pub fn size(&self) -> usize {
        let chars = self.value.chars().count();
        self.max_len.map_or(chars, |max| chars.min(max))
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend(self.value.chars().take(self.size()).map(|c| c as u32 as u8));
    }

    /// Setiap byte dibaca sebagai satu karakter Latin-1
    pub(crate) fn load(&mut self, raw: &[u8]) {
        self.value = raw.iter().map(|&b| b as char).collect();
    }
}

/// UTF-8 string capped by an optional byte budget.
///
/// Encoding berhenti tepat sebelum karakter pertama yang tidak muat,
/// sehingga multi-byte character tidak pernah terpotong.
#[derive(Debug, Clone, PartialEq)]
pub struct VarCharString {
    name: String,
    value: String,
    max_bytes: Option<usize>,
}

impl VarCharString {
    pub fn new(name: impl Into<String>, value: impl Into<String>, max_bytes: Option<usize>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Jumlah bytes yang benar-benar ditulis ke buffer berkapasitas `max_bytes`
    fn written(&self) -> usize {
        let cap = self.max_bytes.unwrap_or(usize::MAX);
        let mut written = 0usize;
        for c in self.value.chars() {
            let len = c.len_utf8();
            if written + len > cap {
                break;
            }
            written += len;
        }
        written
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.written()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        // `written()` selalu jatuh di char boundary
        out.extend_from_slice(&self.value.as_bytes()[..self.written()]);
    }

    pub(crate) fn load(&mut self, raw: &[u8]) -> Result<(), FromUtf8Error> {
        self.value = String::from_utf8(raw.to_vec())?;
        Ok(())
    }
}
