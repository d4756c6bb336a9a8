//! Codec Layer: decode buffer kembali ke member values
//!
//! Prinsip desain:
//! - Inversion of control: `Interpreter` diberikan eksplisit ke decoder
//! - Default decode: baca tepat `size()` bytes, big-endian
//! - All-or-nothing: struct hanya di-update jika seluruh decode sukses

mod decoder;

pub use decoder::Decoder;

use crate::field::Field;

/// Jawaban interpreter untuk satu member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    /// Interpreter sudah mengisi value member dan mengkonsumsi `n` bytes
    Consumed(usize),
    /// Pakai default decode milik field
    UseDefault,
}

/// Strategy hook invoked per member while decoding a buffer.
///
/// Dibutuhkan untuk field yang ukurannya tidak bisa ditentukan dari buffer
/// saja, misalnya string dengan length prefix di member sebelumnya.
pub trait Interpreter {
    fn interpret(
        &mut self,
        buffer: &[u8],
        offset: usize,
        member: &mut Field,
        previous: Option<&Field>,
    ) -> Interpretation;
}

/// Interpreter yang selalu memakai default decode
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInterpreter;

impl Interpreter for DefaultInterpreter {
    #[inline(always)]
    fn interpret(&mut self, _: &[u8], _: usize, _: &mut Field, _: Option<&Field>) -> Interpretation {
        Interpretation::UseDefault
    }
}

/// Interpreter dari closure, lihat [`from_fn`]
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Bungkus closure sebagai `Interpreter`
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&[u8], usize, &mut Field, Option<&Field>) -> Interpretation,
{
    FromFn(f)
}

impl<F> Interpreter for FromFn<F>
where
    F: FnMut(&[u8], usize, &mut Field, Option<&Field>) -> Interpretation,
{
    #[inline(always)]
    fn interpret(
        &mut self,
        buffer: &[u8],
        offset: usize,
        member: &mut Field,
        previous: Option<&Field>,
    ) -> Interpretation {
        (self.0)(buffer, offset, member, previous)
    }
}

/// Decode configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Izinkan sisa bytes setelah member terakhir
    pub allow_trailing: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            allow_trailing: true,
        }
    }
}

impl DecodeOptions {
    /// Sisa bytes setelah member terakhir dianggap error
    pub fn strict() -> Self {
        Self {
            allow_trailing: false,
        }
    }

    pub fn allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }
}
