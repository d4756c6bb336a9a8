//! Buffer decoder
//!
//! Traversal: member berurutan, depth-first ke nested struct.
//! Untuk setiap member interpreter ditanya dulu, lalu fallback ke default.

use tracing::trace;

use super::{DecodeOptions, Interpretation, Interpreter};
use crate::error::{LayoutError, Result};
use crate::field::{Encode, Field};
use crate::layout::Struct;

/// Decoder over a borrowed buffer
pub struct Decoder<'a> {
    buffer: &'a [u8],
    read_pos: usize,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    /// Membuat decoder dari buffer
    #[inline(always)]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_options(buffer, DecodeOptions::default())
    }

    #[inline(always)]
    pub fn with_options(buffer: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            buffer,
            read_pos: 0,
            options,
        }
    }

    /// Decode buffer ke `target`, mulai dari posisi baca saat ini.
    ///
    /// Decode dilakukan ke salinan; `target` hanya di-update jika sukses.
    /// Returns jumlah bytes yang dikonsumsi.
    pub fn decode_into<I: Interpreter + ?Sized>(&mut self, target: &mut Struct, interpreter: &mut I) -> Result<usize> {
        let start = self.read_pos;
        let mut staged = target.clone();

        if let Err(e) = self.decode_members(&mut staged, interpreter) {
            self.read_pos = start;
            return Err(e);
        }

        if !self.options.allow_trailing && self.remaining() > 0 {
            let remaining = self.remaining();
            self.read_pos = start;
            return Err(LayoutError::TrailingBytes { remaining });
        }

        *target = staged;
        Ok(self.read_pos - start)
    }

    fn decode_members<I: Interpreter + ?Sized>(&mut self, s: &mut Struct, interpreter: &mut I) -> Result<()> {
        let members = s.members_mut();

        for i in 0..members.len() {
            let (before, rest) = members.split_at_mut(i);
            let member = &mut rest[0];
            let previous = before.last();
            let offset = self.read_pos;

            match interpreter.interpret(self.buffer, offset, member, previous) {
                Interpretation::Consumed(n) => {
                    self.ensure(member.name(), n)?;
                    self.read_pos += n;
                }
                Interpretation::UseDefault => self.decode_default(member, interpreter)?,
            }

            trace!(
                member = member.name(),
                offset,
                consumed = self.read_pos - offset,
                "decoded member"
            );
        }

        Ok(())
    }

    fn decode_default<I: Interpreter + ?Sized>(&mut self, member: &mut Field, interpreter: &mut I) -> Result<()> {
        if let Field::Struct(inner) = member {
            return self.decode_members(inner, interpreter);
        }

        let n = member.size();
        self.ensure(member.name(), n)?;
        member.load(&self.buffer[self.read_pos..self.read_pos + n])?;
        self.read_pos += n;
        Ok(())
    }

    #[inline(always)]
    fn ensure(&self, member: &str, needed: usize) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(LayoutError::Truncated {
                member: member.to_string(),
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Posisi baca saat ini
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.read_pos
    }

    /// Remaining bytes
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }
}
