//! Fixed-width numeric fields (scalar dan array)
//!
//! Semua encoding big-endian: byte 0 adalah most significant byte.
//! Encoding dilakukan eksplisit per width via `to_be_bytes`, tidak pernah
//! lewat raw cast yang bergantung pada endianness host.

/// Lebar integer dalam bytes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    U8 = 1,
    U16 = 2,
    U32 = 4,
    U64 = 8,
}

impl IntWidth {
    #[inline(always)]
    pub fn from_bytes(n: usize) -> Option<Self> {
        match n {
            1 => Some(Self::U8),
            2 => Some(Self::U16),
            4 => Some(Self::U32),
            8 => Some(Self::U64),
            _ => None,
        }
    }

    /// Jumlah bytes per value
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Mask untuk membuang bit di atas width
    #[inline(always)]
    pub const fn mask(self) -> u64 {
        match self {
            Self::U8 => 0xFF,
            Self::U16 => 0xFFFF,
            Self::U32 => 0xFFFF_FFFF,
            Self::U64 => u64::MAX,
        }
    }

    #[inline(always)]
    pub(crate) fn encode(self, value: u64, out: &mut Vec<u8>) {
        match self {
            Self::U8 => out.push(value as u8),
            Self::U16 => out.extend_from_slice(&(value as u16).to_be_bytes()),
            Self::U32 => out.extend_from_slice(&(value as u32).to_be_bytes()),
            Self::U64 => out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Decode `self.bytes()` big-endian bytes. Extra bytes diabaikan.
    #[inline(always)]
    pub(crate) fn decode(self, raw: &[u8]) -> u64 {
        raw[..self.bytes()]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }
}

/// Lebar float dalam bytes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32 = 4,
    F64 = 8,
}

impl FloatWidth {
    #[inline(always)]
    pub fn from_bytes(n: usize) -> Option<Self> {
        match n {
            4 => Some(Self::F32),
            8 => Some(Self::F64),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Bulatkan value ke presisi width ini
    #[inline(always)]
    pub fn round(self, value: f64) -> f64 {
        self.from_bits(self.to_bits(value))
    }

    /// Bit pattern IEEE-754 untuk width ini, di low bits `u64`
    #[inline(always)]
    pub fn to_bits(self, value: f64) -> u64 {
        match self {
            Self::F32 => (value as f32).to_bits() as u64,
            Self::F64 => value.to_bits(),
        }
    }

    #[inline(always)]
    pub fn from_bits(self, bits: u64) -> f64 {
        match self {
            Self::F32 => f32::from_bits(bits as u32) as f64,
            Self::F64 => f64::from_bits(bits),
        }
    }

    #[inline(always)]
    pub(crate) fn encode(self, bits: u64, out: &mut Vec<u8>) {
        match self {
            Self::F32 => out.extend_from_slice(&(bits as u32).to_be_bytes()),
            Self::F64 => out.extend_from_slice(&bits.to_be_bytes()),
        }
    }

    /// Decode raw bits tanpa konversi lewat float (NaN payload tetap utuh)
    #[inline(always)]
    pub(crate) fn decode(self, raw: &[u8]) -> u64 {
        raw[..self.bytes()]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }
}

/// Unsigned integer field (1/2/4/8 bytes)
///
/// Value selalu di-mask ke width: assignment tidak pernah gagal.
#[derive(Debug, Clone, PartialEq)]
pub struct IntField {
    name: String,
    width: IntWidth,
    value: u64,
}

impl IntField {
    pub fn new(name: impl Into<String>, width: IntWidth, value: u64) -> Self {
        Self {
            name: name.into(),
            width,
            value: value & width.mask(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn width(&self) -> IntWidth {
        self.width
    }

    #[inline(always)]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[inline(always)]
    pub fn set(&mut self, value: u64) {
        self.value = value & self.width.mask();
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.width.bytes()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        self.width.encode(self.value, out);
    }

    pub(crate) fn load(&mut self, raw: &[u8]) {
        self.value = self.width.decode(raw);
    }
}

/// IEEE-754 float field (4/8 bytes)
///
/// Disimpan sebagai raw bits: decode lalu encode selalu bit-exact,
/// termasuk signaling NaN pada float32.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatField {
    name: String,
    width: FloatWidth,
    bits: u64,
}

impl FloatField {
    pub fn new(name: impl Into<String>, width: FloatWidth, value: f64) -> Self {
        Self {
            name: name.into(),
            width,
            bits: width.to_bits(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn width(&self) -> FloatWidth {
        self.width
    }

    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.width.from_bits(self.bits)
    }

    /// Raw bit pattern persis seperti yang di-encode
    #[inline(always)]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    #[inline(always)]
    pub fn set(&mut self, value: f64) {
        self.bits = self.width.to_bits(value);
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.width.bytes()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        self.width.encode(self.bits, out);
    }

    pub(crate) fn load(&mut self, raw: &[u8]) {
        self.bits = self.width.decode(raw);
    }
}

/// Array of unsigned integers, tanpa framing atau separator.
///
/// Elemen 64-bit disimpan sebagai `u64`, bukan `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntArrayField {
    name: String,
    width: IntWidth,
    values: Vec<u64>,
}

impl IntArrayField {
    pub fn new(name: impl Into<String>, width: IntWidth, values: impl IntoIterator<Item = u64>) -> Self {
        let mask = width.mask();
        Self {
            name: name.into(),
            width,
            values: values.into_iter().map(|v| v & mask).collect(),
        }
    }

    /// Array berisi `len` elemen nol
    pub fn zeroed(name: impl Into<String>, width: IntWidth, len: usize) -> Self {
        Self {
            name: name.into(),
            width,
            values: vec![0; len],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> IntWidth {
        self.width
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn set(&mut self, values: impl IntoIterator<Item = u64>) {
        let mask = self.width.mask();
        self.values = values.into_iter().map(|v| v & mask).collect();
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.values.len() * self.width.bytes()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        for &v in &self.values {
            self.width.encode(v, out);
        }
    }

    pub(crate) fn load(&mut self, raw: &[u8]) {
        let width = self.width;
        for (slot, chunk) in self.values.iter_mut().zip(raw.chunks_exact(width.bytes())) {
            *slot = width.decode(chunk);
        }
    }
}

/// Array of floats (4/8 bytes per elemen), disimpan sebagai raw bits
#[derive(Debug, Clone, PartialEq)]
pub struct FloatArrayField {
    name: String,
    width: FloatWidth,
    bits: Vec<u64>,
}

impl FloatArrayField {
    pub fn new(name: impl Into<String>, width: FloatWidth, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            name: name.into(),
            width,
            bits: values.into_iter().map(|v| width.to_bits(v)).collect(),
        }
    }

    pub fn zeroed(name: impl Into<String>, width: FloatWidth, len: usize) -> Self {
        Self {
            name: name.into(),
            width,
            bits: vec![0; len],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> FloatWidth {
        self.width
    }

    pub fn values(&self) -> Vec<f64> {
        let width = self.width;
        self.bits.iter().map(|&b| width.from_bits(b)).collect()
    }

    pub fn bits(&self) -> &[u64] {
        &self.bits
    }

    pub fn set(&mut self, values: impl IntoIterator<Item = f64>) {
        let width = self.width;
        self.bits = values.into_iter().map(|v| width.to_bits(v)).collect();
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.bits.len() * self.width.bytes()
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        for &b in &self.bits {
            self.width.encode(b, out);
        }
    }

    pub(crate) fn load(&mut self, raw: &[u8]) {
        let width = self.width;
        for (slot, chunk) in self.bits.iter_mut().zip(raw.chunks_exact(width.bytes())) {
            *slot = width.decode(chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_int(width: IntWidth, value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        IntField::new("x", width, value).write_to(&mut out);
        out
    }

    #[test]
    fn test_int_big_endian() {
        assert_eq!(encode_int(IntWidth::U8, 0x7F), [0x7F]);
        assert_eq!(encode_int(IntWidth::U16, 0x925A), [0x92, 0x5A]);
        assert_eq!(encode_int(IntWidth::U32, 123_123_123), [0x07, 0x56, 0xB5, 0xB3]);
        assert_eq!(
            encode_int(IntWidth::U64, 0x0102_0304_0506_0708),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_int_masking() {
        let mut field = IntField::new("x", IntWidth::U8, 0x1FF);
        assert_eq!(field.value(), 0xFF);

        field.set(0x1_2345);
        assert_eq!(field.value(), 0x45);

        let wide = IntField::new("y", IntWidth::U16, 0xABCD_EF01);
        assert_eq!(wide.value(), 0xEF01);
    }

    #[test]
    fn test_u64_keeps_full_precision() {
        // Di atas 2^53, f64 sudah kehilangan presisi
        let value = u64::MAX - 1;
        let field = IntField::new("big", IntWidth::U64, value);
        let mut out = Vec::new();
        field.write_to(&mut out);

        let mut decoded = IntField::new("big", IntWidth::U64, 0);
        decoded.load(&out);
        assert_eq!(decoded.value(), value);
    }

    #[test]
    fn test_float_bit_exact() {
        let field = FloatField::new("pi", FloatWidth::F64, std::f64::consts::PI);
        let mut out = Vec::new();
        field.write_to(&mut out);
        assert_eq!(out, std::f64::consts::PI.to_be_bytes());

        let mut decoded = FloatField::new("pi", FloatWidth::F64, 0.0);
        decoded.load(&out);
        assert_eq!(decoded.value().to_bits(), std::f64::consts::PI.to_bits());
    }

    #[test]
    fn test_float32_rounds_on_set() {
        let field = FloatField::new("f", FloatWidth::F32, 0.1);
        assert_eq!(field.value(), 0.1f32 as f64);

        let mut out = Vec::new();
        field.write_to(&mut out);
        assert_eq!(out, 0.1f32.to_be_bytes());
        assert_eq!(field.size(), 4);
    }

    #[test]
    fn test_int_array_layout() {
        let arr = IntArrayField::new("v", IntWidth::U16, [420, 69]);
        let mut out = Vec::new();
        arr.write_to(&mut out);

        assert_eq!(arr.size(), 4);
        assert_eq!(out, [0x01, 0xA4, 0x00, 0x45]);
    }

    #[test]
    fn test_zeroed_arrays() {
        let arr = IntArrayField::zeroed("pad", IntWidth::U8, 4);
        assert_eq!(arr.size(), 4);
        assert_eq!(arr.values(), &[0, 0, 0, 0]);

        let floats = FloatArrayField::zeroed("refl", FloatWidth::F32, 3);
        assert_eq!(floats.size(), 12);
        assert_eq!(floats.values(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_float32_signaling_nan_survives_reload() {
        // Signaling NaN: quiet bit (0x0040_0000) mati
        let raw = [0x7F, 0x80, 0x00, 0x01];

        let mut field = FloatField::new("f", FloatWidth::F32, 0.0);
        field.load(&raw);
        assert!(field.value().is_nan());
        assert_eq!(field.bits(), 0x7F80_0001);

        let mut out = Vec::new();
        field.write_to(&mut out);
        assert_eq!(out, raw);

        let mut arr = FloatArrayField::zeroed("v", FloatWidth::F32, 2);
        arr.load(&[0x7F, 0x80, 0x00, 0x01, 0xFF, 0x80, 0x00, 0x02]);
        let mut out = Vec::new();
        arr.write_to(&mut out);
        assert_eq!(out, [0x7F, 0x80, 0x00, 0x01, 0xFF, 0x80, 0x00, 0x02]);
    }

    #[test]
    fn test_u64_array_precision() {
        let arr = IntArrayField::new("big", IntWidth::U64, [0xFFFF_FFFF_FFFF, u64::MAX]);
        let mut out = Vec::new();
        arr.write_to(&mut out);
        assert_eq!(out.len(), 16);
        assert_eq!(&out[8..], &[0xFF; 8]);
        assert_eq!(&out[..8], &[0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_width_lookup() {
        assert_eq!(IntWidth::from_bytes(4), Some(IntWidth::U32));
        assert_eq!(IntWidth::from_bytes(3), None);
        assert_eq!(FloatWidth::from_bytes(8), Some(FloatWidth::F64));
        assert_eq!(FloatWidth::from_bytes(2), None);
    }
}
