//! bytestruct - Dynamic Binary Layout Engine
//!
//! Arsitektur:
//! - Field: typed, self-encoding unit (integer, float, array, string)
//! - Struct: ordered composite of fields, juga bisa dipakai sebagai field
//! - Big-endian: semua numeric field, tanpa pengecualian
//! - Lazy: `size()` dan `bytes()` selalu dihitung ulang dari value saat ini
//!
//! ```
//! use bytestruct::{Field, Struct};
//!
//! let mut s = Struct::with_members(
//!     "TestStruct",
//!     [
//!         Field::uint8("a", 0x7F),
//!         Field::uint16("b", 0x925A),
//!         Field::uint32("c", 123123123),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(s.bytes(), [0x7F, 0x92, 0x5A, 0x07, 0x56, 0xB5, 0xB3]);
//!
//! s.remove_member("b");
//! assert_eq!(s.size(), 5);
//! assert_eq!(s.offset_of("c"), Some(1));
//! ```

pub mod codec;
pub mod field;
pub mod layout;
pub mod sink;

mod error;

pub use codec::{from_fn, DecodeOptions, Decoder, DefaultInterpreter, Interpretation, Interpreter};
pub use error::{LayoutError, Result};
pub use field::{Encode, Field, FloatWidth, IntWidth, Value};
pub use layout::{Insert, NameCheck, Struct, RESERVED_NAMES};
