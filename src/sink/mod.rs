//! Sink Layer: hand-off encoded bytes ke file
//!
//! Prinsip desain:
//! - `bytes()` adalah satu-satunya titik hand-off ke I/O
//! - Raw layout: tidak ada header, magic, atau versi di file
//! - Mmap-backed: write langsung ke page cache, read tanpa copy

mod mmap_file;

pub use mmap_file::{write_file, MappedFile};
