//! Error types untuk layout, accessor, decode dan sink.
//!
//! Semua kondisi bersifat lokal dan recoverable: operasi yang gagal tidak
//! mengubah member list. Truncation string dan integer masking bukan error.

use std::io;
use thiserror::Error;

/// Error type for every fallible operation in the crate
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("struct already has a member named `{name}`")]
    DuplicateName { name: String },

    #[error("`{name}` is a reserved struct operation name")]
    ReservedName { name: String },

    #[error("no member named `{name}`")]
    NotFound { name: String },

    #[error("member `{name}` expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("buffer truncated at member `{member}`: needed {needed} bytes, {available} available")]
    Truncated {
        member: String,
        needed: usize,
        available: usize,
    },

    #[error("member `{member}` holds bytes that are not valid UTF-8")]
    InvalidText { member: String },

    #[error("{remaining} trailing bytes left after decoding")]
    TrailingBytes { remaining: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LayoutError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
