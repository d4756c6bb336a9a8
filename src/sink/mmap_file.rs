//! Memory-mapped file I/O untuk encoded structs
//!
//! File berisi persis bytes hasil `Struct::bytes()`, tanpa metadata.

use memmap2::{Mmap, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::debug;

/// Tulis `data` ke `path` lewat mmap.
///
/// File dibuat atau di-truncate, lalu di-resize tepat ke `data.len()`.
/// Returns jumlah bytes yang ditulis.
pub fn write_file<P: AsRef<Path>>(path: P, data: &[u8]) -> io::Result<usize> {
    let path = path.as_ref();

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    // Mapping dengan panjang 0 ditolak oleh beberapa platform
    if data.is_empty() {
        debug!(path = %path.display(), "wrote empty layout");
        return Ok(0);
    }

    file.set_len(data.len() as u64)?;

    // SAFETY: File baru saja di-truncate dan di-resize oleh proses ini,
    // dan mapping tidak keluar dari fungsi ini
    let mut mmap = unsafe { MmapOptions::new().len(data.len()).map_mut(&file)? };
    mmap.copy_from_slice(data);
    mmap.flush()?;

    debug!(path = %path.display(), len = data.len(), "wrote layout");
    Ok(data.len())
}

/// Read-only mapping of a file holding an encoded layout
pub struct MappedFile {
    // None untuk file kosong
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Buka file dan map seluruh isinya
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            return Ok(Self { mmap: None });
        }

        // SAFETY: Mapping read-only; caller tidak boleh memodifikasi file
        // selama `MappedFile` masih hidup
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    /// Isi file (zero-copy)
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}
