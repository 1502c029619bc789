//! Upload sources and the local file probe.
//!
//! The registry never consumes payload bytes. A [`DataSource`] only has to
//! say, up front, how many bytes it would deliver.

use std::io;
use std::path::Path;

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{StorageError, StorageResult};

/// A byte source whose total length is known before upload.
pub trait DataSource {
    /// Total number of bytes the source would deliver.
    fn declared_len(&self) -> u64;
}

impl DataSource for [u8] {
    fn declared_len(&self) -> u64 {
        self.len() as u64
    }
}

impl DataSource for Vec<u8> {
    fn declared_len(&self) -> u64 {
        self.len() as u64
    }
}

impl DataSource for str {
    fn declared_len(&self) -> u64 {
        self.len() as u64
    }
}

impl DataSource for String {
    fn declared_len(&self) -> u64 {
        self.len() as u64
    }
}

impl DataSource for Bytes {
    fn declared_len(&self) -> u64 {
        self.len() as u64
    }
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn declared_len(&self) -> u64 {
        (**self).declared_len()
    }
}

/// A generated stream of lowercase ASCII chunks.
///
/// Used as an upload fixture and as the body of downloads, since the
/// registry keeps no payload. The declared length is fixed at construction
/// and does not change as chunks are consumed.
#[derive(Debug)]
pub struct SyntheticStream {
    total: u64,
    emitted: u64,
    chunk_len: usize,
    rng: StdRng,
}

impl SyntheticStream {
    /// `chunk_count` chunks of exactly `chunk_len` bytes each.
    ///
    /// A total beyond `u64::MAX` saturates; use [`SyntheticStream::try_new`]
    /// for caller-supplied sizes.
    pub fn new(chunk_count: usize, chunk_len: usize) -> Self {
        let total = (chunk_count as u64).saturating_mul(chunk_len as u64);
        Self::sized(total, chunk_len)
    }

    /// Like [`SyntheticStream::new`], failing with `SizeOverflow` when the
    /// total length does not fit in a `u64`.
    pub fn try_new(chunk_count: usize, chunk_len: usize) -> StorageResult<Self> {
        let total = (chunk_count as u64)
            .checked_mul(chunk_len as u64)
            .ok_or(StorageError::SizeOverflow {
                chunk_count,
                chunk_len,
            })?;
        Ok(Self::sized(total, chunk_len))
    }

    /// `total` bytes split into `chunk_len` chunks; the last may be short.
    ///
    /// A zero `chunk_len` is treated as 1.
    pub fn sized(total: u64, chunk_len: usize) -> Self {
        Self {
            total,
            emitted: 0,
            chunk_len: chunk_len.max(1),
            rng: StdRng::from_entropy(),
        }
    }

    /// Chunk length used when splitting the stream.
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Bytes not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.total - self.emitted
    }
}

impl DataSource for SyntheticStream {
    fn declared_len(&self) -> u64 {
        self.total
    }
}

impl Iterator for SyntheticStream {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        let remaining = self.remaining();
        if remaining == 0 {
            return None;
        }
        let n = remaining.min(self.chunk_len as u64) as usize;
        let chunk: Vec<u8> = (0..n).map(|_| self.rng.gen_range(b'a'..=b'z')).collect();
        self.emitted += n as u64;
        Some(Bytes::from(chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = self.remaining().div_ceil(self.chunk_len as u64);
        let chunks = usize::try_from(chunks).unwrap_or(usize::MAX);
        (chunks, Some(chunks))
    }
}

/// Size in bytes of the regular file at `path`.
///
/// Fails with [`StorageError::Io`] when the path is missing, unreadable, or
/// not a regular file.
pub fn probe_file_size(path: impl AsRef<Path>) -> StorageResult<u64> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path).map_err(|e| StorageError::io(path, e))?;
    if !meta.is_file() {
        return Err(StorageError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    Ok(meta.len())
}
