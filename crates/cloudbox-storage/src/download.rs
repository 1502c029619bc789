//! Object download streams and saving them to local files.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::source::{DataSource, SyntheticStream};

/// Body of a downloaded object, yielded in chunks.
///
/// The registry keeps sizes, not payloads, so the body is generated filler.
/// It always totals exactly the object's `size`.
#[derive(Debug)]
pub struct ObjectStream {
    container: String,
    object: String,
    body: SyntheticStream,
}

impl ObjectStream {
    pub(crate) fn new(container: &str, object: &str, size: u64, chunk_size: usize) -> Self {
        Self {
            container: container.to_string(),
            object: object.to_string(),
            body: SyntheticStream::sized(size, chunk_size),
        }
    }

    /// Name of the container the object was read from.
    pub fn container_name(&self) -> &str {
        &self.container
    }

    /// Name of the object being streamed.
    pub fn object_name(&self) -> &str {
        &self.object
    }

    /// Length of each chunk; the last chunk may be shorter.
    pub fn chunk_size(&self) -> usize {
        self.body.chunk_len()
    }
}

impl DataSource for ObjectStream {
    fn declared_len(&self) -> u64 {
        self.body.declared_len()
    }
}

impl Iterator for ObjectStream {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        self.body.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.body.size_hint()
    }
}

/// Write `stream` to `destination`, returning the number of bytes written.
pub(crate) fn save_stream(
    stream: ObjectStream,
    destination: &Path,
    overwrite_existing: bool,
    delete_on_failure: bool,
) -> StorageResult<u64> {
    let file = if overwrite_existing {
        File::create(destination)
    } else {
        File::create_new(destination)
    }
    .map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => StorageError::DestinationExists {
            path: destination.to_path_buf(),
        },
        _ => StorageError::io(destination, e),
    })?;

    write_download(stream, BufWriter::new(file), destination, delete_on_failure)
}

/// Copy `stream` into an already-created `destination`.
///
/// On a write failure the file is removed when `delete_on_failure` is set.
fn write_download<W: Write>(
    stream: ObjectStream,
    writer: W,
    destination: &Path,
    delete_on_failure: bool,
) -> StorageResult<u64> {
    let container = stream.container.clone();
    let object = stream.object.clone();

    match copy_chunks(stream, writer) {
        Ok(written) => {
            debug!(
                container = %container,
                object = %object,
                bytes = written,
                path = %destination.display(),
                "object downloaded"
            );
            Ok(written)
        }
        Err(e) => {
            if delete_on_failure {
                if let Err(rm) = fs::remove_file(destination) {
                    warn!(path = %destination.display(), error = %rm, "failed to remove partial download");
                }
            }
            Err(StorageError::io(destination, e))
        }
    }
}

fn copy_chunks<W: Write>(stream: ObjectStream, mut writer: W) -> io::Result<u64> {
    let mut written = 0u64;
    for chunk in stream {
        writer.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    writer.flush()?;
    Ok(written)
}
