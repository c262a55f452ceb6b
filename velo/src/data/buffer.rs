//! Read-only byte storage behind the graph tables.

use std::fs::File;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Result, VeloError};

/// Bytes of one graph table, either memory-mapped from disk or owned.
///
/// All multi-byte values are big-endian.
pub enum GraphBuffer {
    /// Memory-mapped file data
    Mapped(Mmap),
    /// Bytes held in memory
    Owned(Vec<u8>),
}

impl GraphBuffer {
    /// Memory-map the file at `path`, checking that its size is a whole
    /// number of `record`-byte records.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist ([`VeloError::FileNotFound`])
    /// - The file cannot be opened or memory-mapped
    /// - The file size is not a multiple of `record`
    pub fn map_file<P: AsRef<Path>>(path: P, record: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VeloError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => VeloError::Io(e),
        })?;

        // An empty file cannot be mapped on every platform.
        if file.metadata()?.len() == 0 {
            return Ok(GraphBuffer::Owned(Vec::new()));
        }

        // SAFETY: Memory mapping is safe as long as the file is not modified
        // while mapped. We open the file read-only and never hand out
        // mutable access to the mapping.
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() % record != 0 {
            return Err(VeloError::InvalidFileSize {
                path: path.to_path_buf(),
                size: mmap.len(),
                record,
            });
        }

        Ok(GraphBuffer::Mapped(mmap))
    }

    /// Read a big-endian `u16` at byte `offset`.
    pub fn u16_at(&self, offset: usize) -> u16 {
        u16::from_be_bytes([self[offset], self[offset + 1]])
    }

    /// Read a big-endian `i32` at byte `offset`.
    pub fn i32_at(&self, offset: usize) -> i32 {
        i32::from_be_bytes([
            self[offset],
            self[offset + 1],
            self[offset + 2],
            self[offset + 3],
        ])
    }

    /// Read a big-endian `i64` at byte `offset`.
    pub fn i64_at(&self, offset: usize) -> i64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self[offset..offset + 8]);
        i64::from_be_bytes(bytes)
    }
}

impl Deref for GraphBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            GraphBuffer::Mapped(mmap) => &mmap[..],
            GraphBuffer::Owned(bytes) => &bytes[..],
        }
    }
}

impl From<Vec<u8>> for GraphBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        GraphBuffer::Owned(bytes)
    }
}

impl std::fmt::Debug for GraphBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            GraphBuffer::Mapped(_) => "Mapped",
            GraphBuffer::Owned(_) => "Owned",
        };
        write!(f, "GraphBuffer::{kind}({} bytes)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_big_endian_reads() {
        let buffer = GraphBuffer::from(vec![
            0x01, 0x02, 0xFF, 0xFF, 0xFF, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
        ]);
        assert_eq!(buffer.u16_at(0), 0x0102);
        assert_eq!(buffer.i32_at(2), -2);
        assert_eq!(buffer.i64_at(6), 0x0100);
    }

    #[test]
    fn test_map_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0, 0, 0, 7, 0, 0, 0, 9]).unwrap();

        let buffer = GraphBuffer::map_file(file.path(), 4).unwrap();
        assert!(matches!(buffer, GraphBuffer::Mapped(_)));
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.i32_at(4), 9);
    }

    #[test]
    fn test_map_file_bad_size() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 13]).unwrap();

        match GraphBuffer::map_file(file.path(), 12) {
            Err(VeloError::InvalidFileSize { size, record, .. }) => {
                assert_eq!(size, 13);
                assert_eq!(record, 12);
            }
            other => panic!("Expected InvalidFileSize error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = GraphBuffer::map_file(dir.path().join("nodes.bin"), 12);
        assert!(matches!(result, Err(VeloError::FileNotFound { .. })));
    }

    #[test]
    fn test_map_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let buffer = GraphBuffer::map_file(file.path(), 10).unwrap();
        assert!(buffer.is_empty());
    }
}
