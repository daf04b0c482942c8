//! zlib helpers for table and payload compression.

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::io::{Read, Write};
use vnarc_core::error::{Result, VnArcError};

/// Compress `data` into a zlib stream.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflate at most `limit` bytes, keeping whatever was produced before an
/// error.
fn inflate_bounded(data: &[u8], limit: u64) -> (Vec<u8>, std::io::Result<usize>) {
    let mut output = Vec::new();
    let result = ZlibDecoder::new(data)
        .take(limit)
        .read_to_end(&mut output);
    (output, result)
}

/// Decompress a zlib payload that should expand to `expected` bytes.
///
/// At most one byte more than expected is produced, so the caller can
/// detect oversized payloads without inflating all of them.
pub fn decompress(data: &[u8], expected: u64) -> Result<Vec<u8>> {
    let (output, result) = inflate_bounded(data, expected.saturating_add(1));
    result?;
    Ok(output)
}

/// Decompress a file table of `expected` bytes.
///
/// A stream that is truncated or expands to a different length is reported
/// as [`VnArcError::BadTableSize`]; other stream corruption is an I/O error.
pub fn decompress_table(data: &[u8], expected: u64) -> Result<Vec<u8>> {
    let (output, result) = inflate_bounded(data, expected.saturating_add(1));
    if output.len() as u64 != expected {
        return Err(VnArcError::bad_table_size(expected, output.len() as u64));
    }
    result?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_roundtrip() {
        let data = b"zlib zlib zlib zlib zlib zlib".repeat(10);
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(compressed[0], 0x78);
        assert_eq!(decompress(&compressed, data.len() as u64).unwrap(), data);
    }

    #[test]
    fn test_decompress_is_bounded() {
        let compressed = compress(&[0u8; 10_000]).unwrap();
        let output = decompress(&compressed, 100).unwrap();
        assert_eq!(output.len(), 101);
    }

    #[test]
    fn test_truncated_table() {
        let table = b"table entry bytes that do not repeat much: 0123456789".to_vec();
        let compressed = compress(&table).unwrap();
        let truncated = &compressed[..compressed.len() / 2];

        let err = decompress_table(truncated, table.len() as u64).unwrap_err();
        assert!(matches!(
            err,
            VnArcError::BadTableSize { expected, .. } if expected == table.len() as u64
        ));
    }

    #[test]
    fn test_table_length_mismatch() {
        let compressed = compress(b"short").unwrap();
        let err = decompress_table(&compressed, 64).unwrap_err();
        assert!(matches!(
            err,
            VnArcError::BadTableSize {
                expected: 64,
                actual: 5
            }
        ));
        assert_eq!(decompress_table(&compressed, 5).unwrap(), b"short");
    }
}
