//! Decompression of embedded zlib streams.

use flate2::{Decompress, FlushDecompress, Status};

use crate::{Error, Result};

/// Decompress a zlib stream into `output`.
///
/// The stream must run to its end marker; input that stops early is an
/// error rather than a short result. The output grows as needed, so the
/// expansion ratio is unbounded.
pub fn inflate_into(data: &[u8], context: &'static str, output: &mut Vec<u8>) -> Result<()> {
    let mut decompress = Decompress::new(true);
    let error = |message: String| Error::Decompression { context, message };

    output.clear();
    loop {
        if output.len() == output.capacity() {
            output.reserve(data.len().max(64));
        }

        let consumed = decompress.total_in();
        let produced = decompress.total_out();
        let status = decompress
            .decompress_vec(&data[consumed as usize..], output, FlushDecompress::None)
            .map_err(|e| error(e.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(()),
            _ if decompress.total_in() == consumed && decompress.total_out() == produced => {
                return Err(error(format!(
                    "stream truncated after {} of {} bytes",
                    consumed,
                    data.len()
                )));
            }
            _ => {}
        }
    }
}

/// Decompress a zlib stream.
///
/// `context` names the chunk being decoded and ends up in the error message.
pub fn inflate(data: &[u8], context: &'static str) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len().saturating_mul(4));
    inflate_into(data, context, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::zlib;

    #[test]
    fn test_zlib_roundtrip() {
        let original = b"0123456789abcdef0123456789abcdef".repeat(8);
        let decompressed = inflate(&zlib(&original), "test").unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_large_output_grows_buffer() {
        let original = vec![3u8; 64 * 1024];
        let decompressed = inflate(&zlib(&original), "test").unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_highly_compressible_payloads() {
        for size in [16, 64, 128, 256, 1024, 40 * 20 * 4] {
            let original = vec![7u8; size];
            let compressed = zlib(&original);
            assert!(compressed.len() * 4 < size || size <= 64);
            assert_eq!(inflate(&compressed, "test").unwrap(), original, "size {}", size);
        }
    }

    #[test]
    fn test_inflate_into_reuses_buffer() {
        let mut output = vec![1, 2, 3];
        inflate_into(&zlib(&[0u8; 4096]), "test", &mut output).unwrap();
        assert_eq!(output, vec![0u8; 4096]);
    }

    #[test]
    fn test_corrupt_stream() {
        let err = inflate(&[0x78, 0x9c, 0xff, 0xff, 0x00], "tileset").unwrap_err();
        assert!(matches!(err, Error::Decompression { context: "tileset", .. }));
    }

    #[test]
    fn test_truncated_stream() {
        let mut compressed = zlib(&[7u8; 256]);
        compressed.truncate(compressed.len() / 2);
        let err = inflate(&compressed, "cel").unwrap_err();
        assert!(matches!(err, Error::Decompression { context: "cel", .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(inflate(&[], "cel").is_err());
    }
}
