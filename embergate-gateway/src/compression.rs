//! Decompression of the continuous zlib-stream Discord sends across every
//! binary frame of a compressed connection for the lifetime of a session.

use flate2::{Decompress, DecompressError, FlushDecompress};
use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Marker Discord appends to the end of a complete zlib-stream message.
///
/// <https://discord.com/developers/docs/topics/gateway#transport-compression-transport-compression-example>
const ZLIB_SUFFIX: [u8; 4] = [0x00, 0x00, 0xff, 0xff];

const INTERNAL_BUFFER_SIZE: usize = 32 * 1024;

/// A frame could not be decompressed.
#[derive(Debug)]
pub struct CompressionError {
    source: DecompressError,
}

impl Display for CompressionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a frame could not be decompressed")
    }
}

impl StdError for CompressionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

/// Buffers binary frames into a single continuous zlib stream and yields
/// complete JSON messages as they close (Discord signals completion with a
/// trailing [`ZLIB_SUFFIX`]).
#[derive(Debug)]
pub struct Inflater {
    decompress: Decompress,
    compressed: Vec<u8>,
    internal_buffer: Vec<u8>,
    buffer: Vec<u8>,
}

impl Inflater {
    pub fn new() -> Self {
        Self {
            decompress: Decompress::new(true),
            compressed: Vec::new(),
            internal_buffer: Vec::with_capacity(INTERNAL_BUFFER_SIZE),
            buffer: Vec::with_capacity(INTERNAL_BUFFER_SIZE),
        }
    }

    /// Feed a binary frame's payload into the stream.
    pub fn extend(&mut self, slice: &[u8]) {
        self.compressed.extend_from_slice(slice);
    }

    /// Decompress the buffered bytes into a complete message, if the
    /// trailing suffix marking one as finished has arrived yet.
    pub fn msg(&mut self) -> Result<Option<&[u8]>, CompressionError> {
        let length = self.compressed.len();

        if length < 4 || self.compressed[(length - 4)..] != ZLIB_SUFFIX {
            return Ok(None);
        }

        let before = self.decompress.total_in();
        let mut offset = 0;

        loop {
            self.internal_buffer.clear();

            self.decompress
                .decompress_vec(
                    &self.compressed[offset..],
                    &mut self.internal_buffer,
                    FlushDecompress::Sync,
                )
                .map_err(|source| CompressionError { source })?;

            offset = (self.decompress.total_in() - before)
                .try_into()
                .unwrap_or_default();
            self.buffer.extend_from_slice(&self.internal_buffer);

            let not_at_capacity = self.internal_buffer.len() < self.internal_buffer.capacity();
            if not_at_capacity || offset > self.compressed.len() {
                break;
            }
        }

        self.compressed.clear();

        Ok(Some(&self.buffer))
    }

    /// Clear every buffer after a message has been consumed.
    pub fn clear(&mut self) {
        self.compressed.clear();
        self.internal_buffer.clear();
        self.buffer.clear();
    }

    /// Reset decompression state entirely; required after a disconnect,
    /// since a fresh connection starts a fresh zlib stream.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Inflater;

    const MESSAGE: &[u8] = &[
        120, 156, 52, 201, 65, 10, 131, 48, 16, 5, 208, 187, 252, 117, 82, 98, 169, 32, 115, 21,
        35, 50, 53, 67, 27, 136, 81, 226, 216, 82, 66, 238, 222, 110, 186, 123, 240, 42, 20, 148,
        207, 148, 12, 142, 63, 182, 29, 212, 57, 131, 0, 170, 120, 10, 23, 189, 11, 235, 28, 179,
        74, 121, 113, 2, 221, 186, 107, 255, 251, 89, 11, 47, 2, 26, 49, 122, 60, 88, 229, 205, 31,
        187, 151, 96, 87, 142, 217, 14, 253, 16, 60, 76, 245, 88, 227, 82, 182, 195, 131, 220, 197,
        181, 9, 83, 107, 95, 0, 0, 0, 255, 255,
    ];
    const OUTPUT: &[u8] = &[
        123, 34, 116, 34, 58, 110, 117, 108, 108, 44, 34, 115, 34, 58, 110, 117, 108, 108, 44, 34,
        111, 112, 34, 58, 49, 48, 44, 34, 100, 34, 58, 123, 34, 104, 101, 97, 114, 116, 98, 101,
        97, 116, 95, 105, 110, 116, 101, 114, 118, 97, 108, 34, 58, 52, 49, 50, 53, 48, 44, 34, 95,
        116, 114, 97, 99, 101, 34, 58, 91, 34, 91, 92, 34, 103, 97, 116, 101, 119, 97, 121, 45,
        112, 114, 100, 45, 109, 97, 105, 110, 45, 56, 53, 56, 100, 92, 34, 44, 123, 92, 34, 109,
        105, 99, 114, 111, 115, 92, 34, 58, 48, 46, 48, 125, 93, 34, 93, 125, 125,
    ];

    #[test]
    fn incomplete_payload_yields_none() {
        let mut inflater = Inflater::new();
        inflater.extend(&MESSAGE[..MESSAGE.len() - 2]);
        assert!(inflater.msg().unwrap().is_none());
    }

    #[test]
    fn complete_payload_decompresses_and_clears_compressed_buffer() {
        let mut inflater = Inflater::new();
        inflater.extend(MESSAGE);

        assert_eq!(Some(OUTPUT), inflater.msg().unwrap());
        assert!(inflater.compressed.is_empty());
    }

    #[test]
    fn reset_drops_decompressor_state() {
        let mut inflater = Inflater::new();
        inflater.extend(b"partial");
        inflater.reset();
        assert!(inflater.compressed.is_empty());
    }
}
