//! Format descriptor (`fmt ` chunk) and the values derived from it.

use crate::error::{Error, Result};

/// Uncompressed integer PCM.
pub const FORMAT_PCM: u16 = 0x0001;
/// IEEE 754 floating point samples.
pub const FORMAT_IEEE_FLOAT: u16 = 0x0003;
/// ITU G.711 A-law.
pub const FORMAT_ALAW: u16 = 0x0006;
/// ITU G.711 mu-law.
pub const FORMAT_MULAW: u16 = 0x0007;
/// WAVE_FORMAT_EXTENSIBLE.
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Size of the `fmt ` chunk body written by this crate.
pub const FMT_CHUNK_SIZE: u32 = 16;

/// Stream parameters supplied by the caller.
///
/// The format tag is carried through to the header as-is; only its block
/// geometry is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Integer PCM with the given geometry.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            format_tag: FORMAT_PCM,
            channels,
            sample_rate,
            bits_per_sample,
        }
    }
}

/// The `fmt ` chunk body, with block size and byte rate computed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChunk {
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FormatChunk {
    /// Derive the chunk from `format`.
    ///
    /// Block size is `channels × bits_per_sample / 8`, truncated to whole
    /// bytes, and must be non-zero.
    pub fn new(format: &WavFormat) -> Result<Self> {
        let WavFormat {
            format_tag,
            channels,
            sample_rate,
            bits_per_sample,
        } = *format;

        let block_bytes = u32::from(channels) * u32::from(bits_per_sample) / 8;
        if block_bytes == 0 {
            return Err(Error::configuration(
                channels,
                bits_per_sample,
                "block size is zero",
            ));
        }
        let block_align = u16::try_from(block_bytes).map_err(|_| {
            Error::configuration(channels, bits_per_sample, "block size exceeds 65535 bytes")
        })?;
        let byte_rate = u32::from(block_align)
            .checked_mul(sample_rate)
            .ok_or_else(|| {
                Error::configuration(channels, bits_per_sample, "byte rate overflows 32 bits")
            })?;

        Ok(Self {
            format_tag,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
        })
    }

    /// Little-endian body as it appears after the chunk header.
    pub fn to_bytes(&self) -> [u8; FMT_CHUNK_SIZE as usize] {
        let mut bytes = [0u8; FMT_CHUNK_SIZE as usize];
        bytes[0..2].copy_from_slice(&self.format_tag.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.channels.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.byte_rate.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_align_and_byte_rate() {
        let cases = [
            (1u16, 8u16, 8000u32, 1u16),
            (2, 8, 8000, 2),
            (2, 16, 44100, 4),
            (6, 24, 48000, 18),
            (1, 12, 22050, 1),
            (3, 4, 8000, 1),
        ];
        for (channels, bits, rate, block) in cases {
            let chunk = FormatChunk::new(&WavFormat::pcm(channels, rate, bits)).unwrap();
            assert_eq!(chunk.block_align, block, "{channels}ch {bits}bit");
            assert_eq!(chunk.byte_rate, u32::from(block) * rate);
        }
    }

    #[test]
    fn test_zero_block_rejected() {
        for (channels, bits) in [(0u16, 16u16), (2, 0), (1, 4), (1, 7)] {
            let err = FormatChunk::new(&WavFormat::pcm(channels, 8000, bits)).unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }), "{channels}/{bits}");
        }
    }

    #[test]
    fn test_oversized_block_rejected() {
        let err = FormatChunk::new(&WavFormat::pcm(u16::MAX, 8000, 16)).unwrap_err();
        assert!(err.to_string().contains("65535"));
    }

    #[test]
    fn test_byte_rate_overflow_rejected() {
        let err = FormatChunk::new(&WavFormat::pcm(8, u32::MAX, 32)).unwrap_err();
        assert!(err.to_string().contains("byte rate"));
    }

    #[test]
    fn test_opaque_format_tag_carried() {
        let format = WavFormat {
            format_tag: FORMAT_MULAW,
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 8,
        };
        let bytes = FormatChunk::new(&format).unwrap().to_bytes();
        assert_eq!(&bytes[0..2], &[0x07, 0x00]);
    }

    #[test]
    fn test_to_bytes_layout() {
        let chunk = FormatChunk::new(&WavFormat::pcm(2, 44100, 16)).unwrap();
        let bytes = chunk.to_bytes();
        assert_eq!(
            bytes,
            [
                0x01, 0x00, // PCM
                0x02, 0x00, // channels
                0x44, 0xAC, 0x00, 0x00, // 44100
                0x10, 0xB1, 0x02, 0x00, // 176400
                0x04, 0x00, // block align
                0x10, 0x00, // bits
            ]
        );
    }
}
