//! Fixed 44-byte RIFF/WAVE header.

use super::format::{FMT_CHUNK_SIZE, FormatChunk};
use crate::error::{Error, Result};
use std::io::{self, Write};

pub const RIFF_TAG: &[u8; 4] = b"RIFF";
pub const WAVE_TAG: &[u8; 4] = b"WAVE";
pub const FMT_TAG: &[u8; 4] = b"fmt ";
pub const DATA_TAG: &[u8; 4] = b"data";

/// Bytes from the start of the file to the first payload byte.
pub const HEADER_SIZE: usize = 44;

/// Header bytes counted by the RIFF size field, excluding the payload.
pub const RIFF_OVERHEAD: u32 = WAVE_TAG.len() as u32 + (8 + FMT_CHUNK_SIZE) + 8;

/// Field writer that stops at the first failure.
///
/// Later fields are skipped once one fails, and the failure is reported by
/// [`finish`](HeaderWriter::finish) after the caller has walked the whole
/// field sequence. What reaches the output is a prefix of whole fields.
/// Each field goes out with `write_all`, so a field is only torn when the
/// sink accepts part of it and then errors; nothing after it is written.
pub struct HeaderWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    written: usize,
    err: Option<io::Error>,
}

impl<'a, W: Write + ?Sized> HeaderWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            written: 0,
            err: None,
        }
    }

    pub fn tag(&mut self, tag: &[u8; 4]) -> &mut Self {
        self.put(tag)
    }

    pub fn u16_le(&mut self, value: u16) -> &mut Self {
        self.put(&value.to_le_bytes())
    }

    pub fn u32_le(&mut self, value: u32) -> &mut Self {
        self.put(&value.to_le_bytes())
    }

    /// Bytes written on success, or the first field error.
    pub fn finish(self) -> Result<usize> {
        match self.err {
            Some(err) => Err(Error::HeaderSerialization(err)),
            None => Ok(self.written),
        }
    }

    fn put(&mut self, bytes: &[u8]) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        match self.out.write_all(bytes) {
            Ok(()) => self.written += bytes.len(),
            Err(err) => self.err = Some(err),
        }
        self
    }
}

/// Header values resolved at finalize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_size: u32,
    pub format: FormatChunk,
    pub data_size: u32,
}

impl WavHeader {
    /// Header for a payload of `data_size` bytes. `None` if the RIFF size
    /// would overflow.
    pub fn new(format: FormatChunk, data_size: u32) -> Option<Self> {
        let riff_size = RIFF_OVERHEAD.checked_add(data_size)?;
        Some(Self {
            riff_size,
            format,
            data_size,
        })
    }

    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> Result<usize> {
        let fmt = &self.format;
        let mut w = HeaderWriter::new(out);
        w.tag(RIFF_TAG).u32_le(self.riff_size).tag(WAVE_TAG);
        w.tag(FMT_TAG)
            .u32_le(FMT_CHUNK_SIZE)
            .u16_le(fmt.format_tag)
            .u16_le(fmt.channels)
            .u32_le(fmt.sample_rate)
            .u32_le(fmt.byte_rate)
            .u16_le(fmt.block_align)
            .u16_le(fmt.bits_per_sample);
        w.tag(DATA_TAG).u32_le(self.data_size);
        w.finish()
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(RIFF_TAG);
        bytes[4..8].copy_from_slice(&self.riff_size.to_le_bytes());
        bytes[8..12].copy_from_slice(WAVE_TAG);
        bytes[12..16].copy_from_slice(FMT_TAG);
        bytes[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        bytes[20..36].copy_from_slice(&self.format.to_bytes());
        bytes[36..40].copy_from_slice(DATA_TAG);
        bytes[40..44].copy_from_slice(&self.data_size.to_le_bytes());
        bytes
    }
}
