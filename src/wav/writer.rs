use super::format::{FormatChunk, WavFormat};
use super::header::{RIFF_OVERHEAD, WavHeader};
use super::sample::{Sample, encode_samples};
use super::sink::Sink;
use crate::error::{Error, Result};
use crate::options::EncoderOptions;
use crate::spill::{SpillBuffer, Staging, TempFileStaging};

/// Bytes moved from the spool to the sink per read.
const COPY_BUF_SIZE: usize = 64 * 1024;

/// Largest payload the 32-bit RIFF size field can describe.
pub const MAX_DATA_SIZE: u64 = (u32::MAX - RIFF_OVERHEAD) as u64;

/// Streaming WAV encoder.
///
/// Sample bytes are spooled through a [`SpillBuffer`] because the data chunk
/// size is unknown until the caller is done. [`finalize`](Self::finalize)
/// writes the header with the final sizes, streams the spooled payload to the
/// sink and releases everything.
pub struct WavEncoder<W: Sink, S: Staging = TempFileStaging> {
    sink: W,
    format: FormatChunk,
    data: SpillBuffer<S>,
    frames_written: u64,
}

impl<W: Sink> WavEncoder<W, TempFileStaging> {
    /// Encoder with default spooling options.
    pub fn new(sink: W, format: WavFormat) -> Result<Self> {
        Self::with_options(sink, format, &EncoderOptions::default())
    }

    pub fn with_options(sink: W, format: WavFormat, options: &EncoderOptions) -> Result<Self> {
        // Validate before touching the filesystem.
        let chunk = FormatChunk::new(&format)?;
        let staging = options.create_staging()?;
        Ok(Self::from_parts(sink, chunk, options.chunk_threshold, staging))
    }
}

impl<W: Sink, S: Staging> WavEncoder<W, S> {
    /// Encoder spooling into a caller-provided staging store.
    pub fn with_staging(
        sink: W,
        format: WavFormat,
        chunk_threshold: usize,
        staging: S,
    ) -> Result<Self> {
        let chunk = FormatChunk::new(&format)?;
        Ok(Self::from_parts(sink, chunk, chunk_threshold, staging))
    }

    fn from_parts(sink: W, format: FormatChunk, chunk_threshold: usize, staging: S) -> Self {
        tracing::debug!(
            format_tag = format.format_tag,
            channels = format.channels,
            sample_rate = format.sample_rate,
            bits_per_sample = format.bits_per_sample,
            block_align = format.block_align,
            "created WAV encoder"
        );
        Self {
            sink,
            format,
            data: SpillBuffer::with_staging(chunk_threshold, staging),
            frames_written: 0,
        }
    }

    /// Append raw interleaved sample bytes.
    ///
    /// `raw` must hold one or more complete sample frames. Partial frames
    /// are rejected without buffering anything.
    pub fn write_samples(&mut self, raw: &[u8]) -> Result<usize> {
        let block_align = usize::from(self.format.block_align);
        if raw.len() < block_align || raw.len() % block_align != 0 {
            return Err(Error::Alignment {
                len: raw.len(),
                block_align: self.format.block_align,
            });
        }

        let requested = self.data.data_size() + raw.len() as u64;
        if requested > MAX_DATA_SIZE {
            return Err(Error::DataTooLarge {
                requested,
                limit: MAX_DATA_SIZE,
            });
        }

        let n = self.data.write(raw)?;
        self.frames_written += (raw.len() / block_align) as u64;
        Ok(n)
    }

    /// Encode samples of any supported width and append them.
    pub fn write_typed<T: Sample>(&mut self, samples: &[T]) -> Result<usize> {
        self.write_samples(&encode_samples(samples))
    }

    /// 8-bit unsigned samples.
    pub fn write_u8_samples(&mut self, samples: &[u8]) -> Result<usize> {
        self.write_typed(samples)
    }

    /// 16-bit signed samples.
    pub fn write_i16_samples(&mut self, samples: &[i16]) -> Result<usize> {
        self.write_typed(samples)
    }

    /// 32-bit signed samples.
    pub fn write_i32_samples(&mut self, samples: &[i32]) -> Result<usize> {
        self.write_typed(samples)
    }

    /// Packed 24-bit samples. Not supported.
    pub fn write_i24_samples(&mut self, _samples: &[u8]) -> Result<usize> {
        Err(Error::NotImplemented("24-bit sample packing"))
    }

    pub fn format(&self) -> &FormatChunk {
        &self.format
    }

    pub fn block_align(&self) -> u16 {
        self.format.block_align
    }

    pub fn byte_rate(&self) -> u32 {
        self.format.byte_rate
    }

    /// Complete sample frames accepted so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Payload bytes accepted so far.
    pub fn data_size(&self) -> u64 {
        self.data.data_size()
    }

    /// Write the header and payload, then close the sink and the spool.
    ///
    /// Returns the first error hit. Closing the sink and the spool is
    /// attempted even after a failure; any further errors are logged.
    pub fn finalize(self) -> Result<()> {
        let Self {
            mut sink,
            format,
            mut data,
            frames_written,
        } = self;

        let mut first_err = None;

        match emit(&mut sink, format, &mut data) {
            Ok(()) => {
                tracing::debug!(
                    frames = frames_written,
                    data_size = data.data_size(),
                    "wrote WAV container"
                );
            }
            Err(err) => first_err = Some(err),
        }

        if let Err(err) = sink.close().map_err(Error::Sink) {
            record(&mut first_err, err);
        }
        if let Err(err) = data.close() {
            record(&mut first_err, err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Header first, then the spooled payload in read-sized pieces.
fn emit<W: Sink, S: Staging>(
    sink: &mut W,
    format: FormatChunk,
    data: &mut SpillBuffer<S>,
) -> Result<()> {
    let data_size = data.data_size();
    let header = u32::try_from(data_size)
        .ok()
        .and_then(|size| WavHeader::new(format, size))
        .ok_or(Error::DataTooLarge {
            requested: data_size,
            limit: MAX_DATA_SIZE,
        })?;
    header.write_to(sink)?;

    let mut buf = vec![0u8; COPY_BUF_SIZE];
    loop {
        let n = data.read_next(&mut buf)?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n]).map_err(Error::Sink)?;
    }
    Ok(())
}

fn record(first: &mut Option<Error>, err: Error) {
    if first.is_some() {
        tracing::warn!(error = %err, "additional error while finalizing WAV");
    } else {
        *first = Some(err);
    }
}
