//! Fixed-width sample types and their little-endian encoding.

/// A sample value the encoder can serialize.
pub trait Sample: Copy {
    /// Width of one encoded sample.
    const BITS: u16;

    /// Append the little-endian encoding of `self` to `out`.
    fn write_le(self, out: &mut Vec<u8>);
}

impl Sample for u8 {
    const BITS: u16 = 8;

    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self);
    }
}

impl Sample for i16 {
    const BITS: u16 = 16;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Sample for i32 {
    const BITS: u16 = 32;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

/// Encode a run of samples as raw little-endian bytes.
pub fn encode_samples<S: Sample>(samples: &[S]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(samples.len() * usize::from(S::BITS / 8));
    for &sample in samples {
        sample.write_le(&mut raw);
    }
    raw
}
