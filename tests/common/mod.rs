//! Shared test utilities for generating raw interleaved PCM input.

use std::path::Path;

/// Signal shapes for generated input.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Sine wave at the given frequency (Hz)
    Sine(f32),
    /// Digital silence
    Silence,
    /// Deterministic white noise
    WhiteNoise,
    /// Square wave, hard transitions
    Square(f32),
}

/// Raw 16-bit PCM generator.
#[derive(Debug, Clone)]
pub struct RawPcm {
    pub channels: u16,
    pub sample_rate: u32,
    pub frames: usize,
    pub pattern: Pattern,
}

impl Default for RawPcm {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 44100,
            frames: 44100,
            pattern: Pattern::Sine(440.0),
        }
    }
}

impl RawPcm {
    pub fn mono(mut self) -> Self {
        self.channels = 1;
        self
    }

    pub fn frames(mut self, frames: usize) -> Self {
        self.frames = frames;
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Interleaved samples, one value copied across all channels.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn samples(&self) -> Vec<i16> {
        let max = i16::MAX as f32 * 0.6;
        let mut rng_state: u32 = 0xDEAD_BEEF;
        let mut next_random = || {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 17;
            rng_state ^= rng_state << 5;
            (rng_state as f32 / u32::MAX as f32).mul_add(2.0, -1.0)
        };

        let mut out = Vec::with_capacity(self.frames * self.channels as usize);
        for i in 0..self.frames {
            let t = i as f32 / self.sample_rate as f32;
            let value = match self.pattern {
                Pattern::Sine(freq) => (t * freq * 2.0 * std::f32::consts::PI).sin() * max,
                Pattern::Silence => 0.0,
                Pattern::WhiteNoise => next_random() * max,
                Pattern::Square(freq) => {
                    if (t * freq) % 1.0 < 0.5 {
                        max
                    } else {
                        -max
                    }
                }
            };
            let sample = value.round() as i16;
            for _ in 0..self.channels {
                out.push(sample);
            }
        }
        out
    }

    /// Little-endian bytes of [`samples`](Self::samples).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.samples().iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    pub fn write_to_path(&self, path: &Path) {
        std::fs::write(path, self.to_bytes()).expect("Failed to write raw PCM");
    }
}

/// Little-endian u32 at `offset`.
pub fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Little-endian u16 at `offset`.
pub fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}
