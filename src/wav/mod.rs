//! RIFF/WAVE container encoding.

pub mod format;
pub mod header;
pub mod sample;
pub mod sink;
pub mod writer;

pub use format::{FormatChunk, WavFormat};
pub use header::{HEADER_SIZE, WavHeader};
pub use sample::Sample;
pub use sink::Sink;
pub use writer::{MAX_DATA_SIZE, WavEncoder};
