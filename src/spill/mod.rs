//! Memory-bounded byte spooling.
//!
//! [`SpillBuffer`] keeps recent writes in memory and moves them to a
//! [`Staging`] store once a threshold is exceeded.

pub mod buffer;
pub mod staging;

pub use buffer::SpillBuffer;
pub use staging::{Staging, TempFileStaging};
