//! Destinations the encoder can write a finished container to.

use std::fs::File;
use std::io::{self, BufWriter, Cursor, Stdout, Write};

/// A byte destination that can be closed once the container is complete.
///
/// The default `close` flushes. Implementations backed by durable storage
/// may do more.
pub trait Sink: Write {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Sink for Vec<u8> {}

impl Sink for Stdout {}

impl<T> Sink for Cursor<T> where Cursor<T>: Write {}

impl Sink for File {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_all()
    }
}

impl<W: Sink> Sink for BufWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_mut().close()
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
