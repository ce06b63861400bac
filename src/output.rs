//! Line-oriented path output
//!
//! `PathSink` is what the listing loop writes into. `LineWriter` is the
//! implementation used for the output file: one path per line, `\n`
//! terminated, no header or trailer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Receives relative paths one at a time, in traversal order.
pub trait PathSink {
    /// Write a single path.
    fn write_path(&mut self, relative: &Path) -> io::Result<()>;

    /// Flush anything buffered. Called once after the traversal completes.
    fn finish(&mut self) -> io::Result<()>;
}

/// Writes each path followed by a newline to the wrapped writer.
pub struct LineWriter<W: Write> {
    inner: W,
    lines: usize,
}

impl LineWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and wrap it in a buffered line writer.
    ///
    /// The file is closed when the writer is dropped.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, lines: 0 }
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> PathSink for LineWriter<W> {
    fn write_path(&mut self, relative: &Path) -> io::Result<()> {
        writeln!(self.inner, "{}", relative.display())?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
