//! Append-only results log.

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Value produced by one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// Output of a numeric reducer.
    Number(f64),
    /// Output of a text reducer.
    Text(String),
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Destination for operation results and skip warnings.
pub trait ResultSink {
    /// Records the result of one operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_result(&mut self, id: &str, value: &ResultValue) -> io::Result<()>;

    /// Records a warning about a skipped operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn warning(&mut self, message: &str) -> io::Result<()>;
}

/// Line-oriented results log: `<id> >> <value>` per result, warnings
/// verbatim.
#[derive(Debug)]
pub struct ResultLog<W: Write> {
    writer: W,
    results: usize,
    warnings: usize,
}

impl ResultLog<BufWriter<File>> {
    /// Creates (or truncates) a log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ResultLog<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            results: 0,
            warnings: 0,
        }
    }

    /// Returns the number of results written.
    pub fn result_count(&self) -> usize {
        self.results
    }

    /// Returns the number of warnings written.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// Flushes and returns the inner writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ResultSink for ResultLog<W> {
    fn write_result(&mut self, id: &str, value: &ResultValue) -> io::Result<()> {
        writeln!(self.writer, "{id} >> {value}")?;
        self.results += 1;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{message}")?;
        self.warnings += 1;
        Ok(())
    }
}
