//! Line-oriented scheme input.

use std::io::{self, BufRead};

use super::grammar::END_MARKER;

/// Reads successive schemes from one input stream.
///
/// A scheme ends at a line equal to `end` or at end of input. The match
/// ignores surrounding whitespace, so `  end ` also terminates a scheme.
/// The same reader can be asked again after a rejected
/// scheme, which is how the console re-prompts.
#[derive(Debug)]
pub struct SchemeReader<R> {
    inner: R,
    exhausted: bool,
}

impl<R: BufRead> SchemeReader<R> {
    /// Wraps a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            exhausted: false,
        }
    }

    /// Returns true once end of input has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Reads the next scheme.
    ///
    /// Returns `None` when the input is already exhausted and nothing was
    /// read. The sentinel line itself is not included.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the underlying stream fails.
    pub fn next_scheme(&mut self) -> io::Result<Option<Vec<String>>> {
        let mut lines = Vec::new();
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.inner.read_line(&mut buf)? == 0 {
                self.exhausted = true;
                break;
            }
            let line = buf.trim_end_matches(['\n', '\r']);
            if line.trim() == END_MARKER {
                return Ok(Some(lines));
            }
            lines.push(line.to_string());
        }
        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines))
        }
    }
}

/// Reads one scheme from `reader`.
///
/// An input that is empty, or that starts with the sentinel, yields no
/// lines.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn read_scheme<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    Ok(SchemeReader::new(reader).next_scheme()?.unwrap_or_default())
}
