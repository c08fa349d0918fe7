//! Buffered line source with byte accounting.

use std::io::{self, BufRead};

/// Reads lines from a [`BufRead`], stripping `\n` / `\r\n` terminators the
/// same way [`str::lines`] does, and counts the bytes consumed.
pub struct LineReader<R> {
    reader: R,
    bytes_read: u64,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_read: 0,
            done: false,
        }
    }

    /// Returns the number of bytes consumed so far, terminators included.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) => {
                self.bytes_read += n as u64;
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(Ok(line))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
