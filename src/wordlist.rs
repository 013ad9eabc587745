//! Streaming candidate passphrases out of a wordlist.

use std::io::{self, BufRead};

/// An iterator over the candidate passphrases of a wordlist.
///
/// Lines are separated by LF or CRLF; the terminator is stripped and the
/// remaining bytes are passed through untouched, so candidates with interior
/// whitespace or non-UTF-8 bytes survive. A final line without a terminator
/// is still a candidate.
pub struct Candidates<R> {
    reader: R,
}
impl<R: BufRead> Candidates<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}
impl<R: BufRead> Iterator for Candidates<R> {
    type Item = io::Result<Vec<u8>>;
    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                    if line.last() == Some(&b'\r') {
                        line.pop();
                    }
                }
                Some(Ok(line))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
