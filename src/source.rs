//! Character providers the lexer pulls from.
use std::io::{self, BufReader, Bytes, Read};
use std::iter::Fuse;
use std::str::Chars;

/// A pull-based supplier of characters.
///
/// `None` signals the end of the input. Once `None` has been returned, every
/// further call must return `None` as well.
pub trait CharSource {
  /// Hands out the next character, or `None` at the end of the input.
  fn next_char(&mut self) -> Option<char>;
}

impl<'s, S: CharSource + ?Sized> CharSource for &'s mut S {
  #[inline]
  fn next_char(&mut self) -> Option<char> {
    (**self).next_char()
  }
}

/// Characters of an in-memory string.
#[derive(Clone, Debug)]
pub struct StrSource<'a> {
  chars: Fuse<Chars<'a>>,
}

impl<'a> StrSource<'a> {
  /// Wraps `input`.
  pub fn new(input: &'a str) -> StrSource<'a> {
    StrSource {
      chars: input.chars().fuse(),
    }
  }
}

impl<'a> CharSource for StrSource<'a> {
  #[inline]
  fn next_char(&mut self) -> Option<char> {
    self.chars.next()
  }
}

/// Characters of a byte stream, one character per byte.
///
/// `.obj` files are ASCII. Bytes above `0x7f` are passed through as the
/// Latin-1 code point with the same value.
///
/// The first I/O error ends the input. It is kept around so the caller can
/// tell a truncated read apart from a genuine end of file, see
/// [`ReaderSource::take_error`].
pub struct ReaderSource<R: Read> {
  bytes: Bytes<BufReader<R>>,
  error: Option<io::Error>,
  finished: bool,
}

impl<R: Read> ReaderSource<R> {
  /// Wraps `reader` in a buffered byte source.
  pub fn new(reader: R) -> ReaderSource<R> {
    ReaderSource {
      bytes: BufReader::new(reader).bytes(),
      error: None,
      finished: false,
    }
  }

  /// Removes and returns the I/O error that ended the input, if any.
  pub fn take_error(&mut self) -> Option<io::Error> {
    self.error.take()
  }
}

impl<R: Read> CharSource for ReaderSource<R> {
  fn next_char(&mut self) -> Option<char> {
    if self.finished {
      return None;
    }

    loop {
      match self.bytes.next() {
        Some(Ok(b)) => return Some(char::from(b)),
        Some(Err(ref e)) if e.kind() == io::ErrorKind::Interrupted => continue,
        Some(Err(e)) => {
          log::debug!("character source stopped on I/O error: {}", e);
          self.error = Some(e);
          self.finished = true;
          return None;
        }
        None => {
          self.finished = true;
          return None;
        }
      }
    }
  }
}
