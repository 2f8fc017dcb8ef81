//! A streaming parser for Wavefront's `.obj` file format.
//!
//! Statements are reported to an [`ObjSink`] one at a time, in input order,
//! as soon as they have been read. Nothing is collected by the parser
//! itself.
use std::io::Read;

use crate::lex::{Lexer, ParseError};
use crate::source::{CharSource, ReaderSource, StrSource};
use crate::token::TokenKind;

/// One corner of a face: indices into the vertex, texture vertex and normal
/// lists.
///
/// Indices are passed on exactly as written. They are 1-based, negative
/// values count back from the most recent element, and `0` means the slot
/// was left out.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct FaceIndex {
  /// Index of the geometric vertex. `0` is not a valid OBJ index, but is
  /// passed on as written.
  pub vertex: i64,
  /// Index of the texture vertex, or `0`.
  pub texture: i64,
  /// Index of the normal, or `0`.
  pub normal: i64,
}

impl FaceIndex {
  /// The texture index, if one was given.
  pub fn texture_index(&self) -> Option<i64> {
    Some(self.texture).filter(|&i| i != 0)
  }

  /// The normal index, if one was given.
  pub fn normal_index(&self) -> Option<i64> {
    Some(self.normal).filter(|&i| i != 0)
  }
}

/// How many statements of each kind have been read so far.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Statistics {
  /// `v` statements.
  pub vertices: u64,
  /// `vt` statements.
  pub textures: u64,
  /// `vn` statements.
  pub normals: u64,
  /// `vp` statements.
  pub parameters: u64,
  /// `f` statements.
  pub faces: u64,
}

/// Receives the geometry read by a [`Parser`].
///
/// Every method does nothing by default, so a sink only implements what it
/// cares about.
pub trait ObjSink {
  /// A geometric vertex. `w` is `1.0` when the statement leaves it out.
  fn on_vertex(&mut self, _x: f64, _y: f64, _z: f64, _w: f64) {}

  /// A texture vertex. `w` is `1.0` when the statement leaves it out.
  fn on_texture(&mut self, _u: f64, _v: f64, _w: f64) {}

  /// A vertex normal.
  fn on_normal(&mut self, _x: f64, _y: f64, _z: f64) {}

  /// A point in the parameter space of a curve or surface. Omitted `v` and
  /// `w` are `0.0`.
  fn on_parameter(&mut self, _u: f64, _v: f64, _w: f64) {}

  /// A polygon with at least one corner.
  ///
  /// `corners` is only borrowed for the duration of the call. `counts`
  /// already includes this face, and lets the sink resolve negative
  /// indices.
  fn on_face(&mut self, _corners: &[FaceIndex], _counts: &Statistics) {}
}

/// A single pass over one `.obj` input.
pub struct Parser<S> {
  lexer: Lexer<S>,
  stats: Statistics,
  corners: Vec<FaceIndex>,
}

impl<S: CharSource> Parser<S> {
  /// Creates a parser reading from `source`.
  pub fn new(source: S) -> Parser<S> {
    Parser {
      lexer: Lexer::new(source),
      stats: Statistics::default(),
      corners: Vec::new(),
    }
  }

  /// Counters for everything read so far. After a failed parse these
  /// include the statement that failed.
  pub fn statistics(&self) -> &Statistics {
    &self.stats
  }

  /// Reads the whole input, reporting each statement to `sink`.
  ///
  /// Stops at the first error. Statements before it have already been
  /// delivered. Once the input is exhausted, parsing again reports nothing
  /// new.
  pub fn parse<K: ObjSink + ?Sized>(&mut self, sink: &mut K) -> Result<Statistics, ParseError> {
    loop {
      match self.lexer.next_token()?.kind() {
        TokenKind::Eof => break,
        TokenKind::Vertex => self.parse_vertex(sink)?,
        TokenKind::Texture => self.parse_tex_vertex(sink)?,
        TokenKind::Normal => self.parse_normal(sink)?,
        TokenKind::Parameter => self.parse_parameter(sink)?,
        TokenKind::Face => self.parse_face(sink)?,
        kind if kind.is_directive() => {
          log::debug!("skipping {} on line {}", kind, self.lexer.position().line);
          self.lexer.skip_line();
        }
        _ => {}
      }
    }

    log::debug!(
      "parsed {} vertices, {} texture vertices, {} normals, {} parameters, {} faces",
      self.stats.vertices,
      self.stats.textures,
      self.stats.normals,
      self.stats.parameters,
      self.stats.faces
    );
    Ok(self.stats)
  }

  /// A mandatory number. Integers are widened.
  fn parse_double(&mut self) -> Result<f64, ParseError> {
    let token = self.lexer.next_token()?;
    match token.as_float() {
      Some(f) => Ok(f),
      None => {
        let found = token.kind();
        Err(ParseError::UnexpectedToken {
          expected: TokenKind::Float,
          found,
          position: self.lexer.position(),
        })
      }
    }
  }

  /// An optional number. Nothing is consumed if the next token is not one.
  fn try_double(&mut self) -> Result<Option<f64>, ParseError> {
    match self.lexer.peek_token()?.as_float() {
      Some(f) => {
        self.lexer.next_token()?;
        Ok(Some(f))
      }
      None => Ok(None),
    }
  }

  fn try_integer(&mut self) -> Result<Option<i64>, ParseError> {
    match self.lexer.peek_token()?.as_integer() {
      Some(i) => {
        self.lexer.next_token()?;
        Ok(Some(i))
      }
      None => Ok(None),
    }
  }

  fn parse_vertex<K: ObjSink + ?Sized>(&mut self, sink: &mut K) -> Result<(), ParseError> {
    self.stats.vertices += 1;

    let x = self.parse_double()?;
    let y = self.parse_double()?;
    let z = self.parse_double()?;
    let w = self.try_double()?.unwrap_or(1.);

    sink.on_vertex(x, y, z, w);
    Ok(())
  }

  fn parse_tex_vertex<K: ObjSink + ?Sized>(&mut self, sink: &mut K) -> Result<(), ParseError> {
    self.stats.textures += 1;

    let u = self.parse_double()?;
    let v = self.parse_double()?;
    let w = self.try_double()?.unwrap_or(1.);

    sink.on_texture(u, v, w);
    Ok(())
  }

  fn parse_normal<K: ObjSink + ?Sized>(&mut self, sink: &mut K) -> Result<(), ParseError> {
    self.stats.normals += 1;

    let x = self.parse_double()?;
    let y = self.parse_double()?;
    let z = self.parse_double()?;

    sink.on_normal(x, y, z);
    Ok(())
  }

  fn parse_parameter<K: ObjSink + ?Sized>(&mut self, sink: &mut K) -> Result<(), ParseError> {
    self.stats.parameters += 1;

    let u = self.parse_double()?;
    let (v, w) = match self.try_double()? {
      Some(v) => (v, self.try_double()?.unwrap_or(0.)),
      None => (0., 0.),
    };

    sink.on_parameter(u, v, w);
    Ok(())
  }

  /// An index or `/` written directly against the previous token. Anything
  /// after whitespace belongs to the next corner.
  fn try_attached_integer(&mut self) -> Result<Option<i64>, ParseError> {
    if self.lexer.peek_is_spaced()? {
      return Ok(None);
    }
    self.try_integer()
  }

  fn accept_attached_separator(&mut self) -> Result<bool, ParseError> {
    if self.lexer.peek_is_spaced()? {
      return Ok(false);
    }
    self.lexer.accept(TokenKind::Separator)
  }

  /// `v`, `v/t`, `v//n` or `v/t/n`, without whitespace inside. Returns
  /// `None` when the next token is not an integer, which ends the face.
  fn parse_vtindex(&mut self) -> Result<Option<FaceIndex>, ParseError> {
    let vertex = match self.try_integer()? {
      Some(v) => v,
      None => return Ok(None),
    };

    let mut texture = 0;
    let mut normal = 0;
    if self.accept_attached_separator()? {
      texture = self.try_attached_integer()?.unwrap_or(0);
      if self.accept_attached_separator()? {
        normal = self.try_attached_integer()?.unwrap_or(0);
      }
    }

    Ok(Some(FaceIndex {
      vertex,
      texture,
      normal,
    }))
  }

  fn parse_face<K: ObjSink + ?Sized>(&mut self, sink: &mut K) -> Result<(), ParseError> {
    let line = self.lexer.position().line;
    self.stats.faces += 1;

    self.corners.clear();
    while let Some(corner) = self.parse_vtindex()? {
      self.corners.push(corner);
    }

    if self.corners.is_empty() {
      return Err(ParseError::EmptyFace { line });
    }

    sink.on_face(&self.corners, &self.stats);
    Ok(())
  }
}

/// Parses a wavefront `.obj` file held in memory, reporting its geometry to
/// `sink`. Returns the final counters, or the first error.
pub fn parse<S, K>(input: S, sink: &mut K) -> Result<Statistics, ParseError>
where
  S: AsRef<str>,
  K: ObjSink + ?Sized,
{
  Parser::new(StrSource::new(input.as_ref())).parse(sink)
}

/// Like [`parse`], but pulls the input from `reader`.
///
/// A failed read is reported as [`ParseError::Io`], even if the bytes read
/// before it parsed cleanly.
pub fn parse_reader<R, K>(reader: R, sink: &mut K) -> Result<Statistics, ParseError>
where
  R: Read,
  K: ObjSink + ?Sized,
{
  let mut source = ReaderSource::new(reader);
  let result = Parser::new(&mut source).parse(sink);
  match source.take_error() {
    Some(e) => Err(ParseError::Io(e)),
    None => result,
  }
}
