use std::fmt;
use std::io;

use thiserror::Error;

use crate::source::CharSource;
use crate::token::{self, Token, TokenKind};

/// A location in the input. Lines start at 1; the column counts the
/// characters consumed so far on the current line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
  /// The line of input.
  pub line: usize,
  /// The column within `line`.
  pub column: usize,
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

/// A parsing error, with location information.
#[derive(Debug, Error)]
pub enum ParseError {
  /// A character that cannot start any token.
  #[error("unexpected character {character:?} at {position}")]
  Lexical {
    /// Where the character was read.
    position: Position,
    /// The offending character.
    character: char,
  },
  /// The parser required one kind of token and found another.
  #[error("expected {expected} but got {found} at {position}")]
  UnexpectedToken {
    /// What the grammar required.
    expected: TokenKind,
    /// What the lexer produced.
    found: TokenKind,
    /// Where the lexer stood after reading the wrong token.
    position: Position,
  },
  /// An `f` statement without a single vertex index.
  #[error("face on line {line} has no vertex indices")]
  EmptyFace {
    /// The line of the `f` keyword.
    line: usize,
  },
  /// The character source failed to read.
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}

impl ParseError {
  /// The line of input the error is on, when it has one.
  pub fn line_number(&self) -> Option<usize> {
    match *self {
      ParseError::Lexical { position, .. } | ParseError::UnexpectedToken { position, .. } => {
        Some(position.line)
      }
      ParseError::EmptyFace { line } => Some(line),
      ParseError::Io(_) => None,
    }
  }
}

#[inline]
fn digit_value(c: char) -> Option<i64> {
  c.to_digit(10).map(i64::from)
}

/// Fraction digits beyond this no longer change an `f64`.
const MAX_FRACTION_DIGITS: u32 = 19;

/// `value * 10^exponent`, applied in steps of `1e22` (the largest exact
/// power of ten) so huge exponents neither overflow the power nor flush
/// subnormal results to zero early.
fn scale(mut value: f64, mut exponent: i32) -> f64 {
  const STEP: i32 = 22;
  while exponent > STEP && value != 0.0 && value.is_finite() {
    value *= 1e22;
    exponent -= STEP;
  }
  while exponent < -STEP && value != 0.0 && value.is_finite() {
    value /= 1e22;
    exponent += STEP;
  }
  if exponent < -STEP || exponent > STEP {
    return value;
  }
  if exponent < 0 {
    value / 10f64.powi(-exponent)
  } else {
    value * 10f64.powi(exponent)
  }
}

#[inline]
fn starts_number(c: Option<char>) -> bool {
  match c {
    Some(c) => c.is_ascii_digit() || c == '.',
    None => false,
  }
}

/// Turns characters into tokens.
///
/// The lexer looks one character and one token ahead. The lookahead token
/// is only lexed when somebody asks for it, which is what lets
/// [`Lexer::skip_line`] throw away the rest of a line without ever
/// tokenizing it.
pub struct Lexer<S> {
  source: S,
  curr_char: Option<char>,
  peek_char: Option<char>,
  current: Token,
  peeked: Option<Token>,
  spaced: bool,
  line: usize,
  column: usize,
}

impl<S: CharSource> Lexer<S> {
  /// Creates a lexer reading from `source`.
  pub fn new(mut source: S) -> Lexer<S> {
    let peek_char = source.next_char();
    Lexer {
      source,
      curr_char: None,
      peek_char,
      current: Token::Error,
      peeked: None,
      spaced: false,
      line: 1,
      column: 0,
    }
  }

  /// Where the lexer currently stands.
  pub fn position(&self) -> Position {
    Position {
      line: self.line,
      column: self.column,
    }
  }

  /// The most recently consumed token.
  pub fn current(&self) -> &Token {
    &self.current
  }

  /// Consumes the next token and returns it.
  pub fn next_token(&mut self) -> Result<&Token, ParseError> {
    let next = match self.peeked.take() {
      Some(t) => t,
      None => self.lex_or_poison()?,
    };
    log::trace!("{} {}", self.position(), next);
    self.current = next;
    Ok(&self.current)
  }

  /// Looks at the next token without consuming it.
  pub fn peek_token(&mut self) -> Result<&Token, ParseError> {
    let next = match self.peeked.take() {
      Some(t) => t,
      None => self.lex_or_poison()?,
    };
    Ok(self.peeked.insert(next))
  }

  /// Whether whitespace separates the lookahead token from the token
  /// before it.
  pub fn peek_is_spaced(&mut self) -> Result<bool, ParseError> {
    self.peek_token()?;
    Ok(self.spaced)
  }

  /// Consumes the next token, failing unless it is of kind `expected`.
  pub fn expect(&mut self, expected: TokenKind) -> Result<&Token, ParseError> {
    let found = self.next_token()?.kind();
    if found != expected {
      return Err(ParseError::UnexpectedToken {
        expected,
        found,
        position: self.position(),
      });
    }
    Ok(&self.current)
  }

  /// Consumes the next token if it is of kind `kind`.
  pub fn accept(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
    if self.peek_token()?.kind() == kind {
      self.next_token()?;
      Ok(true)
    } else {
      Ok(false)
    }
  }

  /// Throws away the rest of the current line, including its newline.
  ///
  /// If the lookahead token already finished the line, nothing is skipped.
  pub fn skip_line(&mut self) {
    match self.peeked.take() {
      Some(t @ Token::EndStatement) | Some(t @ Token::Eof) => {
        self.peeked = Some(t);
      }
      _ => self.discard_line(),
    }
  }

  /// Consumes one character, keeping line and column up to date.
  fn advance(&mut self) -> Option<char> {
    self.curr_char = self.peek_char;
    self.peek_char = self.source.next_char();

    match self.curr_char {
      Some('\n') => {
        self.line += 1;
        self.column = 0;
      }
      Some(_) => self.column += 1,
      None => {}
    }

    self.curr_char
  }

  fn discard_line(&mut self) {
    loop {
      match self.advance() {
        None | Some('\n') => break,
        Some(_) => {}
      }
    }
  }

  fn lex_or_poison(&mut self) -> Result<Token, ParseError> {
    self.lex().map_err(|e| {
      self.current = Token::Error;
      e
    })
  }

  fn lex(&mut self) -> Result<Token, ParseError> {
    self.spaced = false;
    loop {
      let c = match self.advance() {
        None => return Ok(Token::Eof),
        Some(c) => c,
      };

      match c {
        ' ' | '\t' | '\r' => {
          self.spaced = true;
          continue;
        }
        '\n' => return Ok(Token::EndStatement),
        '#' => {
          self.discard_line();
          return Ok(Token::EndStatement);
        }
        '/' => return Ok(Token::Separator),
        '+' | '-' if starts_number(self.peek_char) => return Ok(self.lex_number()),
        c if starts_number(Some(c)) => return Ok(self.lex_number()),
        c if c.is_ascii_alphabetic() => return Ok(self.lex_identifier(c)),
        character => {
          return Err(ParseError::Lexical {
            position: self.position(),
            character,
          })
        }
      }
    }
  }

  /// Consumes digits from the lookahead, accumulating them into `acc`.
  /// The integer wraps; the float copy saturates to infinity instead.
  fn read_digits(&mut self, mut acc: i64) -> (i64, f64) {
    let mut magnitude = acc as f64;
    while let Some(d) = self.peek_char.and_then(digit_value) {
      self.advance();
      acc = acc.wrapping_mul(10).wrapping_add(d);
      magnitude = magnitude * 10.0 + d as f64;
    }
    (acc, magnitude)
  }

  /// Lexes a numeric literal. The current character is a sign, a digit or
  /// a decimal point.
  fn lex_number(&mut self) -> Token {
    let negative = self.curr_char == Some('-');
    if let Some('+') | Some('-') = self.curr_char {
      self.advance();
    }

    let (integer, mut magnitude) = match self.curr_char.and_then(digit_value) {
      Some(d) => self.read_digits(d),
      None => (0, 0.),
    };

    let mut is_float = false;

    if self.curr_char == Some('.') || self.peek_char == Some('.') {
      if self.curr_char != Some('.') {
        self.advance();
      }
      is_float = true;

      // The fraction is kept as digits over a power of ten. Digits past
      // what an f64 can hold are read but not accumulated.
      let mut fraction = 0.0f64;
      let mut places: i32 = 0;
      let mut significant = 0;
      while let Some(d) = self.peek_char.and_then(digit_value) {
        self.advance();
        if significant >= MAX_FRACTION_DIGITS {
          continue;
        }
        if fraction != 0.0 || d != 0 {
          significant += 1;
        }
        fraction = fraction * 10.0 + d as f64;
        places = places.saturating_add(1);
      }
      magnitude += scale(fraction, -places);
    }

    if let Some('e') | Some('E') = self.peek_char {
      self.advance();
      is_float = true;

      let negative_exponent = self.peek_char == Some('-');
      if let Some('+') | Some('-') = self.peek_char {
        self.advance();
      }
      let mut exponent: i32 = 0;
      while let Some(d) = self.peek_char.and_then(digit_value) {
        self.advance();
        exponent = exponent.saturating_mul(10).saturating_add(d as i32);
      }

      magnitude = scale(magnitude, if negative_exponent { -exponent } else { exponent });
    }

    if is_float {
      Token::Float(if negative { -magnitude } else { magnitude })
    } else {
      Token::Integer(if negative { integer.wrapping_neg() } else { integer })
    }
  }

  fn lex_identifier(&mut self, first: char) -> Token {
    let mut lexicon = String::new();
    lexicon.push(first);
    while let Some(c) = self.peek_char.filter(|c| c.is_ascii_alphabetic()) {
      self.advance();
      lexicon.push(c);
    }
    token::resolve(lexicon)
  }
}
