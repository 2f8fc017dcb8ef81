//! Tokens handed out by the lexer, and the table of reserved words.
use std::fmt;

/// The kind of a [`Token`], without its payload.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum TokenKind {
  /// End of the input.
  Eof,
  /// `v`
  Vertex,
  /// `vt`
  Texture,
  /// `vn`
  Normal,
  /// `vp`
  Parameter,
  /// `f`
  Face,
  /// `o`
  Object,
  /// `g`
  Group,
  /// `mtllib`
  Material,
  /// `usemtl`
  UseMaterial,
  /// `s`
  Smoothing,
  /// The end of a statement: a newline, or a comment running up to one.
  EndStatement,
  /// A word that is not a reserved keyword.
  Identifier,
  /// A numeric literal without a decimal point or exponent.
  Integer,
  /// A numeric literal with a decimal point or exponent.
  Float,
  /// `/`, used between the indices of a face corner.
  Separator,
  /// Nothing has been lexed yet, or lexing failed.
  Error,
}

impl TokenKind {
  /// Keywords whose whole statement is skipped by the parser.
  pub fn is_directive(self) -> bool {
    matches!(
      self,
      TokenKind::Object
        | TokenKind::Group
        | TokenKind::Material
        | TokenKind::UseMaterial
        | TokenKind::Smoothing
    )
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match *self {
      TokenKind::Eof => "end of input",
      TokenKind::Vertex => "`v`",
      TokenKind::Texture => "`vt`",
      TokenKind::Normal => "`vn`",
      TokenKind::Parameter => "`vp`",
      TokenKind::Face => "`f`",
      TokenKind::Object => "`o`",
      TokenKind::Group => "`g`",
      TokenKind::Material => "`mtllib`",
      TokenKind::UseMaterial => "`usemtl`",
      TokenKind::Smoothing => "`s`",
      TokenKind::EndStatement => "end of line",
      TokenKind::Identifier => "identifier",
      TokenKind::Integer => "integer",
      TokenKind::Float => "number",
      TokenKind::Separator => "`/`",
      TokenKind::Error => "error",
    };
    f.write_str(s)
  }
}

/// A lexical unit. Literal tokens carry their value, generic identifiers
/// carry their text.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
  /// End of the input.
  Eof,
  /// `v`
  Vertex,
  /// `vt`
  Texture,
  /// `vn`
  Normal,
  /// `vp`
  Parameter,
  /// `f`
  Face,
  /// `o`
  Object,
  /// `g`
  Group,
  /// `mtllib`
  Material,
  /// `usemtl`
  UseMaterial,
  /// `s`
  Smoothing,
  /// The end of a statement.
  EndStatement,
  /// A word that is not a reserved keyword.
  Identifier(String),
  /// An integer literal.
  Integer(i64),
  /// A floating point literal.
  Float(f64),
  /// `/`
  Separator,
  /// Placeholder before the first token, and after a lexical error.
  Error,
}

impl Token {
  /// The kind of this token.
  pub fn kind(&self) -> TokenKind {
    match *self {
      Token::Eof => TokenKind::Eof,
      Token::Vertex => TokenKind::Vertex,
      Token::Texture => TokenKind::Texture,
      Token::Normal => TokenKind::Normal,
      Token::Parameter => TokenKind::Parameter,
      Token::Face => TokenKind::Face,
      Token::Object => TokenKind::Object,
      Token::Group => TokenKind::Group,
      Token::Material => TokenKind::Material,
      Token::UseMaterial => TokenKind::UseMaterial,
      Token::Smoothing => TokenKind::Smoothing,
      Token::EndStatement => TokenKind::EndStatement,
      Token::Identifier(_) => TokenKind::Identifier,
      Token::Integer(_) => TokenKind::Integer,
      Token::Float(_) => TokenKind::Float,
      Token::Separator => TokenKind::Separator,
      Token::Error => TokenKind::Error,
    }
  }

  /// The numeric value of a literal. Integers widen to `f64`.
  pub fn as_float(&self) -> Option<f64> {
    match *self {
      Token::Float(f) => Some(f),
      Token::Integer(i) => Some(i as f64),
      _ => None,
    }
  }

  /// The value of an integer literal.
  pub fn as_integer(&self) -> Option<i64> {
    match *self {
      Token::Integer(i) => Some(i),
      _ => None,
    }
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Token::Identifier(ref s) => write!(f, "identifier `{}`", s),
      Token::Integer(i) => write!(f, "integer `{}`", i),
      Token::Float(x) => write!(f, "number `{}`", x),
      ref t => fmt::Display::fmt(&t.kind(), f),
    }
  }
}

/// Reserved words. Matching is exact, so `V` is an ordinary identifier.
static KEYWORDS: phf::Map<&'static str, Token> = phf::phf_map! {
  "v" => Token::Vertex,
  "vt" => Token::Texture,
  "vn" => Token::Normal,
  "vp" => Token::Parameter,
  "f" => Token::Face,
  "o" => Token::Object,
  "g" => Token::Group,
  "mtllib" => Token::Material,
  "usemtl" => Token::UseMaterial,
  "s" => Token::Smoothing,
};

/// Resolves a word to its keyword token, or a generic identifier.
pub(crate) fn resolve(lexicon: String) -> Token {
  match KEYWORDS.get(lexicon.as_str()) {
    Some(t) => t.clone(),
    None => Token::Identifier(lexicon),
  }
}
