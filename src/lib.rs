//! A streaming lexer and parser for wavefront's `.obj` file format.
//!
//! Characters are pulled from a [`CharSource`], turned into [`Token`]s by the
//! [`Lexer`], and every vertex, texture vertex, normal, parameter-space
//! point and face the [`obj::Parser`] recognizes is handed to an
//! [`obj::ObjSink`] right away. Building a mesh out of those events is up to
//! the sink.
//!
//! ```
//! use obj_stream::obj::{self, FaceIndex, ObjSink, Statistics};
//!
//! #[derive(Default)]
//! struct Corners(usize);
//!
//! impl ObjSink for Corners {
//!   fn on_face(&mut self, corners: &[FaceIndex], _counts: &Statistics) {
//!     self.0 += corners.len();
//!   }
//! }
//!
//! let mut sink = Corners::default();
//! let stats = obj::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", &mut sink).unwrap();
//! assert_eq!(stats.vertices, 3);
//! assert_eq!(sink.0, 3);
//! ```
#![deny(missing_docs)]
#![deny(unreachable_pub)]

pub use lex::{Lexer, ParseError, Position};
pub use source::{CharSource, ReaderSource, StrSource};
pub use token::{Token, TokenKind};

mod lex;
mod source;
mod token;

pub mod obj;
