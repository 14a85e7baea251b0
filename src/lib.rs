////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Combinator kernel and lexical-adaptation layer for a controlled-natural-
//! language parser aimed at mathematical prose.
//!
//! The [`cursor`] and [`parser`] modules fix the backtracking and
//! error-classification semantics every higher-level production depends on.
//! [`synonym`] and [`adapt`] mediate between raw lexer tokens and the
//! word-level parsers in [`lexical`]; [`structural`] builds delimiter-
//! balanced matching on top of those. [`grammar`] demonstrates the whole
//! stack composed into a handful of representative productions. None of
//! this crate's scope includes a lexer, a full target grammar, or semantic
//! analysis -- it is the front end's core only.
////////////////////////////////////////////////////////////////////////////////

pub mod adapt;
pub mod context;
pub mod cursor;
pub mod grammar;
pub mod instructions;
pub mod lexical;
pub mod message;
pub mod parser;
pub mod result;
pub mod structural;
pub mod synonym;
pub mod token;
pub mod vocab;

pub use context::Context;
pub use cursor::Cursor;
pub use parser::Parser;
pub use result::Failure;
pub use result::ParseResult;
pub use result::ParseResultExt;
pub use result::Reason;
pub use result::Success;
pub use token::Token;
pub use token::TokenKind;
pub use token::WordMetrics;
