////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Parse results.
////////////////////////////////////////////////////////////////////////////////

use crate::cursor::Cursor;
use crate::token::WordMetrics;


////////////////////////////////////////////////////////////////////////////////
// Reason
////////////////////////////////////////////////////////////////////////////////
/// The two-tier classification of a parse failure.
///
/// Alternation (and the other backtracking combinators: `many`, `possibly`,
/// `separated_list`, `first`, `gen_first`) catch only the recoverable
/// reasons. A [`Reason::Fatal`] failure is produced exclusively by the
/// commit-point combinators (`nocatch`, `commit`, `commit_head`) and
/// propagates straight through alternation to the top-level caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// There are no more tokens to consume.
    EndOfInput,
    /// The next token did not match what was expected.
    UnexpectedToken,
    /// A predicate attached via `if_test` rejected the parsed value.
    PredicateRejected,
    /// A non-catchable failure raised by a commit point, carrying its
    /// diagnostic message.
    Fatal(String),
}

impl Reason {
    /// True for [`Reason::Fatal`]; false for every recoverable reason.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Reason::Fatal(_))
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::EndOfInput        => write!(f, "unexpected end of input"),
            Reason::UnexpectedToken   => write!(f, "unexpected token"),
            Reason::PredicateRejected => write!(f, "value rejected by predicate"),
            Reason::Fatal(msg)        => write!(f, "{msg}"),
        }
    }
}


////////////////////////////////////////////////////////////////////////////////
// Success
////////////////////////////////////////////////////////////////////////////////
/// The result of a successful parse: a cursor paired with the value
/// produced by the parse.
#[derive(Clone)]
pub struct Success<V, M> where M: WordMetrics {
    /// The cursor, advanced past whatever was consumed.
    pub cursor: Cursor<M>,
    /// The parsed value.
    pub value: V,
}

impl<V, M> std::fmt::Debug for Success<V, M> where V: std::fmt::Debug, M: WordMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Success")
            .field("pos", &self.cursor.pos())
            .field("value", &self.value)
            .finish()
    }
}

impl<V, M> Success<V, M> where M: WordMetrics {
    /// Converts `Success<V, _>` into `Success<U, _>` by applying `f` to the
    /// value. The cursor (and thus the span) is preserved.
    #[must_use]
    pub fn map_value<U>(self, f: impl FnOnce(V) -> U) -> Success<U, M> {
        Success { cursor: self.cursor, value: f(self.value) }
    }

    /// Splits the success into its value and the bare advancing cursor.
    #[must_use]
    pub fn take_value(self) -> (V, Cursor<M>) {
        (self.value, self.cursor)
    }
}


////////////////////////////////////////////////////////////////////////////////
// Failure
////////////////////////////////////////////////////////////////////////////////
/// A failed parse.
///
/// Unlike `Success`, a `Failure` does not carry a typed value: the
/// combinator that wants to retry an alternative already holds the cursor
/// to retry from (that is the entire backtracking mechanism), so all a
/// `Failure` needs to carry is enough information to report *why* and
/// *where* the parse stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// The index into the token stream at which the failure occurred.
    pub pos: usize,
    /// The source-character span at the point of failure.
    pub span: (usize, usize),
    /// Why the parse failed.
    pub reason: Reason,
}

impl Failure {
    /// Constructs a new failure from a cursor at the point of failure.
    #[must_use]
    pub fn at<M: WordMetrics>(cursor: &Cursor<M>, reason: Reason) -> Self {
        Failure { pos: cursor.pos(), span: cursor.span(), reason }
    }

    /// Promotes this failure to [`Reason::Fatal`], replacing any existing
    /// reason with the given message. Used by the commit-point combinators.
    #[must_use]
    pub fn into_fatal(self, message: impl Into<String>) -> Self {
        Failure { reason: Reason::Fatal(message.into()), ..self }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (bytes {}..{})", self.reason, self.span.0, self.span.1)
    }
}

impl std::error::Error for Failure {}


////////////////////////////////////////////////////////////////////////////////
// ParseResult
////////////////////////////////////////////////////////////////////////////////
/// The result of a parse attempt.
pub type ParseResult<V, M> = Result<Success<V, M>, Failure>;

/// Extension methods for [`ParseResult`].
pub trait ParseResultExt<V, M> where M: WordMetrics {
    /// Converts the result into a plain `Result` containing the parsed
    /// value, discarding the cursor.
    fn finish(self) -> Result<V, Failure>;
}

impl<V, M> ParseResultExt<V, M> for ParseResult<V, M> where M: WordMetrics {
    fn finish(self) -> Result<V, Failure> {
        self.map(|succ| succ.value)
    }
}
