////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! The immutable token-stream cursor.
////////////////////////////////////////////////////////////////////////////////

use crate::context::Context;
use crate::token::Token;
use crate::token::WordMetrics;

use std::rc::Rc;


////////////////////////////////////////////////////////////////////////////////
// Cursor
////////////////////////////////////////////////////////////////////////////////
/// An immutable position into a token stream.
///
/// `stream` is shared via `Rc` and never reallocated; cloning a `Cursor` is
/// cheap (an `Rc` bump), which is what makes holding multiple cursors over
/// the same stream -- the substrate of backtracking -- affordable.
///
/// The accumulator of the source specification's `(stream, pos, acc, start,
/// stop)` cursor is realized here as the `value` field of
/// [`Success`](crate::result::Success) rather than as a type parameter on
/// `Cursor` itself: every combinator needs to *navigate* a `Cursor`
/// regardless of what value the previous step produced, so keeping `Cursor`
/// monomorphic in the accumulator is what lets `many`/`first`/`gen_first`
/// compose a single parser value across repeated applications. See
/// `DESIGN.md` for the full rationale.
pub struct Cursor<M = crate::token::SimpleWordMetrics>
    where M: WordMetrics,
{
    stream: Rc<[Token]>,
    /// Index of the next token to consume. `0 <= pos <= stream.len()`.
    pos: usize,
    /// Start of the source-character range spanned by the last consumed
    /// region.
    start: usize,
    /// End of that range. `start <= stop`.
    stop: usize,
    ctx: Context<M>,
}

impl<M> Clone for Cursor<M> where M: WordMetrics {
    fn clone(&self) -> Self {
        Cursor {
            stream: Rc::clone(&self.stream),
            pos: self.pos,
            start: self.start,
            stop: self.stop,
            ctx: self.ctx.clone(),
        }
    }
}

impl<M> Cursor<M> where M: WordMetrics {
    /// Produces the initial cursor over `stream`: `pos = 0` and a
    /// zero-width span.
    ///
    /// Records a representative token on the context (for later `Meta`-token
    /// synthesis) if the stream is non-empty and none has been recorded yet.
    #[must_use]
    pub fn init(stream: Vec<Token>, ctx: Context<M>) -> Self {
        let stream: Rc<[Token]> = stream.into();
        if let Some(first) = stream.first() {
            ctx.set_representative_if_absent(first.clone());
        }
        Cursor { stream, pos: 0, start: 0, stop: 0, ctx }
    }

    /// Returns the full token stream.
    #[must_use]
    pub fn stream(&self) -> &[Token] {
        &self.stream
    }

    /// Returns the index of the next token to consume.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the source span of the last consumed region.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.stop)
    }

    /// Returns the threaded parsing context.
    pub fn ctx(&self) -> &Context<M> {
        &self.ctx
    }

    /// True if every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.stream.len()
    }

    /// Returns the next unconsumed token without advancing, if any remain.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.stream.get(self.pos)
    }

    /// Pairs this cursor with a value, the sole way a combinator rewrites
    /// the payload without consuming input. Corresponds to the source
    /// specification's `update(acc, cursor)`.
    #[must_use]
    pub fn with_value<V>(self, value: V) -> crate::result::Success<V, M> {
        crate::result::Success { cursor: self, value }
    }

    /// Consumes one token if available.
    ///
    /// On success, returns a [`Success`](crate::result::Success) advanced by
    /// one token, whose value is the just-consumed token, with
    /// `start = token.lexpos`, `stop = start + token_length(token)`. Fails
    /// with [`EndOfInput`](crate::result::Reason::EndOfInput) if `pos` is
    /// already at the end of the stream -- a signal distinct from an
    /// ordinary parse mismatch.
    pub fn next(self) -> crate::result::ParseResult<Token, M> {
        use crate::result::Failure;
        use crate::result::Reason;

        match self.stream.get(self.pos).cloned() {
            Some(tok) => {
                let len = self.ctx.metrics().token_length(&tok);
                let start = tok.lexpos;
                let advanced = Cursor {
                    stream: self.stream,
                    pos: self.pos + 1,
                    start,
                    stop: start + len,
                    ctx: self.ctx,
                };
                Ok(advanced.with_value(tok))
            }
            None => Err(Failure::at(&self, Reason::EndOfInput)),
        }
    }
}
