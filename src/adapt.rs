////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Token-shape adapters: coercion of variable/word/integer tokens into
//! canonical "word" or "atomic identifier" tokens.
////////////////////////////////////////////////////////////////////////////////

use crate::context::Context;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token::WordMetrics;


/// True iff `tok` can be treated as a word: it already is one, or it is a
/// single-letter `Var` (accepting mathematical idioms like "let A be").
#[must_use]
pub fn can_wordify(tok: &Token) -> bool {
    match tok.kind {
        TokenKind::Word => true,
        TokenKind::Var => {
            let mut chars = tok.value.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
        }
        _ => false,
    }
}

/// Coerces `tok` into a canonical `Word` token: lowercased and passed
/// through the synonym registry. Idempotent:
/// `wordify(wordify(t)) == wordify(t)`.
///
/// Returns a fresh clone whenever any field changes; a token that is
/// already a canonical `Word` is returned unchanged (by value -- there is
/// no sharing to preserve, so "unchanged" here just means no-op relative
/// to equality, not pointer identity).
#[must_use]
pub fn wordify<M: WordMetrics>(tok: &Token, ctx: &Context<M>) -> Token {
    let lowered = tok.value.to_lowercase();
    let canonical = ctx.synonyms().canonical(&lowered);
    tok.with_kind_value(TokenKind::Word, canonical)
}

/// Promotes `Integer` or `Word` tokens to `AtomicIdentifier`; `Word`s are
/// first synonymized. A pre-existing `AtomicIdentifier` passes through.
///
/// Always returns the coerced token as the value of an advanced cursor --
/// the distilled source's `atomic()` inconsistently returned a bare pair on
/// one branch and the raw result on another; this is the Open Question's
/// resolution in favor of a single, uniform shape.
#[must_use]
pub fn atomic<M: WordMetrics>(tok: &Token, ctx: &Context<M>) -> Option<Token> {
    match tok.kind {
        TokenKind::AtomicIdentifier => Some(tok.clone()),
        TokenKind::Integer => Some(tok.with_kind_value(TokenKind::AtomicIdentifier, &tok.value)),
        TokenKind::Word => {
            let lowered = tok.value.to_lowercase();
            let canonical = ctx.synonyms().canonical(&lowered);
            Some(tok.with_kind_value(TokenKind::AtomicIdentifier, canonical))
        }
        _ => None,
    }
}
