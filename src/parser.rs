////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! The parser abstraction and its primitive combinators.
////////////////////////////////////////////////////////////////////////////////

use crate::cursor::Cursor;
use crate::result::Failure;
use crate::result::ParseResult;
use crate::result::Reason;
use crate::token::WordMetrics;

use std::rc::Rc;


////////////////////////////////////////////////////////////////////////////////
// Parser
////////////////////////////////////////////////////////////////////////////////
/// A pure transformation from [`Cursor`] to a parsed value, paired with a
/// description used for diagnostics.
///
/// Parsers are values: constructing one does no work, and a `Parser` may be
/// cloned and reused across any number of calls to [`Parser::parse`]. The
/// `Rc`-wrapped closure is what makes that cloning cheap.
pub struct Parser<V, M = crate::token::SimpleWordMetrics>
    where M: WordMetrics,
{
    run: Rc<dyn Fn(Cursor<M>) -> ParseResult<V, M>>,
    description: &'static str,
}

impl<V, M> Clone for Parser<V, M> where M: WordMetrics {
    fn clone(&self) -> Self {
        Parser { run: Rc::clone(&self.run), description: self.description }
    }
}

impl<V, M> Parser<V, M> where M: WordMetrics + 'static, V: 'static {
    /// Constructs a new parser from its transform and a description.
    pub fn new<F>(description: &'static str, f: F) -> Self
        where F: Fn(Cursor<M>) -> ParseResult<V, M> + 'static,
    {
        Parser { run: Rc::new(f), description }
    }

    /// Runs the parser against `cursor`.
    pub fn parse(&self, cursor: Cursor<M>) -> ParseResult<V, M> {
        let _span = trace_span(self.description);
        (self.run)(cursor)
    }

    /// Returns the parser's diagnostic description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }
}

#[cfg(feature = "trace")]
fn trace_span(description: &'static str) -> tracing::span::EnteredSpan {
    tracing::span!(tracing::Level::TRACE, "parse", combinator = description).entered()
}

#[cfg(not(feature = "trace"))]
fn trace_span(_description: &'static str) -> () {}


////////////////////////////////////////////////////////////////////////////////
// Control combinators
////////////////////////////////////////////////////////////////////////////////

/// Consumes nothing, preserving whatever is already at the cursor; the
/// neutral element of [`compose`] on the left.
pub fn identity<M>() -> Parser<(), M>
    where M: WordMetrics + 'static,
{
    Parser::new("identity", |cursor: Cursor<M>| Ok(cursor.with_value(())))
}

/// Consumes nothing, producing the empty list; the neutral element for
/// list-accumulating combinators such as [`all`].
pub fn nil<T, M>() -> Parser<Vec<T>, M>
    where T: 'static, M: WordMetrics + 'static,
{
    Parser::new("nil", |cursor: Cursor<M>| Ok(cursor.with_value(Vec::new())))
}

/// Runs `a`, then `b` on `a`'s output cursor. The result is the ordered pair
/// of both values. Fails if either fails; `b`'s failure propagates with
/// `a` already consumed.
pub fn seq<A, B, M>(a: Parser<A, M>, b: Parser<B, M>) -> Parser<(A, B), M>
    where A: 'static, B: 'static, M: WordMetrics + 'static,
{
    Parser::new("seq", move |cursor: Cursor<M>| {
        let (a_val, cur) = a.parse(cursor)?.take_value();
        let (b_val, cur) = b.parse(cur)?.take_value();
        Ok(cur.with_value((a_val, b_val)))
    })
}

/// Runs `a`; on recoverable failure runs `b` on the original cursor.
/// Non-catchable (fatal) failures bypass `b`. Ordered: `a` is preferred.
pub fn alt<V, M>(a: Parser<V, M>, b: Parser<V, M>) -> Parser<V, M>
    where V: 'static, M: WordMetrics + 'static,
{
    Parser::new("alt", move |cursor: Cursor<M>| {
        match a.parse(cursor.clone()) {
            Ok(succ) => Ok(succ),
            Err(fail) if fail.reason.is_fatal() => Err(fail),
            Err(_) => b.parse(cursor),
        }
    })
}

/// `a`'s output cursor becomes `b`'s input; unlike [`seq`], the value is
/// replaced by `b`'s, not paired with `a`'s.
pub fn compose<A, B, M>(a: Parser<A, M>, b: Parser<B, M>) -> Parser<B, M>
    where A: 'static, B: 'static, M: WordMetrics + 'static,
{
    Parser::new("compose", move |cursor: Cursor<M>| {
        let (_, cur) = a.parse(cursor)?.take_value();
        b.parse(cur)
    })
}

/// Runs `p`, then replaces the value with `f(value)`. The span is
/// preserved.
pub fn treat<A, B, M>(p: Parser<A, M>, f: impl Fn(A) -> B + 'static) -> Parser<B, M>
    where A: 'static, B: 'static, M: WordMetrics + 'static,
{
    Parser::new("treat", move |cursor: Cursor<M>| Ok(p.parse(cursor)?.map_value(&f)))
}

/// Alias for [`treat`]; reads better at grammar call sites that want to
/// describe themselves as "mapping" a parsed value.
pub fn map<A, B, M>(p: Parser<A, M>, f: impl Fn(A) -> B + 'static) -> Parser<B, M>
    where A: 'static, B: 'static, M: WordMetrics + 'static,
{
    treat(p, f)
}


////////////////////////////////////////////////////////////////////////////////
// Repetition combinators
////////////////////////////////////////////////////////////////////////////////

/// Repeats `p` between `low` (inclusive) and `high` (inclusive, or
/// unbounded) times, collecting each value in encounter order.
///
/// Stops greedily on the first recoverable failure, on end-of-input, or
/// once `high` is reached. Stops early (rather than looping forever) if an
/// iteration succeeds without advancing the cursor -- a non-consuming `p`
/// can otherwise never fail, so this is the termination guarantee behind
/// "many terminates" (see the crate's test suite).
fn repeat_collect<V, M>(low: usize, high: Option<usize>, p: Parser<V, M>)
    -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    Parser::new("repeat_collect", move |cursor: Cursor<M>| {
        let original = cursor.clone();
        let mut vals = Vec::new();
        let mut cur = cursor;
        loop {
            if high.is_some_and(|h| vals.len() >= h) {
                break;
            }
            let before_pos = cur.pos();
            match p.parse(cur.clone()) {
                Ok(succ) => {
                    let (v, next) = succ.take_value();
                    let stalled = next.pos() == before_pos;
                    vals.push(v);
                    cur = next;
                    if stalled {
                        break;
                    }
                }
                Err(fail) if fail.reason.is_fatal() => return Err(fail),
                Err(_) => break,
            }
        }
        if vals.len() < low {
            Err(Failure::at(&original, Reason::PredicateRejected))
        } else {
            Ok(cur.with_value(vals))
        }
    })
}

/// Zero-or-more repetition. Greedy.
pub fn many<V, M>(p: Parser<V, M>) -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    repeat_collect(0, None, p)
}

/// Requires at least `n` successes.
pub fn at_least<V, M>(n: usize, p: Parser<V, M>) -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    repeat_collect(n, None, p)
}

/// One-or-more repetition; `at_least(1, p)`.
pub fn plus<V, M>(p: Parser<V, M>) -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    at_least(1, p)
}

/// Zero-or-one repetition; the accumulator is a list of length 0 or 1,
/// never a nullable scalar, so downstream `treat`/`map` never has to
/// special-case "no value".
pub fn possibly<V, M>(p: Parser<V, M>) -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    repeat_collect(0, Some(1), p)
}

/// Parses `item (sep item)*`; the accumulator is the list of `item`
/// results, separators discarded.
pub fn separated_nonempty_list<V, S, M>(item: Parser<V, M>, sep: Parser<S, M>)
    -> Parser<Vec<V>, M>
    where V: 'static, S: 'static, M: WordMetrics + 'static,
{
    Parser::new("separated_nonempty_list", move |cursor: Cursor<M>| {
        let (first, mut cur) = item.parse(cursor)?.take_value();
        let mut vals = vec![first];
        loop {
            match sep.parse(cur.clone()) {
                Ok(sep_succ) => {
                    match item.parse(sep_succ.cursor) {
                        Ok(item_succ) => {
                            let (v, next) = item_succ.take_value();
                            vals.push(v);
                            cur = next;
                        }
                        Err(fail) if fail.reason.is_fatal() => return Err(fail),
                        Err(_) => break,
                    }
                }
                Err(fail) if fail.reason.is_fatal() => return Err(fail),
                Err(_) => break,
            }
        }
        Ok(cur.with_value(vals))
    })
}

/// Same as [`separated_nonempty_list`], but succeeds with the empty list if
/// the first item fails.
pub fn separated_list<V, S, M>(item: Parser<V, M>, sep: Parser<S, M>)
    -> Parser<Vec<V>, M>
    where V: 'static, S: 'static, M: WordMetrics + 'static,
{
    let nonempty = separated_nonempty_list(item, sep);
    Parser::new("separated_list", move |cursor: Cursor<M>| {
        match nonempty.parse(cursor.clone()) {
            Ok(succ) => Ok(succ),
            Err(fail) if fail.reason.is_fatal() => Err(fail),
            Err(_) => Ok(cursor.with_value(Vec::new())),
        }
    })
}

/// Alias for [`separated_nonempty_list`] specialized to a comma separator;
/// the source's `and_comma_nonempty_list` is taken as a synonym for this.
pub fn andcomma_nonempty_list<V, M>(item: Parser<V, M>, comma: Parser<crate::token::Token, M>)
    -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    separated_nonempty_list(item, comma)
}


////////////////////////////////////////////////////////////////////////////////
// Conditional combinators
////////////////////////////////////////////////////////////////////////////////

/// Runs `p`; if `predicate` rejects the parsed value, signals a recoverable
/// failure. Combinators that use `if_test` must be composed only inside
/// backtrackable scopes (an enclosing [`alt`]/[`many`]/etc.), since
/// `if_test` itself does not roll back `p`'s consumption -- the enclosing
/// scope's saved cursor is what makes the rejection observably
/// non-consuming.
pub fn if_test<V, M>(p: Parser<V, M>, predicate: impl Fn(&V) -> bool + 'static)
    -> Parser<V, M>
    where V: 'static, M: WordMetrics + 'static,
{
    Parser::new("if_test", move |cursor: Cursor<M>| {
        let succ = p.parse(cursor)?;
        if predicate(&succ.value) {
            Ok(succ)
        } else {
            Err(Failure::at(&succ.cursor, Reason::PredicateRejected))
        }
    })
}

/// Matches a token whose raw value equals `expected`.
pub fn if_value<M>(expected: impl Into<String>) -> Parser<crate::token::Token, M>
    where M: WordMetrics + 'static,
{
    let expected = expected.into();
    Parser::new("if_value", move |cursor: Cursor<M>| {
        let original = cursor.clone();
        let succ = cursor.next()?;
        if succ.value.value == expected {
            Ok(succ)
        } else {
            Err(Failure::at(&original, Reason::UnexpectedToken))
        }
    })
}

/// Matches a token whose kind is a member of `kinds`.
pub fn if_type<M>(kinds: &'static [crate::token::TokenKind]) -> Parser<crate::token::Token, M>
    where M: WordMetrics + 'static,
{
    Parser::new("if_type", move |cursor: Cursor<M>| {
        let original = cursor.clone();
        let succ = cursor.next()?;
        if kinds.contains(&succ.value.kind) {
            Ok(succ)
        } else {
            Err(Failure::at(&original, Reason::UnexpectedToken))
        }
    })
}

/// Sequences an arbitrary-arity list of parsers; the value is an ordered
/// list of sub-values.
pub fn all<V, M>(parsers: Vec<Parser<V, M>>) -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    Parser::new("all", move |cursor: Cursor<M>| {
        let mut vals = Vec::with_capacity(parsers.len());
        let mut cur = cursor;
        for p in &parsers {
            let (v, next) = p.parse(cur)?.take_value();
            vals.push(v);
            cur = next;
        }
        Ok(cur.with_value(vals))
    })
}

/// Left-biased alternation over a finite list of parsers.
pub fn first<V, M>(parsers: Vec<Parser<V, M>>) -> Parser<V, M>
    where V: 'static, M: WordMetrics + 'static,
{
    Parser::new("first", move |cursor: Cursor<M>| {
        let mut last_err = None;
        for p in &parsers {
            match p.parse(cursor.clone()) {
                Ok(succ) => return Ok(succ),
                Err(fail) if fail.reason.is_fatal() => return Err(fail),
                Err(fail) => last_err = Some(fail),
            }
        }
        Err(last_err.unwrap_or_else(|| Failure::at(&cursor, Reason::UnexpectedToken)))
    })
}

/// Left-biased alternation over a *lazily enumerated* sequence of parsers.
///
/// `make_gen` is called once per invocation of the returned parser, and
/// must produce a fresh iterator each time (the parser value itself is
/// reused across many calls, so the generator cannot be consumed once and
/// cached). Critical for avoiding the combinatorial blow-up of
/// materializing every alternative eagerly -- e.g. the three bracket
/// variants in [`crate::structural::balanced_condition`]. Generator state
/// is released (the iterator dropped) as soon as a success is found or the
/// iterator is exhausted.
pub fn gen_first<V, M, I, F>(make_gen: F) -> Parser<V, M>
    where
        V: 'static,
        M: WordMetrics + 'static,
        I: Iterator<Item = Parser<V, M>>,
        F: Fn() -> I + 'static,
{
    Parser::new("gen_first", move |cursor: Cursor<M>| {
        let mut last_err = None;
        for p in make_gen() {
            match p.parse(cursor.clone()) {
                Ok(succ) => return Ok(succ),
                Err(fail) if fail.reason.is_fatal() => return Err(fail),
                Err(fail) => last_err = Some(fail),
            }
        }
        Err(last_err.unwrap_or_else(|| Failure::at(&cursor, Reason::UnexpectedToken)))
    })
}


////////////////////////////////////////////////////////////////////////////////
// Commit points
////////////////////////////////////////////////////////////////////////////////

/// Promotes any recoverable failure of `p` into a non-catchable failure
/// carrying `message`.
pub fn nocatch<V, M>(p: Parser<V, M>, message: impl Into<String>) -> Parser<V, M>
    where V: 'static, M: WordMetrics + 'static,
{
    let message: Rc<str> = message.into().into();
    Parser::new("nocatch", move |cursor: Cursor<M>| {
        p.parse(cursor).map_err(|fail| {
            if fail.reason.is_fatal() {
                fail
            } else {
                fail.into_fatal(message.to_string())
            }
        })
    })
}

/// Runs `trial` as a fully backtrackable lookahead (its output cursor is
/// discarded); if it succeeds, runs `body` from the *original* position
/// with failures promoted to non-catchable. Expresses "this prefix
/// determines the production; once it matches, the rest is mandatory."
pub fn commit<T, V, M>(trial: Parser<T, M>, body: Parser<V, M>, message: impl Into<String>)
    -> Parser<V, M>
    where T: 'static, V: 'static, M: WordMetrics + 'static,
{
    let message = message.into();
    let committed_body = nocatch(body, message);
    Parser::new("commit", move |cursor: Cursor<M>| {
        trial.parse(cursor.clone())?;
        committed_body.parse(cursor)
    })
}

/// Runs `head`; passes its value to `continuation` to obtain the next
/// parser, then runs that parser (starting from `head`'s output cursor)
/// with failures promoted to non-catchable. Expresses "once the head
/// matches, the tail is mandatory" -- unlike [`commit`], the head's own
/// failure is left recoverable, since matching the head is what commits.
pub fn commit_head<H, V, M>(
    head: Parser<H, M>,
    continuation: impl Fn(H) -> Parser<V, M> + 'static,
    message: impl Into<String>,
) -> Parser<V, M>
    where H: 'static, V: 'static, M: WordMetrics + 'static,
{
    let message = message.into();
    Parser::new("commit_head", move |cursor: Cursor<M>| {
        let (h, cur) = head.parse(cursor)?.take_value();
        let next = continuation(h);
        nocatch(next, message.clone()).parse(cur)
    })
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::context::Context;
    use crate::token::Token;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn stream(vals: &[(TokenKind, &str)]) -> Cursor<crate::token::SimpleWordMetrics> {
        let toks = vals.iter().enumerate()
            .map(|(i, (kind, value))| Token::new(*kind, *value, i * 10))
            .collect();
        Cursor::init(toks, Context::default())
    }

    #[test]
    fn seq_pairs_values_and_advances() {
        let p = seq(if_value("a"), if_value("b"));
        let cur = stream(&[(TokenKind::Word, "a"), (TokenKind::Word, "b")]);
        let succ = p.parse(cur).unwrap();
        assert_eq!(succ.value.0.value, "a");
        assert_eq!(succ.value.1.value, "b");
        assert_eq!(succ.cursor.pos(), 2);
    }

    #[test]
    fn alt_prefers_left_when_both_succeed() {
        let cur = stream(&[(TokenKind::Word, "a")]);
        let left = treat(if_value("a"), |_| 1usize);
        let right = treat(if_value("a"), |_| 2usize);
        let combined = alt(left, right);
        assert_eq!(combined.parse(cur).unwrap().value, 1);
    }

    #[test]
    fn many_terminates_on_non_consuming_success() {
        let p: Parser<(), _> = identity();
        let cur = stream(&[(TokenKind::Word, "a")]);
        let succ = many(p).parse(cur).unwrap();
        assert_eq!(succ.value.len(), 1);
    }

    #[test]
    fn possibly_length_is_zero_or_one() {
        let cur = stream(&[(TokenKind::Word, "x")]);
        let hit = possibly(if_value("a")).parse(cur.clone()).unwrap();
        assert!(hit.value.is_empty());
        let cur2 = stream(&[(TokenKind::Word, "a")]);
        let miss = possibly(if_value("a")).parse(cur2).unwrap();
        assert_eq!(miss.value.len(), 1);
    }

    #[test]
    fn nocatch_then_alt_never_recovers() {
        let committed = nocatch(if_value::<crate::token::SimpleWordMetrics>("then"), "expected foo");
        let fallback = if_value("bar");
        let combined = alt(committed, fallback);
        let cur = stream(&[(TokenKind::Word, "foo")]);
        let err = combined.parse(cur).unwrap_err();
        assert!(err.reason.is_fatal());
        assert_eq!(err.reason.to_string(), "expected foo");
    }
}
