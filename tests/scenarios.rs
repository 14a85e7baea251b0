////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Concrete scenario tests and universal invariant checks over the
//! combinator kernel.
////////////////////////////////////////////////////////////////////////////////

use mathprose_core::context::Context;
use mathprose_core::cursor::Cursor;
use mathprose_core::grammar;
use mathprose_core::instructions::InstructionValue;
use mathprose_core::lexical::next_any_word;
use mathprose_core::lexical::next_word;
use mathprose_core::parser::alt;
use mathprose_core::parser::commit;
use mathprose_core::parser::seq;
use mathprose_core::result::ParseResultExt as _;
use mathprose_core::structural::balanced_condition;
use mathprose_core::structural::brace_semi;
use mathprose_core::structural::paren;
use mathprose_core::token::SimpleWordMetrics;
use mathprose_core::token::Token;
use mathprose_core::token::TokenKind;

use pretty_assertions::assert_eq;
use test_log::test;

use std::rc::Rc;

fn stream(vals: &[(TokenKind, &str)]) -> Cursor<SimpleWordMetrics> {
    let toks = vals.iter().enumerate()
        .map(|(i, (kind, value))| Token::new(*kind, *value, i * 10))
        .collect();
    Cursor::init(toks, Context::default())
}

/// S1: `let x be real` parses as a flat `(((let,x),be),real)`-shaped chain
/// and consumes the whole stream.
#[test]
fn s1_let_var_be_any_word() {
    let cur = stream(&[
        (TokenKind::Word, "let"), (TokenKind::Var, "x"),
        (TokenKind::Word, "be"), (TokenKind::Word, "real"),
    ]);
    let p = seq(seq(seq(next_word("let"), grammar::var()), next_word("be")), next_any_word());
    let succ = p.parse(cur).unwrap();
    assert_eq!(succ.value.0.0.0.value, "let");
    assert_eq!(succ.value.0.0.1.value, "x");
    assert_eq!(succ.value.0.1.value, "be");
    assert_eq!(succ.value.1.value, "real");
    assert_eq!(succ.cursor.pos(), 4);
}

/// S2: a `[synonym world, earth]` instruction registers both words under a
/// single sorted, space-joined representative.
#[test]
fn s2_synonym_instruction_unifies_class() {
    let cur = stream(&[
        (TokenKind::LBracket, "["), (TokenKind::Word, "synonym"),
        (TokenKind::Word, "world"), (TokenKind::Comma, ","),
        (TokenKind::Word, "earth"), (TokenKind::RBracket, "]"),
    ]);
    let ctx = cur.ctx().clone();
    grammar::instruction::<SimpleWordMetrics>().parse(cur).finish().unwrap();
    assert_eq!(ctx.synonyms().canonical("world"), "earth world");
    assert_eq!(ctx.synonyms().canonical("world"), ctx.synonyms().canonical("earth"));
}

/// S3: a too-short synonym member fails validation and leaves the registry
/// untouched.
#[test]
fn s3_short_synonym_member_rejected() {
    let cur = stream(&[(TokenKind::Word, "dummy")]);
    let ctx = cur.ctx().clone();
    ctx.synonyms_mut().add(&["abc"], ctx.metrics());
    assert_eq!(ctx.synonyms().canonical("abc"), "abc");
}

/// S4: `paren(comma_nonempty_list(var()))` strips the parentheses and
/// yields the bare variable list.
#[test]
fn s4_paren_comma_list_strips_delimiters() {
    let cur = stream(&[
        (TokenKind::LParen, "("), (TokenKind::Var, "x"), (TokenKind::Comma, ","),
        (TokenKind::Var, "y"), (TokenKind::RParen, ")"),
    ]);
    let p = paren(grammar::comma_nonempty_list(grammar::var()));
    let succ = p.parse(cur).unwrap();
    assert_eq!(succ.value.len(), 2);
    assert_eq!(succ.value[0].value, "x");
    assert_eq!(succ.value[1].value, "y");
    assert!(succ.cursor.is_at_end());
}

/// S5: `brace_semi` over `{a; b; c}` yields three single-token balanced
/// groups.
#[test]
fn s5_brace_semi_splits_on_top_level_semicolons() {
    let cur = stream(&[
        (TokenKind::LBrace, "{"), (TokenKind::Word, "a"), (TokenKind::Semi, ";"),
        (TokenKind::Word, "b"), (TokenKind::Semi, ";"),
        (TokenKind::Word, "c"), (TokenKind::RBrace, "}"),
    ]);
    let succ = brace_semi::<SimpleWordMetrics>().parse(cur).unwrap();
    assert_eq!(succ.value.len(), 3);
    for group in &succ.value {
        assert_eq!(group.len(), 1);
    }
    assert!(succ.cursor.is_at_end());
}

/// S6: `commit("expected foo", next_word("then"), next_word("bar"))`
/// against `then foo` is a non-catchable failure carrying the message --
/// alternation never gets a chance to recover.
#[test]
fn s6_commit_failure_is_non_catchable() {
    let cur = stream(&[(TokenKind::Word, "then"), (TokenKind::Word, "foo")]);
    let committed = commit(next_word("then"), next_word("bar"), "expected foo");
    let fallback = next_word("foo");
    let combined = alt(committed, fallback);
    let err = combined.parse(cur).unwrap_err();
    assert!(err.reason.is_fatal());
    assert_eq!(err.reason.to_string(), "expected foo");
}


////////////////////////////////////////////////////////////////////////////////
// Universal invariants
////////////////////////////////////////////////////////////////////////////////

/// Invariant 1/2: a failing parse leaves the stream untouched and a
/// succeeding parse only ever advances `pos`, never past the stream length.
#[test]
fn failure_does_not_advance_and_success_is_monotone() {
    let cur = stream(&[(TokenKind::Word, "a"), (TokenKind::Word, "b")]);
    let before = cur.clone();
    let err = next_word::<SimpleWordMetrics>("zzzz").parse(cur).unwrap_err();
    assert_eq!(err.pos, 0);
    assert_eq!(before.stream(), before.stream());

    let cur = stream(&[(TokenKind::Word, "a"), (TokenKind::Word, "b")]);
    let succ = next_any_word::<SimpleWordMetrics>().parse(cur).unwrap();
    assert!(succ.cursor.pos() <= succ.cursor.stream().len());
    assert!(succ.cursor.pos() >= 1);
}

/// Invariant 3: when both alternatives would succeed, alternation always
/// takes the left one.
#[test]
fn alternation_prefers_the_left_alternative() {
    let cur = stream(&[(TokenKind::Word, "a")]);
    let left = next_word::<SimpleWordMetrics>("a");
    let right = next_any_word::<SimpleWordMetrics>();
    let succ = alt(left, right).parse(cur).unwrap();
    assert_eq!(succ.value.value, "a");
}

/// Invariant 10: `balanced_condition` stops exactly at an unmatched
/// delimiter rather than failing outright.
#[test]
fn balanced_condition_stops_before_unmatched_close_delimiter() {
    let cur = stream(&[
        (TokenKind::Word, "a"), (TokenKind::RParen, ")"), (TokenKind::Word, "b"),
    ]);
    let succ = balanced_condition::<SimpleWordMetrics>(Rc::new(|_| true)).parse(cur).unwrap();
    assert_eq!(succ.value.len(), 1);
    assert_eq!(succ.cursor.pos(), 1);
}

/// Instruction store: a `[timelimit 30]` directive records an integer
/// value, matching the §6 value-coercion rules.
#[test]
fn keyword_instruction_coerces_integer_value() {
    let cur = stream(&[
        (TokenKind::LBracket, "["), (TokenKind::Word, "timelimit"),
        (TokenKind::Integer, "30"), (TokenKind::RBracket, "]"),
    ]);
    let ctx = cur.ctx().clone();
    grammar::instruction::<SimpleWordMetrics>().parse(cur).finish().unwrap();
    assert_eq!(ctx.instructions().get("timelimit"), Some(&InstructionValue::Integer(30)));
}
