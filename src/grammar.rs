////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! High-level grammar constructs, demonstrating the combinator contracts.
//!
//! These are not the target language's full grammar (out of scope); each
//! production here exists to show the kernel and lexical layers composing
//! into something a real grammar would extend.
////////////////////////////////////////////////////////////////////////////////

use crate::cursor::Cursor;
use crate::lexical::next_any_word;
use crate::lexical::next_value;
use crate::lexical::next_word;
use crate::parser::alt;
use crate::parser::compose;
use crate::parser::if_type;
use crate::parser::possibly;
use crate::parser::separated_nonempty_list;
use crate::parser::Parser;
use crate::result::Failure;
use crate::result::Reason;
use crate::structural::balanced_condition;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token::WordMetrics;
use crate::vocab::INSTRUCTION_KEYWORDS;

use std::rc::Rc;


/// A single mathematical variable token, e.g. `x`.
pub fn var<M>() -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    if_type(&[TokenKind::Var])
}

/// A literal comma token.
pub fn comma<M>() -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    if_type(&[TokenKind::Comma])
}

/// Parses `item (, item)*`, discarding the commas.
pub fn comma_nonempty_list<V, M>(item: Parser<V, M>) -> Parser<Vec<V>, M>
    where V: 'static, M: WordMetrics + 'static,
{
    separated_nonempty_list(item, comma())
}


////////////////////////////////////////////////////////////////////////////////
// instruction
////////////////////////////////////////////////////////////////////////////////

/// One member of a `[synonym ...]` list: a plain word, or a
/// slash-dash-suffixed pair `word /- suffix` expanding to two members,
/// `word` and `word` concatenated with `suffix` (e.g. `group /- s` covers
/// both `group` and `groups`).
fn synonym_member<M>() -> Parser<Vec<String>, M>
    where M: WordMetrics + 'static,
{
    let head = next_any_word();
    let suffix = possibly(compose(next_value("/-"), next_any_word()));
    Parser::new("synonym_member", move |cursor: Cursor<M>| {
        let (word, cur) = head.parse(cursor)?.take_value();
        let (tail, cur) = suffix.parse(cur)?.take_value();
        let mut members = vec![word.value.clone()];
        if let Some(suffix_tok) = tail.into_iter().next() {
            members.push(format!("{}{}", word.value, suffix_tok.value));
        }
        Ok(cur.with_value(members))
    })
}

fn synonym_directive<M>() -> Parser<(), M>
    where M: WordMetrics + 'static,
{
    let members = comma_nonempty_list(synonym_member());
    Parser::new("synonym_directive", move |cursor: Cursor<M>| {
        let (_, cur) = next_word("synonym").parse(cursor)?.take_value();
        let (groups, cur) = members.parse(cur)?.take_value();
        let words: Vec<&str> = groups.iter()
            .flatten()
            .map(String::as_str)
            .collect();
        let ctx = cur.ctx().clone();
        ctx.synonyms_mut().add(&words, ctx.metrics());
        Ok(cur.with_value(()))
    })
}

fn keyword_directive<M>() -> Parser<(), M>
    where M: WordMetrics + 'static,
{
    Parser::new("keyword_directive", |cursor: Cursor<M>| {
        let original = cursor.clone();
        let (keyword, cur) = cursor.next()?.take_value();
        if !INSTRUCTION_KEYWORDS.contains(&keyword.value.to_lowercase().as_str()) {
            return Err(Failure::at(&original, Reason::UnexpectedToken));
        }
        let (value, cur) = match cur.peek() {
            Some(tok) if tok.kind != TokenKind::RBracket => {
                cur.next()?.map_value(|tok| tok.value).take_value()
            }
            _ => (String::new(), cur),
        };
        cur.ctx().instructions_mut().set(&keyword.value, &value);
        Ok(cur.with_value(()))
    })
}

/// Bracketed directive: `[synonym w1, w2 /- s, …]` or `[keyword value]`.
pub fn instruction<M>() -> Parser<(), M>
    where M: WordMetrics + 'static,
{
    bracket_unit(alt(synonym_directive(), keyword_directive()))
}

/// Like [`bracket`], specialized to a unit-valued inner parser so callers
/// do not have to thread a dummy `Vec<Token>` through directive parsing.
fn bracket_unit<M>(inner: Parser<(), M>) -> Parser<(), M>
    where M: WordMetrics + 'static,
{
    Parser::new("bracket_unit", move |cursor: Cursor<M>| {
        let (_, cur) = if_type::<M>(&[TokenKind::LBracket]).parse(cursor)?.take_value();
        let (_, cur) = inner.parse(cur)?.take_value();
        let (_, cur) = if_type::<M>(&[TokenKind::RBracket]).parse(cur)?.take_value();
        Ok(cur.with_value(()))
    })
}


////////////////////////////////////////////////////////////////////////////////
// let_annotation / assumption / axiom
////////////////////////////////////////////////////////////////////////////////

/// `let x, y, … be <descriptor>` -- the bound variables followed by the
/// descriptor word, flattened into a single token list.
pub fn let_annotation<M>() -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    let vars = comma_nonempty_list(var());
    Parser::new("let_annotation", move |cursor: Cursor<M>| {
        let (_, cur) = next_word("let").parse(cursor)?.take_value();
        let (mut toks, cur) = vars.parse(cur)?.take_value();
        let (_, cur) = next_word("be").parse(cur)?.take_value();
        let (descriptor, cur) = next_any_word().parse(cur)?.take_value();
        toks.push(descriptor);
        Ok(cur.with_value(toks))
    })
}

/// `assume <balanced, semicolon-terminated clause> ;`
pub fn assumption<M>() -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    let body = balanced_condition(Rc::new(|tok: &Token| tok.kind != TokenKind::Semi));
    Parser::new("assumption", move |cursor: Cursor<M>| {
        let (_, cur) = bracket_first_word(&["assume", "suppose"]).parse(cursor)?.take_value();
        let (toks, cur) = body.parse(cur)?.take_value();
        let (_, cur) = if_type::<M>(&[TokenKind::Semi]).parse(cur)?.take_value();
        Ok(cur.with_value(toks))
    })
}

/// `axiom <balanced, semicolon-terminated clause> ;`
pub fn axiom<M>() -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    let body = balanced_condition(Rc::new(|tok: &Token| tok.kind != TokenKind::Semi));
    Parser::new("axiom", move |cursor: Cursor<M>| {
        let (_, cur) = next_word("axiom").parse(cursor)?.take_value();
        let (toks, cur) = body.parse(cur)?.take_value();
        let (_, cur) = if_type::<M>(&[TokenKind::Semi]).parse(cur)?.take_value();
        Ok(cur.with_value(toks))
    })
}

fn bracket_first_word<M>(words: &'static [&'static str]) -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    crate::lexical::first_word(words)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::context::Context;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn stream(vals: &[(TokenKind, &str)]) -> Cursor<crate::token::SimpleWordMetrics> {
        let toks = vals.iter().enumerate()
            .map(|(i, (kind, value))| Token::new(*kind, *value, i * 10))
            .collect();
        Cursor::init(toks, Context::default())
    }

    #[test]
    fn s1_let_var_be_word() {
        let cur = stream(&[
            (TokenKind::Word, "let"), (TokenKind::Var, "x"),
            (TokenKind::Word, "be"), (TokenKind::Word, "real"),
        ]);
        let succ = let_annotation::<crate::token::SimpleWordMetrics>().parse(cur).unwrap();
        assert_eq!(succ.value.len(), 2);
        assert_eq!(succ.value[0].value, "x");
        assert_eq!(succ.value[1].value, "real");
        assert_eq!(succ.cursor.pos(), 4);
    }

    #[test]
    fn s2_synonym_instruction_registers_equivalence_class() {
        let cur = stream(&[
            (TokenKind::LBracket, "["), (TokenKind::Word, "synonym"),
            (TokenKind::Word, "world"), (TokenKind::Comma, ","),
            (TokenKind::Word, "earth"), (TokenKind::RBracket, "]"),
        ]);
        let ctx = cur.ctx().clone();
        instruction::<crate::token::SimpleWordMetrics>().parse(cur).unwrap();
        assert_eq!(ctx.synonyms().canonical("world"), "earth world");
        assert_eq!(ctx.synonyms().canonical("world"), ctx.synonyms().canonical("earth"));
    }

    #[test]
    fn keyword_instruction_is_recorded() {
        let cur = stream(&[
            (TokenKind::LBracket, "["), (TokenKind::Word, "timelimit"),
            (TokenKind::Integer, "30"), (TokenKind::RBracket, "]"),
        ]);
        let ctx = cur.ctx().clone();
        instruction::<crate::token::SimpleWordMetrics>().parse(cur).unwrap();
        assert_eq!(
            ctx.instructions().get("timelimit"),
            Some(&crate::instructions::InstructionValue::Integer(30)),
        );
    }

    #[test]
    fn axiom_stops_before_semicolon() {
        let cur = stream(&[
            (TokenKind::Word, "axiom"), (TokenKind::Word, "a"),
            (TokenKind::Word, "b"), (TokenKind::Semi, ";"),
        ]);
        let succ = axiom::<crate::token::SimpleWordMetrics>().parse(cur).unwrap();
        assert_eq!(succ.value.len(), 2);
        assert!(succ.cursor.is_at_end());
    }
}
