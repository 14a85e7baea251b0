////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Delimiter-balanced matching and other structural combinators.
////////////////////////////////////////////////////////////////////////////////

use crate::cursor::Cursor;
use crate::parser::alt;
use crate::parser::gen_first;
use crate::parser::if_type;
use crate::parser::many;
use crate::parser::plus;
use crate::parser::separated_list;
use crate::parser::treat;
use crate::parser::Parser;
use crate::result::Failure;
use crate::result::Reason;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token::WordMetrics;

use std::rc::Rc;

const LPAREN: &[TokenKind] = &[TokenKind::LParen];
const RPAREN: &[TokenKind] = &[TokenKind::RParen];
const LBRACKET: &[TokenKind] = &[TokenKind::LBracket];
const RBRACKET: &[TokenKind] = &[TokenKind::RBracket];
const LBRACE: &[TokenKind] = &[TokenKind::LBrace];
const RBRACE: &[TokenKind] = &[TokenKind::RBrace];
const SEMI: &[TokenKind] = &[TokenKind::Semi];


////////////////////////////////////////////////////////////////////////////////
// delimit / delimit_strip
////////////////////////////////////////////////////////////////////////////////

/// Consumes `left`, then `inner`, then `right`; the value is the flat list
/// `[left] ++ inner ++ [right]`.
pub fn delimit<M>(inner: Parser<Vec<Token>, M>, left: Parser<Token, M>, right: Parser<Token, M>)
    -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    Parser::new("delimit", move |cursor: Cursor<M>| {
        let (l, cur) = left.parse(cursor)?.take_value();
        let (mid, cur) = inner.parse(cur)?.take_value();
        let (r, cur) = right.parse(cur)?.take_value();
        let mut out = Vec::with_capacity(mid.len() + 2);
        out.push(l);
        out.extend(mid);
        out.push(r);
        Ok(cur.with_value(out))
    })
}

/// Same as [`delimit`], but the value is `inner` alone.
pub fn delimit_strip<M>(inner: Parser<Vec<Token>, M>, left: Parser<Token, M>, right: Parser<Token, M>)
    -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    Parser::new("delimit_strip", move |cursor: Cursor<M>| {
        let (_, cur) = left.parse(cursor)?.take_value();
        let (mid, cur) = inner.parse(cur)?.take_value();
        let (_, cur) = right.parse(cur)?.take_value();
        Ok(cur.with_value(mid))
    })
}

/// `()`-delimited, contents stripped of the parentheses.
pub fn paren<M>(inner: Parser<Vec<Token>, M>) -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    delimit_strip(inner, if_type(LPAREN), if_type(RPAREN))
}

/// `[]`-delimited, contents stripped of the brackets.
pub fn bracket<M>(inner: Parser<Vec<Token>, M>) -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    delimit_strip(inner, if_type(LBRACKET), if_type(RBRACKET))
}

/// `{}`-delimited, contents stripped of the braces.
pub fn brace<M>(inner: Parser<Vec<Token>, M>) -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    delimit_strip(inner, if_type(LBRACE), if_type(RBRACE))
}


////////////////////////////////////////////////////////////////////////////////
// balanced_condition
////////////////////////////////////////////////////////////////////////////////

fn nondelim_satisfying<M>(predicate: Rc<dyn Fn(&Token) -> bool>) -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    Parser::new("nondelim_satisfying", move |cursor: Cursor<M>| {
        let original = cursor.clone();
        let succ = cursor.next()?;
        if !succ.value.kind.is_delim() && predicate(&succ.value) {
            Ok(succ)
        } else {
            Err(Failure::at(&original, Reason::PredicateRejected))
        }
    })
}

/// Parses a delimiter-balanced token sequence in which every token *at the
/// outermost nesting level* satisfies `predicate` and is not itself a
/// delimiter.
///
/// Defined recursively: repeatedly match either (a) a non-empty run of
/// predicate-satisfying, non-delimiter tokens, or (b) a balanced delimited
/// subsequence whose inner-level tokens are unrestricted. The three
/// bracket variants in (b) are enumerated lazily through [`gen_first`], so
/// a token run satisfying (a) never pays for constructing the bracket
/// alternatives.
pub fn balanced_condition<M>(predicate: Rc<dyn Fn(&Token) -> bool>) -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    let run = plus(nondelim_satisfying(predicate));

    let delim_group: Parser<Vec<Token>, M> = gen_first(move || {
        vec![
            delimit(balanced_condition(Rc::new(|_: &Token| true)), if_type(LPAREN), if_type(RPAREN)),
            delimit(balanced_condition(Rc::new(|_: &Token| true)), if_type(LBRACKET), if_type(RBRACKET)),
            delimit(balanced_condition(Rc::new(|_: &Token| true)), if_type(LBRACE), if_type(RBRACE)),
        ].into_iter()
    });

    let step = alt(run, delim_group);
    treat(many(step), |groups: Vec<Vec<Token>>| groups.into_iter().flatten().collect())
}

/// Brace-delimited, semicolon-separated list, where no element may contain
/// a top-level `;`. Each element is itself a flat token list (one balanced
/// group).
pub fn brace_semi<M>() -> Parser<Vec<Vec<Token>>, M>
    where M: WordMetrics + 'static,
{
    let item = balanced_condition(Rc::new(|tok: &Token| tok.kind != TokenKind::Semi));
    let items = separated_list(item, if_type(SEMI));
    Parser::new("brace_semi", move |cursor: Cursor<M>| {
        let (_, cur) = if_type::<M>(LBRACE).parse(cursor)?.take_value();
        let (groups, cur) = items.parse(cur)?.take_value();
        let (_, cur) = if_type::<M>(RBRACE).parse(cur)?.take_value();
        Ok(cur.with_value(groups))
    })
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
    fn delimit_strip_drops_brackets() {
        let inner = plus(if_type::<crate::token::SimpleWordMetrics>(&[TokenKind::Word]));
        let cur = stream(&[
            (TokenKind::LParen, "("), (TokenKind::Word, "x"), (TokenKind::RParen, ")"),
        ]);
        let succ = paren(inner).parse(cur).unwrap();
        assert_eq!(succ.value.len(), 1);
        assert_eq!(succ.value[0].value, "x");
    }

    #[test]
    fn balanced_condition_descends_into_nested_brackets() {
        let pred: Rc<dyn Fn(&Token) -> bool> = Rc::new(|tok: &Token| tok.value != "stop");
        let cur = stream(&[
            (TokenKind::Word, "a"),
            (TokenKind::LParen, "("),
            (TokenKind::Word, "b"),
            (TokenKind::LBracket, "["),
            (TokenKind::Word, "stop"),
            (TokenKind::RBracket, "]"),
            (TokenKind::RParen, ")"),
            (TokenKind::Word, "c"),
        ]);
        let succ = balanced_condition::<crate::token::SimpleWordMetrics>(pred).parse(cur).unwrap();
        assert_eq!(succ.value.len(), 8);
        assert!(succ.cursor.is_at_end());
    }

    #[test]
    fn balanced_condition_stops_at_outer_level_rejection() {
        let pred: Rc<dyn Fn(&Token) -> bool> = Rc::new(|tok: &Token| tok.value != "stop");
        let cur = stream(&[(TokenKind::Word, "a"), (TokenKind::Word, "stop")]);
        let succ = balanced_condition::<crate::token::SimpleWordMetrics>(pred).parse(cur).unwrap();
        assert_eq!(succ.value.len(), 1);
        assert_eq!(succ.cursor.pos(), 1);
    }
}
