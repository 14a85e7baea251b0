////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Lexical parser constructors: parsers keyed on token value, type, or
//! phrase.
////////////////////////////////////////////////////////////////////////////////

use crate::adapt::can_wordify;
use crate::adapt::wordify;
use crate::cursor::Cursor;
use crate::parser::all;
use crate::parser::first;
use crate::parser::if_test;
use crate::parser::if_value;
use crate::parser::Parser;
use crate::result::Failure;
use crate::result::Reason;
use crate::token::Token;
use crate::token::WordMetrics;


/// Matches any wordifiable token, coerced to a canonical `Word` token.
pub fn next_any_word<M>() -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    Parser::new("next_any_word", |cursor: Cursor<M>| {
        let original = cursor.clone();
        let succ = cursor.next()?;
        if can_wordify(&succ.value) {
            let word = wordify(&succ.value, original.ctx());
            Ok(succ.cursor.with_value(word))
        } else {
            Err(Failure::at(&original, Reason::UnexpectedToken))
        }
    })
}

/// Matches a token whose raw value equals `v`, verbatim.
pub fn next_value<M>(v: impl Into<String>) -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    if_value(v)
}

/// Matches a word whose canonical synonym equals
/// `canonical(singularize(s))`.
pub fn next_word<M>(s: impl Into<String>) -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    let s = s.into();
    Parser::new("next_word", move |cursor: Cursor<M>| {
        let original = cursor.clone();
        let target = {
            let ctx = original.ctx();
            let singular = ctx.metrics().singularize(&s.to_lowercase());
            ctx.synonyms().canonical(&singular)
        };
        let word = next_any_word().parse(cursor)?;
        if word.value.value == target {
            Ok(word)
        } else {
            Err(Failure::at(&original, Reason::UnexpectedToken))
        }
    })
}

/// Matches any word not in `banned`, compared modulo synonym.
pub fn next_any_word_except<M>(banned: &'static [&'static str]) -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    Parser::new("next_any_word_except", move |cursor: Cursor<M>| {
        let ctx = cursor.ctx().clone();
        let predicate = move |tok: &Token| {
            !banned.iter().any(|b| {
                let singular = ctx.metrics().singularize(&b.to_lowercase());
                ctx.synonyms().canonical(&singular) == tok.value
            })
        };
        if_test(next_any_word(), predicate).parse(cursor)
    })
}

/// Splits `phrase` on whitespace and matches each resulting word in order,
/// modulo synonym.
pub fn next_phrase<M>(phrase: &str) -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    let words: Vec<Parser<Token, M>> = phrase
        .split_whitespace()
        .map(|w| next_word(w.to_string()))
        .collect();
    all(words)
}

/// Left-biased alternation over a list of single words.
pub fn first_word<M>(words: &[&str]) -> Parser<Token, M>
    where M: WordMetrics + 'static,
{
    first(words.iter().map(|w| next_word(w.to_string())).collect())
}

/// Left-biased alternation over a list of phrases.
pub fn first_phrase<M>(phrases: &[&str]) -> Parser<Vec<Token>, M>
    where M: WordMetrics + 'static,
{
    first(phrases.iter().map(|p| next_phrase(p)).collect())
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::context::Context;
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
    fn next_word_matches_modulo_registered_plural() {
        let cur = stream(&[(TokenKind::Word, "Groups")]);
        cur.ctx().synonyms_mut().add(&["group", "groups"], cur.ctx().metrics());
        let succ = next_word("group").parse(cur).unwrap();
        assert_eq!(succ.value.value, "group group");
    }

    #[test]
    fn next_phrase_matches_whitespace_split_words() {
        let cur = stream(&[(TokenKind::Word, "let"), (TokenKind::Word, "be")]);
        let succ = next_phrase("let be").parse(cur).unwrap();
        assert_eq!(succ.value.len(), 2);
    }

    #[test]
    fn next_any_word_except_rejects_banned_word() {
        let cur = stream(&[(TokenKind::Word, "let")]);
        let err = next_any_word_except::<crate::token::SimpleWordMetrics>(&["let"])
            .parse(cur)
            .unwrap_err();
        assert_eq!(err.reason, Reason::PredicateRejected);
    }
}
