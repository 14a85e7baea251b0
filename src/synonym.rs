////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Synonym registry: canonicalization of word tokens.
////////////////////////////////////////////////////////////////////////////////

use crate::message::emit;
use crate::message::MessageType;
use crate::token::WordMetrics;
use crate::vocab::INVARIABLE_WORDS;

use std::collections::HashMap;


/// The minimum word length eligible for synonym lookup. Below this length a
/// word passes through [`SynonymRegistry::canonical`] unchanged, which keeps
/// single-letter `Var` tokens from ever shadowing a synonym entry -- the
/// identifier namespace and the synonym namespace stay disjoint.
pub const MIN_LEN_SYNONYM: usize = 4;


////////////////////////////////////////////////////////////////////////////////
// SynonymRegistry
////////////////////////////////////////////////////////////////////////////////
/// A mapping from canonical singular-lowercase word to a canonical
/// space-joined representative of its equivalence class.
///
/// Entries are only ever added, never removed, within a parse session --
/// the registry is monotonic. Seeded at construction from the fixed
/// invariable word list: each invariable word maps to itself, which both
/// documents the vocabulary and guards it from being folded into an
/// unrelated synonym class later.
#[derive(Debug, Clone, Default)]
pub struct SynonymRegistry {
    table: HashMap<String, String>,
}

impl SynonymRegistry {
    /// Builds a registry seeded from the invariable word list.
    #[must_use]
    pub fn new() -> Self {
        let mut table = HashMap::new();
        for word in INVARIABLE_WORDS {
            table.insert((*word).to_string(), (*word).to_string());
        }
        SynonymRegistry { table }
    }

    /// Returns the canonical form of `s`.
    ///
    /// If `s.len() < MIN_LEN_SYNONYM`, returns `s` unchanged. Otherwise
    /// returns the stored representative, or `s` itself if no class has
    /// been registered for it. Idempotent:
    /// `canonical(canonical(s)) == canonical(s)`.
    #[must_use]
    pub fn canonical(&self, s: &str) -> String {
        if s.len() < MIN_LEN_SYNONYM {
            return s.to_string();
        }
        self.table.get(s).cloned().unwrap_or_else(|| s.to_string())
    }

    /// Registers a synonym class over `words`.
    ///
    /// Each word is validated: a single whitespace-free alphabetic token,
    /// at least [`MIN_LEN_SYNONYM`] characters, and not already registered.
    /// On validation failure the whole batch is rejected -- a diagnostic is
    /// emitted through [`crate::message`] and the registry is left
    /// unchanged. On success, the representative is the space-joined,
    /// lexicographically sorted list of the *singularized* members, and
    /// every original member (singular or plural spelling alike) is mapped
    /// to it -- this is what lets a plural member such as `"groups"` look
    /// up the same class as its singular `"group"`.
    pub fn add<M: WordMetrics>(&mut self, words: &[&str], metrics: &M) {
        for word in words {
            if let Err(reason) = validate_member(word, &self.table) {
                emit(MessageType::Warning,
                    format!("invalid synonym member {word:?}: {reason}"));
                return;
            }
        }

        let mut singular: Vec<String> = words.iter()
            .map(|w| metrics.singularize(w))
            .collect();
        singular.sort();
        let representative = singular.join(" ");

        for word in words {
            self.table.insert((*word).to_string(), representative.clone());
        }
    }
}

fn validate_member(word: &str, table: &HashMap<String, String>)
    -> Result<(), &'static str>
{
    if word.chars().any(char::is_whitespace) {
        return Err("contains whitespace");
    }
    if word.chars().count() < MIN_LEN_SYNONYM {
        return Err("shorter than the minimum synonym length");
    }
    if !word.chars().all(char::is_alphabetic) {
        return Err("contains non-alphabetic characters");
    }
    if table.contains_key(word) {
        return Err("already registered");
    }
    Ok(())
}
