////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Fixed vocabulary.
//!
//! Stands in for the distilled source's external word-list module: a real
//! front end would draw these from a much larger, maintained table. Kept
//! deliberately small here since the grammar layer (`grammar`) only needs
//! enough vocabulary to demonstrate the combinator contracts.
////////////////////////////////////////////////////////////////////////////////

/// Words whose synonym class is fixed and never extended by `[synonym ...]`
/// directives -- grammatical connectives and the like.
pub const INVARIABLE_WORDS: &[&str] = &[
    "therefore", "however", "moreover", "furthermore", "nevertheless",
];

/// Keywords recognized by bracketed `[keyword value]` instructions.
pub const INSTRUCTION_KEYWORDS: &[&str] = &[
    "exit", "timelimit", "printgoal", "dump", "ontored", "read", "library",
    "error", "warning",
];
