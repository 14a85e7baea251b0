////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2022 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Parsing context.
////////////////////////////////////////////////////////////////////////////////

use crate::instructions::InstructionStore;
use crate::synonym::SynonymRegistry;
use crate::token::SimpleWordMetrics;
use crate::token::Token;
use crate::token::WordMetrics;

use std::cell::RefCell;
use std::rc::Rc;


////////////////////////////////////////////////////////////////////////////////
// Context
////////////////////////////////////////////////////////////////////////////////
/// The shared, single-threaded parsing state threaded alongside every
/// [`Cursor`].
///
/// The distilled source keeps the synonym registry and instruction store as
/// process-wide globals; here they are bundled into an explicit, cheaply
/// cloned value instead, so independent parses (notably, independent test
/// cases) never share state unless they are explicitly given the same
/// `Context`.
///
/// [`Cursor`]: crate::cursor::Cursor
pub struct Context<M = SimpleWordMetrics>
    where M: WordMetrics,
{
    shared: Rc<Shared<M>>,
}

impl<M> Clone for Context<M> where M: WordMetrics {
    fn clone(&self) -> Self {
        Context { shared: Rc::clone(&self.shared) }
    }
}

struct Shared<M> where M: WordMetrics {
    synonyms: RefCell<SynonymRegistry>,
    instructions: RefCell<InstructionStore>,
    metrics: M,
    /// A representative token recorded by [`Cursor::init`], used to
    /// synthesize `Meta` tokens later in a parse.
    ///
    /// [`Cursor::init`]: crate::cursor::Cursor::init
    representative: RefCell<Option<Token>>,
}

impl<M> Context<M> where M: WordMetrics {
    /// Builds a fresh context using the given word-metrics collaborator.
    #[must_use]
    pub fn with_metrics(metrics: M) -> Self {
        Context {
            shared: Rc::new(Shared {
                synonyms: RefCell::new(SynonymRegistry::new()),
                instructions: RefCell::new(InstructionStore::new()),
                metrics,
                representative: RefCell::new(None),
            }),
        }
    }

    /// Borrows the synonym registry.
    pub fn synonyms(&self) -> std::cell::Ref<'_, SynonymRegistry> {
        self.shared.synonyms.borrow()
    }

    /// Mutably borrows the synonym registry.
    pub fn synonyms_mut(&self) -> std::cell::RefMut<'_, SynonymRegistry> {
        self.shared.synonyms.borrow_mut()
    }

    /// Borrows the instruction store.
    pub fn instructions(&self) -> std::cell::Ref<'_, InstructionStore> {
        self.shared.instructions.borrow()
    }

    /// Mutably borrows the instruction store.
    pub fn instructions_mut(&self) -> std::cell::RefMut<'_, InstructionStore> {
        self.shared.instructions.borrow_mut()
    }

    /// Returns the word-metrics collaborator.
    pub fn metrics(&self) -> &M {
        &self.shared.metrics
    }

    /// Records the representative token for this parse session, if one has
    /// not already been recorded.
    pub fn set_representative_if_absent(&self, tok: Token) {
        let mut slot = self.shared.representative.borrow_mut();
        if slot.is_none() {
            *slot = Some(tok);
        }
    }

    /// Returns the recorded representative token, if any.
    pub fn representative(&self) -> Option<Token> {
        self.shared.representative.borrow().clone()
    }
}

impl Default for Context<SimpleWordMetrics> {
    fn default() -> Self {
        Context::with_metrics(SimpleWordMetrics)
    }
}
