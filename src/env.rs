//! Declaration environments (name resolution scoping).
//!
//! A stacked/chained lookup (local first, then global) with insertion
//! disallowed at the merged level, rather than copying the global map
//! per transition. [`Env`] is exactly that: a borrowed two-level chain
//! (state locals, then FSM globals) that never clones either map. A
//! local is never allowed to shadow a global, so there is never a
//! third level to chain — a pair of borrows is enough.

use std::collections::HashMap;

use crate::decl::Declaration;

/// A read-only view over a state's local declarations layered on top
/// of the FSM's global declarations. Looking up a name checks locals
/// first, then falls back to globals.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    locals: Option<&'a HashMap<String, Declaration>>,
    globals: &'a HashMap<String, Declaration>,
}

impl<'a> Env<'a> {
    /// An environment with no local scope — used to validate global
    /// declarations against only the global environment.
    pub fn globals_only(globals: &'a HashMap<String, Declaration>) -> Self {
        Self {
            locals: None,
            globals,
        }
    }

    /// An environment with a state's locals layered over the FSM's
    /// globals.
    pub fn with_locals(
        globals: &'a HashMap<String, Declaration>,
        locals: &'a HashMap<String, Declaration>,
    ) -> Self {
        Self {
            locals: Some(locals),
            globals,
        }
    }

    /// Resolves `name`, preferring a local binding over a global one.
    pub fn lookup(&self, name: &str) -> Option<&'a Declaration> {
        self.locals
            .and_then(|locals| locals.get(name))
            .or_else(|| self.globals.get(name))
    }
}
