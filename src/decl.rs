//! Declaration algebra (component C).
//!
//! A [`Declaration`] is a named binding in an FSM's environment:
//! variable, renames, channel, subprogram, or private type. Every
//! declaration carries a `referenced` flag, set by
//! [`crate::expr::Expression::validate`] when a name lookup resolves to
//! it; this is the sole mutable part of an otherwise immutable node,
//! modeled here as interior mutability via a single, obviously-local
//! `Cell<bool>` rather than a generation-tracked side table.

use std::cell::Cell;

use crate::error::{ParseError, ValidationError};
use crate::expr::Expression;

/// One formal argument of a [`Declaration::Subprogram`]: a name paired
/// with its declared type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalArgument {
    /// The argument's name.
    pub name: String,
    /// The argument's declared type.
    pub type_name: String,
}

impl FormalArgument {
    /// Creates a new formal argument.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// The mode symbol a `channels:` document entry or `Channel`
/// declaration string names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Read-only channel.
    Read,
    /// Write-only channel.
    Write,
    /// Bidirectional channel.
    ReadWrite,
}

impl ChannelMode {
    /// Parses a mode symbol from its surface spelling.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        match text {
            "Read" => Ok(ChannelMode::Read),
            "Write" => Ok(ChannelMode::Write),
            "Read_Write" => Ok(ChannelMode::ReadWrite),
            other => Err(ParseError::InvalidChannelMode {
                mode: other.to_string(),
            }),
        }
    }

    /// Expands the mode symbol into its `(readable, writable)` pair.
    /// At least one of the pair is always `true`.
    pub fn expand(self) -> (bool, bool) {
        match self {
            ChannelMode::Read => (true, false),
            ChannelMode::Write => (false, true),
            ChannelMode::ReadWrite => (true, true),
        }
    }
}

/// A named binding in an FSM's global or per-state environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `IDENT : QIDENT [:= EXPR]`.
    Variable {
        /// The variable's declared type name.
        type_name: String,
        /// An optional initializer expression.
        initializer: Option<Expression>,
        referenced: Cell<bool>,
    },
    /// `IDENT : QIDENT renames EXPR`.
    Renames {
        /// The renamed type name.
        type_name: String,
        /// The underlying expression (a name path) being renamed.
        renamed: Expression,
        referenced: Cell<bool>,
    },
    /// A named communication endpoint.
    Channel {
        /// Whether the channel supports reads.
        readable: bool,
        /// Whether the channel supports writes.
        writable: bool,
        referenced: Cell<bool>,
    },
    /// `IDENT (IDENT : QIDENT; ...) return QIDENT`.
    Subprogram {
        /// The ordered, uniquely-named formal arguments.
        arguments: Vec<FormalArgument>,
        /// The declared return type.
        return_type: String,
        referenced: Cell<bool>,
    },
    /// `IDENT is private` — an opaque type definition.
    Private { referenced: Cell<bool> },
}

impl Declaration {
    /// Constructs a variable declaration.
    pub fn variable(type_name: impl Into<String>, initializer: Option<Expression>) -> Self {
        Declaration::Variable {
            type_name: type_name.into(),
            initializer,
            referenced: Cell::new(false),
        }
    }

    /// Constructs a renames declaration.
    pub fn renames(type_name: impl Into<String>, renamed: Expression) -> Self {
        Declaration::Renames {
            type_name: type_name.into(),
            renamed,
            referenced: Cell::new(false),
        }
    }

    /// Constructs a channel declaration from a mode symbol, rejecting
    /// the (impossible) all-false mode.
    pub fn channel(mode: ChannelMode) -> Self {
        let (readable, writable) = mode.expand();
        debug_assert!(readable || writable);
        Declaration::Channel {
            readable,
            writable,
            referenced: Cell::new(false),
        }
    }

    /// Constructs a subprogram declaration. Caller must have already
    /// checked argument name uniqueness (the parser does this; see
    /// `parser::parse_declaration`).
    pub fn subprogram(arguments: Vec<FormalArgument>, return_type: impl Into<String>) -> Self {
        Declaration::Subprogram {
            arguments,
            return_type: return_type.into(),
            referenced: Cell::new(false),
        }
    }

    /// Constructs a private (opaque) type declaration.
    pub fn private() -> Self {
        Declaration::Private {
            referenced: Cell::new(false),
        }
    }

    /// A short, human-readable classifier used in diagnostics
    /// (`"variable"`, `"renames"`, ...), matching
    /// `original_source/rflx/fsm.py`'s `__entity_name`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Variable { .. } => "variable",
            Declaration::Renames { .. } => "renames",
            Declaration::Channel { .. } => "channel",
            Declaration::Subprogram { .. } => "subprogram",
            Declaration::Private { .. } => "private declaration",
        }
    }

    /// Whether this is a [`Declaration::Private`] — exempt from the
    /// "unused global" check.
    pub fn is_private(&self) -> bool {
        matches!(self, Declaration::Private { .. })
    }

    fn referenced_cell(&self) -> &Cell<bool> {
        match self {
            Declaration::Variable { referenced, .. }
            | Declaration::Renames { referenced, .. }
            | Declaration::Channel { referenced, .. }
            | Declaration::Subprogram { referenced, .. }
            | Declaration::Private { referenced } => referenced,
        }
    }

    /// Marks this declaration as referenced. Monotonic: never cleared
    /// once set.
    pub fn mark_referenced(&self) {
        self.referenced_cell().set(true);
    }

    /// Whether any validation pass has resolved a name to this
    /// declaration.
    pub fn is_referenced(&self) -> bool {
        self.referenced_cell().get()
    }

    /// Validates this declaration's own embedded expressions (an
    /// initializer or a renamed-expression path) against `env`.
    /// Resolving names in these sub-expressions is how declarations
    /// (not just conditions/actions) can mark *other* declarations as
    /// referenced — e.g. `X : T := Y` references `Y`.
    pub fn validate(&self, env: &crate::env::Env<'_>) -> Result<(), ValidationError> {
        match self {
            Declaration::Variable { initializer, .. } => {
                if let Some(init) = initializer {
                    init.validate(env)?;
                }
                Ok(())
            }
            Declaration::Renames { renamed, .. } => renamed.validate(env),
            Declaration::Channel { .. } | Declaration::Subprogram { .. } | Declaration::Private { .. } => {
                Ok(())
            }
        }
    }
}
