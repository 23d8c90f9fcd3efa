//! # fsmdol
//!
//! The core of a modeling toolkit for binary message formats and
//! communicating state machines: an expression algebra, an embedded
//! Pratt-style parser for expressions/statements/declarations, a
//! decoder-agnostic document adapter, and a finite-state-machine
//! validator.
//!
//! This crate does not tokenize YAML, generate downstream code, parse
//! or serialize binary messages, emit diagrams, or execute state
//! machines at runtime — those are external collaborators. It owns the
//! in-memory model and the rules that make a model valid.
//!
//! ## Quick start
//!
//! ```rust
//! use fsmdol::{DocumentNode, StateMachine};
//!
//! let tree = DocumentNode::mapping([
//!     ("initial", DocumentNode::scalar("Start")),
//!     ("final", DocumentNode::scalar("End")),
//!     (
//!         "states",
//!         DocumentNode::sequence([
//!             DocumentNode::mapping([
//!                 ("name", DocumentNode::scalar("Start")),
//!                 (
//!                     "transitions",
//!                     DocumentNode::sequence([DocumentNode::mapping([(
//!                         "target",
//!                         DocumentNode::scalar("End"),
//!                     )])]),
//!                 ),
//!             ]),
//!             DocumentNode::mapping([("name", DocumentNode::scalar("End"))]),
//!         ]),
//!     ),
//! ]);
//!
//! let machine = StateMachine::from_document("Example", &tree).unwrap();
//! assert_eq!(machine.states.len(), 2);
//! ```

pub mod decl;
pub mod document;
pub mod env;
pub mod error;
pub mod expr;
pub mod fsm;
pub mod lexer;
pub mod parser;
pub mod pratt;
pub mod span;
pub mod stmt;

pub use decl::{ChannelMode, Declaration, FormalArgument};
pub use document::DocumentNode;
pub use env::Env;
pub use error::{Error, LexError, ModelError, ParseError, ValidationError};
pub use expr::{
    ArithOp, AttributeKind, Expression, FolTerm, LogicalOp, Precedence, QuantifierKind, RelOp,
    SimplifyEnv, SimplifyKey, ToFirstOrderLogic, FALSE, TRUE, UNDEFINED,
};
pub use fsm::{State, StateMachine, Transition};
pub use parser::{parse_declaration, parse_expression, parse_statement};
pub use span::Span;
pub use stmt::{ListOpKind, Statement};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn public_surface_parses_and_validates() {
        let expr = parse_expression("Foo = Bar and Bar /= Baz").unwrap();
        assert_eq!(expr.pretty(), "Foo = Bar and Bar /= Baz");
    }

    #[test]
    fn public_surface_rejects_missing_initial() {
        let tree = DocumentNode::mapping([
            ("final", DocumentNode::scalar("End")),
            ("states", DocumentNode::sequence([])),
        ]);
        let err = StateMachine::from_document("Example", &tree).unwrap_err();
        assert!(matches!(err, ModelError::MissingInitial));
    }
}
