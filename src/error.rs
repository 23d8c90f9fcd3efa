//! Error types for the modeling toolkit core.
//!
//! Three closed error families:
//!
//! - [`LexError`]: tokenization failures inside an embedded string.
//! - [`ParseError`]: surface-syntax failures (wraps `LexError`).
//! - [`ValidationError`]: semantic failures against a declaration
//!   environment (unknown name, arity mismatch, wrong declaration
//!   kind).
//! - [`ModelError`]: structural FSM failures, including validation
//!   errors wrapped with state/transition/action context.
//!
//! [`Error`] is the top-level union returned by the crate's entry
//! points.

use thiserror::Error;

use crate::span::Span;

/// Errors produced while tokenizing an embedded string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// An unexpected character was encountered.
    #[error("unexpected character '{ch}' at line {}, column {}", span.line, span.column)]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Location of the character.
        span: Span,
    },

    /// A string literal was not closed before end of input.
    #[error("unterminated string literal starting at line {}, column {}", span.line, span.column)]
    UnterminatedString {
        /// Location of the opening quote.
        span: Span,
    },
}

/// Errors produced while parsing an embedded expression, statement, or
/// declaration string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An unexpected token was encountered.
    #[error("expected {expected}, found {found} at line {}, column {}", span.line, span.column)]
    UnexpectedToken {
        /// What the parser was expecting.
        expected: String,
        /// A description of what was found instead.
        found: String,
        /// Location of the unexpected token.
        span: Span,
    },

    /// The input ended before a complete construct was parsed.
    #[error("unexpected end of input at line {}, column {}: {context}", span.line, span.column)]
    UnexpectedEof {
        /// What the parser was in the middle of parsing.
        context: String,
        /// Location at end of input.
        span: Span,
    },

    /// Trailing, unconsumed input remained after a complete
    /// expression/statement/declaration was parsed.
    #[error("unexpected trailing input '{fragment}' at line {}, column {}", span.line, span.column)]
    TrailingInput {
        /// The unconsumed fragment.
        fragment: String,
        /// Location of the fragment.
        span: Span,
    },

    /// Formal argument names of a subprogram declaration were not
    /// unique.
    #[error("duplicate formal argument '{name}' in subprogram '{subprogram}'")]
    DuplicateFormalArgument {
        /// The subprogram being declared.
        subprogram: String,
        /// The argument name repeated.
        name: String,
    },

    /// A channel mode symbol was neither `Read`, `Write`, nor
    /// `Read_Write`.
    #[error("invalid channel mode '{mode}'")]
    InvalidChannelMode {
        /// The offending mode text.
        mode: String,
    },

    /// A lexer error occurred while parsing.
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// The span at which this error was detected, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedToken { span, .. } => Some(*span),
            ParseError::UnexpectedEof { span, .. } => Some(*span),
            ParseError::TrailingInput { span, .. } => Some(*span),
            ParseError::DuplicateFormalArgument { .. } => None,
            ParseError::InvalidChannelMode { .. } => None,
            ParseError::Lex(LexError::UnexpectedChar { span, .. })
            | ParseError::Lex(LexError::UnterminatedString { span }) => Some(*span),
        }
    }
}

/// Errors produced while validating an expression, statement, or
/// declaration against a declaration environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name reference did not resolve in the environment.
    #[error("unknown reference to '{name}'")]
    UnknownReference {
        /// The unresolved name.
        name: String,
    },

    /// A subprogram call supplied the wrong number of arguments.
    #[error("subprogram '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        /// The subprogram name.
        name: String,
        /// The declared arity.
        expected: usize,
        /// The number of arguments supplied at the call site.
        found: usize,
    },

    /// A name resolved, but not to a declaration kind valid in this
    /// position (e.g. an assignment target that is not a variable or
    /// renames).
    #[error("'{name}' is a {found}, expected {expected}")]
    WrongDeclarationKind {
        /// The offending name.
        name: String,
        /// The declaration kinds accepted here, comma-joined.
        expected: String,
        /// The declaration kind actually found.
        found: &'static str,
    },
}

/// Structural and semantic failures of an assembled FSM, including
/// document-decoding failures reported as `ModelError` once a document
/// has been accepted into the declaration/state model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The document had no `initial` key.
    #[error("missing initial state")]
    MissingInitial,

    /// The document had no `final` key.
    #[error("missing final state")]
    MissingFinal,

    /// The document had no `states` key.
    #[error("missing states")]
    MissingStates,

    /// A document mapping (top-level or nested) had keys this format
    /// does not recognize.
    #[error("unexpected elements [{}]", .keys.join(", "))]
    UnexpectedElements {
        /// The offending keys, sorted.
        keys: Vec<String>,
    },

    /// The `states` sequence was empty.
    #[error("empty states")]
    EmptyStates,

    /// `initial` or `final` named a state that was not declared.
    #[error("{which} state \"{name}\" does not exist in \"{fsm}\"")]
    NoSuchBoundaryState {
        /// Either `"initial"` or `"final"`.
        which: &'static str,
        /// The undeclared state name.
        name: String,
        /// The enclosing FSM's name.
        fsm: String,
    },

    /// A transition's `target` named a state that was not declared.
    #[error("transition from state \"{from}\" to non-existent state \"{target}\" in \"{fsm}\"")]
    NoSuchTransitionTarget {
        /// The source state.
        from: String,
        /// The undeclared target name.
        target: String,
        /// The enclosing FSM's name.
        fsm: String,
    },

    /// Two or more states shared the same name.
    #[error("duplicate states {}", .names.join(", "))]
    DuplicateStates {
        /// The duplicated names, sorted.
        names: Vec<String>,
    },

    /// A non-initial state has no incoming transitions.
    #[error("unreachable states {}", .names.join(", "))]
    UnreachableStates {
        /// The unreachable state names, in document order.
        names: Vec<String>,
    },

    /// A non-final state has no outgoing transitions.
    #[error("detached states {}", .names.join(", "))]
    DetachedStates {
        /// The detached state names, in document order.
        names: Vec<String>,
    },

    /// A transition's condition failed to validate.
    #[error("{source} in transition {index} of state {state}")]
    InvalidCondition {
        /// The enclosing state.
        state: String,
        /// The transition's index within that state.
        index: usize,
        /// The underlying validation failure.
        source: ValidationError,
    },

    /// An action failed to validate.
    #[error("{source} in action {index} of state {state}")]
    InvalidAction {
        /// The enclosing state.
        state: String,
        /// The action's index within that state.
        index: usize,
        /// The underlying validation failure.
        source: ValidationError,
    },

    /// A state-local declaration reused a global declaration's name.
    #[error("local variable {name} shadows global declaration in state {state}")]
    LocalShadowsGlobal {
        /// The enclosing state.
        state: String,
        /// The shadowing name.
        name: String,
    },

    /// A state-local declaration was never referenced by a condition
    /// or action in that state.
    #[error("unused local variable {name} in state {state}")]
    UnusedLocal {
        /// The enclosing state.
        state: String,
        /// The unreferenced name.
        name: String,
    },

    /// A global declaration's name (case-insensitively) collides with
    /// a reserved builtin.
    #[error("{kind} declaration shadows builtin subprogram {name}")]
    BuiltinShadow {
        /// The declaration kind (`"subprogram"`, `"variable"`, ...).
        kind: &'static str,
        /// The upper-cased colliding name.
        name: String,
    },

    /// A global declaration's own embedded expressions failed to
    /// validate.
    #[error("{source} in global {kind} {name}")]
    InvalidGlobalDeclaration {
        /// The declaration kind.
        kind: &'static str,
        /// The declaration's name.
        name: String,
        /// The underlying validation failure.
        source: ValidationError,
    },

    /// A global declaration (other than a private type) was never
    /// referenced anywhere in the FSM.
    #[error("unused {kind} {name}")]
    UnusedGlobal {
        /// The declaration kind.
        kind: &'static str,
        /// The unreferenced name.
        name: String,
    },

    /// Two declarations across any combination of sections
    /// (`functions`/`variables`/`types`/`renames`/`channels`) shared a
    /// name.
    #[error("conflicting {kind} {name}")]
    ConflictingDeclaration {
        /// The section the second occurrence was found in.
        kind: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A `channels` entry had no `name` key.
    #[error("channel {index} has no name")]
    ChannelMissingName {
        /// The entry's index within `channels`.
        index: usize,
    },

    /// A `channels` entry had no `mode` key.
    #[error("channel {name} has no mode")]
    ChannelMissingMode {
        /// The channel's name.
        name: String,
    },

    /// A `channels` entry's `mode` was not `Read`/`Write`/`Read_Write`.
    #[error("channel {name} has invalid mode {mode}")]
    ChannelInvalidMode {
        /// The channel's name.
        name: String,
        /// The offending mode text.
        mode: String,
    },

    /// Parsing an embedded declaration/condition/action string failed.
    #[error("error parsing {what} {index} of state {state} ({source})")]
    EmbeddedParse {
        /// What was being parsed (`"action"`, `"variable"`, or a
        /// transition description).
        what: &'static str,
        /// Its index within the enclosing sequence.
        index: usize,
        /// The enclosing state's name.
        state: String,
        /// The underlying parse failure.
        source: ParseError,
    },

    /// Parsing a global declaration string failed.
    #[error("error parsing global {kind} declaration {index} ({source})")]
    GlobalDeclarationParse {
        /// The section the declaration came from.
        kind: &'static str,
        /// Its index within that section.
        index: usize,
        /// The underlying parse failure.
        source: ParseError,
    },
}

/// The union of every error this crate's public entry points can
/// return.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A surface-syntax failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A structural or semantic FSM failure.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// A bare validation failure (from calling `validate` directly on
    /// an expression/statement/declaration outside of FSM assembly).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
