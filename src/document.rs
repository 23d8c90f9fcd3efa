//! Document decoder adapter (component E).
//!
//! [`DocumentNode`] is a decoder-agnostic document tree — a caller who
//! already owns a YAML (or JSON, or hand-built) decoder hands this
//! crate one of these instead of this crate depending on a YAML crate
//! itself. [`decode`] walks a tree shaped like the FSM document format
//! and produces a [`ParsedDocument`]: declarations and states with
//! every embedded string already run through the component-D parser,
//! ready for `crate::fsm::StateMachine::validate`.
//!
//! Grounded in `original_source/rflx/fsm.py`'s `FSM.__parse_functions`/
//! `__parse_variables`/`__parse_types`/`__parse_channels`/
//! `__parse_renames`/`__parse_declarations`/`__parse_transitions`/
//! `__parse_states` — same section order, same per-entry shape.

use std::collections::HashMap;

use crate::decl::{ChannelMode, Declaration};
use crate::error::{ModelError, ParseError};
use crate::expr::Expression;
use crate::parser;
use crate::stmt::Statement;

/// A decoder-agnostic document tree: an ordered mapping, an ordered
/// sequence, or a scalar string.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    /// An ordered mapping (insertion order is preserved; lookups are
    /// linear, which is fine at this document's scale).
    Mapping(Vec<(String, DocumentNode)>),
    /// An ordered sequence.
    Sequence(Vec<DocumentNode>),
    /// A scalar string (an embedded expression/statement/declaration,
    /// or a bare name).
    Scalar(String),
}

impl DocumentNode {
    /// Builds a mapping node from an iterator of key/value pairs.
    pub fn mapping(entries: impl IntoIterator<Item = (impl Into<String>, DocumentNode)>) -> Self {
        DocumentNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a sequence node.
    pub fn sequence(items: impl IntoIterator<Item = DocumentNode>) -> Self {
        DocumentNode::Sequence(items.into_iter().collect())
    }

    /// Builds a scalar node.
    pub fn scalar(text: impl Into<String>) -> Self {
        DocumentNode::Scalar(text.into())
    }

    fn as_mapping(&self) -> Option<&[(String, DocumentNode)]> {
        match self {
            DocumentNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    fn as_sequence(&self) -> Option<&[DocumentNode]> {
        match self {
            DocumentNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    fn as_scalar(&self) -> Option<&str> {
        match self {
            DocumentNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Option<&DocumentNode> {
        self.as_mapping()?.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<serde_json::Value> for DocumentNode {
    type Error = ModelError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(map) => Ok(DocumentNode::Mapping(
                map.into_iter()
                    .map(|(k, v)| Ok((k, DocumentNode::try_from(v)?)))
                    .collect::<Result<Vec<_>, ModelError>>()?,
            )),
            serde_json::Value::Array(items) => Ok(DocumentNode::Sequence(
                items
                    .into_iter()
                    .map(DocumentNode::try_from)
                    .collect::<Result<Vec<_>, ModelError>>()?,
            )),
            serde_json::Value::String(s) => Ok(DocumentNode::Scalar(s)),
            serde_json::Value::Bool(b) => Ok(DocumentNode::Scalar(b.to_string())),
            serde_json::Value::Number(n) => Ok(DocumentNode::Scalar(n.to_string())),
            serde_json::Value::Null => Ok(DocumentNode::Scalar(String::new())),
        }
    }
}

/// One not-yet-validated transition: a target state name and a
/// condition expression (already defaulted to `TRUE` if absent).
#[derive(Debug, Clone)]
pub struct RawTransition {
    pub target: String,
    pub condition: Expression,
}

/// One not-yet-validated state: its name, local declarations, parsed
/// actions, and parsed transitions.
#[derive(Debug)]
pub struct RawState {
    pub name: String,
    pub locals: HashMap<String, Declaration>,
    pub actions: Vec<Statement>,
    pub transitions: Vec<RawTransition>,
}

/// The result of decoding a document: global declarations plus the
/// not-yet-validated state list, ready for
/// `crate::fsm::StateMachine::validate`.
#[derive(Debug)]
pub struct ParsedDocument {
    pub initial: String,
    pub final_state: String,
    pub declarations: HashMap<String, Declaration>,
    pub states: Vec<RawState>,
}

const TOP_LEVEL_KEYS: &[&str] = &[
    "initial", "final", "states", "channels", "variables", "functions", "types", "renames",
];
const STATE_KEYS: &[&str] = &["name", "actions", "transitions", "variables", "doc"];
const TRANSITION_KEYS: &[&str] = &["target", "condition", "doc"];

fn check_unexpected_keys(entries: &[(String, DocumentNode)], allowed: &[&str]) -> Result<(), ModelError> {
    let mut unexpected: Vec<String> = entries
        .iter()
        .map(|(k, _)| k.clone())
        .filter(|k| !allowed.contains(&k.as_str()))
        .collect();
    if unexpected.is_empty() {
        return Ok(());
    }
    unexpected.sort();
    Err(ModelError::UnexpectedElements { keys: unexpected })
}

fn scalar_sequence<'a>(node: &'a DocumentNode) -> impl Iterator<Item = &'a str> {
    node.as_sequence()
        .unwrap_or(&[])
        .iter()
        .filter_map(DocumentNode::as_scalar)
}

fn insert_global(
    declarations: &mut HashMap<String, Declaration>,
    kind: &'static str,
    name: String,
    decl: Declaration,
) -> Result<(), ModelError> {
    if declarations.contains_key(&name) {
        return Err(ModelError::ConflictingDeclaration { kind, name });
    }
    declarations.insert(name, decl);
    Ok(())
}

fn parse_global_section(
    tree: &DocumentNode,
    key: &'static str,
    declarations: &mut HashMap<String, Declaration>,
) -> Result<(), ModelError> {
    let Some(section) = tree.get(key) else {
        return Ok(());
    };
    for (index, text) in scalar_sequence(section).enumerate() {
        let (name, decl) = parser::parse_declaration(text).map_err(|source| ModelError::GlobalDeclarationParse {
            kind: key,
            index,
            source,
        })?;
        insert_global(declarations, key, name, decl)?;
    }
    Ok(())
}

fn parse_channels(tree: &DocumentNode, declarations: &mut HashMap<String, Declaration>) -> Result<(), ModelError> {
    let Some(section) = tree.get("channels") else {
        return Ok(());
    };
    for (index, entry) in section.as_sequence().unwrap_or(&[]).iter().enumerate() {
        let name = entry
            .get("name")
            .and_then(DocumentNode::as_scalar)
            .ok_or(ModelError::ChannelMissingName { index })?
            .to_string();
        let mode_text = entry
            .get("mode")
            .and_then(DocumentNode::as_scalar)
            .ok_or_else(|| ModelError::ChannelMissingMode { name: name.clone() })?;
        let mode = parse_channel_mode(mode_text).ok_or_else(|| ModelError::ChannelInvalidMode {
            name: name.clone(),
            mode: mode_text.to_string(),
        })?;
        insert_global(declarations, "channel", name, Declaration::channel(mode))?;
    }
    Ok(())
}

fn parse_channel_mode(text: &str) -> Option<ChannelMode> {
    ChannelMode::parse(text).ok()
}

fn parse_condition(text: Option<&str>) -> Result<Expression, ParseError> {
    match text {
        Some(t) => parser::parse_expression(t),
        None => Ok(Expression::Bool(true)),
    }
}

fn parse_state(entry: &DocumentNode, index: usize) -> Result<RawState, ModelError> {
    let entries = entry
        .as_mapping()
        .ok_or_else(|| ModelError::UnexpectedElements { keys: vec![] })?;
    check_unexpected_keys(entries, STATE_KEYS)?;

    let name = entry
        .get("name")
        .and_then(DocumentNode::as_scalar)
        .ok_or_else(|| ModelError::UnexpectedElements {
            keys: vec!["<state missing name>".to_string()],
        })?
        .to_string();

    let mut locals = HashMap::new();
    if let Some(vars) = entry.get("variables") {
        for (var_index, text) in scalar_sequence(vars).enumerate() {
            let (var_name, decl) =
                parser::parse_declaration(text).map_err(|source| ModelError::EmbeddedParse {
                    what: "variable",
                    index: var_index,
                    state: name.clone(),
                    source,
                })?;
            if locals.contains_key(&var_name) {
                return Err(ModelError::ConflictingDeclaration {
                    kind: "local",
                    name: var_name,
                });
            }
            locals.insert(var_name, decl);
        }
    }

    let mut actions = Vec::new();
    if let Some(acts) = entry.get("actions") {
        for (act_index, text) in scalar_sequence(acts).enumerate() {
            let stmt = parser::parse_statement(text).map_err(|source| ModelError::EmbeddedParse {
                what: "action",
                index: act_index,
                state: name.clone(),
                source,
            })?;
            actions.push(stmt);
        }
    }

    let mut transitions = Vec::new();
    if let Some(trans) = entry.get("transitions") {
        for (trans_index, trans_entry) in trans.as_sequence().unwrap_or(&[]).iter().enumerate() {
            let trans_entries = trans_entry
                .as_mapping()
                .ok_or_else(|| ModelError::UnexpectedElements { keys: vec![] })?;
            check_unexpected_keys(trans_entries, TRANSITION_KEYS)?;
            let target = trans_entry
                .get("target")
                .and_then(DocumentNode::as_scalar)
                .ok_or_else(|| ModelError::UnexpectedElements {
                    keys: vec!["<transition missing target>".to_string()],
                })?
                .to_string();
            let condition_text = trans_entry.get("condition").and_then(DocumentNode::as_scalar);
            let condition = parse_condition(condition_text).map_err(|source| ModelError::EmbeddedParse {
                what: "transition",
                index: trans_index,
                state: name.clone(),
                source,
            })?;
            transitions.push(RawTransition { target, condition });
        }
    }

    let _ = index;
    Ok(RawState {
        name,
        locals,
        actions,
        transitions,
    })
}

/// Decodes a document tree into a [`ParsedDocument`], parsing every
/// embedded declaration/statement/expression string along the way.
/// This is a pure decode: cross-state invariants (reachability,
/// duplicate names, unused declarations, …) are left to
/// `crate::fsm::StateMachine::validate`.
pub fn decode(tree: &DocumentNode) -> Result<ParsedDocument, ModelError> {
    let entries = tree.as_mapping().ok_or(ModelError::MissingStates)?;
    check_unexpected_keys(entries, TOP_LEVEL_KEYS)?;

    let initial = tree
        .get("initial")
        .and_then(DocumentNode::as_scalar)
        .ok_or(ModelError::MissingInitial)?
        .to_string();
    let final_state = tree
        .get("final")
        .and_then(DocumentNode::as_scalar)
        .ok_or(ModelError::MissingFinal)?
        .to_string();
    let states_node = tree.get("states").ok_or(ModelError::MissingStates)?;
    let state_entries = states_node.as_sequence().ok_or(ModelError::MissingStates)?;
    if state_entries.is_empty() {
        return Err(ModelError::EmptyStates);
    }

    let mut declarations = HashMap::new();
    parse_global_section(tree, "functions", &mut declarations)?;
    parse_global_section(tree, "variables", &mut declarations)?;
    parse_global_section(tree, "types", &mut declarations)?;
    parse_channels(tree, &mut declarations)?;
    parse_global_section(tree, "renames", &mut declarations)?;

    let states = state_entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_state(entry, index))
        .collect::<Result<Vec<_>, ModelError>>()?;

    Ok(ParsedDocument {
        initial,
        final_state,
        declarations,
        states,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_tree() -> DocumentNode {
        DocumentNode::mapping([
            ("initial", DocumentNode::scalar("START")),
            ("final", DocumentNode::scalar("END")),
            (
                "states",
                DocumentNode::sequence([
                    DocumentNode::mapping([
                        ("name", DocumentNode::scalar("START")),
                        (
                            "transitions",
                            DocumentNode::sequence([DocumentNode::mapping([(
                                "target",
                                DocumentNode::scalar("END"),
                            )])]),
                        ),
                    ]),
                    DocumentNode::mapping([("name", DocumentNode::scalar("END"))]),
                ]),
            ),
        ])
    }

    #[test]
    fn decodes_minimal_fsm() {
        let doc = decode(&minimal_tree()).unwrap();
        assert_eq!(doc.initial, "START");
        assert_eq!(doc.final_state, "END");
        assert_eq!(doc.states.len(), 2);
        assert_eq!(doc.states[0].transitions.len(), 1);
        assert_eq!(doc.states[0].transitions[0].target, "END");
        assert_eq!(doc.states[0].transitions[0].condition, Expression::Bool(true));
    }

    #[test]
    fn missing_initial_is_an_error() {
        let tree = DocumentNode::mapping([
            ("final", DocumentNode::scalar("END")),
            ("states", DocumentNode::sequence([])),
        ]);
        assert!(matches!(decode(&tree), Err(ModelError::MissingInitial)));
    }

    #[test]
    fn unexpected_top_level_key_is_an_error() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            entries.push(("bogus".to_string(), DocumentNode::scalar("x")));
        }
        assert!(matches!(decode(&tree), Err(ModelError::UnexpectedElements { .. })));
    }

    #[test]
    fn empty_states_is_an_error() {
        let tree = DocumentNode::mapping([
            ("initial", DocumentNode::scalar("START")),
            ("final", DocumentNode::scalar("END")),
            ("states", DocumentNode::sequence([])),
        ]);
        assert!(matches!(decode(&tree), Err(ModelError::EmptyStates)));
    }

    #[test]
    fn invalid_channel_mode_is_an_error() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            entries.push((
                "channels".to_string(),
                DocumentNode::sequence([DocumentNode::mapping([
                    ("name", DocumentNode::scalar("C")),
                    ("mode", DocumentNode::scalar("Bogus")),
                ])]),
            ));
        }
        assert!(matches!(decode(&tree), Err(ModelError::ChannelInvalidMode { .. })));
    }
}
