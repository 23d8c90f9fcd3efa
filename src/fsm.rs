//! FSM validator (component F).
//!
//! Assembles a [`StateMachine`] from a [`crate::document::ParsedDocument`]
//! and enforces the structural/scoping invariants, in order: state
//! existence, duplicate states, reachability, conditions, actions,
//! declarations. Grounded in `original_source/rflx/fsm.py`'s
//! `StateMachine.__init__`, which runs exactly these checks in exactly
//! this order (`__validate_state_existence`,
//! `__validate_duplicate_states`, `__validate_state_reachability`,
//! `__validate_conditions`, `__validate_actions`,
//! `__validate_declarations`).

use std::collections::{HashMap, HashSet};

use crate::decl::Declaration;
use crate::document::{self, DocumentNode, ParsedDocument, RawState};
use crate::env::Env;
use crate::error::ModelError;
use crate::expr::Expression;
use crate::stmt::Statement;

/// Reserved identifiers no global declaration name may collide with
/// (case-insensitively).
const RESERVED_BUILTINS: &[&str] = &["READ", "WRITE", "CALL", "DATA_AVAILABLE", "APPEND", "EXTEND"];

/// A target state name plus its guard condition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub target: String,
    pub condition: Expression,
}

/// A named state: its outgoing transitions, its actions, and its
/// local declarations.
#[derive(Debug)]
pub struct State {
    pub name: String,
    pub transitions: Vec<Transition>,
    pub actions: Vec<Statement>,
    pub declarations: HashMap<String, Declaration>,
}

/// A validated finite state machine.
#[derive(Debug)]
pub struct StateMachine {
    pub name: String,
    pub initial: String,
    pub final_state: String,
    pub states: Vec<State>,
    pub declarations: HashMap<String, Declaration>,
}

impl StateMachine {
    /// Decodes `tree` and assembles + validates a [`StateMachine`]
    /// named `name`.
    pub fn from_document(name: impl Into<String>, tree: &DocumentNode) -> Result<StateMachine, ModelError> {
        let parsed = document::decode(tree)?;
        Self::assemble(name.into(), parsed)
    }

    fn assemble(name: String, parsed: ParsedDocument) -> Result<StateMachine, ModelError> {
        let ParsedDocument {
            initial,
            final_state,
            declarations,
            states: raw_states,
        } = parsed;

        let states: Vec<State> = raw_states
            .into_iter()
            .map(|raw: RawState| State {
                name: raw.name,
                transitions: raw
                    .transitions
                    .into_iter()
                    .map(|t| Transition {
                        target: t.target,
                        condition: t.condition,
                    })
                    .collect(),
                actions: raw.actions,
                declarations: raw.locals,
            })
            .collect();

        let machine = StateMachine {
            name,
            initial,
            final_state,
            states,
            declarations,
        };
        machine.validate()?;
        Ok(machine)
    }

    fn validate(&self) -> Result<(), ModelError> {
        self.validate_state_existence()?;
        self.validate_duplicate_states()?;
        self.validate_reachability()?;
        self.validate_conditions()?;
        self.validate_actions()?;
        self.validate_declarations()?;
        Ok(())
    }

    fn validate_state_existence(&self) -> Result<(), ModelError> {
        let names: HashSet<&str> = self.states.iter().map(|s| s.name.as_str()).collect();
        if !names.contains(self.initial.as_str()) {
            return Err(ModelError::NoSuchBoundaryState {
                which: "initial",
                name: self.initial.clone(),
                fsm: self.name.clone(),
            });
        }
        if !names.contains(self.final_state.as_str()) {
            return Err(ModelError::NoSuchBoundaryState {
                which: "final",
                name: self.final_state.clone(),
                fsm: self.name.clone(),
            });
        }
        for state in &self.states {
            for transition in &state.transitions {
                if !names.contains(transition.target.as_str()) {
                    return Err(ModelError::NoSuchTransitionTarget {
                        from: state.name.clone(),
                        target: transition.target.clone(),
                        fsm: self.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_duplicate_states(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        let mut duplicates = HashSet::new();
        for state in &self.states {
            if !seen.insert(state.name.as_str()) {
                duplicates.insert(state.name.clone());
            }
        }
        if duplicates.is_empty() {
            return Ok(());
        }
        let mut names: Vec<String> = duplicates.into_iter().collect();
        names.sort();
        Err(ModelError::DuplicateStates { names })
    }

    fn validate_reachability(&self) -> Result<(), ModelError> {
        let mut incoming: HashSet<&str> = HashSet::new();
        for state in &self.states {
            for transition in &state.transitions {
                incoming.insert(transition.target.as_str());
            }
        }

        let unreachable: Vec<String> = self
            .states
            .iter()
            .filter(|s| s.name != self.initial && !incoming.contains(s.name.as_str()))
            .map(|s| s.name.clone())
            .collect();
        if !unreachable.is_empty() {
            return Err(ModelError::UnreachableStates { names: unreachable });
        }

        let detached: Vec<String> = self
            .states
            .iter()
            .filter(|s| s.name != self.final_state && s.transitions.is_empty())
            .map(|s| s.name.clone())
            .collect();
        if !detached.is_empty() {
            return Err(ModelError::DetachedStates { names: detached });
        }

        Ok(())
    }

    fn validate_conditions(&self) -> Result<(), ModelError> {
        for state in &self.states {
            let env = Env::with_locals(&self.declarations, &state.declarations);
            for (index, transition) in state.transitions.iter().enumerate() {
                transition
                    .condition
                    .validate(&env)
                    .map_err(|source| ModelError::InvalidCondition {
                        state: state.name.clone(),
                        index,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    fn validate_actions(&self) -> Result<(), ModelError> {
        for state in &self.states {
            let env = Env::with_locals(&self.declarations, &state.declarations);
            for (index, action) in state.actions.iter().enumerate() {
                action
                    .validate(&env)
                    .map_err(|source| ModelError::InvalidAction {
                        state: state.name.clone(),
                        index,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    fn validate_declarations(&self) -> Result<(), ModelError> {
        for state in &self.states {
            let mut local_names: Vec<&String> = state.declarations.keys().collect();
            local_names.sort();
            for name in &local_names {
                if self.declarations.contains_key(*name) {
                    return Err(ModelError::LocalShadowsGlobal {
                        state: state.name.clone(),
                        name: (*name).clone(),
                    });
                }
            }
            for name in &local_names {
                let decl = &state.declarations[*name];
                if !decl.is_referenced() {
                    return Err(ModelError::UnusedLocal {
                        state: state.name.clone(),
                        name: (*name).clone(),
                    });
                }
            }
        }

        let mut global_names: Vec<&String> = self.declarations.keys().collect();
        global_names.sort();
        let env = Env::globals_only(&self.declarations);

        // Every global must validate before any global's "unused" bit is
        // tested: a declaration's own initializer/renames expression can
        // mark *other* globals referenced (see `decl::Declaration::validate`),
        // so an earlier-sorted global may only become referenced once a
        // later-sorted one has validated. Merging these into one loop
        // would falsely reject globals referenced only by a later
        // sibling's initializer.
        for name in &global_names {
            let decl = &self.declarations[*name];
            let upper = name.to_uppercase();
            if RESERVED_BUILTINS.contains(&upper.as_str()) {
                return Err(ModelError::BuiltinShadow {
                    kind: decl.kind_name(),
                    name: upper,
                });
            }
            decl.validate(&env)
                .map_err(|source| ModelError::InvalidGlobalDeclaration {
                    kind: decl.kind_name(),
                    name: (*name).clone(),
                    source,
                })?;
        }

        for name in global_names {
            let decl = &self.declarations[name];
            // PrivateDeclaration is exempt from the "unused" check only.
            if decl.is_private() {
                continue;
            }
            if !decl.is_referenced() {
                return Err(ModelError::UnusedGlobal {
                    kind: decl.kind_name(),
                    name: name.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentNode;

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
    fn minimal_fsm_validates() {
        let machine = StateMachine::from_document("Test", &minimal_tree()).unwrap();
        assert_eq!(machine.states.len(), 2);
        assert_eq!(machine.states[0].transitions[0].target, "END");
        assert_eq!(machine.states[0].transitions[0].condition, Expression::Bool(true));
    }

    #[test]
    fn unreachable_state_is_rejected() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            let states = entries.iter_mut().find(|(k, _)| k == "states").unwrap();
            if let DocumentNode::Sequence(items) = &mut states.1 {
                items.push(DocumentNode::mapping([
                    ("name", DocumentNode::scalar("ORPHAN")),
                    (
                        "transitions",
                        DocumentNode::sequence([DocumentNode::mapping([(
                            "target",
                            DocumentNode::scalar("END"),
                        )])]),
                    ),
                ]));
            }
        }
        let err = StateMachine::from_document("Test", &tree).unwrap_err();
        match err {
            ModelError::UnreachableStates { names } => assert_eq!(names, vec!["ORPHAN".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn builtin_name_collision_is_rejected() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            entries.push((
                "variables".to_string(),
                DocumentNode::sequence([DocumentNode::scalar("Read : Integer")]),
            ));
        }
        let err = StateMachine::from_document("Test", &tree).unwrap_err();
        assert!(matches!(err, ModelError::BuiltinShadow { .. }));
    }

    #[test]
    fn unused_global_is_rejected() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            entries.push((
                "variables".to_string(),
                DocumentNode::sequence([DocumentNode::scalar("Counter : Integer")]),
            ));
        }
        let err = StateMachine::from_document("Test", &tree).unwrap_err();
        assert!(matches!(err, ModelError::UnusedGlobal { .. }));
    }

    #[test]
    fn referenced_global_is_accepted() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            entries.push((
                "variables".to_string(),
                DocumentNode::sequence([DocumentNode::scalar("Counter : Integer")]),
            ));
            let states = entries.iter_mut().find(|(k, _)| k == "states").unwrap();
            if let DocumentNode::Sequence(items) = &mut states.1 {
                if let DocumentNode::Mapping(start_entries) = &mut items[0] {
                    if let Some((_, DocumentNode::Sequence(transitions))) =
                        start_entries.iter_mut().find(|(k, _)| k == "transitions")
                    {
                        if let DocumentNode::Mapping(t) = &mut transitions[0] {
                            t.push(("condition".to_string(), DocumentNode::scalar("Counter = 0")));
                        }
                    }
                }
            }
        }
        let machine = StateMachine::from_document("Test", &tree).unwrap();
        assert!(machine.declarations["Counter"].is_referenced());
    }

    #[test]
    fn global_referenced_only_by_a_later_sorted_globals_initializer_is_accepted() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            entries.push((
                "variables".to_string(),
                DocumentNode::sequence([
                    DocumentNode::scalar("A : Integer"),
                    DocumentNode::scalar("B : Integer := A"),
                ]),
            ));
            let states = entries.iter_mut().find(|(k, _)| k == "states").unwrap();
            if let DocumentNode::Sequence(items) = &mut states.1 {
                if let DocumentNode::Mapping(start_entries) = &mut items[0] {
                    if let Some((_, DocumentNode::Sequence(transitions))) =
                        start_entries.iter_mut().find(|(k, _)| k == "transitions")
                    {
                        if let DocumentNode::Mapping(t) = &mut transitions[0] {
                            t.push(("condition".to_string(), DocumentNode::scalar("B = 0")));
                        }
                    }
                }
            }
        }
        // "A" sorts before "B", but only "B"'s initializer references "A";
        // all globals must validate before any unused-check runs.
        let machine = StateMachine::from_document("Test", &tree).unwrap();
        assert!(machine.declarations["A"].is_referenced());
        assert!(machine.declarations["B"].is_referenced());
    }

    #[test]
    fn private_declaration_is_exempt_from_unused_check() {
        let mut tree = minimal_tree();
        if let DocumentNode::Mapping(entries) = &mut tree {
            entries.push((
                "types".to_string(),
                DocumentNode::sequence([DocumentNode::scalar("Opaque_Type is private")]),
            ));
        }
        let machine = StateMachine::from_document("Test", &tree).unwrap();
        assert!(!machine.declarations["Opaque_Type"].is_referenced());
    }
}
