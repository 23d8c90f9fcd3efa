//! End-to-end document-to-`StateMachine` tests.

use fsmdol::{DocumentNode, ModelError, StateMachine};
use pretty_assertions::assert_eq;

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
fn minimal_fsm_has_two_states_and_a_true_guarded_transition() {
    let machine = StateMachine::from_document("Minimal", &minimal_tree()).unwrap();
    assert_eq!(machine.states.len(), 2);
    assert_eq!(machine.states[0].name, "START");
    assert_eq!(machine.states[0].transitions.len(), 1);
    assert_eq!(machine.states[0].transitions[0].target, "END");
}

#[test]
fn missing_initial_is_reported() {
    let tree = DocumentNode::mapping([
        ("final", DocumentNode::scalar("END")),
        ("states", DocumentNode::sequence([DocumentNode::mapping([(
            "name",
            DocumentNode::scalar("END"),
        )])])),
    ]);
    let err = StateMachine::from_document("Test", &tree).unwrap_err();
    assert!(matches!(err, ModelError::MissingInitial));
}

#[test]
fn orphan_state_with_only_outgoing_transitions_is_unreachable() {
    let mut tree = minimal_tree();
    if let DocumentNode::Mapping(entries) = &mut tree {
        let (_, states) = entries.iter_mut().find(|(k, _)| k == "states").unwrap();
        if let DocumentNode::Sequence(items) = states {
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
        other => panic!("expected UnreachableStates, got {other:?}"),
    }
}

#[test]
fn full_document_with_channels_variables_and_functions() {
    let tree = DocumentNode::mapping([
        ("initial", DocumentNode::scalar("Start")),
        ("final", DocumentNode::scalar("Done")),
        (
            "channels",
            DocumentNode::sequence([DocumentNode::mapping([
                ("name", DocumentNode::scalar("Net")),
                ("mode", DocumentNode::scalar("Read_Write")),
            ])]),
        ),
        (
            "variables",
            DocumentNode::sequence([DocumentNode::scalar("Counter : Integer := 0")]),
        ),
        (
            "functions",
            DocumentNode::sequence([DocumentNode::scalar("Increment (X : Integer) return Integer")]),
        ),
        (
            "states",
            DocumentNode::sequence([
                DocumentNode::mapping([
                    ("name", DocumentNode::scalar("Start")),
                    (
                        "actions",
                        DocumentNode::sequence([DocumentNode::scalar("Counter := Increment(Counter)")]),
                    ),
                    (
                        "transitions",
                        DocumentNode::sequence([DocumentNode::mapping([
                            ("target", DocumentNode::scalar("Done")),
                            ("condition", DocumentNode::scalar("Net'Valid")),
                        ])]),
                    ),
                ]),
                DocumentNode::mapping([("name", DocumentNode::scalar("Done"))]),
            ]),
        ),
    ]);

    let machine = StateMachine::from_document("Full", &tree).unwrap();
    assert!(machine.declarations["Counter"].is_referenced());
    assert!(machine.declarations["Increment"].is_referenced());
    assert!(machine.declarations["Net"].is_referenced());
}
