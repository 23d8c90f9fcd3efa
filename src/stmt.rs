//! Statement algebra (component B).
//!
//! A [`Statement`] is one action a transition may carry: assignment,
//! erasure, reset, or a list append/extend. Grounded in
//! `original_source/rflx/fsm.py`'s `__validate_actions` (which treats
//! every action uniformly as "parse a statement string, validate its
//! target and its expression") — that module doesn't itself define the
//! statement grammar (it lives in a sibling module not present in the
//! retrieved source), so the four statement forms here are modeled
//! directly off their described shapes.

use crate::decl::Declaration;
use crate::env::Env;
use crate::error::ValidationError;
use crate::expr::Expression;

/// Whether a list operation appends a single element or extends by a
/// whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOpKind {
    /// `Append(target, element)`.
    Append,
    /// `Extend(target, list)`.
    Extend,
}

impl ListOpKind {
    /// The subprogram name this list operation desugars to when
    /// validated as a call: `target := CALL(kind, target, arg)`.
    pub fn call_name(self) -> &'static str {
        match self {
            ListOpKind::Append => "Append",
            ListOpKind::Extend => "Extend",
        }
    }
}

/// One action statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `target := expr`.
    Assignment { target: String, value: Expression },
    /// `target := null` — removes a variable's value without
    /// requiring a type-compatible replacement.
    Erase { target: String },
    /// Resets a list- or message-valued variable to its empty form.
    Reset { target: String },
    /// `Append`/`Extend` onto a list-valued variable.
    ListOperation {
        target: String,
        kind: ListOpKind,
        argument: Expression,
    },
}

impl Statement {
    /// Validates this statement's target and expression against `env`,
    /// marking referenced declarations along the way.
    ///
    /// - `Assignment`'s target must resolve to a `Variable` or
    ///   `Renames` declaration.
    /// - `Erase`'s target must resolve to a `Variable` declaration.
    /// - `Reset`'s target is resolved but its kind is unconstrained at
    ///   this layer (list- vs message-valued is a type-level property
    ///   this algebra does not track).
    /// - `ListOperation` validates as if it were the call
    ///   `target := kind.call_name()(target, argument)`.
    pub fn validate(&self, env: &Env<'_>) -> Result<(), ValidationError> {
        match self {
            Statement::Assignment { target, value } => {
                require_kind(env, target, &["variable", "renames"])?;
                value.validate(env)
            }

            Statement::Erase { target } => {
                require_kind(env, target, &["variable"])?;
                Ok(())
            }

            Statement::Reset { target } => {
                resolve(env, target)?;
                Ok(())
            }

            Statement::ListOperation {
                target, argument, ..
            } => {
                require_kind(env, target, &["variable"])?;
                argument.validate(env)
            }
        }
    }
}

fn resolve<'a>(env: &Env<'a>, name: &str) -> Result<&'a Declaration, ValidationError> {
    let decl = env
        .lookup(name)
        .ok_or_else(|| ValidationError::UnknownReference {
            name: name.to_string(),
        })?;
    decl.mark_referenced();
    Ok(decl)
}

fn require_kind<'a>(
    env: &Env<'a>,
    name: &str,
    accepted: &[&'static str],
) -> Result<&'a Declaration, ValidationError> {
    let decl = resolve(env, name)?;
    if accepted.contains(&decl.kind_name()) {
        Ok(decl)
    } else {
        Err(ValidationError::WrongDeclarationKind {
            name: name.to_string(),
            expected: accepted.join(" or "),
            found: decl.kind_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(decls: Vec<(&str, Declaration)>) -> HashMap<String, Declaration> {
        decls
            .into_iter()
            .map(|(name, decl)| (name.to_string(), decl))
            .collect()
    }

    #[test]
    fn assignment_requires_variable_or_renames() {
        let globals = env_with(vec![("X", Declaration::variable("Integer", None))]);
        let env = Env::globals_only(&globals);
        let stmt = Statement::Assignment {
            target: "X".to_string(),
            value: Expression::Int { value: 1, base: None },
        };
        assert!(stmt.validate(&env).is_ok());
    }

    #[test]
    fn assignment_to_channel_is_rejected() {
        let globals = env_with(vec![("C", Declaration::channel(crate::decl::ChannelMode::ReadWrite))]);
        let env = Env::globals_only(&globals);
        let stmt = Statement::Assignment {
            target: "C".to_string(),
            value: Expression::Bool(true),
        };
        assert!(matches!(
            stmt.validate(&env),
            Err(ValidationError::WrongDeclarationKind { .. })
        ));
    }

    #[test]
    fn erase_marks_referenced() {
        let globals = env_with(vec![("X", Declaration::variable("Integer", None))]);
        let env = Env::globals_only(&globals);
        let stmt = Statement::Erase {
            target: "X".to_string(),
        };
        stmt.validate(&env).unwrap();
        assert!(globals.get("X").unwrap().is_referenced());
    }

    #[test]
    fn unknown_target_is_rejected() {
        let globals = HashMap::new();
        let env = Env::globals_only(&globals);
        let stmt = Statement::Reset {
            target: "Missing".to_string(),
        };
        assert!(matches!(
            stmt.validate(&env),
            Err(ValidationError::UnknownReference { .. })
        ));
    }
}
