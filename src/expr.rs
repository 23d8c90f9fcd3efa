//! Expression algebra (component A).
//!
//! [`Expression`] is a closed variant covering literals, name
//! references, arithmetic/relational/logical operators, attribute
//! application, field selection, binding, message aggregates,
//! subprogram calls, type conversion, quantifiers, and comprehensions.
//! Every node supports [`Expression::simplify`], [`Expression::validate`],
//! [`Expression::pretty`], structural equality (`derive(PartialEq)`),
//! and a [`Precedence`] class used by the pretty printer.
//!
//! Grounded in `original_source/rflx/fsm_expression.py` (the FSM-layer
//! extensions — `Contains`/`NotContains`, `Valid`/`Present`/`Head`,
//! `Quantifier`/`ForAll`/`ForSome`, `Convert`) and the generic
//! `rflx.expression` hierarchy it extends (arithmetic, relations,
//! logical connectives — not itself in the retrieved source, so its
//! shape here follows the closed data model directly).

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::decl::Declaration;
use crate::env::Env;
use crate::error::ValidationError;

/// The precedence class of an expression node, used by the pretty
/// printer to decide when a child needs parentheses. Ordered tightest
/// to loosest via [`Precedence::rank`] (higher rank binds tighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Atoms: literals, names, suffix forms (attribute/field/binding/
    /// aggregate), calls, conversions, quantifiers, comprehensions.
    /// Never needs parenthesizing.
    Undefined,
    /// Unary negation and logical `not`.
    Unary,
    /// `in` / `not in`.
    SetOperator,
    /// `*`, `/`.
    Multiplicative,
    /// `+`, `-`.
    Additive,
    /// `<`, `>`, `=`, `/=`.
    Relational,
    /// `and` (n-ary).
    LogicalAnd,
    /// `or` (n-ary).
    LogicalOr,
}

impl Precedence {
    fn rank(self) -> u8 {
        match self {
            Precedence::Undefined => 7,
            Precedence::Unary => 6,
            Precedence::SetOperator => 5,
            Precedence::Multiplicative => 4,
            Precedence::Additive => 3,
            Precedence::Relational => 2,
            Precedence::LogicalAnd => 1,
            Precedence::LogicalOr => 0,
        }
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**` (power)
    Pow,
    /// `mod`
    Mod,
}

impl ArithOp {
    fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Pow => "**",
            ArithOp::Mod => "mod",
        }
    }

    fn precedence(self) -> Precedence {
        match self {
            ArithOp::Add | ArithOp::Sub => Precedence::Additive,
            ArithOp::Mul | ArithOp::Div | ArithOp::Mod | ArithOp::Pow => Precedence::Multiplicative,
        }
    }

    fn eval(self, lhs: i128, rhs: i128) -> Option<i128> {
        match self {
            ArithOp::Add => lhs.checked_add(rhs),
            ArithOp::Sub => lhs.checked_sub(rhs),
            ArithOp::Mul => lhs.checked_mul(rhs),
            ArithOp::Div if rhs != 0 => lhs.checked_div(rhs),
            ArithOp::Mod if rhs != 0 => lhs.checked_rem(rhs),
            ArithOp::Div | ArithOp::Mod => None,
            ArithOp::Pow if rhs >= 0 && rhs <= u32::MAX as i128 => lhs.checked_pow(rhs as u32),
            ArithOp::Pow => None,
        }
    }
}

/// Binary relational operators, plus the `in`/`not in` set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `=`
    Equal,
    /// `/=`
    NotEqual,
    /// `>=`
    GreaterEqual,
    /// `>`
    Greater,
    /// `in`
    Contains,
    /// `not in`
    NotContains,
}

impl RelOp {
    fn symbol(self) -> &'static str {
        match self {
            RelOp::Less => "<",
            RelOp::LessEqual => "<=",
            RelOp::Equal => "=",
            RelOp::NotEqual => "/=",
            RelOp::GreaterEqual => ">=",
            RelOp::Greater => ">",
            RelOp::Contains => "in",
            RelOp::NotContains => "not in",
        }
    }

    fn precedence(self) -> Precedence {
        match self {
            RelOp::Contains | RelOp::NotContains => Precedence::SetOperator,
            _ => Precedence::Relational,
        }
    }

    fn eval_int(self, lhs: i128, rhs: i128) -> Option<bool> {
        match self {
            RelOp::Less => Some(lhs < rhs),
            RelOp::LessEqual => Some(lhs <= rhs),
            RelOp::Equal => Some(lhs == rhs),
            RelOp::NotEqual => Some(lhs != rhs),
            RelOp::GreaterEqual => Some(lhs >= rhs),
            RelOp::Greater => Some(lhs > rhs),
            RelOp::Contains | RelOp::NotContains => None,
        }
    }
}

/// `and` / `or`, each n-ary by chaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `and`
    And,
    /// `or`
    Or,
}

/// A unary postfix attribute applied to a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `'Valid`
    Valid,
    /// `'Present`
    Present,
    /// `'Length`
    Length,
    /// `'Head`
    Head,
    /// `'Opaque`
    Opaque,
    /// `'First`
    First,
    /// `'Last`
    Last,
    /// `'Size`
    Size,
}

impl AttributeKind {
    fn symbol(self) -> &'static str {
        match self {
            AttributeKind::Valid => "Valid",
            AttributeKind::Present => "Present",
            AttributeKind::Length => "Length",
            AttributeKind::Head => "Head",
            AttributeKind::Opaque => "Opaque",
            AttributeKind::First => "First",
            AttributeKind::Last => "Last",
            AttributeKind::Size => "Size",
        }
    }
}

/// `for all` / `for some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    /// `for all`
    All,
    /// `for some`
    Some,
}

/// The expression algebra: a closed variant over every surface
/// expression form.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `True` / `False`.
    Bool(bool),
    /// An integer literal, with an optional base annotation
    /// (`radix`, e.g. `16#FF#` records `(16, 0xFF)`).
    Int { value: i128, base: Option<u32> },
    /// A double-quoted string literal, stored without escape
    /// processing — backslashes are literal characters.
    Str(String),
    /// A qualified or unqualified name reference, stored as its full
    /// dotted path.
    Variable(String),
    /// The distinguished `null`/undefined value, used by `Erase`
    /// (`IDENT := null`).
    Undefined,
    /// A binary arithmetic expression.
    Arith {
        op: ArithOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    /// A binary relational or set-membership expression.
    Relation {
        op: RelOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    /// Unary arithmetic negation (`-x`).
    Neg(Box<Expression>),
    /// Unary logical negation (`not x`).
    Not(Box<Expression>),
    /// An n-ary `and`/`or` chain.
    Logical {
        op: LogicalOp,
        operands: Vec<Expression>,
    },
    /// A postfix attribute application (`expr'Valid`).
    Attribute {
        kind: AttributeKind,
        operand: Box<Expression>,
    },
    /// A field selection (`expr.ident`).
    Field {
        base: Box<Expression>,
        field: String,
    },
    /// `expr where ident = expr, …`.
    Binding {
        base: Box<Expression>,
        bindings: Vec<(String, Expression)>,
    },
    /// `typename'(field => expr, …)`, or empty (`typename'(null
    /// message)`) when `fields` is empty.
    Aggregate {
        type_name: String,
        fields: Vec<(String, Expression)>,
    },
    /// A subprogram call: target name plus positional arguments.
    Call {
        target: String,
        arguments: Vec<Expression>,
    },
    /// A type conversion: target type name plus the converted
    /// expression.
    Convert {
        target_type: String,
        expression: Box<Expression>,
    },
    /// `for all|some ident in expr => expr`.
    Quantifier {
        kind: QuantifierKind,
        variable: String,
        iterable: Box<Expression>,
        predicate: Box<Expression>,
    },
    /// `[for ident in expr => expr when expr]` (the `when` clause
    /// defaults to `TRUE` when absent).
    Comprehension {
        variable: String,
        iterable: Box<Expression>,
        selector: Box<Expression>,
        condition: Box<Expression>,
    },
}

/// The distinguished `TRUE` value.
pub const TRUE: Expression = Expression::Bool(true);
/// The distinguished `FALSE` value.
pub const FALSE: Expression = Expression::Bool(false);
/// The distinguished `UNDEFINED`/`null` value.
pub const UNDEFINED: Expression = Expression::Undefined;

/// A key a [`SimplifyEnv`] maps to a replacement expression: either a
/// bare name, or an attribute applied to a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimplifyKey {
    /// A bare `Variable` name.
    Name(String),
    /// `name'Attribute`.
    Attribute(AttributeKind, String),
}

/// The environment [`Expression::simplify`] substitutes under.
pub type SimplifyEnv = HashMap<SimplifyKey, Expression>;

impl Expression {
    /// This node's precedence class.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expression::Arith { op, .. } => op.precedence(),
            Expression::Relation { op, .. } => op.precedence(),
            Expression::Neg(_) | Expression::Not(_) => Precedence::Unary,
            Expression::Logical { op, .. } => match op {
                LogicalOp::And => Precedence::LogicalAnd,
                LogicalOp::Or => Precedence::LogicalOr,
            },
            _ => Precedence::Undefined,
        }
    }

    fn fmt_operand(&self, parent: Precedence, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precedence().rank() < parent.rank() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    /// Renders a deterministic textual form.
    pub fn pretty(&self) -> String {
        self.to_string()
    }

    /// Partially evaluates this expression under `env` to a fixed
    /// point. Total and infallible.
    pub fn simplify(&self, env: Option<&SimplifyEnv>) -> Expression {
        let mut current = self.simplify_once(env);
        loop {
            let next = current.simplify_once(env);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn lookup_env(env: Option<&SimplifyEnv>, key: &SimplifyKey) -> Option<Expression> {
        env.and_then(|e| e.get(key)).cloned()
    }

    fn simplify_once(&self, env: Option<&SimplifyEnv>) -> Expression {
        match self {
            Expression::Bool(_)
            | Expression::Int { .. }
            | Expression::Str(_)
            | Expression::Undefined => self.clone(),

            Expression::Variable(name) => {
                Self::lookup_env(env, &SimplifyKey::Name(name.clone())).unwrap_or_else(|| self.clone())
            }

            Expression::Arith { op, lhs, rhs } => {
                let lhs = lhs.simplify_once(env);
                let rhs = rhs.simplify_once(env);
                if let (Expression::Int { value: l, .. }, Expression::Int { value: r, .. }) =
                    (&lhs, &rhs)
                {
                    if let Some(v) = op.eval(*l, *r) {
                        return Expression::Int { value: v, base: None };
                    }
                }
                match (op, &lhs, &rhs) {
                    (ArithOp::Add, _, Expression::Int { value: 0, .. }) => lhs,
                    (ArithOp::Add, Expression::Int { value: 0, .. }, _) => rhs,
                    (ArithOp::Sub, _, Expression::Int { value: 0, .. }) => lhs,
                    (ArithOp::Mul, _, Expression::Int { value: 1, .. }) => lhs,
                    (ArithOp::Mul, Expression::Int { value: 1, .. }, _) => rhs,
                    (ArithOp::Mul, _, Expression::Int { value: 0, .. })
                    | (ArithOp::Mul, Expression::Int { value: 0, .. }, _) => {
                        Expression::Int { value: 0, base: None }
                    }
                    _ => Expression::Arith {
                        op: *op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                }
            }

            Expression::Relation { op, lhs, rhs } => {
                let lhs = lhs.simplify_once(env);
                let rhs = rhs.simplify_once(env);
                if let (Expression::Int { value: l, .. }, Expression::Int { value: r, .. }) =
                    (&lhs, &rhs)
                {
                    if let Some(b) = op.eval_int(*l, *r) {
                        return Expression::Bool(b);
                    }
                }
                if lhs == rhs && Self::is_reduced(&lhs) {
                    match op {
                        RelOp::Equal | RelOp::LessEqual | RelOp::GreaterEqual => {
                            return Expression::Bool(true)
                        }
                        RelOp::NotEqual | RelOp::Less | RelOp::Greater => {
                            return Expression::Bool(false)
                        }
                        RelOp::Contains | RelOp::NotContains => {}
                    }
                }
                Expression::Relation {
                    op: *op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            }

            Expression::Neg(inner) => {
                let inner = inner.simplify_once(env);
                match inner {
                    Expression::Int { value, .. } => Expression::Int {
                        value: -value,
                        base: None,
                    },
                    Expression::Neg(x) => *x,
                    _ => Expression::Neg(Box::new(inner)),
                }
            }

            Expression::Not(inner) => {
                let inner = inner.simplify_once(env);
                match inner {
                    Expression::Bool(b) => Expression::Bool(!b),
                    Expression::Not(x) => *x,
                    _ => Expression::Not(Box::new(inner)),
                }
            }

            Expression::Logical { op, operands } => {
                let simplified: Vec<Expression> =
                    operands.iter().map(|e| e.simplify_once(env)).collect();
                let absorbing = match op {
                    LogicalOp::And => false,
                    LogicalOp::Or => true,
                };
                if simplified.iter().any(|e| matches!(e, Expression::Bool(b) if *b == absorbing)) {
                    return Expression::Bool(absorbing);
                }
                let remaining: Vec<Expression> = simplified
                    .into_iter()
                    .filter(|e| !matches!(e, Expression::Bool(b) if *b != absorbing))
                    .collect();
                match remaining.len() {
                    0 => Expression::Bool(!absorbing),
                    1 => remaining.into_iter().next().unwrap(),
                    _ => Expression::Logical {
                        op: *op,
                        operands: remaining,
                    },
                }
            }

            Expression::Attribute { kind, operand } => {
                let operand = operand.simplify_once(env);
                if let Expression::Variable(name) = &operand {
                    if let Some(replacement) =
                        Self::lookup_env(env, &SimplifyKey::Attribute(*kind, name.clone()))
                    {
                        return replacement;
                    }
                }
                Expression::Attribute {
                    kind: *kind,
                    operand: Box::new(operand),
                }
            }

            Expression::Field { base, field } => Expression::Field {
                base: Box::new(base.simplify_once(env)),
                field: field.clone(),
            },

            Expression::Binding { base, bindings } => {
                let bindings: Vec<(String, Expression)> = bindings
                    .iter()
                    .map(|(n, e)| (n.clone(), e.simplify_once(env)))
                    .collect();
                Expression::Binding {
                    base: Box::new(base.simplify_once(env)),
                    bindings,
                }
            }

            Expression::Aggregate { type_name, fields } => Expression::Aggregate {
                type_name: type_name.clone(),
                fields: fields
                    .iter()
                    .map(|(n, e)| (n.clone(), e.simplify_once(env)))
                    .collect(),
            },

            Expression::Call { target, arguments } => Expression::Call {
                target: target.clone(),
                arguments: arguments.iter().map(|a| a.simplify_once(env)).collect(),
            },

            Expression::Convert {
                target_type,
                expression,
            } => Expression::Convert {
                target_type: target_type.clone(),
                expression: Box::new(expression.simplify_once(env)),
            },

            Expression::Quantifier {
                kind,
                variable,
                iterable,
                predicate,
            } => Expression::Quantifier {
                kind: *kind,
                variable: variable.clone(),
                iterable: Box::new(iterable.simplify_once(env)),
                predicate: Box::new(predicate.simplify_once(env)),
            },

            Expression::Comprehension {
                variable,
                iterable,
                selector,
                condition,
            } => Expression::Comprehension {
                variable: variable.clone(),
                iterable: Box::new(iterable.simplify_once(env)),
                selector: Box::new(selector.simplify_once(env)),
                condition: Box::new(condition.simplify_once(env)),
            },
        }
    }

    fn is_reduced(expr: &Expression) -> bool {
        matches!(
            expr,
            Expression::Bool(_) | Expression::Int { .. } | Expression::Str(_) | Expression::Variable(_)
        )
    }

    /// Validates this expression against `env`, setting the
    /// `referenced` bit of every declaration a name resolves to. Fails
    /// with [`ValidationError::UnknownReference`] on an unresolved
    /// name, or [`ValidationError::ArityMismatch`] on a subprogram
    /// call with the wrong argument count.
    pub fn validate(&self, env: &Env<'_>) -> Result<(), ValidationError> {
        self.validate_inner(env, &HashSet::new())
    }

    fn validate_inner(&self, env: &Env<'_>, shadow: &HashSet<String>) -> Result<(), ValidationError> {
        match self {
            Expression::Bool(_) | Expression::Int { .. } | Expression::Str(_) | Expression::Undefined => {
                Ok(())
            }

            Expression::Variable(name) => {
                if shadow.contains(name) {
                    return Ok(());
                }
                resolve(env, name)?;
                Ok(())
            }

            Expression::Arith { lhs, rhs, .. } | Expression::Relation { lhs, rhs, .. } => {
                lhs.validate_inner(env, shadow)?;
                rhs.validate_inner(env, shadow)
            }

            Expression::Neg(inner) | Expression::Not(inner) => inner.validate_inner(env, shadow),

            Expression::Logical { operands, .. } => {
                for o in operands {
                    o.validate_inner(env, shadow)?;
                }
                Ok(())
            }

            Expression::Attribute { operand, .. } => operand.validate_inner(env, shadow),

            Expression::Field { base, .. } => base.validate_inner(env, shadow),

            Expression::Binding { base, bindings } => {
                let mut inner_shadow = shadow.clone();
                for (name, value) in bindings {
                    value.validate_inner(env, shadow)?;
                    inner_shadow.insert(name.clone());
                }
                base.validate_inner(env, &inner_shadow)
            }

            Expression::Aggregate { fields, .. } => {
                for (_, value) in fields {
                    value.validate_inner(env, shadow)?;
                }
                Ok(())
            }

            Expression::Call { target, arguments } => {
                if !shadow.contains(target) {
                    let decl = resolve(env, target)?;
                    if let Declaration::Subprogram { arguments: formals, .. } = decl {
                        if formals.len() != arguments.len() {
                            return Err(ValidationError::ArityMismatch {
                                name: target.clone(),
                                expected: formals.len(),
                                found: arguments.len(),
                            });
                        }
                    }
                }
                for a in arguments {
                    a.validate_inner(env, shadow)?;
                }
                Ok(())
            }

            Expression::Convert { expression, .. } => expression.validate_inner(env, shadow),

            Expression::Quantifier {
                variable,
                iterable,
                predicate,
                ..
            } => {
                iterable.validate_inner(env, shadow)?;
                let mut inner_shadow = shadow.clone();
                inner_shadow.insert(variable.clone());
                predicate.validate_inner(env, &inner_shadow)
            }

            Expression::Comprehension {
                variable,
                iterable,
                selector,
                condition,
            } => {
                iterable.validate_inner(env, shadow)?;
                let mut inner_shadow = shadow.clone();
                inner_shadow.insert(variable.clone());
                selector.validate_inner(env, &inner_shadow)?;
                condition.validate_inner(env, &inner_shadow)
            }
        }
    }
}

fn resolve<'a>(env: &Env<'a>, name: &str) -> Result<&'a Declaration, ValidationError> {
    env.lookup(name).ok_or_else(|| ValidationError::UnknownReference {
        name: name.to_string(),
    }).map(|decl| {
        decl.mark_referenced();
        decl
    })
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Bool(true) => write!(f, "True"),
            Expression::Bool(false) => write!(f, "False"),
            Expression::Undefined => write!(f, "null"),
            Expression::Int { value, base: None } => write!(f, "{}", value),
            Expression::Int {
                value,
                base: Some(radix),
            } => write!(f, "{}#{:x}#", radix, value),
            Expression::Str(s) => write!(f, "\"{}\"", s),
            Expression::Variable(name) => write!(f, "{}", name),

            Expression::Arith { op, lhs, rhs } => {
                lhs.fmt_operand(self.precedence(), f)?;
                write!(f, " {} ", op.symbol())?;
                rhs.fmt_operand(self.precedence(), f)
            }

            Expression::Relation { op, lhs, rhs } => {
                lhs.fmt_operand(self.precedence(), f)?;
                write!(f, " {} ", op.symbol())?;
                rhs.fmt_operand(self.precedence(), f)
            }

            Expression::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_operand(Precedence::Unary, f)
            }

            Expression::Not(inner) => {
                write!(f, "not ")?;
                inner.fmt_operand(Precedence::Unary, f)
            }

            Expression::Logical { op, operands } => {
                let joiner = match op {
                    LogicalOp::And => " and ",
                    LogicalOp::Or => " or ",
                };
                for (i, o) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", joiner)?;
                    }
                    o.fmt_operand(self.precedence(), f)?;
                }
                Ok(())
            }

            Expression::Attribute { kind, operand } => {
                operand.fmt_operand(Precedence::Unary, f)?;
                write!(f, "'{}", kind.symbol())
            }

            Expression::Field { base, field } => write!(f, "{}.{}", base, field),

            Expression::Binding { base, bindings } => {
                write!(f, "{} where ", base)?;
                for (i, (name, value)) in bindings.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", name, value)?;
                }
                Ok(())
            }

            Expression::Aggregate { type_name, fields } => {
                if fields.is_empty() {
                    write!(f, "{}'(null message)", type_name)
                } else {
                    write!(f, "{}'(", type_name)?;
                    for (i, (name, value)) in fields.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{} => {}", name, value)?;
                    }
                    write!(f, ")")
                }
            }

            Expression::Call { target, arguments } => {
                write!(f, "{}(", target)?;
                for (i, a) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", a)?;
                }
                write!(f, ")")
            }

            Expression::Convert {
                target_type,
                expression,
            } => write!(f, "{}({})", target_type, expression),

            Expression::Quantifier {
                kind,
                variable,
                iterable,
                predicate,
            } => {
                let symbol = match kind {
                    QuantifierKind::All => "all",
                    QuantifierKind::Some => "some",
                };
                write!(f, "for {} {} in {} => {}", symbol, variable, iterable, predicate)
            }

            Expression::Comprehension {
                variable,
                iterable,
                selector,
                condition,
            } => write!(
                f,
                "[for {} in {} => {} when {}]",
                variable, iterable, selector, condition
            ),
        }
    }
}

/// A first-order-logic term an expression lowers to, for later solver
/// use. Deliberately solver-agnostic: no SMT crate is a dependency of
/// this crate — that binding is an external collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum FolTerm {
    /// A boolean constant.
    Bool(bool),
    /// An integer constant.
    Int(i128),
    /// A free variable.
    Var(String),
    /// Function/attribute application: a name applied to arguments.
    App(String, Vec<FolTerm>),
    /// Conjunction.
    And(Vec<FolTerm>),
    /// Disjunction.
    Or(Vec<FolTerm>),
    /// Negation.
    Not(Box<FolTerm>),
    /// A binary relation, named by its surface symbol (`"<"`, `"="`, …).
    Rel(&'static str, Box<FolTerm>, Box<FolTerm>),
    /// Universal quantification over a bound name.
    Forall(String, Box<FolTerm>),
    /// Existential quantification over a bound name.
    Exists(String, Box<FolTerm>),
}

/// Lowers an expression to a solver-agnostic first-order-logic term.
pub trait ToFirstOrderLogic {
    /// Produces the FOL term this expression denotes.
    fn to_fol(&self) -> FolTerm;
}

impl ToFirstOrderLogic for Expression {
    fn to_fol(&self) -> FolTerm {
        match self {
            Expression::Bool(b) => FolTerm::Bool(*b),
            Expression::Int { value, .. } => FolTerm::Int(*value),
            Expression::Str(s) => FolTerm::Var(s.clone()),
            Expression::Variable(name) => FolTerm::Var(name.clone()),
            Expression::Undefined => FolTerm::Var("null".to_string()),

            Expression::Arith { op, lhs, rhs } => {
                FolTerm::App(op.symbol().to_string(), vec![lhs.to_fol(), rhs.to_fol()])
            }

            Expression::Relation { op, lhs, rhs } => {
                FolTerm::Rel(op.symbol(), Box::new(lhs.to_fol()), Box::new(rhs.to_fol()))
            }

            Expression::Neg(inner) => FolTerm::App("neg".to_string(), vec![inner.to_fol()]),
            Expression::Not(inner) => FolTerm::Not(Box::new(inner.to_fol())),

            Expression::Logical { op, operands } => {
                let terms = operands.iter().map(ToFirstOrderLogic::to_fol).collect();
                match op {
                    LogicalOp::And => FolTerm::And(terms),
                    LogicalOp::Or => FolTerm::Or(terms),
                }
            }

            Expression::Attribute { kind, operand } => {
                FolTerm::App(kind.symbol().to_string(), vec![operand.to_fol()])
            }

            Expression::Field { base, field } => {
                FolTerm::App("field".to_string(), vec![base.to_fol(), FolTerm::Var(field.clone())])
            }

            Expression::Binding { base, bindings } => {
                let mut terms: Vec<FolTerm> =
                    bindings.iter().map(|(_, e)| e.to_fol()).collect();
                terms.push(base.to_fol());
                FolTerm::App("let".to_string(), terms)
            }

            Expression::Aggregate { type_name, fields } => {
                let mut terms = vec![FolTerm::Var(type_name.clone())];
                terms.extend(fields.iter().map(|(_, e)| e.to_fol()));
                FolTerm::App("aggregate".to_string(), terms)
            }

            Expression::Call { target, arguments } => {
                FolTerm::App(target.clone(), arguments.iter().map(ToFirstOrderLogic::to_fol).collect())
            }

            Expression::Convert {
                target_type,
                expression,
            } => FolTerm::App(target_type.clone(), vec![expression.to_fol()]),

            Expression::Quantifier {
                kind,
                variable,
                predicate,
                ..
            } => match kind {
                QuantifierKind::All => FolTerm::Forall(variable.clone(), Box::new(predicate.to_fol())),
                QuantifierKind::Some => FolTerm::Exists(variable.clone(), Box::new(predicate.to_fol())),
            },

            Expression::Comprehension {
                variable,
                selector,
                condition,
                ..
            } => FolTerm::Exists(
                variable.clone(),
                Box::new(FolTerm::And(vec![condition.to_fol(), selector.to_fol()])),
            ),
        }
    }
}
