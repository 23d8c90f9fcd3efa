//! Recursive-descent + precedence-climbing parser (component D).
//!
//! Produces [`Expression`]/[`Statement`]/[`Declaration`] nodes from
//! embedded strings, via a token-cursor-plus-recursive-descent shape
//! grounded in `original_source/rflx/fsm_parser.py`'s
//! `FSMParser.expression()` atom grammar and `infixNotation` precedence
//! table.

use crate::decl::{ChannelMode, Declaration, FormalArgument};
use crate::error::ParseError;
use crate::expr::{
    AttributeKind, Expression, LogicalOp, QuantifierKind,
};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::pratt::{infix_binding_power, InfixOp, PREFIX_BINDING_POWER};
use crate::stmt::{ListOpKind, Statement};

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_at(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn peek_kind_at(&self, n: usize) -> Option<&TokenKind> {
        self.peek_at(n).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            let found = self.advance();
            Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.lexeme.clone(),
                span: found.span,
            })
        }
    }

    fn eat_ident(&mut self) -> Result<String, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => {
                let found = self.advance();
                Err(ParseError::UnexpectedToken {
                    expected: "identifier".to_string(),
                    found: found.lexeme.clone(),
                    span: found.span,
                })
            }
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if matches!(self.peek_kind(), TokenKind::Eof) {
            Ok(())
        } else {
            let found = self.advance();
            Err(ParseError::TrailingInput {
                fragment: found.lexeme.clone(),
                span: found.span,
            })
        }
    }

    // ---- expression grammar ----

    fn parse_expr(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let mut lhs = self.parse_prefix()?;
        loop {
            let kind = self.peek_kind().clone();
            let next_kind = self.peek_kind_at(1).cloned();
            let Some((l_bp, r_bp, op)) = infix_binding_power(&kind, next_kind.as_ref()) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.advance();
            if matches!(op, InfixOp::NotIn) {
                self.advance();
            }
            let rhs = self.parse_expr(r_bp)?;
            lhs = build_infix(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        match self.peek_kind() {
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_expr(PREFIX_BINDING_POWER)?;
                Ok(Expression::Neg(Box::new(operand)))
            }
            TokenKind::KwNot => {
                self.advance();
                let operand = self.parse_expr(PREFIX_BINDING_POWER)?;
                Ok(Expression::Not(Box::new(operand)))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expression, ParseError> {
        let mut atom = self.parse_atom()?;
        loop {
            match self.peek_kind() {
                TokenKind::Tick => {
                    self.advance();
                    atom = self.parse_tick_suffix(atom)?;
                }
                TokenKind::Dot => {
                    self.advance();
                    let field = self.eat_ident()?;
                    atom = Expression::Field {
                        base: Box::new(atom),
                        field,
                    };
                }
                TokenKind::KwWhere => {
                    self.advance();
                    let bindings = self.parse_bindings()?;
                    atom = Expression::Binding {
                        base: Box::new(atom),
                        bindings,
                    };
                }
                _ => break,
            }
        }
        Ok(atom)
    }

    fn parse_tick_suffix(&mut self, atom: Expression) -> Result<Expression, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::LParen => {
                self.advance();
                let type_name = match atom {
                    Expression::Variable(name) => name,
                    _ => {
                        let found = self.peek();
                        return Err(ParseError::UnexpectedToken {
                            expected: "type name before aggregate".to_string(),
                            found: found.lexeme.clone(),
                            span: found.span,
                        });
                    }
                };
                if matches!(self.peek_kind(), TokenKind::KwNull)
                    && matches!(self.peek_kind_at(1), Some(TokenKind::KwMessage))
                {
                    self.advance();
                    self.advance();
                    self.eat(&TokenKind::RParen, "')'")?;
                    return Ok(Expression::Aggregate {
                        type_name,
                        fields: Vec::new(),
                    });
                }
                let mut fields = Vec::new();
                loop {
                    let name = self.eat_ident()?;
                    self.eat(&TokenKind::Arrow, "'=>'")?;
                    let value = self.parse_expr(0)?;
                    fields.push((name, value));
                    if matches!(self.peek_kind(), TokenKind::Comma) {
                        self.advance();
                        continue;
                    }
                    break;
                }
                self.eat(&TokenKind::RParen, "')'")?;
                Ok(Expression::Aggregate { type_name, fields })
            }
            TokenKind::Ident(name) => {
                let kind = attribute_kind(&name).ok_or_else(|| {
                    let span = self.peek().span;
                    ParseError::UnexpectedToken {
                        expected: "attribute name".to_string(),
                        found: name.clone(),
                        span,
                    }
                })?;
                self.advance();
                Ok(Expression::Attribute {
                    kind,
                    operand: Box::new(atom),
                })
            }
            _ => {
                let found = self.advance();
                Err(ParseError::UnexpectedToken {
                    expected: "attribute or aggregate".to_string(),
                    found: found.lexeme.clone(),
                    span: found.span,
                })
            }
        }
    }

    fn parse_bindings(&mut self) -> Result<Vec<(String, Expression)>, ParseError> {
        let mut bindings = Vec::new();
        loop {
            let name = self.eat_ident()?;
            self.eat(&TokenKind::Equal, "'='")?;
            let value = self.parse_expr(0)?;
            bindings.push((name, value));
            if matches!(self.peek_kind(), TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }
        Ok(bindings)
    }

    fn parse_atom(&mut self) -> Result<Expression, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::KwTrue => {
                self.advance();
                Ok(Expression::Bool(true))
            }
            TokenKind::KwFalse => {
                self.advance();
                Ok(Expression::Bool(false))
            }
            TokenKind::KwNull => {
                self.advance();
                Ok(Expression::Undefined)
            }
            TokenKind::Integer { value, base } => {
                self.advance();
                Ok(Expression::Int { value, base })
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(Expression::Str(s))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.eat(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_comprehension(),
            TokenKind::KwFor => self.parse_quantifier(),
            TokenKind::Ident(name) => {
                self.advance();
                if matches!(self.peek_kind(), TokenKind::LParen) {
                    self.advance();
                    let arguments = self.parse_call_arguments()?;
                    Ok(Expression::Call {
                        target: name,
                        arguments,
                    })
                } else {
                    Ok(Expression::Variable(name))
                }
            }
            _ => {
                let found = self.advance();
                Err(ParseError::UnexpectedToken {
                    expected: "expression".to_string(),
                    found: found.lexeme.clone(),
                    span: found.span,
                })
            }
        }
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut arguments = Vec::new();
        if matches!(self.peek_kind(), TokenKind::RParen) {
            self.advance();
            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_expr(0)?);
            if matches!(self.peek_kind(), TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }
        self.eat(&TokenKind::RParen, "')'")?;
        Ok(arguments)
    }

    fn parse_quantifier(&mut self) -> Result<Expression, ParseError> {
        self.eat(&TokenKind::KwFor, "'for'")?;
        let kind = match self.peek_kind() {
            TokenKind::KwAll => {
                self.advance();
                QuantifierKind::All
            }
            TokenKind::KwSome => {
                self.advance();
                QuantifierKind::Some
            }
            _ => {
                let found = self.advance();
                return Err(ParseError::UnexpectedToken {
                    expected: "'all' or 'some'".to_string(),
                    found: found.lexeme.clone(),
                    span: found.span,
                });
            }
        };
        let variable = self.eat_ident()?;
        self.eat(&TokenKind::KwIn, "'in'")?;
        let iterable = self.parse_expr(0)?;
        self.eat(&TokenKind::Arrow, "'=>'")?;
        let predicate = self.parse_expr(0)?;
        Ok(Expression::Quantifier {
            kind,
            variable,
            iterable: Box::new(iterable),
            predicate: Box::new(predicate),
        })
    }

    fn parse_comprehension(&mut self) -> Result<Expression, ParseError> {
        self.eat(&TokenKind::LBracket, "'['")?;
        self.eat(&TokenKind::KwFor, "'for'")?;
        let variable = self.eat_ident()?;
        self.eat(&TokenKind::KwIn, "'in'")?;
        let iterable = self.parse_expr(0)?;
        self.eat(&TokenKind::Arrow, "'=>'")?;
        let selector = self.parse_expr(0)?;
        let condition = if matches!(self.peek_kind(), TokenKind::KwWhen) {
            self.advance();
            self.parse_expr(0)?
        } else {
            Expression::Bool(true)
        };
        self.eat(&TokenKind::RBracket, "']'")?;
        Ok(Expression::Comprehension {
            variable,
            iterable: Box::new(iterable),
            selector: Box::new(selector),
            condition: Box::new(condition),
        })
    }

    // ---- statement grammar ----

    fn parse_statement_inner(&mut self) -> Result<Statement, ParseError> {
        let target = self.eat_ident()?;
        match self.peek_kind().clone() {
            TokenKind::Assign => {
                self.advance();
                if matches!(self.peek_kind(), TokenKind::KwNull) {
                    self.advance();
                    Ok(Statement::Erase { target })
                } else {
                    let value = self.parse_expr(0)?;
                    Ok(Statement::Assignment { target, value })
                }
            }
            TokenKind::Tick => {
                self.advance();
                let op = self.eat_ident()?;
                match op.as_str() {
                    "Reset" => Ok(Statement::Reset { target }),
                    "Append" | "Extend" => {
                        self.eat(&TokenKind::LParen, "'('")?;
                        let argument = self.parse_expr(0)?;
                        self.eat(&TokenKind::RParen, "')'")?;
                        let kind = if op == "Append" {
                            ListOpKind::Append
                        } else {
                            ListOpKind::Extend
                        };
                        Ok(Statement::ListOperation {
                            target,
                            kind,
                            argument,
                        })
                    }
                    other => {
                        let span = self.peek().span;
                        Err(ParseError::UnexpectedToken {
                            expected: "'Reset', 'Append', or 'Extend'".to_string(),
                            found: other.to_string(),
                            span,
                        })
                    }
                }
            }
            _ => {
                let found = self.advance();
                Err(ParseError::UnexpectedToken {
                    expected: "':=' or postfix action".to_string(),
                    found: found.lexeme.clone(),
                    span: found.span,
                })
            }
        }
    }

    // ---- declaration grammar ----

    fn parse_declaration_inner(&mut self) -> Result<(String, Declaration), ParseError> {
        let name = self.eat_ident()?;

        if matches!(self.peek_kind(), TokenKind::LParen) {
            self.advance();
            let mut arguments = Vec::new();
            if !matches!(self.peek_kind(), TokenKind::RParen) {
                loop {
                    let arg_name = self.eat_ident()?;
                    self.eat(&TokenKind::Colon, "':'")?;
                    let type_name = self.eat_ident()?;
                    if arguments
                        .iter()
                        .any(|a: &FormalArgument| a.name == arg_name)
                    {
                        return Err(ParseError::DuplicateFormalArgument {
                            subprogram: name,
                            name: arg_name,
                        });
                    }
                    arguments.push(FormalArgument::new(arg_name, type_name));
                    match self.peek_kind() {
                        TokenKind::Semicolon => {
                            self.advance();
                            continue;
                        }
                        _ => break,
                    }
                }
            }
            self.eat(&TokenKind::RParen, "')'")?;
            self.eat(&TokenKind::KwReturn, "'return'")?;
            let return_type = self.eat_ident()?;
            return Ok((name, Declaration::subprogram(arguments, return_type)));
        }

        if matches!(self.peek_kind(), TokenKind::KwIs) {
            self.advance();
            self.eat(&TokenKind::KwPrivate, "'private'")?;
            return Ok((name, Declaration::private()));
        }

        self.eat(&TokenKind::Colon, "':'")?;
        let type_name = self.eat_ident()?;

        match self.peek_kind() {
            TokenKind::KwRenames => {
                self.advance();
                let renamed = self.parse_expr(0)?;
                Ok((name, Declaration::renames(type_name, renamed)))
            }
            TokenKind::Assign => {
                self.advance();
                let initializer = self.parse_expr(0)?;
                Ok((name, Declaration::variable(type_name, Some(initializer))))
            }
            _ => Ok((name, Declaration::variable(type_name, None))),
        }
    }
}

fn attribute_kind(name: &str) -> Option<AttributeKind> {
    match name {
        "Valid" => Some(AttributeKind::Valid),
        "Present" => Some(AttributeKind::Present),
        "Length" => Some(AttributeKind::Length),
        "Head" => Some(AttributeKind::Head),
        "Opaque" => Some(AttributeKind::Opaque),
        "First" => Some(AttributeKind::First),
        "Last" => Some(AttributeKind::Last),
        "Size" => Some(AttributeKind::Size),
        _ => None,
    }
}

fn build_infix(op: InfixOp, lhs: Expression, rhs: Expression) -> Expression {
    use crate::expr::{ArithOp, RelOp};

    match op {
        InfixOp::And => flatten_logical(LogicalOp::And, lhs, rhs),
        InfixOp::Or => flatten_logical(LogicalOp::Or, lhs, rhs),
        InfixOp::Add => arith(ArithOp::Add, lhs, rhs),
        InfixOp::Sub => arith(ArithOp::Sub, lhs, rhs),
        InfixOp::Mul => arith(ArithOp::Mul, lhs, rhs),
        InfixOp::Div => arith(ArithOp::Div, lhs, rhs),
        InfixOp::Mod => arith(ArithOp::Mod, lhs, rhs),
        InfixOp::Pow => arith(ArithOp::Pow, lhs, rhs),
        InfixOp::Less => relation(RelOp::Less, lhs, rhs),
        InfixOp::LessEqual => relation(RelOp::LessEqual, lhs, rhs),
        InfixOp::Equal => relation(RelOp::Equal, lhs, rhs),
        InfixOp::NotEqual => relation(RelOp::NotEqual, lhs, rhs),
        InfixOp::GreaterEqual => relation(RelOp::GreaterEqual, lhs, rhs),
        InfixOp::Greater => relation(RelOp::Greater, lhs, rhs),
        InfixOp::In => relation(RelOp::Contains, lhs, rhs),
        InfixOp::NotIn => relation(RelOp::NotContains, lhs, rhs),
    }
}

fn arith(op: crate::expr::ArithOp, lhs: Expression, rhs: Expression) -> Expression {
    Expression::Arith {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn relation(op: crate::expr::RelOp, lhs: Expression, rhs: Expression) -> Expression {
    Expression::Relation {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn flatten_logical(op: LogicalOp, lhs: Expression, rhs: Expression) -> Expression {
    let mut operands = match lhs {
        Expression::Logical { op: lhs_op, operands } if lhs_op == op => operands,
        other => vec![other],
    };
    match rhs {
        Expression::Logical { op: rhs_op, operands: rhs_operands } if rhs_op == op => {
            operands.extend(rhs_operands)
        }
        other => operands.push(other),
    }
    Expression::Logical { op, operands }
}

/// Parses a complete embedded expression string.
pub fn parse_expression(text: &str) -> Result<Expression, ParseError> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr(0)?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parses a complete embedded action-statement string.
pub fn parse_statement(text: &str) -> Result<Statement, ParseError> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser::new(tokens);
    let stmt = parser.parse_statement_inner()?;
    parser.expect_eof()?;
    Ok(stmt)
}

/// Parses a complete embedded declaration string, returning the
/// declared name and its `Declaration`.
pub fn parse_declaration(text: &str) -> Result<(String, Declaration), ParseError> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser::new(tokens);
    let decl = parser.parse_declaration_inner()?;
    parser.expect_eof()?;
    Ok(decl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ArithOp, RelOp};
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Expression {
        Expression::Variable(name.to_string())
    }

    #[test]
    fn parses_conjunction_of_equalities() {
        let expr = parse_expression("Foo = Bar and Bar /= Baz").unwrap();
        assert_eq!(
            expr,
            Expression::Logical {
                op: LogicalOp::And,
                operands: vec![
                    relation(RelOp::Equal, var("Foo"), var("Bar")),
                    relation(RelOp::NotEqual, var("Bar"), var("Baz")),
                ],
            }
        );
    }

    #[test]
    fn parses_exponentiation() {
        let expr = parse_expression("A ** B").unwrap();
        assert_eq!(expr, arith(ArithOp::Pow, var("A"), var("B")));
    }

    #[test]
    fn exponentiation_is_right_associative() {
        let expr = parse_expression("A ** B ** C").unwrap();
        assert_eq!(
            expr,
            arith(ArithOp::Pow, var("A"), arith(ArithOp::Pow, var("B"), var("C")))
        );
    }

    #[test]
    fn exponentiation_binds_tighter_than_multiplication() {
        let expr = parse_expression("A * B ** C").unwrap();
        assert_eq!(
            expr,
            arith(ArithOp::Mul, var("A"), arith(ArithOp::Pow, var("B"), var("C")))
        );
    }

    #[test]
    fn parses_not_in() {
        let expr = parse_expression("Foo not in Bar").unwrap();
        assert_eq!(expr, relation(RelOp::NotContains, var("Foo"), var("Bar")));
    }

    #[test]
    fn parses_attribute_and_conjunction() {
        let expr = parse_expression("Foo'Valid and Bar'Valid").unwrap();
        assert_eq!(
            expr,
            Expression::Logical {
                op: LogicalOp::And,
                operands: vec![
                    Expression::Attribute {
                        kind: AttributeKind::Valid,
                        operand: Box::new(var("Foo")),
                    },
                    Expression::Attribute {
                        kind: AttributeKind::Valid,
                        operand: Box::new(var("Bar")),
                    },
                ],
            }
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = parse_expression("A = B or C = D and E = F").unwrap();
        assert_eq!(
            expr,
            Expression::Logical {
                op: LogicalOp::Or,
                operands: vec![
                    relation(RelOp::Equal, var("A"), var("B")),
                    Expression::Logical {
                        op: LogicalOp::And,
                        operands: vec![
                            relation(RelOp::Equal, var("C"), var("D")),
                            relation(RelOp::Equal, var("E"), var("F")),
                        ],
                    },
                ],
            }
        );
    }

    #[test]
    fn parses_message_aggregate() {
        let expr = parse_expression("Header'(Tag => 1, Length => 2)").unwrap();
        assert_eq!(
            expr,
            Expression::Aggregate {
                type_name: "Header".to_string(),
                fields: vec![
                    ("Tag".to_string(), Expression::Int { value: 1, base: None }),
                    ("Length".to_string(), Expression::Int { value: 2, base: None }),
                ],
            }
        );
    }

    #[test]
    fn parses_empty_aggregate() {
        let expr = parse_expression("Header'(null message)").unwrap();
        assert_eq!(
            expr,
            Expression::Aggregate {
                type_name: "Header".to_string(),
                fields: vec![],
            }
        );
    }

    #[test]
    fn parses_quantifier() {
        let expr = parse_expression("for all X in List => X'Valid").unwrap();
        assert_eq!(
            expr,
            Expression::Quantifier {
                kind: QuantifierKind::All,
                variable: "X".to_string(),
                iterable: Box::new(var("List")),
                predicate: Box::new(Expression::Attribute {
                    kind: AttributeKind::Valid,
                    operand: Box::new(var("X")),
                }),
            }
        );
    }

    #[test]
    fn parses_comprehension_with_when() {
        let expr = parse_expression("[for X in List => X when X /= 0]").unwrap();
        assert_eq!(
            expr,
            Expression::Comprehension {
                variable: "X".to_string(),
                iterable: Box::new(var("List")),
                selector: Box::new(var("X")),
                condition: Box::new(relation(RelOp::NotEqual, var("X"), Expression::Int { value: 0, base: None })),
            }
        );
    }

    #[test]
    fn parses_trailing_input_as_error() {
        let err = parse_expression("Foo Bar").unwrap_err();
        assert!(matches!(err, ParseError::TrailingInput { .. }));
    }

    #[test]
    fn parses_assignment_statement() {
        let stmt = parse_statement("X := Foo + 1").unwrap();
        assert_eq!(
            stmt,
            Statement::Assignment {
                target: "X".to_string(),
                value: arith(crate::expr::ArithOp::Add, var("Foo"), Expression::Int { value: 1, base: None }),
            }
        );
    }

    #[test]
    fn parses_erase_statement() {
        let stmt = parse_statement("X := null").unwrap();
        assert_eq!(
            stmt,
            Statement::Erase {
                target: "X".to_string()
            }
        );
    }

    #[test]
    fn parses_append_statement() {
        let stmt = parse_statement("List'Append(X)").unwrap();
        assert_eq!(
            stmt,
            Statement::ListOperation {
                target: "List".to_string(),
                kind: ListOpKind::Append,
                argument: var("X"),
            }
        );
    }

    #[test]
    fn parses_variable_declaration() {
        let (name, decl) = parse_declaration("X : Integer := 1").unwrap();
        assert_eq!(name, "X");
        assert_eq!(
            decl,
            Declaration::variable("Integer", Some(Expression::Int { value: 1, base: None }))
        );
    }

    #[test]
    fn parses_private_declaration() {
        let (name, decl) = parse_declaration("Opaque_Type is private").unwrap();
        assert_eq!(name, "Opaque_Type");
        assert_eq!(decl, Declaration::private());
    }

    #[test]
    fn parses_subprogram_declaration() {
        let (name, decl) = parse_declaration("Compute (X : Integer; Y : Integer) return Integer").unwrap();
        assert_eq!(name, "Compute");
        assert_eq!(
            decl,
            Declaration::subprogram(
                vec![
                    FormalArgument::new("X", "Integer"),
                    FormalArgument::new("Y", "Integer"),
                ],
                "Integer"
            )
        );
    }

    #[test]
    fn rejects_duplicate_formal_arguments() {
        let err = parse_declaration("Compute (X : Integer; X : Integer) return Integer").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateFormalArgument { .. }));
    }

    #[test]
    fn parses_channel_mode() {
        assert_eq!(ChannelMode::parse("Read_Write").unwrap().expand(), (true, true));
    }
}
