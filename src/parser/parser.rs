//! Recursive descent parser for the Var/Begin/End grammar
//!
//! ```text
//! Program        := 'Var' VarDecl NEWLINE 'Begin' NEWLINE AssignmentList 'End'
//! VarDecl        := IdentList
//! IdentList      := Identifier (',' Identifier)* ';'
//! AssignmentList := Assignment+
//! Assignment     := Identifier '=' Expression ';' NEWLINE
//! Expression     := Term (('+' | '-') Term)*
//! Term           := Factor (('*' | '/') Factor)*
//! Factor         := Identifier | Constant | '(' Expression ')' | UnaryMinus Factor
//! ```
//!
//! Both binary levels fold iteratively to the left, so `a - b - c` nests as
//! `(a - b) - c`. Unary minus is right-recursive and binds tighter than any
//! binary operator. The first rule violation is fatal; there is no recovery
//! and no partial tree.

use crate::parser::ast::{AstNode, BinOp, UnOp};
use crate::parser::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    /// `None` exactly when the input ended before the expected token.
    pub line: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "Syntax error at line {}: expected {}, found {}",
                line, self.expected, self.found
            ),
            None => write!(
                f,
                "Syntax error: expected {}, but got end of input",
                self.expected
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser over a token buffer
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Tokenize `source` and set up a parser over the result.
    pub fn new(source: &str) -> Result<Self, LexError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Parse an already-tokenized input. The buffer must end with
    /// [`Token::Eof`], as produced by [`Lexer::tokenize`].
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    /// Parse the entire program.
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        // Blank lines before the header and after 'End' are tolerated;
        // anything else outside the program is rejected.
        self.skip_newlines();
        let line = self.peek().line();

        self.expect_token(&Token::Var(0), "'Var'")?;
        let var_decl = self.parse_var_decl()?;
        self.expect_token(&Token::Newline(0), "newline")?;
        self.expect_token(&Token::Begin(0), "'Begin'")?;
        self.expect_token(&Token::Newline(0), "newline")?;
        let assignments = self.parse_assignment_list()?;
        self.expect_token(&Token::End(0), "'End'")?;

        self.skip_newlines();
        if !self.is_at_end() {
            return Err(self.error("end of input"));
        }

        Ok(AstNode::Program {
            var_decl: Box::new(var_decl),
            assignments: Box::new(assignments),
            line,
        })
    }

    /// Parse the declaration block body (the identifier list).
    fn parse_var_decl(&mut self) -> Result<AstNode, ParseError> {
        let line = self.peek().line();
        let idents = self.parse_identifier_list()?;
        Ok(AstNode::VarDecl { idents: Box::new(idents), line })
    }

    /// Parse a comma-separated identifier list terminated by ';'.
    fn parse_identifier_list(&mut self) -> Result<AstNode, ParseError> {
        let line = self.peek().line();
        let mut idents = vec![self.parse_identifier()?];

        while self.match_token(&Token::Comma(0)) {
            idents.push(self.parse_identifier()?);
        }
        self.expect_token(&Token::Semicolon(0), "';'")?;

        Ok(AstNode::IdentifierList { idents, line })
    }

    fn parse_identifier(&mut self) -> Result<AstNode, ParseError> {
        if let Token::Ident(name, line) = self.peek().clone() {
            self.advance();
            Ok(AstNode::Identifier { name, line })
        } else {
            Err(self.error("identifier"))
        }
    }

    /// Parse one or more assignments. The list continues as long as the
    /// lookahead is an identifier, so a premature 'End' or end of input
    /// surfaces as an expected-identifier error from the first assignment.
    fn parse_assignment_list(&mut self) -> Result<AstNode, ParseError> {
        let line = self.peek().line();
        let mut assignments = vec![self.parse_assignment()?];

        while matches!(self.peek(), Token::Ident(_, _)) {
            assignments.push(self.parse_assignment()?);
        }

        Ok(AstNode::AssignmentList { assignments, line })
    }

    /// Parse a single assignment statement: Identifier '=' Expression ';' NEWLINE
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let line = self.peek().line();
        let target = self.parse_identifier()?;
        self.expect_token(&Token::Assign(0), "'='")?;
        let value = self.parse_expression()?;
        self.expect_token(&Token::Semicolon(0), "';'")?;
        self.expect_token(&Token::Newline(0), "newline")?;

        Ok(AstNode::Assignment {
            target: Box::new(target),
            value: Box::new(value),
            line,
        })
    }

    /// Parse additive expression (+ -), folding left.
    fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let (op, line) = match self.peek() {
                Token::Plus(line) => (BinOp::Add, *line),
                Token::Minus(line) => (BinOp::Sub, *line),
                _ => break,
            };
            self.advance();

            let right = self.parse_term()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative term (* /), folding left.
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let (op, line) = match self.peek() {
                Token::Star(line) => (BinOp::Mul, *line),
                Token::Slash(line) => (BinOp::Div, *line),
                _ => break,
            };
            self.advance();

            let right = self.parse_factor()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    /// Parse a factor: identifier, constant, parenthesized expression, or
    /// unary minus applied to a factor.
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        match self.peek().clone() {
            Token::UnaryMinus(line) => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(AstNode::UnaryOp {
                    op: UnOp::Neg,
                    operand: Box::new(operand),
                    line,
                })
            }
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(&Token::RParen(0), "')'")?;
                Ok(expr)
            }
            Token::Ident(name, line) => {
                self.advance();
                Ok(AstNode::Identifier { name, line })
            }
            Token::Constant(value, line) => {
                self.advance();
                Ok(AstNode::Constant { value, line })
            }
            _ => Err(self.error("identifier, constant, '(' or unary '-'")),
        }
    }

    // ===== Helper methods =====

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Token::Newline(_)) {
            self.advance();
        }
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, token: &Token, expected: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        if self.is_at_end() {
            ParseError {
                expected: expected.to_string(),
                found: "end of input".to_string(),
                line: None,
            }
        } else {
            ParseError {
                expected: expected.to_string(),
                found: self.peek().to_string(),
                line: Some(self.peek().line()),
            }
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<AstNode, ParseError> {
        Parser::new(source).unwrap().parse_program()
    }

    #[test]
    fn test_parse_simple_program() {
        let source = "Var x, y;\nBegin\n    x = 5;\n    y = x + 10;\nEnd";
        let ast = parse(source).unwrap();

        match &ast {
            AstNode::Program { var_decl, assignments, line } => {
                assert_eq!(*line, 1);
                match var_decl.as_ref() {
                    AstNode::VarDecl { idents, .. } => match idents.as_ref() {
                        AstNode::IdentifierList { idents, .. } => {
                            assert_eq!(idents.len(), 2)
                        }
                        _ => panic!("Expected identifier list"),
                    },
                    _ => panic!("Expected var decl"),
                }
                match assignments.as_ref() {
                    AstNode::AssignmentList { assignments, .. } => {
                        assert_eq!(assignments.len(), 2)
                    }
                    _ => panic!("Expected assignment list"),
                }
            }
            _ => panic!("Expected program"),
        }
    }

    #[test]
    fn test_precedence() {
        let source = "Var x;\nBegin\nx = 5 + 2 * 3;\nEnd";
        let ast = parse(source).unwrap();

        let value = assignment_value(&ast, 0);
        match value {
            AstNode::BinaryOp { op: BinOp::Add, right, .. } => match right.as_ref() {
                AstNode::BinaryOp { op: BinOp::Mul, left, right, .. } => {
                    assert!(matches!(left.as_ref(), AstNode::Constant { value, .. } if value == "2"));
                    assert!(matches!(right.as_ref(), AstNode::Constant { value, .. } if value == "3"));
                }
                _ => panic!("Expected multiplication as right child of addition"),
            },
            other => panic!("Expected addition at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        let source = "Var x;\nBegin\nx = 10 - 4 - 3;\nEnd";
        let ast = parse(source).unwrap();

        // Must fold as (10 - 4) - 3.
        match assignment_value(&ast, 0) {
            AstNode::BinaryOp { op: BinOp::Sub, left, right, .. } => {
                assert!(matches!(
                    left.as_ref(),
                    AstNode::BinaryOp { op: BinOp::Sub, .. }
                ));
                assert!(matches!(right.as_ref(), AstNode::Constant { value, .. } if value == "3"));
            }
            other => panic!("Expected subtraction at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_minus_binds_tighter() {
        let source = "Var a, b;\nBegin\na = -5;\nb = -(10 + 3);\nEnd";
        let ast = parse(source).unwrap();

        assert!(matches!(
            assignment_value(&ast, 0),
            AstNode::UnaryOp { op: UnOp::Neg, .. }
        ));
        match assignment_value(&ast, 1) {
            AstNode::UnaryOp { operand, .. } => {
                assert!(matches!(
                    operand.as_ref(),
                    AstNode::BinaryOp { op: BinOp::Add, .. }
                ));
            }
            other => panic!("Expected unary minus, got {:?}", other),
        }
    }

    #[test]
    fn test_parenthesized_grouping() {
        let source = "Var x;\nBegin\nx = (5 + 2) * 3;\nEnd";
        let ast = parse(source).unwrap();

        match assignment_value(&ast, 0) {
            AstNode::BinaryOp { op: BinOp::Mul, left, .. } => {
                assert!(matches!(
                    left.as_ref(),
                    AstNode::BinaryOp { op: BinOp::Add, .. }
                ));
            }
            other => panic!("Expected multiplication at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_leading_blank_lines_tolerated() {
        let source = "\n\nVar x;\nBegin\nx = 1;\nEnd\n";
        assert!(parse(source).is_ok());
    }

    #[test]
    fn test_missing_semicolon() {
        let source = "Var x\nBegin\nx = 1;\nEnd";
        let err = parse(source).unwrap_err();

        assert_eq!(err.expected, "';'");
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_premature_end_of_input() {
        let source = "Var x;\nBegin\n";
        let err = parse(source).unwrap_err();

        assert_eq!(err.expected, "identifier");
        assert_eq!(err.line, None);
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_empty_assignment_block_rejected() {
        // The grammar cannot represent zero assignments.
        let source = "Var x;\nBegin\nEnd";
        let err = parse(source).unwrap_err();

        assert_eq!(err.expected, "identifier");
        assert_eq!(err.found, "'End'");
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let source = "Var x;\nBegin\nx = 1;\nEnd\nx";
        let err = parse(source).unwrap_err();

        assert_eq!(err.expected, "end of input");
    }

    #[test]
    fn test_double_unary_minus_is_a_syntax_error() {
        // The second '-' follows a unary marker, which is not a prefix
        // context, so it lexes as a binary operator and cannot start a
        // factor.
        let source = "Var x;\nBegin\nx = --5;\nEnd";
        assert!(parse(source).is_err());
    }

    /// Extract the value expression of the n-th assignment of a program.
    fn assignment_value(ast: &AstNode, n: usize) -> &AstNode {
        match ast {
            AstNode::Program { assignments, .. } => match assignments.as_ref() {
                AstNode::AssignmentList { assignments, .. } => {
                    match &assignments[n] {
                        AstNode::Assignment { value, .. } => value,
                        other => panic!("Expected assignment, got {:?}", other),
                    }
                }
                other => panic!("Expected assignment list, got {:?}", other),
            },
            other => panic!("Expected program, got {:?}", other),
        }
    }
}
