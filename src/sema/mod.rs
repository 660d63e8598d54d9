//! Semantic analysis for the Var/Begin/End language
//!
//! A single depth-first pass over the AST, maintaining a flat symbol table
//! (the language has exactly one global scope). The checker rejects
//! redeclarations and uses of undeclared identifiers; in strict mode it also
//! rejects reads of a variable before its first assignment.
//!
//! The table lives only for the duration of one [`SemanticChecker::check`]
//! run; independent runs share no state.

use crate::parser::ast::AstNode;
use rustc_hash::FxHashMap;
use std::fmt;

/// What a semantic violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// An identifier appears twice in the declaration list.
    Redeclared,
    /// An identifier is referenced without being declared.
    NotDeclared,
    /// Strict mode only: an identifier is read before any assignment to it.
    NotInitialized,
}

/// Semantic error type
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub name: String,
    pub line: usize,
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            SemanticErrorKind::Redeclared => "redeclared",
            SemanticErrorKind::NotDeclared => "not declared",
            SemanticErrorKind::NotInitialized => "read before initialization",
        };
        write!(
            f,
            "Semantic error at line {}: variable '{}' {}",
            self.line, self.name, what
        )
    }
}

impl std::error::Error for SemanticError {}

/// Declaration record for one identifier.
struct Symbol {
    initialized: bool,
    /// Line of the declaration.
    line: usize,
}

/// Single-pass semantic checker.
pub struct SemanticChecker {
    symbols: FxHashMap<String, Symbol>,
    strict: bool,
}

impl SemanticChecker {
    pub fn new() -> Self {
        Self {
            symbols: FxHashMap::default(),
            strict: false,
        }
    }

    /// A checker that additionally rejects reads before the first write.
    pub fn strict() -> Self {
        Self {
            symbols: FxHashMap::default(),
            strict: true,
        }
    }

    /// Walk the whole tree; the first violation aborts the run.
    pub fn check(&mut self, ast: &AstNode) -> Result<(), SemanticError> {
        self.visit(ast)
    }

    fn visit(&mut self, node: &AstNode) -> Result<(), SemanticError> {
        match node {
            AstNode::Program { var_decl, assignments, .. } => {
                self.visit(var_decl)?;
                self.visit(assignments)
            }
            AstNode::VarDecl { idents, .. } => self.visit(idents),
            AstNode::IdentifierList { idents, .. } => {
                for ident in idents {
                    if let AstNode::Identifier { name, line } = ident {
                        self.declare(name, *line)?;
                    }
                }
                Ok(())
            }
            AstNode::AssignmentList { assignments, .. } => {
                for assignment in assignments {
                    self.visit(assignment)?;
                }
                Ok(())
            }
            AstNode::Assignment { target, value, .. } => {
                // The parser guarantees an identifier target.
                if let AstNode::Identifier { name, line } = target.as_ref() {
                    if !self.symbols.contains_key(name) {
                        return Err(SemanticError {
                            kind: SemanticErrorKind::NotDeclared,
                            name: name.clone(),
                            line: *line,
                        });
                    }
                    self.visit(value)?;
                    if let Some(symbol) = self.symbols.get_mut(name) {
                        symbol.initialized = true;
                    }
                    Ok(())
                } else {
                    self.visit(value)
                }
            }
            AstNode::BinaryOp { left, right, .. } => {
                self.visit(left)?;
                self.visit(right)
            }
            AstNode::UnaryOp { operand, .. } => self.visit(operand),
            AstNode::Identifier { name, line } => self.reference(name, *line),
            AstNode::Constant { .. } => Ok(()),
        }
    }

    /// Register a declared identifier.
    fn declare(&mut self, name: &str, line: usize) -> Result<(), SemanticError> {
        if let Some(existing) = self.symbols.get(name) {
            return Err(SemanticError {
                kind: SemanticErrorKind::Redeclared,
                name: name.to_string(),
                line: existing.line,
            });
        }
        self.symbols.insert(
            name.to_string(),
            Symbol { initialized: false, line },
        );
        Ok(())
    }

    /// Check a read of an identifier inside an expression.
    fn reference(&self, name: &str, line: usize) -> Result<(), SemanticError> {
        match self.symbols.get(name) {
            None => Err(SemanticError {
                kind: SemanticErrorKind::NotDeclared,
                name: name.to_string(),
                line,
            }),
            Some(symbol) if self.strict && !symbol.initialized => Err(SemanticError {
                kind: SemanticErrorKind::NotInitialized,
                name: name.to_string(),
                line,
            }),
            Some(_) => Ok(()),
        }
    }
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new()
    }
}
