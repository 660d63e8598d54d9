//! AST (Abstract Syntax Tree) definitions for the Var/Begin/End front end

use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// The operator's surface syntax.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    /// Binding strength: additive < multiplicative.
    pub fn precedence(&self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
        }
    }
}

/// AST nodes.
///
/// Ownership is strictly hierarchical: children are owned exclusively by
/// their parent and dropped with it. A successful parse always produces a
/// [`AstNode::Program`] holding one `VarDecl` and one `AssignmentList`; the
/// parser never hands out a partial tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Program {
        var_decl: Box<AstNode>,
        assignments: Box<AstNode>,
        line: usize,
    },
    VarDecl {
        idents: Box<AstNode>,
        line: usize,
    },
    IdentifierList {
        idents: Vec<AstNode>,
        line: usize,
    },
    Identifier {
        name: String,
        line: usize,
    },
    AssignmentList {
        assignments: Vec<AstNode>,
        line: usize,
    },
    Assignment {
        target: Box<AstNode>,
        value: Box<AstNode>,
        line: usize,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        line: usize,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        line: usize,
    },
    Constant {
        value: String,
        line: usize,
    },
}

impl AstNode {
    /// Source line of the node's leading token.
    pub fn line(&self) -> usize {
        match self {
            AstNode::Program { line, .. }
            | AstNode::VarDecl { line, .. }
            | AstNode::IdentifierList { line, .. }
            | AstNode::Identifier { line, .. }
            | AstNode::AssignmentList { line, .. }
            | AstNode::Assignment { line, .. }
            | AstNode::BinaryOp { line, .. }
            | AstNode::UnaryOp { line, .. }
            | AstNode::Constant { line, .. } => *line,
        }
    }

    /// Structural equality: same tree shape and literal values, ignoring
    /// source lines. Used for round-trip checks, where re-parsing emitted
    /// text yields fresh (normalized) line numbers.
    pub fn structure_eq(&self, other: &AstNode) -> bool {
        match (self, other) {
            (
                AstNode::Program { var_decl: a, assignments: b, .. },
                AstNode::Program { var_decl: c, assignments: d, .. },
            ) => a.structure_eq(c) && b.structure_eq(d),
            (
                AstNode::VarDecl { idents: a, .. },
                AstNode::VarDecl { idents: b, .. },
            ) => a.structure_eq(b),
            (
                AstNode::IdentifierList { idents: a, .. },
                AstNode::IdentifierList { idents: b, .. },
            ) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structure_eq(y)),
            (
                AstNode::Identifier { name: a, .. },
                AstNode::Identifier { name: b, .. },
            ) => a == b,
            (
                AstNode::AssignmentList { assignments: a, .. },
                AstNode::AssignmentList { assignments: b, .. },
            ) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structure_eq(y)),
            (
                AstNode::Assignment { target: a, value: b, .. },
                AstNode::Assignment { target: c, value: d, .. },
            ) => a.structure_eq(c) && b.structure_eq(d),
            (
                AstNode::BinaryOp { op: a, left: l1, right: r1, .. },
                AstNode::BinaryOp { op: b, left: l2, right: r2, .. },
            ) => a == b && l1.structure_eq(l2) && r1.structure_eq(r2),
            (
                AstNode::UnaryOp { op: a, operand: x, .. },
                AstNode::UnaryOp { op: b, operand: y, .. },
            ) => a == b && x.structure_eq(y),
            (
                AstNode::Constant { value: a, .. },
                AstNode::Constant { value: b, .. },
            ) => a == b,
            _ => false,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Program { .. } => "Program",
            AstNode::VarDecl { .. } => "VarDecl",
            AstNode::IdentifierList { .. } => "IdentifierList",
            AstNode::Identifier { .. } => "Identifier",
            AstNode::AssignmentList { .. } => "AssignmentList",
            AstNode::Assignment { .. } => "Assignment",
            AstNode::BinaryOp { .. } => "BinaryOp",
            AstNode::UnaryOp { .. } => "UnaryOp",
            AstNode::Constant { .. } => "Constant",
        }
    }

    /// The node's literal value, if it carries one.
    fn literal(&self) -> Option<&str> {
        match self {
            AstNode::Identifier { name, .. } => Some(name),
            AstNode::Constant { value, .. } => Some(value),
            AstNode::BinaryOp { op, .. } => Some(op.symbol()),
            AstNode::UnaryOp { op, .. } => Some(op.symbol()),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::Program { var_decl, assignments, .. } => {
                vec![var_decl.as_ref(), assignments.as_ref()]
            }
            AstNode::VarDecl { idents, .. } => vec![idents.as_ref()],
            AstNode::IdentifierList { idents, .. } => idents.iter().collect(),
            AstNode::AssignmentList { assignments, .. } => assignments.iter().collect(),
            AstNode::Assignment { target, value, .. } => {
                vec![target.as_ref(), value.as_ref()]
            }
            AstNode::BinaryOp { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            AstNode::UnaryOp { operand, .. } => vec![operand.as_ref()],
            AstNode::Identifier { .. } | AstNode::Constant { .. } => Vec::new(),
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{}{}", "  ".repeat(depth), self.kind_name())?;
        if let Some(value) = self.literal() {
            write!(f, " ({})", value)?;
        }
        writeln!(f)?;
        for child in self.children() {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented tree dump, one node per line (used by the CLI's `--dump-ast`).
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
