//! Target-text emission for a checked AST
//!
//! A single depth-first pass rendering the tree back into normalized source
//! text. Each visit returns an owned fragment which the caller concatenates,
//! so no shared output buffer (and no trailing-separator fixups) is needed.
//!
//! Rendering surface (tests depend on it exactly):
//! - `Var ` + comma-joined identifier names + `;` + newline
//! - each assignment as `<identifier> = <expression>;` + newline
//! - binary operators with single surrounding spaces, unary with none
//! - parentheses only where a child binds looser than its parent, so that
//!   re-parsing the output reproduces the same tree shape
//!
//! The input is assumed to have passed semantic checking; emission itself
//! cannot fail.

use crate::parser::ast::{AstNode, BinOp};

/// Render `ast` into target-language text.
pub fn emit(ast: &AstNode) -> String {
    emit_node(ast)
}

fn emit_node(node: &AstNode) -> String {
    match node {
        AstNode::Program { var_decl, assignments, .. } => {
            format!("{}{}", emit_node(var_decl), emit_node(assignments))
        }
        AstNode::VarDecl { idents, .. } => format!("Var {};\n", emit_node(idents)),
        AstNode::IdentifierList { idents, .. } => idents
            .iter()
            .map(emit_node)
            .collect::<Vec<_>>()
            .join(", "),
        AstNode::AssignmentList { assignments, .. } => {
            assignments.iter().map(emit_node).collect()
        }
        AstNode::Assignment { target, value, .. } => {
            format!("{} = {};\n", emit_node(target), emit_node(value))
        }
        AstNode::BinaryOp { op, left, right, .. } => {
            format!(
                "{} {} {}",
                emit_operand(left, *op, false),
                op.symbol(),
                emit_operand(right, *op, true)
            )
        }
        AstNode::UnaryOp { op, operand, .. } => {
            // Any compound operand needs parentheses: `-(a + b)` must not
            // flatten to `-a + b`, and `-(-x)` would relex as a binary '-'.
            let rendered = match operand.as_ref() {
                AstNode::BinaryOp { .. } | AstNode::UnaryOp { .. } => {
                    format!("({})", emit_node(operand))
                }
                _ => emit_node(operand),
            };
            format!("{}{}", op.symbol(), rendered)
        }
        AstNode::Identifier { name, .. } => name.clone(),
        AstNode::Constant { value, .. } => value.clone(),
    }
}

/// Render a binary operand, parenthesizing it when leaving the parentheses
/// off would change how the text re-parses. Left children of equal
/// precedence are safe (the grammar folds left); right children are not.
fn emit_operand(operand: &AstNode, parent: BinOp, is_right: bool) -> String {
    let needs_parens = match operand {
        AstNode::BinaryOp { op, .. } => {
            op.precedence() < parent.precedence()
                || (is_right && op.precedence() == parent.precedence())
        }
        _ => false,
    };

    if needs_parens {
        format!("({})", emit_node(operand))
    } else {
        emit_node(operand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser::Parser;

    fn emit_source(source: &str) -> String {
        let ast = Parser::new(source).unwrap().parse_program().unwrap();
        emit(&ast)
    }

    #[test]
    fn test_sample_program() {
        let source = "Var x, y;\nBegin\n    x = 5;\n    y = x + 10;\nEnd";
        assert_eq!(emit_source(source), "Var x, y;\nx = 5;\ny = x + 10;\n");
    }

    #[test]
    fn test_single_identifier_decl() {
        let source = "Var x;\nBegin\nx = 1;\nEnd";
        assert_eq!(emit_source(source), "Var x;\nx = 1;\n");
    }

    #[test]
    fn test_precedence_needs_no_parens() {
        let source = "Var x;\nBegin\nx = 5 + 2 * 3;\nEnd";
        assert_eq!(emit_source(source), "Var x;\nx = 5 + 2 * 3;\n");
    }

    #[test]
    fn test_grouping_parens_preserved() {
        let source = "Var x;\nBegin\nx = (5 + 2) * 3;\nEnd";
        assert_eq!(emit_source(source), "Var x;\nx = (5 + 2) * 3;\n");
    }

    #[test]
    fn test_redundant_parens_dropped() {
        let source = "Var x;\nBegin\nx = (5) + (2 * 3);\nEnd";
        assert_eq!(emit_source(source), "Var x;\nx = 5 + 2 * 3;\n");
    }

    #[test]
    fn test_right_nested_subtraction_keeps_parens() {
        let source = "Var x;\nBegin\nx = 10 - (4 - 3);\nEnd";
        assert_eq!(emit_source(source), "Var x;\nx = 10 - (4 - 3);\n");
    }

    #[test]
    fn test_left_fold_needs_no_parens() {
        let source = "Var x;\nBegin\nx = 10 - 4 - 3;\nEnd";
        assert_eq!(emit_source(source), "Var x;\nx = 10 - 4 - 3;\n");
    }

    #[test]
    fn test_unary_minus() {
        let source = "Var a, b;\nBegin\na = -5;\nb = -(10 + 3);\nEnd";
        assert_eq!(emit_source(source), "Var a, b;\na = -5;\nb = -(10 + 3);\n");
    }

    #[test]
    fn test_unary_operand_has_no_space() {
        let source = "Var a;\nBegin\na = 1 - -2;\nEnd";
        assert_eq!(emit_source(source), "Var a;\na = 1 - -2;\n");
    }
}
