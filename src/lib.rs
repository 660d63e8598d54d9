//! # Introduction
//!
//! varlang is a four-stage front end for a minimal imperative language: a
//! `Var` declaration block followed by a `Begin`…`End` block of assignment
//! statements over integer identifiers and arithmetic expressions. It
//! translates such programs into normalized target text.
//!
//! ## Translation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic check → Emitter → Text
//! ```
//!
//! 1. [`parser::lexer`] — tokenizes the source, keeping newlines (statement
//!    terminators) and resolving unary vs. binary minus.
//! 2. [`parser::parser`] — recursive descent over the token stream, building
//!    the [`parser::ast::AstNode`] tree.
//! 3. [`sema`] — one pass over the tree with a flat symbol table; rejects
//!    redeclarations, undeclared uses and (in strict mode) reads before the
//!    first write.
//! 4. [`emitter`] — renders the checked tree back into normalized text.
//!
//! [`translate`] wires the stages together behind a single call. The
//! pipeline does no I/O and keeps no state between runs; every stage is a
//! pure function of its input.
//!
//! ## Supported language
//!
//! One scalar integer type, one flat global scope, no control flow. The
//! whole grammar is a declaration list plus one or more assignments of
//! `+ - * /` expressions with unary minus and parentheses.

pub mod emitter;
pub mod parser;
pub mod sema;
pub mod translate;
