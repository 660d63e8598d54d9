//! Var/Begin/End source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # The language
//!
//! A program is a `Var` declaration block followed by a `Begin`…`End` block
//! of assignment statements over integer identifiers:
//!
//! ```text
//! Var x, y;
//! Begin
//!     x = 5;
//!     y = x + 10;
//! End
//! ```
//!
//! # Parser implementation
//!
//! Hand-written recursive descent parser with one precedence level per
//! grammar rule. No external parser generator dependencies. Newlines are
//! real tokens (statement terminators), and the lexer resolves unary versus
//! binary minus before the parser ever sees a token.

pub mod ast;
pub mod lexer;
pub mod parser;
