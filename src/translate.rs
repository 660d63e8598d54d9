//! Pipeline orchestration: source text in, translated text out
//!
//! Runs the four stages strictly in order — scan, parse, check, emit — and
//! surfaces the first error from whichever stage fails. Each call owns its
//! own token buffer, AST and symbol table, so independent translations can
//! run concurrently without shared state.

use std::fmt;

use crate::emitter;
use crate::parser::ast::AstNode;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::parser::{ParseError, Parser};
use crate::sema::{SemanticChecker, SemanticError};

/// Top-level pipeline errors
#[derive(Debug)]
pub enum TranslateError {
    Lex(LexError),
    Parse(ParseError),
    Semantic(SemanticError),
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::Lex(e) => write!(f, "{}", e),
            TranslateError::Parse(e) => write!(f, "{}", e),
            TranslateError::Semantic(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslateError::Lex(e) => Some(e),
            TranslateError::Parse(e) => Some(e),
            TranslateError::Semantic(e) => Some(e),
        }
    }
}

// Conversion implementations for using ? operator
impl From<LexError> for TranslateError {
    fn from(err: LexError) -> Self {
        TranslateError::Lex(err)
    }
}

impl From<ParseError> for TranslateError {
    fn from(err: ParseError) -> Self {
        TranslateError::Parse(err)
    }
}

impl From<SemanticError> for TranslateError {
    fn from(err: SemanticError) -> Self {
        TranslateError::Semantic(err)
    }
}

/// Scan and parse `source` into an AST without semantic checking.
pub fn parse(source: &str) -> Result<AstNode, TranslateError> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize()?;
    let mut parser = Parser::from_tokens(tokens);
    Ok(parser.parse_program()?)
}

/// Translate `source` into normalized target text.
pub fn translate(source: &str) -> Result<String, TranslateError> {
    run(source, false)
}

/// Like [`translate`], but additionally rejects reads of a variable before
/// its first assignment.
pub fn translate_strict(source: &str) -> Result<String, TranslateError> {
    run(source, true)
}

fn run(source: &str, strict: bool) -> Result<String, TranslateError> {
    let ast = parse(source)?;

    let mut checker = if strict {
        SemanticChecker::strict()
    } else {
        SemanticChecker::new()
    };
    checker.check(&ast)?;

    Ok(emitter::emit(&ast))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_sample() {
        let source = "Var x, y;\nBegin\n    x = 5;\n    y = x + 10;\nEnd";
        assert_eq!(
            translate(source).unwrap(),
            "Var x, y;\nx = 5;\ny = x + 10;\n"
        );
    }

    #[test]
    fn test_error_variants_map_to_stages() {
        assert!(matches!(
            translate("Var x?;"),
            Err(TranslateError::Lex(_))
        ));
        assert!(matches!(
            translate("Var x;\nBegin\n"),
            Err(TranslateError::Parse(_))
        ));
        assert!(matches!(
            translate("Var x;\nBegin\ny = 1;\nEnd"),
            Err(TranslateError::Semantic(_))
        ));
    }

    #[test]
    fn test_strict_flag_is_per_call() {
        let source = "Var x, y;\nBegin\nx = y;\nEnd";
        assert!(translate(source).is_ok());
        assert!(translate_strict(source).is_err());
    }
}
