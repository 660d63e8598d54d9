//! Lexer (tokenizer) for Var/Begin/End source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Spaces and tabs are discarded, but newlines are kept as tokens because the
//! grammar uses them as statement terminators.

use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries the 1-based source line it appears on, so that parse
/// and semantic errors can report an accurate line without a separate
/// token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Var(usize),
    Begin(usize),
    End(usize),

    // Identifiers and literals
    Ident(String, usize),
    Constant(String, usize),

    // Operators
    Assign(usize), // =
    Plus(usize),   // +
    Minus(usize),  // binary -
    Star(usize),   // *
    Slash(usize),  // /
    /// A `-` in prefix position. The lexer decides between [`Token::Minus`]
    /// and this variant from the previously emitted token, so whitespace
    /// never affects the classification.
    UnaryMinus(usize),

    // Punctuation
    Semicolon(usize),
    Comma(usize),
    LParen(usize),
    RParen(usize),

    /// Statement terminator. Carries the line it ends.
    Newline(usize),

    // End of input
    Eof(usize),
}

impl Token {
    /// Returns the source line this token appears on.
    pub fn line(&self) -> usize {
        match self {
            Token::Var(line)
            | Token::Begin(line)
            | Token::End(line)
            | Token::Ident(_, line)
            | Token::Constant(_, line)
            | Token::Assign(line)
            | Token::Plus(line)
            | Token::Minus(line)
            | Token::Star(line)
            | Token::Slash(line)
            | Token::UnaryMinus(line)
            | Token::Semicolon(line)
            | Token::Comma(line)
            | Token::LParen(line)
            | Token::RParen(line)
            | Token::Newline(line)
            | Token::Eof(line) => *line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Var(_) => write!(f, "'Var'"),
            Token::Begin(_) => write!(f, "'Begin'"),
            Token::End(_) => write!(f, "'End'"),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Constant(s, _) => write!(f, "constant {}", s),
            Token::Assign(_) => write!(f, "'='"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::UnaryMinus(_) => write!(f, "unary '-'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Newline(_) => write!(f, "newline"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub character: char,
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexical error at line {}: unexpected character '{}'",
            self.line, self.character
        )
    }
}

impl std::error::Error for LexError {}

/// Whether a `-` following `prev` is in prefix position.
///
/// Evaluated against the previously *emitted* token rather than raw
/// characters: any amount of whitespace between the tokens must not change
/// the answer.
fn minus_is_unary(prev: Option<&Token>) -> bool {
    match prev {
        None => true,
        Some(tok) => matches!(
            tok,
            Token::Semicolon(_)
                | Token::Comma(_)
                | Token::LParen(_)
                | Token::Plus(_)
                | Token::Minus(_)
                | Token::Star(_)
                | Token::Slash(_)
                | Token::Var(_)
                | Token::Begin(_)
                | Token::End(_)
                | Token::Newline(_)
                | Token::Assign(_)
        ),
    }
}

/// Lexer for Var/Begin/End source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.line));
                break;
            }

            let token = self.next_token(tokens.last())?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self, prev: Option<&Token>) -> Result<Token, LexError> {
        let line = self.line;
        // skip_whitespace guarantees a character is available here
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::Eof(line)),
        };

        match ch {
            '\n' => Ok(Token::Newline(line)),

            // Numeric literals
            '0'..='9' => Ok(self.constant(ch, line)),

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, line)),

            // Operators and punctuation
            '=' => Ok(Token::Assign(line)),
            '+' => Ok(Token::Plus(line)),
            '-' => {
                if minus_is_unary(prev) {
                    Ok(Token::UnaryMinus(line))
                } else {
                    Ok(Token::Minus(line))
                }
            }
            '*' => Ok(Token::Star(line)),
            '/' => Ok(Token::Slash(line)),
            ';' => Ok(Token::Semicolon(line)),
            ',' => Ok(Token::Comma(line)),
            '(' => Ok(Token::LParen(line)),
            ')' => Ok(Token::RParen(line)),

            _ => Err(LexError { character: ch, line }),
        }
    }

    /// Lex an integer constant (maximal digit run), keeping its literal text.
    fn constant(&mut self, first_digit: char, line: usize) -> Token {
        let mut text = String::new();
        text.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Constant(text, line)
    }

    /// Lex an identifier or keyword (maximal munch, then keyword mapping).
    fn identifier_or_keyword(&mut self, first_char: char, line: usize) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "Var" => Token::Var(line),
            "Begin" => Token::Begin(line),
            "End" => Token::End(line),
            _ => Token::Ident(ident, line),
        }
    }

    /// Skip spaces, tabs and carriage returns. Newlines are tokens, not
    /// whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("Var x, y;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Var(1)));
        assert!(matches!(tokens[1], Token::Ident(ref s, 1) if s == "x"));
        assert!(matches!(tokens[2], Token::Comma(1)));
        assert!(matches!(tokens[3], Token::Ident(ref s, 1) if s == "y"));
        assert!(matches!(tokens[4], Token::Semicolon(1)));
        assert!(matches!(tokens[5], Token::Eof(1)));
    }

    #[test]
    fn test_newlines_are_tokens_and_count_lines() {
        let mut lexer = Lexer::new("Var x;\nBegin\n");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Var(1)));
        assert!(matches!(tokens[3], Token::Newline(1)));
        assert!(matches!(tokens[4], Token::Begin(2)));
        assert!(matches!(tokens[5], Token::Newline(2)));
        assert!(matches!(tokens[6], Token::Eof(3)));
    }

    #[test]
    fn test_whitespace_discarded() {
        let mut lexer = Lexer::new("x   =\t10;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[1], Token::Assign(_)));
        assert!(matches!(tokens[2], Token::Constant(ref s, _) if s == "10"));
        assert!(matches!(tokens[3], Token::Semicolon(_)));
    }

    #[test]
    fn test_unary_minus_after_assign() {
        let mut lexer = Lexer::new("a = -5;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[2], Token::UnaryMinus(_)));
    }

    #[test]
    fn test_unary_minus_after_lparen() {
        let mut lexer = Lexer::new("b = -(10 + 3);");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[2], Token::UnaryMinus(_)));
        // The '+' inside the parentheses stays binary.
        assert!(matches!(tokens[5], Token::Plus(_)));
    }

    #[test]
    fn test_binary_minus_between_operands() {
        let mut lexer = Lexer::new("a = 5 - 3;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[3], Token::Minus(_)));
    }

    #[test]
    fn test_minus_classification_ignores_whitespace() {
        // Same token stream with and without spaces around the '-'.
        let spaced = Lexer::new("a = - 5;").tokenize().unwrap();
        let tight = Lexer::new("a = -5;").tokenize().unwrap();
        assert_eq!(spaced, tight);
    }

    #[test]
    fn test_leading_minus_is_unary() {
        let mut lexer = Lexer::new("-5");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::UnaryMinus(1)));
    }

    #[test]
    fn test_keyword_vs_identifier() {
        let mut lexer = Lexer::new("Var Variable EndOfIt End");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Var(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "Variable"));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "EndOfIt"));
        assert!(matches!(tokens[3], Token::End(_)));
    }

    #[test]
    fn test_unrecognized_character() {
        let mut lexer = Lexer::new("Var x;\nx ? 5;");
        let err = lexer.tokenize().unwrap_err();

        assert_eq!(err.character, '?');
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let source = "Var x;\nBegin\nx = -1 * (2 + 3);\nEnd";
        let first = Lexer::new(source).tokenize().unwrap();
        let second = Lexer::new(source).tokenize().unwrap();
        assert_eq!(first, second);
    }
}
