use crate::error::{LexError, ScriptoError, Span};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Literals
    Number,
    Identifier,
    /// Reserved; the lexer never produces it yet.
    StringLiteral,

    // Grouping and operators
    Equals,
    LeftParen,
    RightParen,
    BinaryOperator,
    Semicolon,
    PropAssign,
    Comma,
    LeftBrace,
    RightBrace,
    Dot,
    LeftBracket,
    RightBracket,

    // Keywords
    Let,
    Const,
    Func,

    // Special
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            TokenType::Number => "number",
            TokenType::Identifier => "identifier",
            TokenType::StringLiteral => "string",
            TokenType::Equals => "'='",
            TokenType::LeftParen => "'('",
            TokenType::RightParen => "')'",
            TokenType::BinaryOperator => "operator",
            TokenType::Semicolon => "';'",
            TokenType::PropAssign => "':='",
            TokenType::Comma => "','",
            TokenType::LeftBrace => "'{'",
            TokenType::RightBrace => "'}'",
            TokenType::Dot => "'.'",
            TokenType::LeftBracket => "'['",
            TokenType::RightBracket => "']'",
            TokenType::Let => "'let'",
            TokenType::Const => "'const'",
            TokenType::Func => "'func'",
            TokenType::Eof => "end of input",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

/// A letter is any character whose upper and lower case forms differ.
fn is_letter(c: char) -> bool {
    c.to_uppercase().ne(c.to_lowercase())
}

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("let", TokenType::Let);
        keywords.insert("const", TokenType::Const);
        keywords.insert("func", TokenType::Func);

        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            keywords,
        }
    }

    /// Scans the whole source. Stops at the first unrecognized character.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ScriptoError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenType::Eof,
            "EOF".to_string(),
            Span::single(self.current),
        ));

        tracing::debug!(count = self.tokens.len(), "scanned tokens");
        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), ScriptoError> {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            '[' => self.add_token(TokenType::LeftBracket),
            ']' => self.add_token(TokenType::RightBracket),
            '.' => self.add_token(TokenType::Dot),
            ',' => self.add_token(TokenType::Comma),
            ';' => self.add_token(TokenType::Semicolon),
            '=' => self.add_token(TokenType::Equals),
            '+' | '-' | '*' | '/' | '%' | '^' => self.add_token(TokenType::BinaryOperator),
            ':' if self.match_char('=') => self.add_token(TokenType::PropAssign),
            ' ' | '\n' | '\t' => {}
            c if c.is_ascii_digit() => self.number(),
            c if is_letter(c) => self.identifier(),
            _ => {
                return Err(ScriptoError::lex_error(
                    Span::single(self.start),
                    LexError::UnrecognizedCharacter(c),
                )
                .with_help("Only letters, digits, whitespace, '+ - * / % ^' and '( ) { } [ ] . , ; = :=' are valid."));
            }
        }

        Ok(())
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.current += 1;
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        self.add_token(TokenType::Number);
    }

    fn identifier(&mut self) {
        while !self.is_at_end() && is_letter(self.peek()) {
            self.advance();
        }

        let text = self.text();
        let token_type = self
            .keywords
            .get(text.as_str())
            .cloned()
            .unwrap_or(TokenType::Identifier);

        self.add_token(token_type);
    }

    fn text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, token_type: TokenType) {
        let lexeme = self.text();
        self.tokens.push(Token::new(
            token_type,
            lexeme,
            Span::new(self.start, self.current),
        ));
    }
}
