use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io::{self, Write};
use std::ops::Range;
use thiserror::Error;

/// Character offsets into the source text, end exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("character not recognized: '{0}'")]
    UnrecognizedCharacter(char),
}

fn with_leading_space(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!(" {}", context)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected}{}, found '{found}'", with_leading_space(.context))]
    UnexpectedToken {
        found: String,
        expected: String,
        context: String,
    },
    #[error("constant '{0}' must be initialized")]
    IllegalConstDeclaration(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("'{0}' has not been declared")]
    UnknownIdentifier(String),
    #[error("cannot redeclare '{0}' in the same scope")]
    DuplicateDeclaration(String),
    #[error("constant '{0}' cannot be reassigned")]
    ConstantReassignment(String),
    #[error("value of type {0} is not callable")]
    NotCallable(String),
    #[error("invalid assignment target: {0}")]
    InvalidAssignmentTarget(String),
    #[error("cannot access a property on a value of type {0}")]
    NotAnObject(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Lex(e) => write!(f, "{}", e),
            ErrorKind::Parse(e) => write!(f, "{}", e),
            ErrorKind::Runtime(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptoError {
    pub kind: ErrorKind,
    pub span: Span,
    pub help: Option<String>,
}

impl ScriptoError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn lex_error(span: Span, error: LexError) -> Self {
        Self::new(ErrorKind::Lex(error), span)
    }

    pub fn parse_error(span: Span, error: ParseError) -> Self {
        Self::new(ErrorKind::Parse(error), span)
    }

    pub fn runtime_error(span: Span, error: RuntimeError) -> Self {
        Self::new(ErrorKind::Runtime(error), span)
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Label range clamped onto the source. Errors at end of input sit one
    /// past the last character, which ariadne would drop.
    fn label_range(&self, source: &str) -> Range<usize> {
        let len = source.chars().count();
        if len == 0 {
            return 0..0;
        }
        let start = self.span.start.min(len - 1);
        let end = self.span.end.clamp(start + 1, len);
        start..end
    }

    fn build_report<'a>(
        &self,
        source: &str,
        filename: &'a str,
        colored: bool,
    ) -> Report<'a, (&'a str, Range<usize>)> {
        let message = self.message();
        let range = self.label_range(source);

        let (color, kind_str) = match self.kind {
            ErrorKind::Lex(_) => (Color::Red, "Lexical Error"),
            ErrorKind::Parse(_) => (Color::Yellow, "Parse Error"),
            ErrorKind::Runtime(_) => (Color::Magenta, "Runtime Error"),
        };
        let headline = if colored {
            format!("{}: {}", kind_str.fg(color), message)
        } else {
            format!("{}: {}", kind_str, message)
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, range.start)
            .with_config(Config::default().with_color(colored))
            .with_message(headline)
            .with_label(
                Label::new((filename, range))
                    .with_message(&message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            let help = if colored {
                format!("{}: {}", "help".fg(Color::Cyan), help_text)
            } else {
                format!("help: {}", help_text)
            };
            report_builder = report_builder.with_note(help);
        }

        report_builder.finish()
    }

    /// Renders the diagnostic without colour into `writer`.
    pub fn write_report<W: Write>(
        &self,
        source: &str,
        filename: Option<&str>,
        writer: W,
    ) -> io::Result<()> {
        let filename = filename.unwrap_or("<repl>");
        self.build_report(source, filename, false)
            .write((filename, Source::from(source)), writer)
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        // A broken stderr leaves nothing to report to.
        let _ = self
            .build_report(source, filename, true)
            .eprint((filename, Source::from(source)));
    }
}

impl fmt::Display for ScriptoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ScriptoError {}
