use core::fmt;

use thiserror::Error;

/// Zero-based line/column position in the source text.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Raised by the tokenizer when no scanner accepts the input at a position.
#[derive(Clone, PartialEq, Debug, Error)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset of the failing position.
    pub offset: usize,
    pub location: Location,
    /// Text of the last token produced before the failure, if any.
    pub after: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LexErrorKind {
    UnrecognizedInput,
    /// A `'` or `"` literal reached end of input without its closing delimiter.
    UnterminatedLiteral(char),
    /// `""` names nothing.
    EmptyQuotedIdentifier,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexErrorKind::UnrecognizedInput => write!(f, "unable to lex tokens")?,
            LexErrorKind::UnterminatedLiteral('\'') => write!(f, "unterminated string literal")?,
            LexErrorKind::UnterminatedLiteral(_) => {
                write!(f, "unterminated quoted identifier literal")?
            }
            LexErrorKind::EmptyQuotedIdentifier => write!(f, "empty quoted identifier")?,
        }

        if let Some(prev) = &self.after {
            write!(f, " after {prev}")?;
        }

        write!(f, ", at {}", self.location)
    }
}

/// Raised by the statement parser. Always fatal for the whole parse.
#[derive(Clone, PartialEq, Debug, Error)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
    /// Text of the offending token, or [`END_OF_INPUT`].
    pub got: String,
}

pub const END_OF_INPUT: &str = "end of input";

#[derive(Clone, PartialEq, Debug)]
pub enum ParseErrorKind {
    ExpectedStatement,
    /// Carries a description of what was expected, e.g. `FROM keyword`.
    UnexpectedToken(String),
    MissingDelimiter,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: Location, got: impl Into<String>) -> Self {
        ParseError {
            kind,
            location,
            got: got.into(),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::ExpectedStatement => write!(f, "Expected statement"),
            ParseErrorKind::UnexpectedToken(expected) => write!(f, "Expected {expected}"),
            ParseErrorKind::MissingDelimiter => write!(f, "Expected semicolon"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{}]: {}, got: {}",
            self.location.line, self.location.column, self.kind, self.got
        )
    }
}
