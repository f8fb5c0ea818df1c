use common::{LexError, LexErrorKind};
use token::*;

pub mod longest_match;
pub mod scan;
pub mod token;

pub struct Lexer<'a> {
    buf: &'a str,
    cursor: Cursor,
}

#[derive(Debug, PartialEq)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    /// Location just past the last byte of input.
    pub end: Location,
}

impl<'a> Lexer<'a> {
    pub fn new(buf: &'a str) -> Lexer<'a> {
        Lexer {
            buf,
            cursor: Cursor::default(),
        }
    }

    /// Run the scanners over the whole buffer. Whitespace is dropped; the
    /// first position no scanner accepts aborts lexing.
    pub fn lex(mut self) -> Result<LexResult, LexError> {
        let mut tokens: Vec<Token> = Vec::new();

        'lex: while self.cursor.offset < self.buf.len() {
            for scanner in scan::SCANNERS {
                if let Some((token, cursor)) = scanner(self.buf, self.cursor) {
                    self.cursor = cursor;

                    if let Some(token) = token {
                        log::trace!("{} {:?} at {}", token.kind, token.value, token.location);
                        tokens.push(token);
                    }

                    continue 'lex;
                }
            }

            let err = self.error(tokens.last());
            log::error!("{err}");
            return Err(err);
        }

        log::debug!("lexed {} tokens", tokens.len());

        Ok(LexResult {
            tokens,
            end: self.cursor.location,
        })
    }

    fn error(&self, previous: Option<&Token>) -> LexError {
        // Only the delimited scanners can fail on a quote: unterminated, or `""`.
        let kind = match self.buf.as_bytes().get(self.cursor.offset) {
            Some(b'\'') => LexErrorKind::UnterminatedLiteral('\''),
            Some(b'"') => match scan::scan_delimited(self.buf, self.cursor, b'"') {
                Some(_) => LexErrorKind::EmptyQuotedIdentifier,
                None => LexErrorKind::UnterminatedLiteral('"'),
            },
            _ => LexErrorKind::UnrecognizedInput,
        };

        LexError {
            kind,
            offset: self.cursor.offset,
            location: self.cursor.location,
            after: previous.map(|t| t.value.clone()),
        }
    }
}
