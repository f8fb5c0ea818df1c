use std::fmt;

pub use common::Location;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    As,
    Table,
    Create,
    Insert,
    Into,
    Values,
    Int,
    Text,
    Where,
}

impl Keyword {
    pub const ALL: [Keyword; 11] = [
        Keyword::Select,
        Keyword::From,
        Keyword::As,
        Keyword::Table,
        Keyword::Create,
        Keyword::Insert,
        Keyword::Into,
        Keyword::Values,
        Keyword::Int,
        Keyword::Text,
        Keyword::Where,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "select",
            Keyword::From => "from",
            Keyword::As => "as",
            Keyword::Table => "table",
            Keyword::Create => "create",
            Keyword::Insert => "insert",
            Keyword::Into => "into",
            Keyword::Values => "values",
            Keyword::Int => "int",
            Keyword::Text => "text",
            Keyword::Where => "where",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Semicolon,
    Asterisk,
    Comma,
    LeftParen,
    RightParen,
}

impl Symbol {
    pub const ALL: [Symbol; 5] = [
        Symbol::Semicolon,
        Symbol::Asterisk,
        Symbol::Comma,
        Symbol::LeftParen,
        Symbol::RightParen,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Symbol::Semicolon => ";",
            Symbol::Asterisk => "*",
            Symbol::Comma => ",",
            Symbol::LeftParen => "(",
            Symbol::RightParen => ")",
        }
    }
}

/// Keyword vocabulary handed to the longest-match engine.
pub const KEYWORDS: [&str; 11] = {
    let mut table = [""; 11];
    let mut i = 0;
    while i < Keyword::ALL.len() {
        table[i] = Keyword::ALL[i].as_str();
        i += 1;
    }
    table
};

/// Symbol vocabulary handed to the longest-match engine.
pub const SYMBOLS: [&str; 5] = {
    let mut table = [""; 5];
    let mut i = 0;
    while i < Symbol::ALL.len() {
        table[i] = Symbol::ALL[i].as_str();
        i += 1;
    }
    table
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    String,
    Numeric,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword => f.write_str("keyword"),
            TokenKind::Symbol => f.write_str("symbol"),
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::String => f.write_str("string"),
            TokenKind::Numeric => f.write_str("numeric"),
        }
    }
}

/// A classified slice of source text.
///
/// Equality compares `value` and `kind` only, so a scanned token can be
/// checked against a [`Token::template`] built without a location.
#[derive(Clone, Debug)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, location: Location) -> Self {
        Token {
            value: value.into(),
            kind,
            location,
        }
    }

    pub fn template(value: impl Into<String>, kind: TokenKind) -> Self {
        Token::new(value, kind, Location::default())
    }

    pub fn keyword(keyword: Keyword) -> Self {
        Token::template(keyword.as_str(), TokenKind::Keyword)
    }

    pub fn symbol(symbol: Symbol) -> Self {
        Token::template(symbol.as_str(), TokenKind::Symbol)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword && self.value == keyword.as_str()
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.kind == TokenKind::Symbol && self.value == symbol.as_str()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.kind == other.kind
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String => write_delimited(f, &self.value, '\''),
            TokenKind::Identifier if !is_bare_identifier(&self.value) => {
                write_delimited(f, &self.value, '"')
            }
            _ => f.write_str(&self.value),
        }
    }
}

fn write_delimited(f: &mut fmt::Formatter<'_>, value: &str, delimiter: char) -> fmt::Result {
    use fmt::Write;

    f.write_char(delimiter)?;
    for ch in value.chars() {
        if ch == delimiter {
            f.write_char(delimiter)?;
        }
        f.write_char(ch)?;
    }
    f.write_char(delimiter)
}

/// True when `value` would lex back, unquoted, to an identifier with the same value.
pub fn is_bare_identifier(value: &str) -> bool {
    let mut bytes = value.bytes();
    let starts_with_letter = matches!(bytes.next(), Some(b) if b.is_ascii_lowercase());

    starts_with_letter
        && bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'$' || b == b'_')
        && !KEYWORDS.contains(&value)
}

/// Scanning position: byte offset plus the line/column it corresponds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Cursor {
    pub offset: usize,
    pub location: Location,
}

impl Cursor {
    /// Cursor positioned after consuming `byte`.
    pub fn advance(self, byte: u8) -> Cursor {
        let location = match byte {
            b'\n' => Location::new(self.location.line + 1, 0),
            _ => Location::new(self.location.line, self.location.column + 1),
        };

        Cursor {
            offset: self.offset + 1,
            location,
        }
    }
}

#[cfg(test)]
mod token_tests {
    use super::*;

    #[test]
    fn test_equality_ignores_location() {
        let scanned = Token::new("select", TokenKind::Keyword, Location::new(3, 7));

        assert_eq!(scanned, Token::keyword(Keyword::Select));
        assert_ne!(scanned, Token::template("select", TokenKind::Identifier));
    }

    #[test]
    fn test_vocabulary_tables() {
        assert_eq!(
            KEYWORDS,
            ["select", "from", "as", "table", "create", "insert", "into", "values", "int", "text", "where"]
        );
        assert_eq!(SYMBOLS, [";", "*", ",", "(", ")"]);
    }

    #[test]
    fn test_cursor_newline_resets_column() {
        let cursor = Cursor::default().advance(b'a').advance(b'\n').advance(b'b');

        assert_eq!(cursor.offset, 3);
        assert_eq!(cursor.location, Location::new(1, 1));
    }

    #[test]
    fn test_display_requotes() {
        let string = Token::template("it's", TokenKind::String);
        let quoted = Token::template("My\"Col", TokenKind::Identifier);
        let keyword_named = Token::template("from", TokenKind::Identifier);
        let bare = Token::template("users_2", TokenKind::Identifier);

        assert_eq!(string.to_string(), "'it''s'");
        assert_eq!(quoted.to_string(), "\"My\"\"Col\"");
        assert_eq!(keyword_named.to_string(), "\"from\"");
        assert_eq!(bare.to_string(), "users_2");
    }
}
