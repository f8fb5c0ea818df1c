//! Character-class scanners.
//!
//! Every scanner takes the source and a starting [`Cursor`]. On success it
//! returns the token it produced (if any) and the advanced cursor. On failure
//! it returns `None` and nothing has been consumed.

use crate::longest_match::longest_match;
use crate::token::{Cursor, Token, TokenKind, KEYWORDS, SYMBOLS};

/// `Some((token, cursor))` on a match. A `None` token means input was
/// consumed without producing anything (whitespace).
pub type ScanResult = Option<(Option<Token>, Cursor)>;

pub type Scanner = fn(&str, Cursor) -> ScanResult;

/// Tried in order at each position; the first match wins.
pub const SCANNERS: [Scanner; 5] = [
    scan_numeric,
    scan_string,
    scan_symbol,
    scan_keyword,
    scan_identifier,
];

pub fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'$' || byte == b'_'
}

fn advance_by(src: &[u8], start: Cursor, len: usize) -> Cursor {
    src[start.offset..start.offset + len]
        .iter()
        .fold(start, |cursor, &byte| cursor.advance(byte))
}

/// Unsigned decimal literal with at most one period and one `e` exponent
/// marker, which may be followed by a sign.
pub fn scan_numeric(src: &str, start: Cursor) -> ScanResult {
    let bytes = src.as_bytes();
    let mut cur = start;

    let mut period_found = false;
    let mut exp_marker_found = false;

    while let Some(&c) = bytes.get(cur.offset) {
        let is_digit = c.is_ascii_digit();
        let is_period = c == b'.';
        let is_exp_marker = c == b'e';

        if cur.offset == start.offset {
            if !is_digit && !is_period {
                return None;
            }

            period_found = is_period;
            cur = cur.advance(c);
            continue;
        }

        if is_period {
            if period_found {
                return None;
            }

            period_found = true;
            cur = cur.advance(c);
            continue;
        }

        if is_exp_marker {
            if exp_marker_found {
                return None;
            }

            // No period allowed after the exponent.
            period_found = true;
            exp_marker_found = true;

            if cur.offset + 1 == bytes.len() {
                return None;
            }

            cur = cur.advance(c);

            // The sign is taken as-is; a digit after it is not required here.
            let next = bytes[cur.offset];
            if next == b'-' || next == b'+' {
                cur = cur.advance(next);
            }

            continue;
        }

        if !is_digit {
            break;
        }

        cur = cur.advance(c);
    }

    if cur.offset == start.offset {
        return None;
    }

    let token = Token::new(
        &src[start.offset..cur.offset],
        TokenKind::Numeric,
        start.location,
    );

    Some((Some(token), cur))
}

/// Literal wrapped in `delimiter`, where a doubled delimiter stands for one
/// literal delimiter. Fails when the closing delimiter is never found.
pub fn scan_delimited(src: &str, start: Cursor, delimiter: u8) -> Option<(Token, Cursor)> {
    let bytes = src.as_bytes();
    if bytes.get(start.offset) != Some(&delimiter) {
        return None;
    }

    let mut cur = start.advance(delimiter);
    let mut segment_start = cur.offset;
    let mut value = String::new();

    while let Some(&c) = bytes.get(cur.offset) {
        if c != delimiter {
            cur = cur.advance(c);
            continue;
        }

        value.push_str(&src[segment_start..cur.offset]);
        cur = cur.advance(c);

        if bytes.get(cur.offset) != Some(&delimiter) {
            let token = Token::new(value, TokenKind::String, start.location);
            return Some((token, cur));
        }

        // Escaped delimiter, keep one.
        value.push(char::from(delimiter));
        cur = cur.advance(delimiter);
        segment_start = cur.offset;
    }

    None
}

pub fn scan_string(src: &str, start: Cursor) -> ScanResult {
    scan_delimited(src, start, b'\'').map(|(token, cur)| (Some(token), cur))
}

/// Whitespace is consumed here without producing a token.
pub fn scan_symbol(src: &str, start: Cursor) -> ScanResult {
    let bytes = src.as_bytes();
    let c = *bytes.get(start.offset)?;

    if matches!(c, b' ' | b'\t' | b'\r' | b'\n') {
        return Some((None, start.advance(c)));
    }

    let matched = longest_match(src, start, &SYMBOLS)?;
    let token = Token::new(matched, TokenKind::Symbol, start.location);

    Some((Some(token), advance_by(bytes, start, matched.len())))
}

/// Keywords only match on a word boundary, so `selecting` is left for the
/// identifier scanner.
pub fn scan_keyword(src: &str, start: Cursor) -> ScanResult {
    let bytes = src.as_bytes();
    let matched = longest_match(src, start, &KEYWORDS)?;

    let end = start.offset + matched.len();
    if bytes.get(end).is_some_and(|&b| is_identifier_byte(b)) {
        return None;
    }

    let token = Token::new(matched, TokenKind::Keyword, start.location);

    Some((Some(token), advance_by(bytes, start, matched.len())))
}

/// Double-quoted identifiers keep their case; bare identifiers are lower-cased.
/// An empty quoted identifier is not a match.
pub fn scan_identifier(src: &str, start: Cursor) -> ScanResult {
    if let Some((mut token, cur)) = scan_delimited(src, start, b'"') {
        if token.value.is_empty() {
            return None;
        }

        token.kind = TokenKind::Identifier;
        return Some((Some(token), cur));
    }

    let bytes = src.as_bytes();
    let first = *bytes.get(start.offset)?;
    if !first.is_ascii_alphabetic() {
        return None;
    }

    let mut cur = start.advance(first);
    while let Some(&c) = bytes.get(cur.offset) {
        if !is_identifier_byte(c) {
            break;
        }

        cur = cur.advance(c);
    }

    let value = src[start.offset..cur.offset].to_ascii_lowercase();
    let token = Token::new(value, TokenKind::Identifier, start.location);

    Some((Some(token), cur))
}
