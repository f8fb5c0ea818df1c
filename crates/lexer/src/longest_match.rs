use crate::token::Cursor;

/// Find the longest vocabulary entry matching the source at `start`.
///
/// The candidate grows one byte at a time (lower-cased). Entries that stop
/// sharing a prefix with the candidate are eliminated, and scanning ends once
/// every entry is eliminated or the input runs out. Vocabulary entries must
/// be lower-case.
pub fn longest_match<'v>(src: &str, start: Cursor, vocabulary: &[&'v str]) -> Option<&'v str> {
    let rest = src.as_bytes().get(start.offset..)?;

    let mut eliminated = vec![false; vocabulary.len()];
    let mut remaining = vocabulary.len();
    let mut candidate = Vec::with_capacity(8);
    let mut matched: Option<&'v str> = None;

    for &byte in rest {
        if remaining == 0 {
            break;
        }

        candidate.push(byte.to_ascii_lowercase());

        for (i, &option) in vocabulary.iter().enumerate() {
            if eliminated[i] {
                continue;
            }

            let option_bytes = option.as_bytes();

            // An exact match can't grow any further, e.g. `int` once `into` is in play.
            if option_bytes == candidate.as_slice() {
                if matched.map_or(true, |m| option.len() > m.len()) {
                    matched = Some(option);
                }

                eliminated[i] = true;
                remaining -= 1;
                continue;
            }

            if !option_bytes.starts_with(&candidate) {
                eliminated[i] = true;
                remaining -= 1;
            }
        }
    }

    matched
}
