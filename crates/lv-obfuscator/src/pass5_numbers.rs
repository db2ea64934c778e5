//! Pass 5: Numeric literal rewriting — integer literals become equal expressions.

use rand::Rng;

use crate::lexer::map_code;
use crate::tokens::TokenGenerator;

/// Exclusive bounds of rewritable literals.
pub const RANGE: (i32, i32) = (0, 10_000);

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A numeric run cut short by an exponent sign.
fn open_exponent(token: &str) -> bool {
    matches!(token.bytes().last(), Some(b'e' | b'E' | b'p' | b'P'))
}

/// Rewrite eligible integer literals in code, each with probability 1/2.
///
/// Strings and comments are untouched. Digits inside identifiers, fractional
/// parts, hex and exponent literals are never candidates.
pub fn rewrite<R: Rng>(text: &str, tokens: &mut TokenGenerator<R>) -> String {
    map_code(text, |code| rewrite_code(code, tokens))
}

fn rewrite_code<R: Rng>(code: &str, tokens: &mut TokenGenerator<R>) -> String {
    let bytes = code.as_bytes();
    let mut out = String::with_capacity(code.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() || (i > 0 && is_word(bytes[i - 1])) {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && is_word(bytes[i]) {
            i += 1;
        }
        // `5e-3`, `0x1p+4`: the signed exponent belongs to this literal.
        if open_exponent(&code[start..i]) && matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
            while i < bytes.len() && is_word(bytes[i]) {
                i += 1;
            }
            continue;
        }
        let after_dot = start > 0 && bytes[start - 1] == b'.' && (start < 2 || bytes[start - 2] != b'.');
        let before_dot = bytes.get(i) == Some(&b'.') && bytes.get(i + 1) != Some(&b'.');
        if after_dot || before_dot {
            continue;
        }
        let token = &code[start..i];
        let Ok(value) = token.parse::<i32>() else { continue };
        if value <= RANGE.0 || value >= RANGE.1 || !tokens.coin() {
            continue;
        }
        out.push_str(&code[copied..start]);
        out.push_str(&tokens.numeric_expression(value));
        copied = i;
    }
    out.push_str(&code[copied..]);
    out
}
