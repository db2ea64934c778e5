//! Pass 1: String masking — XOR-encode quoted literals behind a decoder closure.

use rand::Rng;

use crate::lexer::{segments, unescape, SegmentKind};
use crate::tokens::TokenGenerator;

/// Bodies shorter than this (in raw characters) are left alone.
pub const MIN_LITERAL_LEN: usize = 2;

/// Self-evaluating expression that rebuilds `bytes` from `key`-XORed codes.
///
/// The XOR is done bit by bit with arithmetic so the decoder runs on Lua 5.1,
/// which has no bitwise operators.
pub fn decoder_expression(bytes: &[u8], key: u8) -> String {
    let codes = bytes
        .iter()
        .map(|b| (b ^ key).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "(function(k, d) local s = \"\" for i = 1, #d do \
         local a, b, r, p = d[i], k, 0, 1 \
         for j = 1, 8 do local x, y = a % 2, b % 2 \
         if x ~= y then r = r + p end \
         a, b, p = (a - x) / 2, (b - y) / 2, p * 2 end \
         s = s .. string.char(r) end return s end)({}, {{{}}})",
        key, codes
    )
}

/// Replace every quoted literal of at least [`MIN_LITERAL_LEN`] characters.
pub fn mask<R: Rng>(text: &str, tokens: &mut TokenGenerator<R>) -> String {
    let mut out = String::with_capacity(text.len() * 4);
    for seg in segments(text) {
        match (seg.kind, seg.quoted_body()) {
            (SegmentKind::Quoted, Some(body)) if body.chars().count() >= MIN_LITERAL_LEN => {
                let key = tokens.byte_key();
                out.push_str(&decoder_expression(&unescape(body), key));
            }
            _ => out.push_str(seg.text),
        }
    }
    out
}
