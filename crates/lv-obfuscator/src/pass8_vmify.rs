//! Pass 8: Payload encoding — base64 + shifted alphabet behind a load shim.

use base64::{engine::general_purpose, Engine as _};
use lv_core::IdentifierStyle;
use rand::Rng;

use crate::tokens::TokenGenerator;

pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Base64 capability used by the payload wrap.
pub trait Base64Encoder: Send + Sync {
    /// Encode the UTF-8 bytes of `text`.
    fn encode(&self, text: &str) -> String;
}

/// Standard alphabet with padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBase64;

impl Base64Encoder for StandardBase64 {
    fn encode(&self, text: &str) -> String {
        general_purpose::STANDARD.encode(text.as_bytes())
    }
}

/// Rotate every alphabet character of `encoded` forward by `shift`. Padding is kept.
pub fn shift_alphabet(encoded: &str, shift: u8) -> String {
    encoded
        .bytes()
        .map(|b| match ALPHABET.iter().position(|&a| a == b) {
            Some(idx) => ALPHABET[(idx + shift as usize) % 64] as char,
            None => b as char,
        })
        .collect()
}

/// Inverse of [`shift_alphabet`].
pub fn unshift_alphabet(encoded: &str, shift: u8) -> String {
    shift_alphabet(encoded, 64 - (shift % 64))
}

/// Lua decoder: undo the shift, then base64-decode without bit operators.
fn decoder_source(name: &str) -> String {
    format!(
        "local {name} = function(s, k)\n\
         local a = \"{alphabet}\"\n\
         local bits = s:gsub(\"[^%w%+/=]\", \"\"):gsub(\".\", function(c)\n\
         if c == \"=\" then return \"\" end\n\
         local f = (a:find(c, 1, true) - 1 - k) % 64\n\
         local r = \"\"\n\
         for i = 6, 1, -1 do r = r .. (f % 2 ^ i - f % 2 ^ (i - 1) > 0 and \"1\" or \"0\") end\n\
         return r\n\
         end)\n\
         return (bits:gsub(\"%d%d%d?%d?%d?%d?%d?%d?\", function(x)\n\
         if #x ~= 8 then return \"\" end\n\
         local c = 0\n\
         for i = 1, 8 do c = c + (x:sub(i, i) == \"1\" and 2 ^ (8 - i) or 0) end\n\
         return string.char(c)\n\
         end))\n\
         end",
        name = name,
        alphabet = std::str::from_utf8(ALPHABET).unwrap_or_default(),
    )
}

/// Replace `text` with a loader that decodes and runs it.
pub fn wrap<R: Rng>(
    text: &str,
    tokens: &mut TokenGenerator<R>,
    style: IdentifierStyle,
    encoder: &dyn Base64Encoder,
) -> String {
    let names = tokens.distinct_identifiers(style, 3);
    let (loader, decoder, payload) = (&names[0], &names[1], &names[2]);
    let shift = tokens.rng().gen_range(1..64u8);
    let cipher = shift_alphabet(&encoder.encode(text), shift);

    format!(
        "local {loader} = loadstring or load\n{decoder_fn}\nlocal {payload} = [[{cipher}]]\nreturn {loader}({decoder}({payload}, {shift}))()",
        decoder_fn = decoder_source(decoder),
    )
}
