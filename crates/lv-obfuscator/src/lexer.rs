//! Single-pass literal scanner — splits source into code, strings and comments.
//!
//! This is not a tokenizer. It only finds the regions that text rewrites must
//! treat as opaque: quoted strings, long-bracket strings and comments.

/// Segment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Code,
    /// `"..."` or `'...'`, quotes included.
    Quoted,
    /// `[[...]]` / `[==[...]==]`.
    LongString,
    /// `-- ...` up to (not including) the newline, or `--[[...]]`.
    Comment,
}

/// A borrowed slice of the source with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    /// Raw content of a quoted string, quotes stripped.
    pub fn quoted_body(&self) -> Option<&'a str> {
        match self.kind {
            SegmentKind::Quoted => Some(&self.text[1..self.text.len() - 1]),
            _ => None,
        }
    }

    pub fn is_code(&self) -> bool {
        self.kind == SegmentKind::Code
    }
}

/// Split `text` into consecutive segments covering every byte exactly once.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut code_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let found = match bytes[i] {
            b'"' | b'\'' => quoted_end(bytes, i).map(|end| (SegmentKind::Quoted, end)),
            b'[' => long_bracket_end(bytes, i).map(|end| (SegmentKind::LongString, end)),
            b'-' if bytes.get(i + 1) == Some(&b'-') => Some((SegmentKind::Comment, comment_end(bytes, i))),
            _ => None,
        };
        match found {
            Some((kind, end)) => {
                if code_start < i {
                    out.push(Segment { kind: SegmentKind::Code, text: &text[code_start..i] });
                }
                out.push(Segment { kind, text: &text[i..end] });
                i = end;
                code_start = end;
            }
            None => i += 1,
        }
    }
    if code_start < bytes.len() {
        out.push(Segment { kind: SegmentKind::Code, text: &text[code_start..] });
    }
    out
}

/// Rebuild text, passing each code segment through `f` and everything else verbatim.
pub fn map_code(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    for seg in segments(text) {
        if seg.is_code() {
            out.push_str(&f(seg.text));
        } else {
            out.push_str(seg.text);
        }
    }
    out
}

/// End (exclusive) of the quoted string opening at `start`, if it terminates.
fn quoted_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Level of a long bracket opener `[`, `=`*, `[` at `start`.
fn long_bracket_level(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while bytes.get(i) == Some(&b'=') {
        i += 1;
    }
    (bytes.get(i) == Some(&b'[')).then_some(i - start - 1)
}

fn long_bracket_end(bytes: &[u8], start: usize) -> Option<usize> {
    let level = long_bracket_level(bytes, start)?;
    let mut i = start + level + 2;
    while i < bytes.len() {
        if bytes[i] == b']' {
            let mut j = i + 1;
            while bytes.get(j) == Some(&b'=') {
                j += 1;
            }
            if j - i - 1 == level && bytes.get(j) == Some(&b']') {
                return Some(j + 1);
            }
        }
        i += 1;
    }
    None
}

fn comment_end(bytes: &[u8], start: usize) -> usize {
    let body = start + 2;
    if bytes.get(body) == Some(&b'[') {
        if let Some(end) = long_bracket_end(bytes, body) {
            return end;
        }
    }
    bytes[body..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| body + p)
}

/// Decode the escape sequences of a quoted string body into raw bytes.
///
/// Unknown escapes keep the escaped character.
pub fn unescape(raw: &str) -> Vec<u8> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 >= bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let c = bytes[i + 1];
        i += 2;
        match c {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'v' => out.push(0x0b),
            b'\n' => out.push(b'\n'),
            b'x' => {
                let hex = bytes.get(i..i + 2).and_then(|h| std::str::from_utf8(h).ok());
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(v) => {
                        out.push(v);
                        i += 2;
                    }
                    None => out.push(b'x'),
                }
            }
            b'z' => {
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
            }
            d if d.is_ascii_digit() => {
                let mut value = u32::from(d - b'0');
                let mut taken = 1;
                while taken < 3 && i < bytes.len() && bytes[i].is_ascii_digit() {
                    value = value * 10 + u32::from(bytes[i] - b'0');
                    i += 1;
                    taken += 1;
                }
                out.push(value.min(255) as u8);
            }
            other => out.push(other),
        }
    }
    out
}
