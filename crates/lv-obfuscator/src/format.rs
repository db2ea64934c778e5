//! Output formatting — comment stripping, whitespace normalization, banner.

use regex::Regex;
use std::sync::LazyLock;

use crate::lexer::{map_code, segments, SegmentKind};

/// Two-line attribution banner prepended to every result.
pub const BANNER: &str = "-- Obfuscated by LuaVeil\n-- Do not edit: regenerate from the original source\n";

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?([=+\-*/%^#<>~,;:(){}\[\]]) ?").unwrap());
static RE_CONCAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\.\. ?").unwrap());
// `1..x` would lex as a malformed number.
static RE_DIGIT_CONCAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d)\.\.").unwrap());

/// Replace comments with a single space.
pub fn strip_comments(text: &str) -> String {
    segments(text)
        .into_iter()
        .map(|seg| match seg.kind {
            SegmentKind::Comment => " ",
            _ => seg.text,
        })
        .collect()
}

/// Normalize one code segment.
fn squeeze(code: &str) -> String {
    let collapsed = RE_WHITESPACE.replace_all(code, " ");
    let trimmed = RE_PUNCT.replace_all(&collapsed, "$1");
    let trimmed = RE_CONCAT.replace_all(&trimmed, "..");
    let mut out = RE_DIGIT_CONCAT.replace_all(&trimmed, "$1 ..").into_owned();
    // Trimming must never fuse two minus signs into a comment opener.
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    out
}

/// Strip comments, collapse whitespace and tighten operators in code.
/// String literals pass through byte-for-byte.
pub fn normalize(text: &str) -> String {
    let stripped = strip_comments(text);
    map_code(&stripped, squeeze).trim().to_string()
}

pub fn with_banner(text: &str) -> String {
    format!("{}{}", BANNER, text)
}
