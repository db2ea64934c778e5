//! Pass 4: Junk injection — inert statements before and after the code.

use lv_core::IdentifierStyle;
use rand::Rng;

use crate::tokens::TokenGenerator;

/// Statements added on each side.
pub const JUNK_PER_SIDE: usize = 3;

pub fn inject<R: Rng>(text: &str, tokens: &mut TokenGenerator<R>, style: IdentifierStyle) -> String {
    let mut lines: Vec<String> = (0..JUNK_PER_SIDE).map(|_| tokens.junk_statement(style)).collect();
    // Enclosed so trailing junk never follows a `return` in the same block.
    lines.push(format!("do\n{}\nend", text));
    lines.extend((0..JUNK_PER_SIDE).map(|_| tokens.junk_statement(style)));
    lines.join("\n")
}
