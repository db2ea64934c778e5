//! Pass 2: Control-flow flattening — single-state dispatch loop.

use lv_core::IdentifierStyle;
use rand::Rng;

use crate::tokens::TokenGenerator;

/// Terminal state of the dispatch loop.
pub const TERMINAL_STATE: u32 = 0;

/// Wrap `text` in `while state ~= 0` with one live state.
///
/// The body sits in `do ... end` so a trailing `return` stays the last
/// statement of its block.
pub fn flatten<R: Rng>(text: &str, tokens: &mut TokenGenerator<R>, style: IdentifierStyle) -> String {
    let state = tokens.identifier(style);
    let initial = tokens.state_value();
    format!(
        "local {s} = {init}\nwhile {s} ~= {end} do\nif {s} == {init} then\ndo\n{body}\nend\n{s} = {end}\nend\nend",
        s = state,
        init = initial,
        end = TERMINAL_STATE,
        body = text,
    )
}
