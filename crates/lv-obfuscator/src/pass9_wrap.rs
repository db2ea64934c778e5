//! Pass 9: Function wrap — define a local function around the code and return its call.

use lv_core::IdentifierStyle;
use rand::Rng;

use crate::tokens::TokenGenerator;

pub fn wrap<R: Rng>(text: &str, tokens: &mut TokenGenerator<R>, style: IdentifierStyle) -> String {
    let name = tokens.identifier(style);
    format!("local function {name}()\n{text}\nend\nreturn {name}()")
}
