//! Pass 3: Opaque predicate guard.

use rand::Rng;

use crate::tokens::TokenGenerator;

pub fn guard<R: Rng>(text: &str, tokens: &mut TokenGenerator<R>) -> String {
    format!("if {} then\n{}\nend", tokens.opaque_predicate(), text)
}
