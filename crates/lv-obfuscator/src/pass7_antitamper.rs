//! Pass 7: Anti-tamper — bail out silently when the runtime looks tampered with.

/// Capability check prepended to the code. Exits the chunk without raising.
pub const ENVIRONMENT_CHECK: &str =
    "if type(string) ~= \"table\" or type(string.char) ~= \"function\" then return end";

pub fn protect(text: &str) -> String {
    format!("{}\n{}", ENVIRONMENT_CHECK, text)
}
