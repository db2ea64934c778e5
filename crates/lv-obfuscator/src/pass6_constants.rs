//! Pass 6: Constant pooling — reserved slot.
//!
//! Counted as applied but leaves the text unchanged. Literal pooling is not
//! implemented; the slot keeps the applied-count and output stable.

pub fn pool(text: &str) -> String {
    text.to_string()
}
