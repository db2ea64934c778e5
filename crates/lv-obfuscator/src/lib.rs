//! LuaVeil — ordered source-to-source obfuscation passes for Lua.
//!
//! Passes, in pipeline order:
//! 1. String masking — XOR-encoded literals behind a decoder closure
//! 2. Control-flow flattening — single-state dispatch loop
//! 3. Opaque predicates — always-true guard
//! 4. Junk injection — inert statements around the code
//! 5. Numeric rewriting — integer literals become equal expressions
//! 6. Constant pooling — reserved, counted but inert
//! 7. Anti-tamper — silent exit on a tampered runtime
//! 8. Payload encoding — base64 payload behind a load shim
//! 9. Function wrap — local function defined and returned

pub mod format;
pub mod latency;
pub mod lexer;
pub mod obfuscator;
pub mod pass1_strings;
pub mod pass2_flatten;
pub mod pass3_predicates;
pub mod pass4_junk;
pub mod pass5_numbers;
pub mod pass6_constants;
pub mod pass7_antitamper;
pub mod pass8_vmify;
pub mod pass9_wrap;
pub mod pipeline;
pub mod tokens;

pub use latency::{Latency, NoLatency, TokioLatency};
pub use obfuscator::Obfuscator;
pub use pass8_vmify::{Base64Encoder, StandardBase64};
pub use pipeline::{Pipeline, PipelineResult};
pub use tokens::TokenGenerator;
