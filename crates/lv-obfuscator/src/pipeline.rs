//! Obfuscation pipeline — runs the enabled passes in their fixed order.

use lv_core::{Settings, Step};
use rand::Rng;
use serde::Serialize;

use crate::pass8_vmify::{Base64Encoder, StandardBase64};
use crate::tokens::TokenGenerator;
use crate::{
    format, pass1_strings, pass2_flatten, pass3_predicates, pass4_junk, pass5_numbers,
    pass6_constants, pass7_antitamper, pass8_vmify, pass9_wrap,
};

/// Result of one run, with statistics for the caller's display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub text: String,
    pub applied_count: usize,
    pub steps_applied: Vec<Step>,
    pub original_len: usize,
    pub output_len: usize,
}

impl PipelineResult {
    /// Output size relative to input size.
    pub fn growth(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.output_len as f64 / self.original_len as f64
    }
}

/// The pass driver.
pub struct Pipeline<'e> {
    encoder: &'e dyn Base64Encoder,
    banner: bool,
}

impl Pipeline<'static> {
    pub fn new() -> Self {
        Self { encoder: &StandardBase64, banner: true }
    }
}

impl<'e> Pipeline<'e> {
    pub fn with_encoder(encoder: &'e dyn Base64Encoder) -> Self {
        Self { encoder, banner: true }
    }

    pub fn banner(mut self, enabled: bool) -> Self {
        self.banner = enabled;
        self
    }

    /// Apply a single pass.
    pub fn apply_step<R: Rng>(
        &self,
        step: Step,
        text: &str,
        settings: &Settings,
        tokens: &mut TokenGenerator<R>,
    ) -> String {
        let style = settings.identifier_style;
        match step {
            Step::EncryptStrings => pass1_strings::mask(text, tokens),
            Step::ControlFlowFlatten => pass2_flatten::flatten(text, tokens, style),
            Step::OpaquePredicates => pass3_predicates::guard(text, tokens),
            Step::JunkCode => pass4_junk::inject(text, tokens, style),
            Step::NumbersToExpressions => pass5_numbers::rewrite(text, tokens),
            Step::ConstantArray => pass6_constants::pool(text),
            Step::AntiTamper => pass7_antitamper::protect(text),
            Step::Vmify => pass8_vmify::wrap(text, tokens, style, self.encoder),
            Step::WrapInFunction => pass9_wrap::wrap(text, tokens, style),
        }
    }

    /// Run every enabled pass, then normalize and banner the result.
    ///
    /// Total over arbitrary text: non-matching regions are left as they are.
    pub fn run<R: Rng>(&self, source: &str, settings: &Settings, rng: R) -> PipelineResult {
        let mut tokens = TokenGenerator::new(rng);
        let mut text = source.to_string();
        let mut steps_applied = Vec::new();

        for step in settings.steps().enabled() {
            text = self.apply_step(step, &text, settings, &mut tokens);
            steps_applied.push(step);
            tracing::debug!(%step, len = text.len(), "pass applied");
        }

        let normalized = format::normalize(&text);
        let text = if self.banner { format::with_banner(&normalized) } else { normalized };

        PipelineResult {
            original_len: source.len(),
            output_len: text.len(),
            applied_count: steps_applied.len(),
            steps_applied,
            text,
        }
    }
}

impl Default for Pipeline<'static> {
    fn default() -> Self {
        Self::new()
    }
}
