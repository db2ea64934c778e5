//! Calling layer — input validation, simulated latency, cancellation.

use lv_core::{Result, Settings, VeilConfig, VeilError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::time::Duration;

use crate::latency::{Latency, TokioLatency};
use crate::pass8_vmify::{Base64Encoder, StandardBase64};
use crate::pipeline::{Pipeline, PipelineResult};

/// Entry point used by the presentation layer.
pub struct Obfuscator<L: Latency = TokioLatency> {
    config: VeilConfig,
    latency: L,
    encoder: Box<dyn Base64Encoder>,
}

impl Obfuscator<TokioLatency> {
    pub fn new(config: VeilConfig) -> Self {
        Self::with_latency(config, TokioLatency)
    }
}

impl Default for Obfuscator<TokioLatency> {
    fn default() -> Self {
        Self::new(VeilConfig::default())
    }
}

impl<L: Latency> Obfuscator<L> {
    pub fn with_latency(config: VeilConfig, latency: L) -> Self {
        Self { config, latency, encoder: Box::new(StandardBase64) }
    }

    pub fn with_encoder(mut self, encoder: impl Base64Encoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn config(&self) -> &VeilConfig {
        &self.config
    }

    pub fn latency(&self) -> &L {
        &self.latency
    }

    /// Reject blank or oversized sources before any work starts.
    pub fn validate(&self, source: &str) -> Result<()> {
        if source.trim().is_empty() {
            tracing::warn!("rejected empty source");
            return Err(VeilError::EmptyInput);
        }
        if let Some(max) = self.config.max_input_bytes {
            if source.len() > max {
                tracing::warn!(len = source.len(), max, "rejected oversized source");
                return Err(VeilError::InputTooLarge { len: source.len(), max });
            }
        }
        Ok(())
    }

    fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::with_encoder(self.encoder.as_ref()).banner(self.config.banner)
    }

    /// Delay drawn uniformly from the configured window, zero when disabled.
    pub fn pick_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        if !self.config.latency.enabled {
            return Duration::ZERO;
        }
        let (lo, hi) = self.config.latency.window();
        let ms = rng.gen_range(lo.as_millis() as u64..=hi.as_millis() as u64);
        Duration::from_millis(ms)
    }

    /// Validate, wait out the simulated latency, then transform.
    pub async fn run(&self, source: &str, settings: &Settings) -> Result<PipelineResult> {
        self.run_cancellable(source, settings, std::future::pending()).await
    }

    /// As [`Self::run`] with a caller-supplied entropy source.
    pub async fn run_with_rng<R: Rng>(
        &self,
        source: &str,
        settings: &Settings,
        rng: R,
    ) -> Result<PipelineResult> {
        self.run_cancellable_with_rng(source, settings, rng, std::future::pending()).await
    }

    /// As [`Self::run`], abandoned with [`VeilError::Cancelled`] if `cancel`
    /// resolves during the latency window.
    pub async fn run_cancellable<F>(
        &self,
        source: &str,
        settings: &Settings,
        cancel: F,
    ) -> Result<PipelineResult>
    where
        F: Future<Output = ()>,
    {
        self.validate(source)?;
        self.wait_and_transform(source, settings, StdRng::from_entropy(), cancel).await
    }

    pub async fn run_cancellable_with_rng<R, F>(
        &self,
        source: &str,
        settings: &Settings,
        rng: R,
        cancel: F,
    ) -> Result<PipelineResult>
    where
        R: Rng,
        F: Future<Output = ()>,
    {
        self.validate(source)?;
        self.wait_and_transform(source, settings, rng, cancel).await
    }

    /// Latency race and transform for an already validated source.
    async fn wait_and_transform<R, F>(
        &self,
        source: &str,
        settings: &Settings,
        mut rng: R,
        cancel: F,
    ) -> Result<PipelineResult>
    where
        R: Rng,
        F: Future<Output = ()>,
    {
        let delay = self.pick_delay(&mut rng);
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::info!("run cancelled during latency window");
                return Err(VeilError::Cancelled);
            }
            _ = self.latency.wait(delay) => {}
        }
        Ok(self.transform(source, settings, rng))
    }

    /// Validate and transform with no latency.
    pub fn run_now<R: Rng>(&self, source: &str, settings: &Settings, rng: R) -> Result<PipelineResult> {
        self.validate(source)?;
        Ok(self.transform(source, settings, rng))
    }

    fn transform<R: Rng>(&self, source: &str, settings: &Settings, rng: R) -> PipelineResult {
        let result = self.pipeline().run(source, settings, rng);
        tracing::info!(
            preset = %settings.preset(),
            applied = result.applied_count,
            original_len = result.original_len,
            output_len = result.output_len,
            "obfuscation complete"
        );
        result
    }
}
