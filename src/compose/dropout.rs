//! Composition where every transform may be skipped at random.

use super::call::TransformCall;
use super::compose::Compose;
use super::config::{DropoutComposeConfig, DropoutSpec};
use crate::data::batch::{Args, Batch, Fields, Tensor};
use crate::error::{AugmentError, AugmentResult};
use crate::nn::module::{Module, ModuleList};
use crate::random::{ContinuousParameter, SamplerKey, SamplerRegistry, UniformParameter};
use log::debug;

/// Name under which the per-transform draws are registered.
pub const PROB_SAMPLER: &str = "prob";

/// A [`Compose`] that skips transforms at random.
///
/// On every call one value per transform is drawn from the registered
/// sampler (uniform over `[0, 1)` by default). Transform `i` runs only if
/// its draw is strictly greater than `dropout[i]`; otherwise the batch
/// passes through that stage unchanged. A threshold of `1.0` therefore
/// disables a transform under the default sampler, and `0.0` enables it
/// for every draw except exactly `0.0`.
pub struct DropoutCompose {
    compose: Compose,
    dropout_spec: DropoutSpec,
    dropout: Vec<f64>,
    samplers: SamplerRegistry,
    prob: SamplerKey,
}

impl DropoutCompose {
    /// Creates a dropout composer.
    ///
    /// `dropout` is either one threshold for all transforms or exactly one
    /// threshold per transform.
    pub fn new(
        transforms: impl Into<ModuleList>,
        dropout: impl Into<DropoutSpec>,
    ) -> AugmentResult<Self> {
        let compose = Compose::new(transforms);
        let dropout_spec = dropout.into();
        let dropout = dropout_spec.resolve(compose.len())?;

        let mut samplers = SamplerRegistry::new();
        let prob = samplers.register_sampler(
            PROB_SAMPLER,
            Box::new(UniformParameter::unit()),
            compose.len(),
        );
        debug!("DropoutCompose built with dropout {dropout:?}");

        Ok(Self {
            compose,
            dropout_spec,
            dropout,
            samplers,
            prob,
        })
    }

    /// Creates a dropout composer from a config.
    pub fn from_config(
        config: &DropoutComposeConfig,
        transforms: impl Into<ModuleList>,
    ) -> AugmentResult<Self> {
        let composer = Self::new(transforms, config.dropout.clone())?
            .with_shuffle(config.shuffle)
            .with_boxed_sampler(config.sampler.build()?);
        Ok(match config.seed {
            Some(seed) => composer.with_seed(seed),
            None => composer,
        })
    }

    /// Replaces the sampler drawing the per-transform values.
    pub fn with_sampler(self, sampler: impl ContinuousParameter + 'static) -> Self {
        self.with_boxed_sampler(Box::new(sampler))
    }

    pub fn with_boxed_sampler(mut self, sampler: Box<dyn ContinuousParameter>) -> Self {
        self.prob = self
            .samplers
            .register_sampler(PROB_SAMPLER, sampler, self.compose.len());
        self
    }

    /// Replaces the transform list.
    ///
    /// A scalar dropout is broadcast to the new length; a per-transform
    /// dropout must still match it. On a mismatch the composer is handed
    /// back untouched alongside the error.
    pub fn with_transforms(
        mut self,
        transforms: impl Into<ModuleList>,
    ) -> Result<Self, (Self, AugmentError)> {
        let transforms = transforms.into();
        let dropout = match self.dropout_spec.resolve(transforms.len()) {
            Ok(dropout) => dropout,
            Err(e) => return Err((self, e)),
        };
        self.dropout = dropout;
        self.compose = self.compose.with_transforms(transforms);
        self.samplers.resize(self.prob, self.compose.len());
        Ok(self)
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.compose = self.compose.with_shuffle(shuffle);
        self
    }

    pub fn with_transform_call(mut self, transform_call: impl TransformCall + 'static) -> Self {
        self.compose = self.compose.with_transform_call(transform_call);
        self
    }

    /// Reseeds the generator used for draws and shuffling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.compose = self.compose.with_seed(seed);
        self
    }

    /// Per-transform skip thresholds.
    pub fn dropout(&self) -> &[f64] {
        &self.dropout
    }

    pub fn samplers(&self) -> &SamplerRegistry {
        &self.samplers
    }

    pub fn transforms(&self) -> &ModuleList {
        self.compose.transforms()
    }

    pub fn transform_order(&self) -> &[usize] {
        self.compose.transform_order()
    }

    pub fn shuffle(&self) -> bool {
        self.compose.shuffle()
    }

    pub fn len(&self) -> usize {
        self.compose.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compose.is_empty()
    }

    /// Applies every transform whose draw exceeds its threshold.
    ///
    /// # Panics
    ///
    /// Panics if the sampler yields a different number of values than
    /// there are transforms.
    pub fn apply(&mut self, batch: Batch) -> Batch {
        let rand = self.samplers.draw(self.prob, self.compose.rng_mut());
        assert_eq!(
            rand.len(),
            self.dropout.len(),
            "sampler returned {} values for {} transforms",
            rand.len(),
            self.dropout.len()
        );
        let dropout = &self.dropout;
        self.compose.run(batch, |idx| rand[idx] > dropout[idx])
    }

    /// # Panics
    ///
    /// Panics if both `seq_like` and `map_like` hold values.
    pub fn call(&mut self, seq_like: Vec<Tensor>, map_like: Fields) -> Batch {
        self.forward(Args::new(seq_like, map_like))
    }
}

impl Module for DropoutCompose {
    fn forward(&mut self, args: Args) -> Batch {
        let batch = args.into_batch();
        self.apply(batch)
    }

    fn name(&self) -> &str {
        "DropoutCompose"
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.compose.children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Module> {
        self.compose.children_mut()
    }
}
