//! Sequential composition of transform units.

use super::call::{DictCall, TransformCall};
use super::config::ComposeConfig;
use crate::data::batch::{Args, Batch, Fields, Tensor};
use crate::nn::module::{Module, ModuleList};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Applies a list of transforms one after another.
///
/// Each transform's output is the next transform's input. With `shuffle`
/// enabled the application order is a fresh uniform permutation on every
/// call. Reconfiguration goes through the consuming `with_*` methods, each
/// of which resets the order to the identity.
///
/// # Example
///
/// ```rust,ignore
/// let mut pipeline = Compose::new(vec![
///     Box::new(OnKeys::new(Normalize::from_scalars(0.5, 0.2))),
///     wrap(|args| args.into_batch()),
/// ])
/// .with_shuffle(true)
/// .with_seed(42);
///
/// let out = pipeline.apply(batch);
/// ```
pub struct Compose {
    transforms: ModuleList,
    order: Vec<usize>,
    shuffle: bool,
    transform_call: Box<dyn TransformCall>,
    rng: StdRng,
}

impl Compose {
    /// Creates a composer applying `transforms` in list order.
    pub fn new(transforms: impl Into<ModuleList>) -> Self {
        let transforms = transforms.into();
        let order = identity(transforms.len());
        debug!("Compose built with transforms {:?}", transforms.names());
        Self {
            transforms,
            order,
            shuffle: false,
            transform_call: Box::new(DictCall),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a composer from a config.
    pub fn from_config(config: &ComposeConfig, transforms: impl Into<ModuleList>) -> Self {
        let compose = Self::new(transforms).with_shuffle(config.shuffle);
        match config.seed {
            Some(seed) => compose.with_seed(seed),
            None => compose,
        }
    }

    /// Replaces the transform list. The order is reset to the identity.
    pub fn with_transforms(mut self, transforms: impl Into<ModuleList>) -> Self {
        self.transforms = transforms.into();
        self.order = identity(self.transforms.len());
        debug!("Compose transforms replaced with {:?}", self.transforms.names());
        self
    }

    /// Enables or disables shuffling. The order is reset to the identity.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self.order = identity(self.transforms.len());
        self
    }

    /// Replaces the call adapter.
    pub fn with_transform_call(mut self, transform_call: impl TransformCall + 'static) -> Self {
        self.transform_call = Box::new(transform_call);
        self
    }

    /// Reseeds the generator used for shuffling.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn transforms(&self) -> &ModuleList {
        &self.transforms
    }

    /// The order used by the most recent call, or the identity after a rebuild.
    pub fn transform_order(&self) -> &[usize] {
        &self.order
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Applies all transforms to `batch`.
    pub fn apply(&mut self, batch: Batch) -> Batch {
        self.run(batch, |_| true)
    }

    /// Applies all transforms to positional or named data.
    ///
    /// # Panics
    ///
    /// Panics if both `seq_like` and `map_like` hold values.
    pub fn call(&mut self, seq_like: Vec<Tensor>, map_like: Fields) -> Batch {
        self.forward(Args::new(seq_like, map_like))
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Traverses the transforms, running those for which `gate(idx)` holds.
    pub(crate) fn run(&mut self, batch: Batch, mut gate: impl FnMut(usize) -> bool) -> Batch {
        assert_eq!(
            self.transforms.len(),
            self.order.len(),
            "transform order does not match the number of transforms"
        );

        if self.shuffle {
            self.order.shuffle(&mut self.rng);
        }

        let mut data = batch;
        for &idx in &self.order {
            let transform = &mut self.transforms[idx];
            if gate(idx) {
                trace!("applying transform {idx} ({})", transform.name());
                data = self.transform_call.invoke(data, transform);
            } else {
                trace!("skipping transform {idx} ({})", transform.name());
            }
        }
        data
    }
}

impl Module for Compose {
    fn forward(&mut self, args: Args) -> Batch {
        let batch = args.into_batch();
        self.apply(batch)
    }

    fn name(&self) -> &str {
        "Compose"
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.transforms.iter().collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Module> {
        self.transforms.iter_mut().collect()
    }
}

fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}
