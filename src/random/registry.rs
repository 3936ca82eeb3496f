//! Named samplers bound to a composer and redrawn on every access.

use super::parameter::ContinuousParameter;
use log::debug;
use rand::RngCore;

/// Handle to a sampler registered in a [`SamplerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerKey(usize);

#[derive(Debug)]
struct RegisteredSampler {
    name: String,
    sampler: Box<dyn ContinuousParameter>,
    n_samples: usize,
}

/// A set of named random attributes.
///
/// Nothing is cached: every [`SamplerRegistry::draw`] produces fresh values.
#[derive(Debug, Default)]
pub struct SamplerRegistry {
    entries: Vec<RegisteredSampler>,
}

impl SamplerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `sampler` under `name`, drawing `n_samples` values per access.
    ///
    /// Registering an existing name replaces its sampler and keeps its key.
    pub fn register_sampler(
        &mut self,
        name: &str,
        sampler: Box<dyn ContinuousParameter>,
        n_samples: usize,
    ) -> SamplerKey {
        debug!("registering sampler '{name}' ({sampler:?}) with {n_samples} samples");
        let entry = RegisteredSampler {
            name: name.to_string(),
            sampler,
            n_samples,
        };
        match self.position(name) {
            Some(idx) => {
                self.entries[idx] = entry;
                SamplerKey(idx)
            }
            None => {
                self.entries.push(entry);
                SamplerKey(self.entries.len() - 1)
            }
        }
    }

    /// Changes how many values a registered sampler draws per access.
    pub fn resize(&mut self, key: SamplerKey, n_samples: usize) {
        self.entries[key.0].n_samples = n_samples;
    }

    /// Draws a fresh set of values for a registered sampler.
    pub fn draw(&self, key: SamplerKey, rng: &mut dyn RngCore) -> Vec<f64> {
        let entry = &self.entries[key.0];
        entry.sampler.sample(entry.n_samples, rng)
    }

    /// Draws by name; `None` if nothing is registered under `name`.
    pub fn draw_named(&self, name: &str, rng: &mut dyn RngCore) -> Option<Vec<f64>> {
        self.key(name).map(|key| self.draw(key, rng))
    }

    pub fn key(&self, name: &str) -> Option<SamplerKey> {
        self.position(name).map(SamplerKey)
    }

    pub fn n_samples(&self, key: SamplerKey) -> usize {
        self.entries[key.0].n_samples
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::parameter::{ConstantParameter, UniformParameter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_register_and_draw() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut registry = SamplerRegistry::new();
        let key = registry.register_sampler("prob", Box::new(UniformParameter::unit()), 4);

        let first = registry.draw(key, &mut rng);
        let second = registry.draw(key, &mut rng);
        assert_eq!(first.len(), 4);
        assert_ne!(first, second);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["prob"]);
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut registry = SamplerRegistry::new();
        let a = registry.register_sampler("prob", Box::new(UniformParameter::unit()), 2);
        let b = registry.register_sampler("prob", Box::new(ConstantParameter(0.5)), 3);

        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.draw(a, &mut rng), vec![0.5; 3]);
    }

    #[test]
    fn test_resize_and_named_lookup() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut registry = SamplerRegistry::new();
        let key = registry.register_sampler("scale", Box::new(ConstantParameter(1.0)), 1);
        registry.resize(key, 5);

        assert_eq!(registry.n_samples(key), 5);
        assert_eq!(registry.draw_named("scale", &mut rng), Some(vec![1.0; 5]));
        assert_eq!(registry.draw_named("missing", &mut rng), None);
    }
}
