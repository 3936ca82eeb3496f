//! Tensor transforms and the module that applies them to batch fields.

use crate::data::batch::{Args, Batch, Tensor};
use crate::error::{AugmentError, AugmentResult};
use crate::nn::module::{Device, Module};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Trait for tensor-to-tensor transforms.
pub trait Transform: Send {
    /// Applies the transform to one tensor.
    fn apply(&mut self, data: Tensor) -> Tensor;

    fn name(&self) -> &str {
        "Transform"
    }

    /// Called when the owning module is moved to another device.
    fn on_device(&mut self, _device: Device) {}
}

/// Normalization: (x - mean) / std.
pub struct Normalize {
    mean: f32,
    std: f32,
    device: Device,
}

impl Normalize {
    /// Creates a normalizer with fixed statistics.
    pub fn from_scalars(mean: f32, std: f32) -> Self {
        Self {
            mean,
            std: std.max(1e-8),
            device: Device::Cpu,
        }
    }

    /// Computes normalization statistics from data.
    pub fn fit(data: &Tensor) -> Self {
        let mean = data.mean().unwrap_or(0.0);
        let std = data.std(0.0);
        Self::from_scalars(mean, std)
    }

    pub fn device(&self) -> Device {
        self.device
    }
}

impl Transform for Normalize {
    fn apply(&mut self, data: Tensor) -> Tensor {
        let (mean, std) = (self.mean, self.std);
        data.mapv(|x| (x - mean) / std)
    }

    fn name(&self) -> &str {
        "Normalize"
    }

    fn on_device(&mut self, device: Device) {
        self.device = device;
    }
}

/// Rescales data into [min, max].
pub struct MinMaxScale {
    min_val: f32,
    max_val: f32,
}

impl MinMaxScale {
    /// Scales into [0, 1].
    pub fn new() -> Self {
        Self::with_range(0.0, 1.0)
    }

    pub fn with_range(min_val: f32, max_val: f32) -> Self {
        Self { min_val, max_val }
    }
}

impl Default for MinMaxScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for MinMaxScale {
    fn apply(&mut self, data: Tensor) -> Tensor {
        let data_min = data.iter().cloned().fold(f32::INFINITY, f32::min);
        let data_max = data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        let range = data_max - data_min;
        if range.abs() < 1e-8 {
            return data;
        }

        let target_range = self.max_val - self.min_val;
        let min_val = self.min_val;
        data.mapv(|x| (x - data_min) / range * target_range + min_val)
    }

    fn name(&self) -> &str {
        "MinMaxScale"
    }
}

/// Clips values into a range.
pub struct Clip {
    min_val: f32,
    max_val: f32,
}

impl Clip {
    pub fn new(min_val: f32, max_val: f32) -> Self {
        Self { min_val, max_val }
    }
}

impl Transform for Clip {
    fn apply(&mut self, data: Tensor) -> Tensor {
        let (lo, hi) = (self.min_val, self.max_val);
        data.mapv(|x| x.clamp(lo, hi))
    }

    fn name(&self) -> &str {
        "Clip"
    }
}

/// Adds zero-mean Gaussian noise.
///
/// Each call draws fresh noise from the transform's own generator, so a
/// seeded instance produces a reproducible sequence rather than the same
/// noise every time.
pub struct RandomNoise {
    noise: Normal<f32>,
    rng: StdRng,
}

impl RandomNoise {
    /// Creates a noise transform with the given standard deviation.
    pub fn new(std: f32) -> AugmentResult<Self> {
        if !(std.is_finite() && std >= 0.0) {
            return Err(AugmentError::InvalidSampler(format!(
                "noise std {std} must be finite and non-negative"
            )));
        }
        let noise = Normal::new(0.0, std)
            .map_err(|e| AugmentError::InvalidSampler(format!("noise std {std}: {e}")))?;
        Ok(Self {
            noise,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Reseeds the generator for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Transform for RandomNoise {
    fn apply(&mut self, mut data: Tensor) -> Tensor {
        for x in data.iter_mut() {
            *x += self.noise.sample(&mut self.rng);
        }
        data
    }

    fn name(&self) -> &str {
        "RandomNoise"
    }
}

/// Applies a [`Transform`] to selected fields of a batch.
///
/// Mapping batches have each field listed in `keys` transformed; missing
/// fields are skipped. Sequence batches have every value transformed.
pub struct OnKeys<T> {
    transform: T,
    keys: Vec<String>,
}

impl<T: Transform> OnKeys<T> {
    /// Applies `transform` to the `"data"` field.
    pub fn new(transform: T) -> Self {
        Self::with_keys(transform, ["data"])
    }

    pub fn with_keys<K, I>(transform: T, keys: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        Self {
            transform,
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn inner(&self) -> &T {
        &self.transform
    }
}

impl<T: Transform> Module for OnKeys<T> {
    fn forward(&mut self, args: Args) -> Batch {
        match args.into_batch() {
            Batch::Mapping(mut fields) => {
                for key in &self.keys {
                    match fields.remove(key) {
                        Some(value) => {
                            let out = self.transform.apply(value);
                            fields.insert(key.clone(), out);
                        }
                        None => warn!(
                            "{}: field '{}' missing from batch, skipping",
                            self.transform.name(),
                            key
                        ),
                    }
                }
                Batch::Mapping(fields)
            }
            Batch::Sequence(values) => Batch::Sequence(
                values
                    .into_iter()
                    .map(|v| self.transform.apply(v))
                    .collect(),
            ),
        }
    }

    fn name(&self) -> &str {
        self.transform.name()
    }

    fn on_device(&mut self, device: Device) {
        self.transform.on_device(device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batch::Fields;
    use ndarray::{arr1, ArrayD};

    fn tensor(values: &[f32]) -> Tensor {
        arr1(values).into_dyn()
    }

    #[test]
    fn test_normalize() {
        let mut norm = Normalize::from_scalars(2.5, 1.0);
        let result = norm.apply(tensor(&[1.0, 2.0, 3.0, 4.0]));

        assert!((result[0] - (-1.5)).abs() < 1e-6);
        assert!((result[3] - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_fit_centers_data() {
        let data = tensor(&[0.0, 10.0, 20.0, 30.0]);
        let mut norm = Normalize::fit(&data);
        let result = norm.apply(data);
        assert!(result.mean().unwrap().abs() < 1e-5);
    }

    #[test]
    fn test_min_max_scale() {
        let mut scale = MinMaxScale::new();
        let result = scale.apply(tensor(&[0.0, 25.0, 50.0, 100.0]));

        assert!((result[0] - 0.0).abs() < 1e-6);
        assert!((result[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_max_scale_constant_input_unchanged() {
        let mut scale = MinMaxScale::with_range(-1.0, 1.0);
        let result = scale.apply(tensor(&[3.0, 3.0]));
        assert_eq!(result, tensor(&[3.0, 3.0]));
    }

    #[test]
    fn test_clip() {
        let mut clip = Clip::new(0.0, 10.0);
        let result = clip.apply(tensor(&[-10.0, 0.0, 5.0, 10.0, 20.0]));

        assert_eq!(result[0], 0.0);
        assert_eq!(result[2], 5.0);
        assert_eq!(result[4], 10.0);
    }

    #[test]
    fn test_random_noise_seeded_is_reproducible() {
        let data = ArrayD::zeros(ndarray::IxDyn(&[8]));
        let a = RandomNoise::new(0.5).unwrap().with_seed(7).apply(data.clone());
        let b = RandomNoise::new(0.5).unwrap().with_seed(7).apply(data.clone());
        assert_eq!(a, b);
        assert!(a.iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_random_noise_rejects_negative_std() {
        for std in [-1.0, -0.1, f32::NAN] {
            assert!(matches!(
                RandomNoise::new(std),
                Err(AugmentError::InvalidSampler(_))
            ));
        }
        assert!(RandomNoise::new(0.0).is_ok());
    }

    #[test]
    fn test_on_keys_only_touches_listed_fields() {
        let mut module = OnKeys::with_keys(Clip::new(0.0, 1.0), ["data", "missing"]);
        let fields = Fields::from([
            ("data".to_string(), tensor(&[-1.0, 2.0])),
            ("label".to_string(), tensor(&[5.0])),
        ]);

        let out = module.forward(Args::named(fields));
        assert_eq!(out.get("data"), Some(&tensor(&[0.0, 1.0])));
        assert_eq!(out.get("label"), Some(&tensor(&[5.0])));
        assert_eq!(module.name(), "Clip");
    }

    #[test]
    fn test_on_keys_sequence_transforms_every_value() {
        let mut module = OnKeys::new(Clip::new(0.0, 1.0));
        let out = module.forward(Args::positional(vec![tensor(&[2.0]), tensor(&[-2.0])]));
        assert_eq!(out, Batch::Sequence(vec![tensor(&[1.0]), tensor(&[0.0])]));
    }

    #[test]
    fn test_on_keys_propagates_device() {
        let mut module = OnKeys::new(Normalize::from_scalars(0.0, 1.0));
        module.to(Device::Wgpu);
        assert_eq!(module.inner().device(), Device::Wgpu);
    }
}
