//! Continuous random parameters drawn by composers on every invocation.

use crate::error::{AugmentError, AugmentResult};
use rand::distr::Uniform;
use rand::RngCore;
use rand_distr::{Distribution, Normal};
use std::fmt;

/// A source of independent draws from a continuous distribution.
///
/// The generator is passed in by the owner so that all randomness of a
/// pipeline flows from one seedable source.
pub trait ContinuousParameter: Send + Sync + fmt::Debug {
    /// Draws `n` independent values.
    fn sample(&self, n: usize, rng: &mut dyn RngCore) -> Vec<f64>;
}

/// Adapter exposing any `rand_distr` distribution as a parameter.
#[derive(Debug, Clone)]
pub struct DistributionParameter<D> {
    dist: D,
}

impl<D> DistributionParameter<D>
where
    D: Distribution<f64> + Send + Sync + fmt::Debug,
{
    pub fn new(dist: D) -> Self {
        Self { dist }
    }
}

impl<D> ContinuousParameter for DistributionParameter<D>
where
    D: Distribution<f64> + Send + Sync + fmt::Debug,
{
    fn sample(&self, n: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        (0..n).map(|_| self.dist.sample(&mut *rng)).collect()
    }
}

/// Uniform distribution over `[low, high)`.
#[derive(Debug, Clone)]
pub struct UniformParameter {
    low: f64,
    high: f64,
    dist: Uniform<f64>,
}

impl UniformParameter {
    pub fn new(low: f64, high: f64) -> AugmentResult<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(AugmentError::InvalidSampler(format!(
                "uniform range [{low}, {high}) is empty or not finite"
            )));
        }
        let dist = Uniform::new(low, high)
            .map_err(|e| AugmentError::InvalidSampler(format!("uniform [{low}, {high}): {e}")))?;
        Ok(Self { low, high, dist })
    }

    /// The unit interval `[0, 1)`.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0).unwrap_or_else(|_| unreachable!("[0, 1) is a valid range"))
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Default for UniformParameter {
    fn default() -> Self {
        Self::unit()
    }
}

impl ContinuousParameter for UniformParameter {
    fn sample(&self, n: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        (0..n).map(|_| self.dist.sample(&mut *rng)).collect()
    }
}

/// Normal distribution with the given mean and standard deviation.
#[derive(Debug, Clone)]
pub struct NormalParameter {
    dist: Normal<f64>,
}

impl NormalParameter {
    /// `std` must be finite and non-negative.
    pub fn new(mean: f64, std: f64) -> AugmentResult<Self> {
        if !(mean.is_finite() && std.is_finite() && std >= 0.0) {
            return Err(AugmentError::InvalidSampler(format!(
                "normal({mean}, {std}) needs a finite mean and a finite non-negative std"
            )));
        }
        let dist = Normal::new(mean, std)
            .map_err(|e| AugmentError::InvalidSampler(format!("normal({mean}, {std}): {e}")))?;
        Ok(Self { dist })
    }

    pub fn mean(&self) -> f64 {
        self.dist.mean()
    }

    pub fn std(&self) -> f64 {
        self.dist.std_dev()
    }
}

impl ContinuousParameter for NormalParameter {
    fn sample(&self, n: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        (0..n).map(|_| self.dist.sample(&mut *rng)).collect()
    }
}

/// Always yields the same value. Mostly useful for pinning draws in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantParameter(pub f64);

impl ContinuousParameter for ConstantParameter {
    fn sample(&self, n: usize, _rng: &mut dyn RngCore) -> Vec<f64> {
        vec![self.0; n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unit_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let values = UniformParameter::unit().sample(1000, &mut rng);
        assert_eq!(values.len(), 1000);
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_uniform_custom_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let param = UniformParameter::new(2.0, 3.0).unwrap();
        assert_eq!((param.low(), param.high()), (2.0, 3.0));
        assert!(param.sample(100, &mut rng).iter().all(|v| (2.0..3.0).contains(v)));
    }

    #[test]
    fn test_uniform_rejects_empty_range() {
        assert!(matches!(
            UniformParameter::new(1.0, 1.0),
            Err(AugmentError::InvalidSampler(_))
        ));
    }

    #[test]
    fn test_normal_parameter() {
        let mut rng = StdRng::seed_from_u64(2);
        let param = NormalParameter::new(5.0, 0.1).unwrap();
        let values = param.sample(500, &mut rng);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!((mean - 5.0).abs() < 0.05);
        assert!(NormalParameter::new(0.0, -1.0).is_err());
    }

    #[test]
    fn test_normal_rejects_bad_std() {
        for std in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                NormalParameter::new(0.0, std),
                Err(AugmentError::InvalidSampler(_))
            ));
        }
        assert_eq!(NormalParameter::new(1.0, 0.0).unwrap().std(), 0.0);
    }

    #[test]
    fn test_uniform_sampled_through_distribution() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let param = UniformParameter::new(-1.0, 1.0).unwrap();
        let direct: Vec<f64> = (0..10)
            .map(|_| Uniform::new(-1.0, 1.0).unwrap().sample(&mut b))
            .collect();
        assert_eq!(param.sample(10, &mut a), direct);
    }

    #[test]
    fn test_constant_parameter() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(ConstantParameter(0.25).sample(3, &mut rng), vec![0.25; 3]);
    }

    #[test]
    fn test_distribution_parameter() {
        let mut rng = StdRng::seed_from_u64(4);
        let param = DistributionParameter::new(rand_distr::Exp::new(1.0).unwrap());
        assert!(param.sample(50, &mut rng).iter().all(|v| *v >= 0.0));
    }
}
