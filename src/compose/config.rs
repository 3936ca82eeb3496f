//! Serializable composer configuration.

use crate::error::{AugmentError, AugmentResult};
use crate::random::{ConstantParameter, ContinuousParameter, NormalParameter, UniformParameter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Dropout thresholds: one value for every transform, or one per transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropoutSpec {
    Scalar(f64),
    PerTransform(Vec<f64>),
}

impl DropoutSpec {
    /// Expands to exactly `n` thresholds.
    pub fn resolve(&self, n: usize) -> AugmentResult<Vec<f64>> {
        match self {
            DropoutSpec::Scalar(p) => Ok(vec![*p; n]),
            DropoutSpec::PerTransform(ps) if ps.len() == n => Ok(ps.clone()),
            DropoutSpec::PerTransform(ps) => Err(AugmentError::DropoutLength {
                found: ps.len(),
                expected: n,
            }),
        }
    }
}

impl Default for DropoutSpec {
    fn default() -> Self {
        DropoutSpec::Scalar(0.5)
    }
}

impl From<f64> for DropoutSpec {
    fn from(p: f64) -> Self {
        DropoutSpec::Scalar(p)
    }
}

impl From<Vec<f64>> for DropoutSpec {
    fn from(ps: Vec<f64>) -> Self {
        DropoutSpec::PerTransform(ps)
    }
}

impl From<&[f64]> for DropoutSpec {
    fn from(ps: &[f64]) -> Self {
        DropoutSpec::PerTransform(ps.to_vec())
    }
}

/// Random sampler selection for [`DropoutComposeConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SamplerConfig {
    Uniform { low: f64, high: f64 },
    Normal { mean: f64, std: f64 },
    Constant { value: f64 },
}

impl SamplerConfig {
    pub fn build(&self) -> AugmentResult<Box<dyn ContinuousParameter>> {
        let sampler: Box<dyn ContinuousParameter> = match *self {
            SamplerConfig::Uniform { low, high } => Box::new(UniformParameter::new(low, high)?),
            SamplerConfig::Normal { mean, std } => Box::new(NormalParameter::new(mean, std)?),
            SamplerConfig::Constant { value } => Box::new(ConstantParameter(value)),
        };
        Ok(sampler)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig::Uniform {
            low: 0.0,
            high: 1.0,
        }
    }
}

/// Configuration of a [`crate::compose::Compose`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Apply transforms in a fresh random order on every call.
    pub shuffle: bool,
    /// Seed for the composer's generator; entropy when absent.
    pub seed: Option<u64>,
}

impl ComposeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> AugmentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> AugmentResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> AugmentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration of a [`crate::compose::DropoutCompose`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropoutComposeConfig {
    pub shuffle: bool,
    pub seed: Option<u64>,
    /// Skip thresholds; a transform runs only when its draw exceeds its threshold.
    pub dropout: DropoutSpec,
    pub sampler: SamplerConfig,
}

impl DropoutComposeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_dropout(mut self, dropout: impl Into<DropoutSpec>) -> Self {
        self.dropout = dropout.into();
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn from_json(json: &str) -> AugmentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> AugmentResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> AugmentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
