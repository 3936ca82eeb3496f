//! # Random Parameters
//!
//! Continuous samplers and the registry that binds them to composers.
//!
//! - [`ContinuousParameter`]: trait for drawing `n` independent values
//! - [`UniformParameter`], [`NormalParameter`], [`ConstantParameter`]
//! - [`DistributionParameter`]: adapter for any `rand_distr` distribution
//! - [`SamplerRegistry`]: named samplers, redrawn on every access

pub mod parameter;
pub mod registry;

pub use parameter::{
    ConstantParameter, ContinuousParameter, DistributionParameter, NormalParameter,
    UniformParameter,
};
pub use registry::{SamplerKey, SamplerRegistry};
