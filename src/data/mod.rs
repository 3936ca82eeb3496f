//! # Data Module
//!
//! Batch containers and the field transforms that augmentation pipelines
//! are usually built from.
//!
//! ## Key Components
//!
//! - [`Batch`]: positional or named tensors flowing through a pipeline
//! - [`Args`]: arguments of a single module call
//! - [`Transform`]: tensor-to-tensor transform
//! - [`OnKeys`]: module applying a [`Transform`] to selected batch fields
//!
//! ### Transforms
//! - [`Normalize`]: normalize with mean and std
//! - [`MinMaxScale`]: rescale into a range
//! - [`Clip`]: clamp values
//! - [`RandomNoise`]: add Gaussian noise for augmentation

pub mod batch;
pub mod transforms;

pub use batch::{Args, Batch, Fields, Tensor};
pub use transforms::{Clip, MinMaxScale, Normalize, OnKeys, RandomNoise, Transform};
