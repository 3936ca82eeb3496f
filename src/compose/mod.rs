//! # Composition Module
//!
//! Chains transform units into augmentation pipelines.
//!
//! - [`Compose`]: apply transforms in list order or a fresh random order per call
//! - [`DropoutCompose`]: additionally skip each transform at random
//! - [`TransformCall`]: strategy deciding how a batch is handed to a transform
//!
//! ## Example
//!
//! ```ignore
//! use rustyaug::compose::DropoutCompose;
//! use rustyaug::data::{Clip, Normalize, OnKeys};
//!
//! let mut pipeline = DropoutCompose::new(
//!     vec![
//!         Box::new(OnKeys::new(Normalize::from_scalars(0.5, 0.25))),
//!         Box::new(OnKeys::new(Clip::new(-3.0, 3.0))),
//!     ],
//!     0.2,
//! )?
//! .with_shuffle(true)
//! .with_seed(7);
//!
//! let out = pipeline.apply(batch);
//! ```

pub mod call;
#[allow(clippy::module_inception)]
pub mod compose;
pub mod config;
pub mod dropout;

pub use call::{dict_call, DictCall, TransformCall};
pub use compose::Compose;
pub use config::{ComposeConfig, DropoutComposeConfig, DropoutSpec, SamplerConfig};
pub use dropout::{DropoutCompose, PROB_SAMPLER};
