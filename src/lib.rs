//! # rustyaug: composable augmentation pipelines
//!
//! **rustyaug** chains data-augmentation transforms over batches of
//! `ndarray` tensors. Transforms run in list order or a fresh random order,
//! and can be skipped at random per call.
//!
//! ## Usage Example
//!
//! ```no_run
//! use ndarray::arr0;
//! use rustyaug::compose::Compose;
//! use rustyaug::data::{Args, Batch};
//! use rustyaug::nn::wrap;
//!
//! let add_one = wrap(|args: Args| {
//!     let mut fields = args.named;
//!     for v in fields.values_mut() {
//!         *v += 1.0;
//!     }
//!     Batch::Mapping(fields)
//! });
//! let double = wrap(|args: Args| {
//!     let mut fields = args.named;
//!     for v in fields.values_mut() {
//!         *v *= 2.0;
//!     }
//!     Batch::Mapping(fields)
//! });
//!
//! let mut pipeline = Compose::new(vec![add_one, double]);
//! let out = pipeline.apply(Batch::mapping([("x", arr0(1.0f32).into_dyn())]));
//! assert_eq!(out.get("x"), Some(&arr0(4.0f32).into_dyn()));
//! ```

pub mod compose;
pub mod data;
pub mod error;
pub mod nn;
pub mod random;

pub use compose::{Compose, DropoutCompose};
pub use error::{AugmentError, AugmentResult};
