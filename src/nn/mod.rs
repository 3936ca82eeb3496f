//! # Module System
//!
//! The interface every transform unit implements, so that composers can
//! hold them uniformly and propagate device moves to all of them.
//!
//! - [`Module`]: invoke and traverse children
//! - [`ModuleList`]: ordered container of boxed modules
//! - [`TransformWrapper`] / [`wrap`]: adapter for plain closures
//! - [`Device`]: where a module tree lives

pub mod module;

pub use module::{walk, wrap, Device, Module, ModuleList, TransformWrapper};
