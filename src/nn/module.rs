//! Module defining the core `Module` trait shared by every transform unit.

use crate::data::batch::{Args, Batch};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Compute device a module tree lives on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    #[default]
    Cpu,
    Wgpu,
}

/// Trait defining the common interface for all transform units.
///
/// Composers hold their transforms as modules so that device moves and
/// traversal reach every nested transform uniformly.
pub trait Module: Send {
    /// Runs the module on one set of call arguments.
    fn forward(&mut self, args: Args) -> Batch;

    /// Short human-readable name, used in logs.
    fn name(&self) -> &str {
        "Module"
    }

    /// Direct child modules, in application order.
    fn children(&self) -> Vec<&dyn Module> {
        Vec::new()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Module> {
        Vec::new()
    }

    /// Hook for modules holding device-bound state. Children are handled by [`Module::to`].
    fn on_device(&mut self, _device: Device) {}

    /// Moves this module and all of its descendants to `device`.
    fn to(&mut self, device: Device) {
        self.on_device(device);
        for child in self.children_mut() {
            child.to(device);
        }
    }
}

/// Visits `module` and all of its descendants depth-first, parents before children.
pub fn walk(module: &dyn Module, f: &mut dyn FnMut(&dyn Module)) {
    f(module);
    for child in module.children() {
        walk(child, f);
    }
}

/// Proxy turning a plain closure into a [`Module`].
///
/// Holds no state of its own, so device moves leave it untouched.
pub struct TransformWrapper<F> {
    trafo: F,
}

impl<F> TransformWrapper<F>
where
    F: FnMut(Args) -> Batch + Send,
{
    pub fn new(trafo: F) -> Self {
        Self { trafo }
    }
}

impl<F> Module for TransformWrapper<F>
where
    F: FnMut(Args) -> Batch + Send,
{
    fn forward(&mut self, args: Args) -> Batch {
        (self.trafo)(args)
    }

    fn name(&self) -> &str {
        "TransformWrapper"
    }
}

/// Wraps a closure into a boxed module ready to be composed.
pub fn wrap<F>(trafo: F) -> Box<dyn Module>
where
    F: FnMut(Args) -> Batch + Send + 'static,
{
    Box::new(TransformWrapper::new(trafo))
}

/// Ordered, homogeneous container of modules.
#[derive(Default)]
pub struct ModuleList {
    modules: Vec<Box<dyn Module>>,
}

impl ModuleList {
    pub fn new(modules: Vec<Box<dyn Module>>) -> Self {
        Self { modules }
    }

    pub fn push(&mut self, module: Box<dyn Module>) {
        self.modules.push(module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Module> {
        self.modules.get(index).map(|m| m.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Module> {
        self.modules.iter().map(|m| m.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut dyn Module> {
        self.modules.iter_mut().map(|m| -> &mut dyn Module { m.as_mut() })
    }

    /// Module names in list order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|m| m.name().to_string()).collect()
    }
}

impl From<Vec<Box<dyn Module>>> for ModuleList {
    fn from(modules: Vec<Box<dyn Module>>) -> Self {
        Self::new(modules)
    }
}

impl From<Box<dyn Module>> for ModuleList {
    fn from(module: Box<dyn Module>) -> Self {
        Self::new(vec![module])
    }
}

impl FromIterator<Box<dyn Module>> for ModuleList {
    fn from_iter<I: IntoIterator<Item = Box<dyn Module>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for ModuleList {
    type Output = dyn Module;

    fn index(&self, index: usize) -> &Self::Output {
        self.modules[index].as_ref()
    }
}

impl IndexMut<usize> for ModuleList {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.modules[index].as_mut()
    }
}
