//! Batch containers passed through augmentation pipelines.

use ndarray::ArrayD;
use std::collections::BTreeMap;

/// Eager tensor type carried by batches.
pub type Tensor = ArrayD<f32>;

/// Named batch fields, ordered by key.
pub type Fields = BTreeMap<String, Tensor>;

/// A batch of tensors, either positional or named.
///
/// A transform may return a different shape than it received, so every stage
/// of a pipeline hands back a whole `Batch`.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    /// Positional values, unpacked as positional arguments.
    Sequence(Vec<Tensor>),
    /// Named values, unpacked as named arguments.
    Mapping(Fields),
}

impl Batch {
    /// Builds a mapping batch from `(name, tensor)` pairs.
    pub fn mapping<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Tensor)>,
    {
        Batch::Mapping(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a sequence batch.
    pub fn sequence(values: Vec<Tensor>) -> Self {
        Batch::Sequence(values)
    }

    /// Number of tensors in the batch.
    pub fn len(&self) -> usize {
        match self {
            Batch::Sequence(values) => values.len(),
            Batch::Mapping(fields) => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a named field. Always `None` for sequence batches.
    pub fn get(&self, key: &str) -> Option<&Tensor> {
        match self {
            Batch::Mapping(fields) => fields.get(key),
            Batch::Sequence(_) => None,
        }
    }

    /// Looks up a positional value. Always `None` for mapping batches.
    pub fn get_index(&self, index: usize) -> Option<&Tensor> {
        match self {
            Batch::Sequence(values) => values.get(index),
            Batch::Mapping(_) => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Batch::Mapping(_))
    }
}

impl Default for Batch {
    fn default() -> Self {
        Batch::Mapping(Fields::new())
    }
}

impl From<Fields> for Batch {
    fn from(fields: Fields) -> Self {
        Batch::Mapping(fields)
    }
}

impl From<Vec<Tensor>> for Batch {
    fn from(values: Vec<Tensor>) -> Self {
        Batch::Sequence(values)
    }
}

/// Arguments of a single module invocation.
///
/// Mirrors a call with positional and named arguments. Composers accept
/// either part but never both at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub positional: Vec<Tensor>,
    pub named: Fields,
}

impl Args {
    pub fn new(positional: Vec<Tensor>, named: Fields) -> Self {
        Self { positional, named }
    }

    /// Positional-only arguments.
    pub fn positional(values: Vec<Tensor>) -> Self {
        Self {
            positional: values,
            named: Fields::new(),
        }
    }

    /// Named-only arguments.
    pub fn named(fields: Fields) -> Self {
        Self {
            positional: Vec::new(),
            named: fields,
        }
    }

    /// Converts the arguments into a batch.
    ///
    /// An empty argument list becomes an empty mapping.
    ///
    /// # Panics
    ///
    /// Panics if both positional and named values are present.
    pub fn into_batch(self) -> Batch {
        assert!(
            self.positional.is_empty() || self.named.is_empty(),
            "batch data must be passed either positionally or by name, not both \
             (got {} positional and {} named values)",
            self.positional.len(),
            self.named.len()
        );
        if self.positional.is_empty() {
            Batch::Mapping(self.named)
        } else {
            Batch::Sequence(self.positional)
        }
    }
}

impl From<Batch> for Args {
    fn from(batch: Batch) -> Self {
        match batch {
            Batch::Sequence(values) => Args::positional(values),
            Batch::Mapping(fields) => Args::named(fields),
        }
    }
}
