//! Call adapters deciding how a batch is handed to each transform.

use crate::data::batch::{Args, Batch};
use crate::nn::module::Module;

/// Strategy invoking one transform on the current batch.
///
/// Any `Fn(Batch, &mut dyn Module) -> Batch` closure is an adapter.
pub trait TransformCall: Send + Sync {
    fn invoke(&self, batch: Batch, transform: &mut dyn Module) -> Batch;
}

impl<F> TransformCall for F
where
    F: Fn(Batch, &mut dyn Module) -> Batch + Send + Sync,
{
    fn invoke(&self, batch: Batch, transform: &mut dyn Module) -> Batch {
        self(batch, transform)
    }
}

/// Default adapter: mappings are unpacked into named arguments and
/// sequences into positional arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictCall;

impl TransformCall for DictCall {
    fn invoke(&self, batch: Batch, transform: &mut dyn Module) -> Batch {
        dict_call(batch, transform)
    }
}

/// Unpacks the batch for a single transform call.
pub fn dict_call(batch: Batch, transform: &mut dyn Module) -> Batch {
    transform.forward(Args::from(batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::module::wrap;
    use ndarray::arr0;

    #[test]
    fn test_dict_call_unpacks_mapping_as_named() {
        let mut t = wrap(|args: Args| {
            assert!(args.positional.is_empty());
            Batch::Mapping(args.named)
        });
        let batch = Batch::mapping([("x", arr0(1.0).into_dyn())]);
        assert_eq!(DictCall.invoke(batch.clone(), t.as_mut()), batch);
    }

    #[test]
    fn test_dict_call_unpacks_sequence_as_positional() {
        let mut t = wrap(|args: Args| {
            assert!(args.named.is_empty());
            Batch::Sequence(args.positional)
        });
        let batch = Batch::sequence(vec![arr0(1.0).into_dyn(), arr0(2.0).into_dyn()]);
        assert_eq!(DictCall.invoke(batch.clone(), t.as_mut()), batch);
    }

    #[test]
    fn test_closure_is_an_adapter() {
        let adapter = |batch: Batch, _t: &mut dyn Module| batch;
        let mut t = wrap(|_args: Args| Batch::default());
        let batch = Batch::sequence(vec![arr0(3.0).into_dyn()]);
        assert_eq!(adapter.invoke(batch.clone(), t.as_mut()), batch);
    }
}
