use crate::pipeline::stage::Stage;

/// Wrapper that reverses element order after its inner stage has run.
///
/// The inner output is materialized in full before the reversal, so this
/// stage assumes bounded input. Two nested reversals cancel out.
pub struct ReverseStage<T> {
    inner: Box<dyn Stage<T>>,
}

impl<T> ReverseStage<T> {
    pub fn new(inner: Box<dyn Stage<T>>) -> Self {
        ReverseStage { inner }
    }
}

impl<T> Stage<T> for ReverseStage<T> {
    fn apply(&self, input: &[T]) -> Vec<T> {
        let mut output = self.inner.apply(input);
        output.reverse();
        output
    }
}
