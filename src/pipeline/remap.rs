use crate::error::{Result, ScytaleError};
use crate::pipeline::stage::Stage;

/// Element domains a remap stage can fold.
///
/// Fixes the target alphabet per domain: text folds into capitals starting
/// at 'A', bytes fold into the range `0..modulus`.
pub trait Symbol: Copy + Send + Sync + 'static {
    fn remap(self, modulus: u32) -> Self;
}

impl Symbol for char {
    fn remap(self, modulus: u32) -> Self {
        let folded = 'A' as u32 + (self as u32 % modulus);
        // A large modulus can land the fold in the surrogate gap or past
        // the last scalar; those become U+FFFD.
        char::from_u32(folded).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl Symbol for u8 {
    fn remap(self, modulus: u32) -> Self {
        (self as u32 % modulus) as u8
    }
}

/// Wrapper that folds its inner stage's output into a reduced alphabet.
///
/// Each element becomes `base + (value mod modulus)`. The fold is lossy
/// whenever the modulus is smaller than the source alphabet and cannot be
/// undone; a modulus of 1 collapses everything to the base symbol.
pub struct RemapStage<T> {
    inner: Box<dyn Stage<T>>,
    modulus: u32,
}

impl<T> RemapStage<T> {
    /// A zero modulus is rejected here, before the stage can ever run.
    pub fn new(inner: Box<dyn Stage<T>>, modulus: u32) -> Result<Self> {
        if modulus == 0 {
            return Err(ScytaleError::InvalidModulus(modulus));
        }
        Ok(RemapStage { inner, modulus })
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }
}

impl<T: Symbol> Stage<T> for RemapStage<T> {
    fn apply(&self, input: &[T]) -> Vec<T> {
        self.inner
            .apply(input)
            .into_iter()
            .map(|v| v.remap(self.modulus))
            .collect()
    }
}
