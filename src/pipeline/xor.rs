use crate::pipeline::stage::Stage;

/// XOR mask over bytes.
///
/// Every byte is XORed with the same fixed mask. Output length equals
/// input length, and the transform is its own inverse: applying the same
/// mask twice restores the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorCipher {
    mask: u8,
}

impl XorCipher {
    pub fn new(mask: u8) -> Self {
        XorCipher { mask }
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }
}

impl Stage<u8> for XorCipher {
    fn apply(&self, input: &[u8]) -> Vec<u8> {
        input.iter().map(|&b| b ^ self.mask).collect()
    }
}
