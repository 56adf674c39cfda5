use crate::pipeline::stage::Stage;

/// Caesar rotation over the 26-letter Latin alphabet.
///
/// Letters rotate within their own case; digits, punctuation, whitespace,
/// and anything outside ASCII pass through unchanged. The amount is
/// normalized into [0, 26) at construction, so negative and oversized
/// shifts are accepted: -1 behaves as 25, 29 behaves as 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftCipher {
    shift: u8,
}

impl ShiftCipher {
    pub fn new(shift: i64) -> Self {
        ShiftCipher {
            shift: shift.rem_euclid(26) as u8,
        }
    }

    /// Normalized shift amount in [0, 26).
    pub fn shift(&self) -> u8 {
        self.shift
    }

    /// The cipher that undoes this one.
    pub fn inverse(&self) -> Self {
        ShiftCipher::new(-(self.shift as i64))
    }

    fn rotate(&self, c: char) -> char {
        match c {
            'a'..='z' => (b'a' + (c as u8 - b'a' + self.shift) % 26) as char,
            'A'..='Z' => (b'A' + (c as u8 - b'A' + self.shift) % 26) as char,
            _ => c,
        }
    }
}

impl Stage<char> for ShiftCipher {
    fn apply(&self, input: &[char]) -> Vec<char> {
        input.iter().map(|&c| self.rotate(c)).collect()
    }
}
