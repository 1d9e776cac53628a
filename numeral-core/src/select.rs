//! Class selection from raw network scores

use core::fmt;

/// Number of output classes (digits 0-9)
pub const NUM_CLASSES: usize = 10;

/// Predicted digit, always in `0..NUM_CLASSES`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PredictedClass(u8);

impl PredictedClass {
    /// Wrap a class index, `None` if out of range
    pub fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_CLASSES {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Class index
    pub fn index(self) -> u8 {
        self.0
    }

    /// ASCII character of the digit
    pub fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for PredictedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of the maximum score
///
/// Scans left to right and only replaces the best on a strictly greater
/// score, so ties resolve to the lowest index.
pub fn argmax(scores: &[i8]) -> Option<usize> {
    let (&first, rest) = scores.split_first()?;
    let mut best = 0;
    let mut best_score = first;
    for (i, &score) in rest.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best = i + 1;
        }
    }
    Some(best)
}

/// Reduce the output tensor to a predicted class
///
/// Only the first [`NUM_CLASSES`] scores are considered.
pub fn select(scores: &[i8]) -> Option<PredictedClass> {
    let scores = &scores[..scores.len().min(NUM_CLASSES)];
    argmax(scores).and_then(|i| PredictedClass::new(i as u8))
}
