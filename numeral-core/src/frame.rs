//! Frame assembly
//!
//! One classification cycle consumes exactly [`FRAME_LEN`] consecutive bytes
//! from the serial link: a 28x28 grayscale image in row-major order. There is
//! no delimiter and no resynchronization; the sender is responsible for the
//! byte count.

/// Image width in pixels
pub const FRAME_WIDTH: usize = 28;

/// Image height in pixels
pub const FRAME_HEIGHT: usize = 28;

/// Bytes per frame
pub const FRAME_LEN: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// Errors from frame assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame already holds [`FRAME_LEN`] bytes; reset before accepting more
    Full,
}

/// Accumulates a fixed-size image from a byte stream
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    buffer: [u8; FRAME_LEN],
    /// Write position, also the number of bytes accepted this cycle
    position: usize,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: [0; FRAME_LEN],
            position: 0,
        }
    }

    /// Append one byte at the write position
    pub fn accept(&mut self, byte: u8) -> Result<(), FrameError> {
        if self.is_full() {
            return Err(FrameError::Full);
        }
        self.buffer[self.position] = byte;
        self.position += 1;
        Ok(())
    }

    /// True once [`FRAME_LEN`] bytes have been accepted
    pub fn is_full(&self) -> bool {
        self.position == FRAME_LEN
    }

    /// Bytes accepted this cycle
    pub fn len(&self) -> usize {
        self.position
    }

    /// True before the first byte of a cycle
    pub fn is_empty(&self) -> bool {
        self.position == 0
    }

    /// Bytes still needed to complete the frame
    pub fn remaining(&self) -> usize {
        FRAME_LEN - self.position
    }

    /// Fraction of the frame received, in `[0.0, 1.0]`
    pub fn progress_fraction(&self) -> f32 {
        self.position as f32 / FRAME_LEN as f32
    }

    /// The completed frame, if full
    pub fn frame(&self) -> Option<&[u8; FRAME_LEN]> {
        if self.is_full() {
            Some(&self.buffer)
        } else {
            None
        }
    }

    /// Start a new cycle
    ///
    /// Old contents stay in memory but are overwritten before they are read
    /// again.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(assembler: &mut FrameAssembler, value: u8) {
        for _ in 0..FRAME_LEN {
            assembler.accept(value).unwrap();
        }
    }

    #[test]
    fn test_new_is_empty() {
        let assembler = FrameAssembler::new();
        assert!(assembler.is_empty());
        assert!(!assembler.is_full());
        assert_eq!(assembler.progress_fraction(), 0.0);
        assert_eq!(assembler.remaining(), FRAME_LEN);
        assert!(assembler.frame().is_none());
    }

    #[test]
    fn test_full_after_frame_len_bytes() {
        let mut assembler = FrameAssembler::new();
        for i in 0..FRAME_LEN - 1 {
            assembler.accept(i as u8).unwrap();
            assert!(!assembler.is_full());
        }
        assembler.accept(0xFF).unwrap();

        assert!(assembler.is_full());
        assert_eq!(assembler.progress_fraction(), 1.0);
        let frame = assembler.frame().unwrap();
        assert_eq!(frame[0], 0);
        assert_eq!(frame[10], 10);
        assert_eq!(frame[FRAME_LEN - 1], 0xFF);
    }

    #[test]
    fn test_accept_past_full_is_rejected() {
        let mut assembler = FrameAssembler::new();
        fill(&mut assembler, 1);
        assert_eq!(assembler.accept(2), Err(FrameError::Full));
        assert_eq!(assembler.len(), FRAME_LEN);
        assert_eq!(assembler.frame().unwrap()[FRAME_LEN - 1], 1);
    }

    #[test]
    fn test_reset_starts_new_cycle() {
        let mut assembler = FrameAssembler::new();
        fill(&mut assembler, 1);

        assembler.reset();
        assert_eq!(assembler.progress_fraction(), 0.0);
        assert!(assembler.frame().is_none());

        fill(&mut assembler, 9);
        assert!(assembler.is_full());
        assert!(assembler.frame().unwrap().iter().all(|&b| b == 9));
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut assembler = FrameAssembler::new();
        let mut last = assembler.progress_fraction();
        for _ in 0..FRAME_LEN {
            assembler.accept(0).unwrap();
            let now = assembler.progress_fraction();
            assert!(now >= last);
            last = now;
        }
    }
}
