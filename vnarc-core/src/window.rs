//! Sliding window for LZSS coding.
//!
//! Unlike the distance-addressed history of LZ77, the LZSS variants found in
//! visual-novel engines address their window by absolute ring-buffer index:
//! a back-reference names the slot where the copy starts. The window also
//! does not begin writing at slot 0. Each engine starts at a fixed
//! *initial position* over a window pre-filled with a constant byte, and the
//! compressed streams depend on both.

use crate::error::{Result, VnArcError};

/// A ring buffer addressed by absolute slot index.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// The underlying buffer.
    buffer: Vec<u8>,
    /// Which slots hold a byte (all of them when pre-filled).
    written: Vec<bool>,
    /// Current write position (next byte will be written here).
    position: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
}

impl SlidingWindow {
    /// Create a new window.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Must be a power of 2
    /// * `initial_position` - Slot where the first byte is written
    /// * `fill` - `Some(byte)` pre-fills every slot and makes it readable;
    ///   `None` leaves slots unreadable until written
    pub fn new(capacity: usize, initial_position: usize, fill: Option<u8>) -> Result<Self> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(VnArcError::invalid_config(format!(
                "window size must be a power of 2, got {}",
                capacity
            )));
        }
        if initial_position >= capacity {
            return Err(VnArcError::invalid_config(format!(
                "initial position {} outside a {}-byte window",
                initial_position, capacity
            )));
        }

        Ok(Self {
            buffer: vec![fill.unwrap_or(0); capacity],
            written: vec![fill.is_some(); capacity],
            position: initial_position,
            mask: capacity - 1,
        })
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Get the current write position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Wrap an arbitrary index into the window.
    #[inline]
    pub fn wrap(&self, index: usize) -> usize {
        index & self.mask
    }

    /// Write a single byte at the current position and advance.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.written[self.position] = true;
        self.position = (self.position + 1) & self.mask;
    }

    /// Read the byte at an absolute slot, or `None` if it was never written.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<u8> {
        let slot = slot & self.mask;
        self.written[slot].then(|| self.buffer[slot])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rejects_bad_geometry() {
        assert!(SlidingWindow::new(0, 0, Some(0)).is_err());
        assert!(SlidingWindow::new(100, 0, Some(0)).is_err());
        assert!(SlidingWindow::new(256, 256, Some(0)).is_err());
    }

    #[test]
    fn test_window_prefilled() {
        let window = SlidingWindow::new(256, 239, Some(0)).unwrap();
        assert_eq!(window.position(), 239);
        assert_eq!(window.get(0), Some(0));
        assert_eq!(window.get(255), Some(0));
    }

    #[test]
    fn test_window_wraparound() {
        let mut window = SlidingWindow::new(4, 2, None).unwrap();
        assert_eq!(window.get(2), None);

        for byte in [b'a', b'b', b'c'] {
            window.write_byte(byte);
        }

        assert_eq!(window.position(), 1);
        assert_eq!(window.get(2), Some(b'a'));
        assert_eq!(window.get(3), Some(b'b'));
        assert_eq!(window.get(0), Some(b'c'));
        assert_eq!(window.get(4), Some(b'c'));
        assert_eq!(window.get(1), None);
    }
}
