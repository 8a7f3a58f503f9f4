//! Fixed-capacity complex-sample buffer
//!
//! The FFT block's staging area: a write replaces the whole contents (never
//! appends), and "full" is a configurable threshold at or below capacity.
//! Toward the FFT block the buffer behaves as a queue — each run consumes
//! one transform-length of samples from the front and writes the remainder
//! back — but the primitive itself only knows replace/clear.

use crate::error::BufferError;
use num_complex::Complex64;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a [`SampleBuffer`]; the simulator is single-threaded.
pub type SharedBuffer = Rc<RefCell<SampleBuffer>>;

/// Fixed-capacity store of complex samples.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    capacity: usize,
    full_threshold: usize,
    contents: Vec<Complex64>,
}

impl SampleBuffer {
    /// Create an empty buffer.
    ///
    /// # Errors
    ///
    /// `ThresholdExceedsCapacity` when `full_threshold > capacity`.
    pub fn new(capacity: usize, full_threshold: usize) -> Result<Self, BufferError> {
        if full_threshold > capacity {
            return Err(BufferError::ThresholdExceedsCapacity {
                threshold: full_threshold,
                capacity,
            });
        }
        Ok(Self {
            capacity,
            full_threshold,
            contents: Vec::new(),
        })
    }

    /// Shared-handle constructor, the form the FFT block and classifier bind.
    ///
    /// # Errors
    ///
    /// `ThresholdExceedsCapacity` when `full_threshold > capacity`.
    pub fn shared(capacity: usize, full_threshold: usize) -> Result<SharedBuffer, BufferError> {
        Ok(Rc::new(RefCell::new(Self::new(capacity, full_threshold)?)))
    }

    /// Replace the entire contents.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded` when `samples.len() > capacity`; the previous
    /// contents are left untouched on failure.
    pub fn write(&mut self, samples: &[Complex64]) -> Result<(), BufferError> {
        if samples.len() > self.capacity {
            return Err(BufferError::CapacityExceeded {
                len: samples.len(),
                capacity: self.capacity,
            });
        }
        self.contents.clear();
        self.contents.extend_from_slice(samples);
        Ok(())
    }

    /// Current contents, front first.
    pub fn samples(&self) -> &[Complex64] {
        &self.contents
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.contents.clear();
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// True when no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// True when the stored length has reached the full threshold.
    pub fn is_full(&self) -> bool {
        self.contents.len() >= self.full_threshold
    }

    /// Hard ceiling on stored samples.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length at which the buffer reports full.
    pub const fn full_threshold(&self) -> usize {
        self.full_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(n: usize) -> Vec<Complex64> {
        (0..n).map(|i| Complex64::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn write_replaces_contents() {
        let mut buf = SampleBuffer::new(10, 5).unwrap();
        buf.write(&samples(5)).unwrap();
        assert_eq!(buf.len(), 5);
        buf.write(&samples(2)).unwrap();
        assert_eq!(buf.len(), 2, "write replaces, never appends");
    }

    #[test]
    fn full_at_threshold_not_capacity() {
        let mut buf = SampleBuffer::new(10, 5).unwrap();
        assert!(!buf.is_full());
        buf.write(&samples(5)).unwrap();
        assert!(buf.is_full());
    }

    #[test]
    fn clear_empties() {
        let mut buf = SampleBuffer::new(10, 5).unwrap();
        buf.write(&samples(10)).unwrap();
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn write_beyond_capacity_fails_and_preserves_contents() {
        let mut buf = SampleBuffer::new(10, 5).unwrap();
        buf.write(&samples(3)).unwrap();
        let err = buf.write(&samples(11)).unwrap_err();
        assert!(matches!(err, BufferError::CapacityExceeded { len: 11, capacity: 10 }));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn threshold_above_capacity_fails_at_construction() {
        let err = SampleBuffer::new(5, 10).unwrap_err();
        assert!(matches!(
            err,
            BufferError::ThresholdExceedsCapacity { threshold: 10, capacity: 5 }
        ));
    }

    #[test]
    fn empty_buffer_is_not_full() {
        let buf = SampleBuffer::new(10, 5).unwrap();
        assert!(buf.is_empty());
        assert!(!buf.is_full());
    }
}
