//! Content Control ID allocation.
//!
//! A CCID ties a content control service (MCS, TBS) to the audio stream it
//! controls. Values only need to be unique per device, so a wrapping counter
//! shared by every service is enough.

/// Hands out Content Control IDs in increasing order.
#[derive(Debug, Default)]
pub struct CcidAllocator {
    next: u8,
}

impl CcidAllocator {
    /// Create an allocator whose first value is 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Return the next unused CCID.
    pub fn allocate(&mut self) -> u8 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::CcidAllocator;

    #[test]
    fn test_ccid_values_are_sequential() {
        let mut ccids = CcidAllocator::new();
        assert_eq!(ccids.allocate(), 0);
        assert_eq!(ccids.allocate(), 1);
        assert_eq!(ccids.allocate(), 2);
    }

    #[test]
    fn test_ccid_wraps() {
        let mut ccids = CcidAllocator { next: u8::MAX };
        assert_eq!(ccids.allocate(), u8::MAX);
        assert_eq!(ccids.allocate(), 0);
    }
}
