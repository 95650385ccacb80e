//! Identifier allocation
//!
//! Each scene node reserves a block of integer identifiers when it is
//! built; variable names are derived from them, so blocks never overlap
//! within one allocator.
//!
//! The allocator is an owned value threaded through tree construction
//! rather than a process-wide counter. `reserve` takes `&mut self`, so the
//! read-modify-write cannot race: a tree is built by whoever holds the
//! allocator, and building one tree from several threads means handing the
//! allocator around, never sharing it.

/// Monotonic identifier allocator
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Start counting at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `count` consecutive identifiers and return the first one.
    ///
    /// # Panics
    /// Panics if `count` is 0 or the identifier space is exhausted.
    pub fn reserve(&mut self, count: u32) -> u32 {
        assert!(count > 0, "identifier reservation must be non-empty");
        let base = self.next;
        self.next = base
            .checked_add(count)
            .expect("identifier space exhausted");
        base
    }

    /// The identifier the next reservation will start at
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Start again from 0. Trees built before and after a reset share names.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
