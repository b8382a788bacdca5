//! Entity handles.
//!
//! Contracts and criteria live in one handle space. Handles are allocated by
//! the world in creation order and never reused, so ordering by handle is
//! ordering by creation.
//!
//! ```
//! use contract_criteria::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::new();
//! let contract = ids.alloc();
//! let criterion = ids.alloc();
//!
//! assert_eq!(contract, EntityId(0));
//! assert!(criterion > contract);
//! ```

use serde::{Deserialize, Serialize};

/// Handle for a contract or criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a handle from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic handle allocator.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next handle.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of handles handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
