//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform collaborator
//! traits for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::config::TITLE_MAX;
use crate::ots::{ObjectAddParams, ObjectCreation, ObjectId, ObjectTransferService, ObjectType, OtsError};

/// Record of one `add` call seen by [`MockOts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedObject {
    /// Identifier handed out (or to be handed out, for deferred creation).
    pub id: ObjectId,
    /// Object type.
    pub object_type: ObjectType,
    /// Object name, truncated to [`TITLE_MAX`].
    pub name: heapless::String<TITLE_MAX>,
    /// Declared size.
    pub size: u32,
}

/// How [`MockOts`] answers add requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationMode {
    /// Return `Created` with the next identifier.
    Immediate,
    /// Return `Pending`; the test delivers the identifier itself.
    Deferred,
}

/// Mock Object Transfer Service.
///
/// Identifiers are allocated sequentially from
/// [`ObjectId::FIRST_ALLOCATABLE`], like a freshly initialised OTS instance.
pub struct MockOts {
    next_id: u64,
    mode: CreationMode,
    fail_at: Option<usize>,
    added: heapless::Vec<AddedObject, 64>,
}

impl MockOts {
    /// Create a mock that creates objects immediately.
    pub fn new() -> Self {
        Self {
            next_id: ObjectId::FIRST_ALLOCATABLE,
            mode: CreationMode::Immediate,
            fail_at: None,
            added: heapless::Vec::new(),
        }
    }

    /// Create a mock that defers object creation.
    pub fn deferred() -> Self {
        Self {
            mode: CreationMode::Deferred,
            ..Self::new()
        }
    }

    /// Make the `n`th add request (zero-based) fail with [`OtsError::NoSpace`].
    pub fn fail_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    /// All objects added so far, in order.
    pub fn added(&self) -> &[AddedObject] {
        &self.added
    }

    /// Identifier of the most recent add.
    pub fn last_id(&self) -> Option<ObjectId> {
        self.added.last().map(|o| o.id)
    }
}

impl Default for MockOts {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectTransferService for MockOts {
    fn add(&mut self, params: &ObjectAddParams<'_>) -> Result<ObjectCreation, OtsError> {
        if self.fail_at == Some(self.added.len()) {
            self.fail_at = None;
            return Err(OtsError::NoSpace);
        }
        let id = ObjectId::new(self.next_id).map_err(|_| OtsError::NoSpace)?;
        self.next_id = self.next_id.saturating_add(1);

        let mut name = heapless::String::new();
        for c in params.name.chars() {
            if name.push(c).is_err() {
                break;
            }
        }
        self.added
            .push(AddedObject {
                id,
                object_type: params.object_type,
                name,
                size: params.size,
            })
            .map_err(|_| OtsError::NoSpace)?;

        Ok(match self.mode {
            CreationMode::Immediate => ObjectCreation::Created(id),
            CreationMode::Deferred => ObjectCreation::Pending,
        })
    }
}
