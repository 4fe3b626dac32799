//! Object identity for CMK widgets.
//!
//! Every widget carries an [`ObjectBase`] holding a process-unique
//! [`ObjectId`] and an optional, explicitly set display name.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for an object.
///
/// IDs are allocated from a monotonically increasing counter and are never
/// reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Convert the ObjectId to a raw u64 value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Base trait for all CMK objects.
pub trait Object {
    /// Get this object's unique ID.
    fn object_id(&self) -> ObjectId;
}

/// Common identity state embedded in every widget.
///
/// # Example
///
/// ```
/// use cmk_core::ObjectBase;
///
/// let mut base = ObjectBase::new();
/// assert_eq!(base.name(), None);
/// base.set_name("ok-button");
/// assert_eq!(base.name(), Some("ok-button"));
/// ```
#[derive(Debug)]
pub struct ObjectBase {
    id: ObjectId,
    name: Option<String>,
}

impl ObjectBase {
    /// Create a new ObjectBase with a fresh ID and no name.
    pub fn new() -> Self {
        Self {
            id: ObjectId::next(),
            name: None,
        }
    }

    /// Get the object's ID.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the explicitly set name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the object's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Remove the object's name.
    pub fn clear_name(&mut self) {
        self.name = None;
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for ObjectBase {
    fn object_id(&self) -> ObjectId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ObjectBase::new();
        let b = ObjectBase::new();
        assert_ne!(a.id(), b.id());
        assert!(b.id().as_raw() > a.id().as_raw());
    }

    #[test]
    fn test_name_set_and_clear() {
        let mut base = ObjectBase::new();
        base.set_name("");
        assert_eq!(base.name(), Some(""));
        base.clear_name();
        assert_eq!(base.name(), None);
    }
}
