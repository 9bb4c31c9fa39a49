//! Single-threaded shared ownership.

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` provides interior mutability for a value of type `T` in a single-threaded context.
/// It uses `Rc<RefCell<T>>` internally. The streaming pipeline runs on one thread, so there is
/// no need for the atomic counting of `Arc` or for a lock.
///
/// Owners hold an `StResource`; observers that must not keep the value alive hold the
/// [`WeakStResource`] returned by [`StResource::downgrade`].
///
/// # Examples
///
/// ```
/// use voxel_streaming::core::StResource;
///
/// let counter = StResource::new(0);
/// *counter.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
///
/// let weak = counter.downgrade();
/// assert_eq!(*weak.upgrade().unwrap().get(), 1);
/// drop(counter);
/// assert!(weak.upgrade().is_none());
/// ```
///
/// # Panics
/// - Panics if a mutable borrow is requested while any other borrow is alive
/// - Panics if any borrow is requested while a mutable borrow is alive
pub struct StResource<T> {
    resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Returns a read-only guard that allows reading the contained value.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Returns a mutable guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }

    /// Creates a non-owning handle to the same value.
    pub fn downgrade(&self) -> WeakStResource<T> {
        WeakStResource {
            resource: Rc::downgrade(&self.resource),
        }
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resource, &other.resource)
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

/// A non-owning counterpart of [`StResource`].
///
/// Holding a `WeakStResource` never keeps the value alive; [`upgrade`](Self::upgrade) returns
/// `None` once every owning handle has been dropped.
pub struct WeakStResource<T> {
    resource: Weak<RefCell<T>>,
}

impl<T> WeakStResource<T> {
    /// Attempts to obtain an owning handle to the value.
    pub fn upgrade(&self) -> Option<StResource<T>> {
        self.resource
            .upgrade()
            .map(|resource| StResource { resource })
    }
}

impl<T> Clone for WeakStResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
