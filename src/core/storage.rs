use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;
use crate::error::PhysicsError;
use crate::Result;

/// Identifier types handed out by the world
pub trait Handle: Copy + Ord + Debug {
    /// Builds a handle from its raw id
    fn from_raw(id: u32) -> Self;

    /// Returns the raw id
    fn raw(&self) -> u32;
}

/// Hands out unique, increasing handles
///
/// Several storages can share one allocator so that a handle never refers to
/// two items, e.g. static and dynamic bodies.
#[derive(Debug, Clone)]
pub struct HandleAllocator<H> {
    next_id: u32,
    _marker: PhantomData<H>,
}

impl<H: Handle> HandleAllocator<H> {
    /// Creates a new allocator
    pub fn new() -> Self {
        Self {
            next_id: 1, // Start at 1, so 0 can represent invalid handle
            _marker: PhantomData,
        }
    }

    /// Returns a fresh handle
    pub fn allocate(&mut self) -> H {
        let handle = H::from_raw(self.next_id);
        self.next_id += 1;
        handle
    }
}

impl<H: Handle> Default for HandleAllocator<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle-keyed storage with deterministic (handle-ordered) iteration
#[derive(Debug, Clone)]
pub struct Storage<H, T> {
    items: BTreeMap<H, T>,
}

impl<H: Handle, T> Storage<H, T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Inserts an item under a handle obtained from a [`HandleAllocator`]
    pub fn insert(&mut self, handle: H, item: T) {
        self.items.insert(handle, item);
    }

    /// Gets a reference to an item by its handle
    pub fn get(&self, handle: H) -> Option<&T> {
        self.items.get(&handle)
    }

    /// Gets a mutable reference to an item by its handle
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    /// Removes an item from the storage
    pub fn remove(&mut self, handle: H) -> Option<T> {
        self.items.remove(&handle)
    }

    /// Returns whether the handle is stored
    pub fn contains(&self, handle: H) -> bool {
        self.items.contains_key(&handle)
    }

    /// Returns the number of items in the storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all items from the storage
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns all handles in ascending order
    pub fn handles(&self) -> Vec<H> {
        self.items.keys().copied().collect()
    }

    /// Returns an iterator over all items
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    /// Returns a mutable iterator over all items
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (H, &mut T)> + '_ {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }

    /// Gets a mutable reference to an item by its handle, returning an error if not found
    pub fn get_item_mut(&mut self, handle: H, what: &str) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("{} with handle {:?} not found", what, handle)))
    }
}

impl<H: Handle, T> Default for Storage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}
