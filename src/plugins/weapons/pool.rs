//! Generic entity pool: hands out and reclaims pre-spawned entities by handle.
//!
//! The pool knows nothing about what it stores. A factory builds the bundle for one new
//! entity; the pool spawns it and tracks ownership from then on.
//!
//! # Invariants
//! - Every handle the pool created is either in `free` or in `checked_out`, never both.
//! - `free.len() + checked_out.len() == created.len()` at all times.
//! - Only [`EntityPool::drain_and_destroy`] despawns pooled entities.

use std::collections::VecDeque;
use std::fmt;

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

/// Opaque identifier of one pooled entity, unique within its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PooledHandle(pub Entity);

impl PooledHandle {
    #[inline]
    pub fn entity(self) -> Entity {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The factory could not build a new entity.
    FactoryFailed { reason: String },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::FactoryFailed { reason } => {
                write!(f, "pool factory failed to build an entity: {reason}")
            }
        }
    }
}

impl std::error::Error for PoolError {}

pub type PoolFactory<T> = Box<dyn Fn() -> Result<T, PoolError> + Send + Sync>;

pub struct EntityPool<T: Bundle> {
    free: VecDeque<PooledHandle>,
    checked_out: HashSet<PooledHandle>,
    created: Vec<PooledHandle>,
    /// Number of entities spawned up front by [`EntityPool::prewarm`].
    capacity: usize,
    factory: PoolFactory<T>,
}

impl<T: Bundle> EntityPool<T> {
    pub fn new(
        capacity: usize,
        factory: impl Fn() -> Result<T, PoolError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            free: VecDeque::with_capacity(capacity),
            checked_out: HashSet::default(),
            created: Vec::with_capacity(capacity),
            capacity,
            factory: Box::new(factory),
        }
    }

    /// Spawn entities until the pool owns `capacity` of them. Returns how many were spawned.
    pub fn prewarm(&mut self, commands: &mut Commands) -> Result<usize, PoolError> {
        let missing = self.capacity.saturating_sub(self.created.len());
        for _ in 0..missing {
            let handle = self.spawn_one(commands)?;
            self.free.push_back(handle);
        }
        Ok(missing)
    }

    /// Check out the oldest returned entity, or grow by exactly one if none is free.
    pub fn acquire(&mut self, commands: &mut Commands) -> Result<PooledHandle, PoolError> {
        let handle = match self.free.pop_front() {
            Some(handle) => handle,
            None => {
                let handle = self.spawn_one(commands)?;
                debug!("Pool grew to {} entities", self.created.len());
                handle
            }
        };
        self.checked_out.insert(handle);
        Ok(handle)
    }

    /// Return a checked-out handle to the back of the free list.
    ///
    /// Releasing a handle that is not checked out (already free, or foreign to this pool) is a
    /// no-op and returns `false`.
    pub fn release(&mut self, handle: PooledHandle) -> bool {
        if !self.checked_out.remove(&handle) {
            return false;
        }
        self.free.push_back(handle);
        true
    }

    /// Despawn every entity this pool ever created, free or checked out, and empty the pool.
    ///
    /// Only valid at pool teardown. Returns the number of despawned entities.
    pub fn drain_and_destroy(&mut self, commands: &mut Commands) -> usize {
        let count = self.created.len();
        for handle in self.created.drain(..) {
            commands.entity(handle.entity()).try_despawn();
        }
        self.free.clear();
        self.checked_out.clear();
        count
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn checked_out_count(&self) -> usize {
        self.checked_out.len()
    }

    #[inline]
    pub fn total_created(&self) -> usize {
        self.created.len()
    }

    #[inline]
    pub fn is_checked_out(&self, handle: PooledHandle) -> bool {
        self.checked_out.contains(&handle)
    }

    pub fn is_free(&self, handle: PooledHandle) -> bool {
        self.free.contains(&handle)
    }

    /// Free handles in reuse order (front is handed out next).
    pub fn free_handles(&self) -> impl Iterator<Item = PooledHandle> + '_ {
        self.free.iter().copied()
    }

    fn spawn_one(&mut self, commands: &mut Commands) -> Result<PooledHandle, PoolError> {
        let bundle = (self.factory)()?;
        let handle = PooledHandle(commands.spawn(bundle).id());
        self.created.push(handle);
        Ok(handle)
    }
}

impl<T: Bundle> fmt::Debug for EntityPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityPool")
            .field("free", &self.free.len())
            .field("checked_out", &self.checked_out.len())
            .field("created", &self.created.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
