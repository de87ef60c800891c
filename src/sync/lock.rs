//! Data-owning lock built on [`RwSemaphore`]
//!
//! Pairs the semaphore with the value it protects so the value can only be
//! reached through a read or write guard, the same shape as `std::sync::RwLock`.

use crate::sync::semaphore::RwSemaphore;
use parking_lot::lock_api;

/// A value guarded by a writer-preferring [`RwSemaphore`]
pub type SemaphoreLock<T> = lock_api::RwLock<RwSemaphore, T>;

/// Shared access to the value in a [`SemaphoreLock`]
pub type SemaphoreReadGuard<'a, T> = lock_api::RwLockReadGuard<'a, RwSemaphore, T>;

/// Exclusive access to the value in a [`SemaphoreLock`]
pub type SemaphoreWriteGuard<'a, T> = lock_api::RwLockWriteGuard<'a, RwSemaphore, T>;
